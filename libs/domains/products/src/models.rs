use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Custom validator for monetary amounts
fn validate_non_negative(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if amount.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_amount"));
    }
    Ok(())
}

/// Product entity - a sellable item in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    #[schema(value_type = String, example = "1024.99")]
    pub price: Decimal,
    /// Delivery price
    #[schema(value_type = String, example = "16.99")]
    pub delivery_price: Decimal,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product option entity - a variant of a product (e.g. color, size)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductOption {
    /// Unique identifier
    pub id: Uuid,
    /// Parent product
    pub product_id: Uuid,
    /// Option name
    pub name: String,
    /// Option description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub description: String,
    #[schema(value_type = String, example = "1024.99")]
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,
    #[schema(value_type = String, example = "16.99")]
    #[validate(custom(function = "validate_non_negative"))]
    pub delivery_price: Decimal,
}

/// DTO for updating an existing product
///
/// Updates replace the full record, so all fields are required
/// except the description which defaults to empty.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub description: String,
    #[schema(value_type = String, example = "1099.99")]
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,
    #[schema(value_type = String, example = "16.99")]
    #[validate(custom(function = "validate_non_negative"))]
    pub delivery_price: Decimal,
}

/// DTO for creating a new product option
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductOption {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub description: String,
}

/// DTO for updating an existing product option
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductOption {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub description: String,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name
    pub name: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            name: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            delivery_price: input.delivery_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full-record update from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.delivery_price = update.delivery_price;
        self.updated_at = Utc::now();
    }
}

impl ProductOption {
    /// Create a new option for a product from CreateProductOption DTO
    pub fn new(product_id: Uuid, input: CreateProductOption) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            product_id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full-record update from UpdateProductOption DTO
    pub fn apply_update(&mut self, update: UpdateProductOption) {
        self.name = update.name;
        self.description = update.description;
        self.updated_at = Utc::now();
    }
}
