use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CreateProductOption, Product, ProductFilter, ProductOption, UpdateProduct,
    UpdateProductOption,
};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product with validation
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products, optionally narrowed by a name filter
    ///
    /// An empty match is a successful empty list, not an error.
    pub async fn search_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Update a product (full-record replacement)
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product and all its options
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// List all options of a product
    ///
    /// Fails with NotFound when the parent product does not exist; a
    /// product without options yields an empty list.
    pub async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        self.get_product(product_id).await?;
        self.repository.list_options(product_id).await
    }

    /// Get a single option of a product
    pub async fn get_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<ProductOption> {
        self.repository
            .get_option(product_id, option_id)
            .await?
            .ok_or(ProductError::OptionNotFound(option_id))
    }

    /// Create a new option for a product
    pub async fn create_option(
        &self,
        product_id: Uuid,
        input: CreateProductOption,
    ) -> ProductResult<ProductOption> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.get_product(product_id).await?;
        self.repository.create_option(product_id, input).await
    }

    /// Update an option (full-record replacement)
    pub async fn update_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
        input: UpdateProductOption,
    ) -> ProductResult<ProductOption> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .update_option(product_id, option_id, input)
            .await
    }

    /// Delete an option of a product
    pub async fn delete_option(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete_option(product_id, option_id).await?;

        if !deleted {
            return Err(ProductError::OptionNotFound(option_id));
        }

        Ok(())
    }
}
