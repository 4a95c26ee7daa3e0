use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, CreateProductOption, Product, ProductFilter, ProductOption, UpdateProduct,
    UpdateProductOption,
};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products with optional filters
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product and all its options by ID
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// List all options of a product
    async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>>;

    /// Get an option by ID, scoped to its parent product
    async fn get_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>>;

    /// Create a new option for a product
    async fn create_option(
        &self,
        product_id: Uuid,
        input: CreateProductOption,
    ) -> ProductResult<ProductOption>;

    /// Update an existing option, scoped to its parent product
    async fn update_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
        input: UpdateProductOption,
    ) -> ProductResult<ProductOption>;

    /// Delete an option, scoped to its parent product
    async fn delete_option(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    options: Arc<RwLock<HashMap<Uuid, ProductOption>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            options: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = Product::new(input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let needle = filter.name.map(|n| n.to_lowercase());

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| {
                needle
                    .as_ref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Apply pagination
        let result: Vec<Product> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let mut options = self.options.write().await;

        if products.remove(&id).is_some() {
            options.retain(|_, o| o.product_id != id);
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let options = self.options.read().await;

        let mut result: Vec<ProductOption> = options
            .values()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn get_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>> {
        let options = self.options.read().await;
        Ok(options
            .get(&option_id)
            .filter(|o| o.product_id == product_id)
            .cloned())
    }

    async fn create_option(
        &self,
        product_id: Uuid,
        input: CreateProductOption,
    ) -> ProductResult<ProductOption> {
        let products = self.products.read().await;
        if !products.contains_key(&product_id) {
            return Err(ProductError::NotFound(product_id));
        }

        let mut options = self.options.write().await;
        let option = ProductOption::new(product_id, input);
        options.insert(option.id, option.clone());

        tracing::info!(product_id = %product_id, option_id = %option.id, "Created product option");
        Ok(option)
    }

    async fn update_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
        input: UpdateProductOption,
    ) -> ProductResult<ProductOption> {
        let mut options = self.options.write().await;

        let option = options
            .get_mut(&option_id)
            .filter(|o| o.product_id == product_id)
            .ok_or(ProductError::OptionNotFound(option_id))?;
        option.apply_update(input);
        let updated = option.clone();

        tracing::info!(product_id = %product_id, option_id = %option_id, "Updated product option");
        Ok(updated)
    }

    async fn delete_option(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<bool> {
        let mut options = self.options.write().await;

        let matches = options
            .get(&option_id)
            .is_some_and(|o| o.product_id == product_id);

        if matches {
            options.remove(&option_id);
            tracing::info!(product_id = %product_id, option_id = %option_id, "Deleted product option");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_product(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: String::new(),
            price: dec!(99.99),
            delivery_price: dec!(4.99),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(sample_product("Samsung Galaxy S7")).await.unwrap();
        assert_eq!(product.name, "Samsung Galaxy S7");

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, product.id);
    }

    #[tokio::test]
    async fn test_list_filters_by_name_case_insensitive() {
        let repo = InMemoryProductRepository::new();

        repo.create(sample_product("Apple iPhone 6S")).await.unwrap();
        repo.create(sample_product("Samsung Galaxy S7")).await.unwrap();

        let filter = ProductFilter {
            name: Some("apple".to_string()),
            ..Default::default()
        };
        let result = repo.list(filter).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Apple iPhone 6S");
    }

    #[tokio::test]
    async fn test_list_returns_empty_for_no_match() {
        let repo = InMemoryProductRepository::new();
        repo.create(sample_product("Samsung Galaxy S7")).await.unwrap();

        let filter = ProductFilter {
            name: Some("nokia".to_string()),
            ..Default::default()
        };
        let result = repo.list(filter).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_options() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(sample_product("Samsung Galaxy S7")).await.unwrap();
        let option = repo
            .create_option(
                product.id,
                CreateProductOption {
                    name: "White".to_string(),
                    description: "White Samsung Galaxy S7".to_string(),
                },
            )
            .await
            .unwrap();

        let deleted = repo.delete(product.id).await.unwrap();
        assert!(deleted);

        let fetched = repo.get_option(product.id, option.id).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_option_lookup_scoped_to_parent() {
        let repo = InMemoryProductRepository::new();

        let product_a = repo.create(sample_product("Product A")).await.unwrap();
        let product_b = repo.create(sample_product("Product B")).await.unwrap();

        let option = repo
            .create_option(
                product_a.id,
                CreateProductOption {
                    name: "Red".to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();

        // Lookup through the wrong parent should find nothing
        let fetched = repo.get_option(product_b.id, option.id).await.unwrap();
        assert!(fetched.is_none());

        let fetched = repo.get_option(product_a.id, option.id).await.unwrap();
        assert!(fetched.is_some());
    }

    #[tokio::test]
    async fn test_create_option_for_missing_product_fails() {
        let repo = InMemoryProductRepository::new();

        let result = repo
            .create_option(
                Uuid::now_v7(),
                CreateProductOption {
                    name: "Red".to_string(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
