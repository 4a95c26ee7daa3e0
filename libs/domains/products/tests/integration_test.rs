//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Database queries work correctly
//! - Constraints are enforced
//! - Transactions behave as expected
//! - Concurrent operations are handled properly

use domain_products::*;
use rust_decimal_macros::dec;
use test_utils::{assertions::*, TestDatabase, TestDataBuilder};
use uuid::Uuid;

fn sample_product(name: String) -> CreateProduct {
    CreateProduct {
        name,
        description: "Integration test product".to_string(),
        price: dec!(1024.99),
        delivery_price: dec!(16.99),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = sample_product(builder.name("product", "main"));

    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.price, dec!(1024.99));
    assert_eq!(created.delivery_price, dec!(16.99));

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved product id");
    assert_eq!(retrieved.name, created.name);
    assert_eq!(retrieved.price, created.price);
}

#[tokio::test]
async fn test_search_by_name_case_insensitive() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("search_name");

    repo.create(sample_product(format!(
        "Samsung-Galaxy-{}",
        builder.name("product", "a")
    )))
    .await
    .unwrap();
    repo.create(sample_product(format!(
        "Apple-iPhone-{}",
        builder.name("product", "b")
    )))
    .await
    .unwrap();

    // Upper-case needle must match lower-case storage and vice versa
    let filter = ProductFilter {
        name: Some("SAMSUNG".to_string()),
        ..Default::default()
    };
    let results = repo.list(filter).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].name.contains("Samsung"));

    // No match yields an empty list
    let filter = ProductFilter {
        name: Some("nokia".to_string()),
        ..Default::default()
    };
    let results = repo.list(filter).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_update_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let created = repo
        .create(sample_product(builder.name("product", "original")))
        .await
        .unwrap();

    let update = UpdateProduct {
        name: builder.name("product", "updated"),
        description: "Updated description".to_string(),
        price: dec!(1299.99),
        delivery_price: dec!(15.99),
    };

    let updated = repo.update(created.id, update).await.unwrap();

    assert_eq!(updated.name, builder.name("product", "updated"));
    assert_eq!(updated.description, "Updated description");
    assert_eq!(updated.price, dec!(1299.99));
    assert_eq!(updated.delivery_price, dec!(15.99));
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn test_update_missing_product_returns_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let update = UpdateProduct {
        name: "Ghost".to_string(),
        description: String::new(),
        price: dec!(1.00),
        delivery_price: dec!(1.00),
    };

    let result = repo.update(Uuid::new_v4(), update).await;
    assert!(
        matches!(result, Err(ProductError::NotFound(_))),
        "Expected NotFound error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_delete_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo
        .create(sample_product(builder.name("product", "to-delete")))
        .await
        .unwrap();

    // Delete should succeed
    let deleted = repo.delete(created.id).await.unwrap();
    assert!(deleted, "delete should return true");

    // Product should no longer exist
    let retrieved = repo.get_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none(), "product should be deleted");

    // Second delete should return false
    let deleted_again = repo.delete(created.id).await.unwrap();
    assert!(!deleted_again, "second delete should return false");
}

#[tokio::test]
async fn test_delete_product_cascades_to_options() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_cascade");

    let product = repo
        .create(sample_product(builder.name("product", "parent")))
        .await
        .unwrap();

    let option = repo
        .create_option(
            product.id,
            CreateProductOption {
                name: "White".to_string(),
                description: "White variant".to_string(),
            },
        )
        .await
        .unwrap();

    let deleted = repo.delete(product.id).await.unwrap();
    assert!(deleted);

    // Both the product and its options must be gone
    let retrieved_option = repo.get_option(product.id, option.id).await.unwrap();
    assert!(retrieved_option.is_none(), "options should cascade-delete");
}

#[tokio::test]
async fn test_option_crud() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("option_crud");

    let product = repo
        .create(sample_product(builder.name("product", "main")))
        .await
        .unwrap();

    // No options yet
    let options = repo.list_options(product.id).await.unwrap();
    assert!(options.is_empty());

    // Create
    let option = repo
        .create_option(
            product.id,
            CreateProductOption {
                name: "White".to_string(),
                description: "White variant".to_string(),
            },
        )
        .await
        .unwrap();
    assert_uuid_eq(option.product_id, product.id, "option product_id");

    // List
    let options = repo.list_options(product.id).await.unwrap();
    assert_eq!(options.len(), 1);

    // Update
    let updated = repo
        .update_option(
            product.id,
            option.id,
            UpdateProductOption {
                name: "Black".to_string(),
                description: "Black variant".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Black");
    assert_uuid_eq(updated.id, option.id, "updated option id");

    // Delete
    let deleted = repo.delete_option(product.id, option.id).await.unwrap();
    assert!(deleted);

    let retrieved = repo.get_option(product.id, option.id).await.unwrap();
    assert!(retrieved.is_none());
}

#[tokio::test]
async fn test_option_lookup_scoped_to_parent() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("option_scope");

    let product_a = repo
        .create(sample_product(builder.name("product", "a")))
        .await
        .unwrap();
    let product_b = repo
        .create(sample_product(builder.name("product", "b")))
        .await
        .unwrap();

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

    // Wrong parent finds nothing
    let fetched = repo.get_option(product_b.id, option.id).await.unwrap();
    assert!(fetched.is_none());

    // Wrong parent deletes nothing
    let deleted = repo.delete_option(product_b.id, option.id).await.unwrap();
    assert!(!deleted);

    let fetched = repo.get_option(product_a.id, option.id).await.unwrap();
    assert!(fetched.is_some());
}

#[tokio::test]
async fn test_pagination() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pagination");

    for i in 0..4 {
        repo.create(sample_product(builder.name("product", &format!("p{}", i))))
            .await
            .unwrap();
    }

    let filter = ProductFilter {
        limit: 2,
        offset: 0,
        ..Default::default()
    };
    let page1 = repo.list(filter.clone()).await.unwrap();
    assert_eq!(page1.len(), 2, "first page should have 2 items");

    let filter = ProductFilter { offset: 2, ..filter };
    let page2 = repo.list(filter).await.unwrap();
    assert_eq!(page2.len(), 2, "second page should have 2 items");

    let page1_ids: Vec<_> = page1.iter().map(|p| p.id).collect();
    assert!(
        page2.iter().all(|p| !page1_ids.contains(&p.id)),
        "pages should not overlap"
    );
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_validation() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);

    // Empty name should fail
    let input = CreateProduct {
        name: String::new(),
        description: String::new(),
        price: dec!(10.00),
        delivery_price: dec!(1.00),
    };
    let result = service.create_product(input).await;
    assert!(
        matches!(result, Err(ProductError::Validation(_))),
        "empty name should fail validation"
    );

    // Negative price should fail
    let input = CreateProduct {
        name: "Valid name".to_string(),
        description: String::new(),
        price: dec!(-10.00),
        delivery_price: dec!(1.00),
    };
    let result = service.create_product(input).await;
    assert!(
        matches!(result, Err(ProductError::Validation(_))),
        "negative price should fail validation"
    );
}

#[tokio::test]
async fn test_service_list_options_requires_existing_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);

    let result = service.list_options(Uuid::new_v4()).await;
    assert!(
        matches!(result, Err(ProductError::NotFound(_))),
        "listing options of a missing product should be NotFound"
    );
}

#[tokio::test]
async fn test_service_create_option_requires_existing_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);

    let result = service
        .create_option(
            Uuid::new_v4(),
            CreateProductOption {
                name: "Orphan".to_string(),
                description: String::new(),
            },
        )
        .await;
    assert!(
        matches!(result, Err(ProductError::NotFound(_))),
        "creating an option under a missing product should be NotFound"
    );
}

// ============================================================================
// Concurrent Operations Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_creates() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("concurrent");

    // Spawn multiple concurrent create operations
    let mut handles = vec![];
    for i in 0..5 {
        let repo_clone = PgProductRepository::new(db.connection());
        let name = builder.name("product", &format!("concurrent-{}", i));

        let handle = tokio::spawn(async move { repo_clone.create(sample_product(name)).await });

        handles.push(handle);
    }

    // Wait for all to complete
    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    // All should succeed
    assert_eq!(results.len(), 5);
    for result in results {
        assert!(result.is_ok(), "concurrent create should succeed");
    }

    // Verify all were created
    let filter = ProductFilter {
        name: Some(builder.name("product", "concurrent")),
        ..Default::default()
    };
    let all_products = repo.list(filter).await.unwrap();
    assert_eq!(all_products.len(), 5, "all products should be created");
}
