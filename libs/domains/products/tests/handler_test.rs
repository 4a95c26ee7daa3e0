//! Handler tests for Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! Unlike E2E tests, these test ONLY the products domain handlers,
//! not the full application with routing, docs, middleware, etc.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

fn app() -> (Router, ProductService<InMemoryProductRepository>) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    (handlers::router(service.clone()), service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_create(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        description: String::new(),
        price: dec!(1024.99),
        delivery_price: dec!(16.99),
    }
}

#[tokio::test]
async fn test_create_product_handler_returns_201() {
    let (app, _service) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Samsung Galaxy S7",
                "description": "Newest mobile product from Samsung",
                "price": "1024.99",
                "delivery_price": "16.99"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "Samsung Galaxy S7");
    assert_eq!(product.price, dec!(1024.99));
    assert_eq!(product.delivery_price, dec!(16.99));
}

#[tokio::test]
async fn test_create_product_handler_validates_input() {
    let (app, _service) = app();

    // Invalid name (empty string)
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "",
                "price": "10.00",
                "delivery_price": "1.00"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_handler_rejects_negative_price() {
    let (app, _service) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Samsung Galaxy S7",
                "price": "-1.00",
                "delivery_price": "1.00"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_product_handler_returns_200() {
    let (app, service) = app();

    let created = service
        .create_product(sample_create("Apple iPhone 6S"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, created.id);
    assert_eq!(product.name, "Apple iPhone 6S");
}

#[tokio::test]
async fn test_get_product_handler_returns_404_for_missing() {
    let (app, _service) = app();

    let missing_id = uuid::Uuid::new_v4();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", missing_id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product_handler_returns_400_for_bad_uuid() {
    let (app, _service) = app();

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_products_handler_returns_matches() {
    let (app, service) = app();

    service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();
    service
        .create_product(sample_create("Apple iPhone 6S"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/?name=samsung")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Samsung Galaxy S7");
}

#[tokio::test]
async fn test_search_products_handler_returns_empty_list_for_no_match() {
    let (app, service) = app();

    service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/?name=nokia")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // Empty match is 200 with an empty array, not 404
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_update_product_handler_returns_200() {
    let (app, service) = app();

    let created = service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Samsung Galaxy S8",
                "description": "Updated model",
                "price": "1199.99",
                "delivery_price": "16.99"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, created.id);
    assert_eq!(product.name, "Samsung Galaxy S8");
    assert_eq!(product.price, dec!(1199.99));
}

#[tokio::test]
async fn test_update_product_handler_returns_404_for_missing() {
    let (app, _service) = app();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", uuid::Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Ghost",
                "price": "1.00",
                "delivery_price": "1.00"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_handler_returns_204() {
    let (app, service) = app();

    let created = service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_product_lifecycle_through_handlers() {
    let (app, _service) = app();

    // Create
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Samsung Galaxy S7",
                "description": "Newest mobile product from Samsung",
                "price": "1024.99",
                "delivery_price": "16.99"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Product = json_body(response.into_body()).await;

    // Read back
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_options_handler_returns_404_for_missing_product() {
    let (app, _service) = app();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/options", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_options_handler_returns_empty_list() {
    let (app, service) = app();

    let created = service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/options", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let options: Vec<ProductOption> = json_body(response.into_body()).await;
    assert!(options.is_empty());
}

#[tokio::test]
async fn test_option_crud_through_handlers() {
    let (app, service) = app();

    let product = service
        .create_product(sample_create("Samsung Galaxy S7"))
        .await
        .unwrap();

    // Create
    let request = Request::builder()
        .method("POST")
        .uri(format!("/{}/options", product.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "White",
                "description": "White Samsung Galaxy S7"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let option: ProductOption = json_body(response.into_body()).await;
    assert_eq!(option.product_id, product.id);
    assert_eq!(option.name, "White");

    // Get
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/options/{}", product.id, option.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Update
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}/options/{}", product.id, option.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Black",
                "description": "Black Samsung Galaxy S7"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: ProductOption = json_body(response.into_body()).await;
    assert_eq!(updated.id, option.id);
    assert_eq!(updated.name, "Black");

    // Delete
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}/options/{}", product.id, option.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/options/{}", product.id, option.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_option_handler_scopes_to_parent_product() {
    let (app, service) = app();

    let product_a = service
        .create_product(sample_create("Product A"))
        .await
        .unwrap();
    let product_b = service
        .create_product(sample_create("Product B"))
        .await
        .unwrap();

    let option = service
        .create_option(
            product_a.id,
            CreateProductOption {
                name: "Red".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

    // Fetching A's option through B must 404
    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}/options/{}", product_b.id, option.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
