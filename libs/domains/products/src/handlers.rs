use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, CreateProductOption, Product, ProductFilter, ProductOption, UpdateProduct,
    UpdateProductOption,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        search_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_options,
        create_option,
        get_option,
        update_option,
        delete_option,
    ),
    components(
        schemas(
            Product,
            ProductOption,
            CreateProduct,
            UpdateProduct,
            CreateProductOption,
            UpdateProductOption,
            ProductFilter
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(search_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/options", get(list_options).post(create_option))
        .route(
            "/{id}/options/{option_id}",
            get(get_option).put(update_option).delete(delete_option),
        )
        .with_state(shared_service)
}

/// List products, optionally filtered by name
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products (empty when nothing matches)", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product and all its options
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all options of a product
#[utoipa::path(
    get,
    path = "/{id}/options",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "List of options (empty when the product has none)", body = Vec<ProductOption>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_options<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Vec<ProductOption>>> {
    let options = service.list_options(id).await?;
    Ok(Json(options))
}

/// Create a new option for a product
#[utoipa::path(
    post,
    path = "/{id}/options",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateProductOption,
    responses(
        (status = 201, description = "Option created successfully", body = ProductOption),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_option<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateProductOption>,
) -> ProductResult<impl IntoResponse> {
    let option = service.create_option(id, input).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

/// Get a single option of a product
#[utoipa::path(
    get,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("option_id" = Uuid, Path, description = "Option ID")
    ),
    responses(
        (status = 200, description = "Option found", body = ProductOption),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_option<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path((id, option_id)): Path<(Uuid, Uuid)>,
) -> ProductResult<Json<ProductOption>> {
    let option = service.get_option(id, option_id).await?;
    Ok(Json(option))
}

/// Update an option of a product
#[utoipa::path(
    put,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("option_id" = Uuid, Path, description = "Option ID")
    ),
    request_body = UpdateProductOption,
    responses(
        (status = 200, description = "Option updated successfully", body = ProductOption),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_option<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path((id, option_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(input): ValidatedJson<UpdateProductOption>,
) -> ProductResult<Json<ProductOption>> {
    let option = service.update_option(id, option_id, input).await?;
    Ok(Json(option))
}

/// Delete an option of a product
#[utoipa::path(
    delete,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("option_id" = Uuid, Path, description = "Option ID")
    ),
    responses(
        (status = 204, description = "Option deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_option<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path((id, option_id)): Path<(Uuid, Uuid)>,
) -> ProductResult<impl IntoResponse> {
    service.delete_option(id, option_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
