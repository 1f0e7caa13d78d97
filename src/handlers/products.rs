use super::common::{created_response, no_content_response, success_response, PaginationParams, RankRequest};
use crate::{
    dto::{Brand, Category, Product, ProductNames, Supplier},
    errors::{ApiError, ServiceError},
    search, ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/names", get(product_names))
        .route("/products/names/rank", post(rank_product_names))
        .route(
            "/products/:id",
            get(get_product).put(save_product).delete(remove_product),
        )
        .route("/products/:id/brand", get(product_brand))
        .route("/products/:id/categories", get(product_categories))
        .route("/products/:id/suppliers", get(product_suppliers))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    summary = "List products",
    params(PaginationParams),
    responses(
        (status = 200, description = "Products ordered by id", body = ApiResponse<Vec<Product>>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<Product>> {
    let (limit, offset) = params.resolve(&state.config);
    let products = state.services.products.list_products(limit, offset).await?;
    Ok(success_response(products))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    summary = "Create an empty product",
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), ApiError> {
    let product = state.services.products.create_product().await?;
    Ok(created_response(product))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    summary = "Get product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Product> {
    let product = state.services.products.get_product(id).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    summary = "Save product",
    description = "Overwrites every field of the product. The id in the path wins over the body.",
    params(("id" = i32, Path, description = "Product id")),
    request_body = Product,
    responses(
        (status = 200, description = "Saved product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid quantities", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "UPC already in use", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn save_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<Product>,
) -> ApiResult<Product> {
    record.id = id;
    let product = state.services.products.save_product(record).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    summary = "Remove product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product removed"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.products.remove_product(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/products/names",
    summary = "Product names",
    responses(
        (status = 200, description = "Id, name and UPC of every product", body = ApiResponse<Vec<ProductNames>>),
    ),
    tag = "Products"
)]
pub async fn product_names(State(state): State<AppState>) -> ApiResult<Vec<ProductNames>> {
    let names = state.services.products.product_names().await?;
    Ok(success_response(names))
}

#[utoipa::path(
    post,
    path = "/api/v1/products/names/rank",
    summary = "Rank product names",
    description = "Orders names by similarity to `search`; numeric searches are matched against the UPC.",
    request_body = RankRequest<ProductNames>,
    responses(
        (status = 200, description = "Ranked names", body = ApiResponse<Vec<ProductNames>>),
    ),
    tag = "Products"
)]
pub async fn rank_product_names(
    State(state): State<AppState>,
    Json(request): Json<RankRequest<ProductNames>>,
) -> ApiResult<Vec<ProductNames>> {
    let names = match request.names {
        Some(names) => names,
        None => state.services.products.product_names().await?,
    };
    Ok(success_response(search::rank(names, &request.search)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/brand",
    summary = "Brand of a product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Brand", body = ApiResponse<Brand>),
        (status = 404, description = "Product not found or without brand", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn product_brand(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Brand> {
    let brand = state
        .services
        .products
        .product_brand(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} has no brand", id)))?;
    Ok(success_response(brand))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/categories",
    summary = "Categories of a product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<Category>>),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn product_categories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<Category>> {
    let categories = state.services.products.product_categories(id).await?;
    Ok(success_response(categories))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/suppliers",
    summary = "Suppliers of a product",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Suppliers", body = ApiResponse<Vec<Supplier>>),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn product_suppliers(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<Supplier>> {
    let suppliers = state.services.products.product_suppliers(id).await?;
    Ok(success_response(suppliers))
}
