use super::common::{created_response, no_content_response, success_response, PaginationParams, RankRequest};
use crate::{
    dto::{Brand, BrandNames},
    errors::ApiError,
    search, ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

pub fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/brands", get(list_brands).post(create_brand))
        .route("/brands/names", get(brand_names))
        .route("/brands/names/rank", post(rank_brand_names))
        .route(
            "/brands/:id",
            get(get_brand).put(save_brand).delete(remove_brand),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    summary = "List brands",
    params(PaginationParams),
    responses(
        (status = 200, description = "Brands ordered by id", body = ApiResponse<Vec<Brand>>),
    ),
    tag = "Brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<Brand>> {
    let (limit, offset) = params.resolve(&state.config);
    Ok(success_response(
        state.services.brands.list_brands(limit, offset).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    summary = "Create an empty brand",
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<Brand>),
    ),
    tag = "Brands"
)]
pub async fn create_brand(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Brand>>), ApiError> {
    let brand = state.services.brands.create_brand().await?;
    Ok(created_response(brand))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    summary = "Get brand",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand", body = ApiResponse<Brand>),
        (status = 404, description = "Brand not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Brands"
)]
pub async fn get_brand(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Brand> {
    Ok(success_response(state.services.brands.get_brand(id).await?))
}

/// Saves the name and makes `products` the brand's full product list.
#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    summary = "Save brand",
    params(("id" = i32, Path, description = "Brand id")),
    request_body = Brand,
    responses(
        (status = 200, description = "Saved brand", body = ApiResponse<Brand>),
        (status = 400, description = "Unknown product ids", body = crate::errors::ErrorResponse),
        (status = 404, description = "Brand not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Brands"
)]
pub async fn save_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<Brand>,
) -> ApiResult<Brand> {
    record.id = id;
    Ok(success_response(
        state.services.brands.save_brand(record).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    summary = "Remove brand",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Brand removed"),
        (status = 404, description = "Brand not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Brands"
)]
pub async fn remove_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.brands.remove_brand(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/names",
    summary = "Brand names",
    responses(
        (status = 200, description = "Id and name of every brand", body = ApiResponse<Vec<BrandNames>>),
    ),
    tag = "Brands"
)]
pub async fn brand_names(State(state): State<AppState>) -> ApiResult<Vec<BrandNames>> {
    Ok(success_response(state.services.brands.brand_names().await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/brands/names/rank",
    summary = "Rank brand names",
    request_body = RankRequest<BrandNames>,
    responses(
        (status = 200, description = "Ranked names", body = ApiResponse<Vec<BrandNames>>),
    ),
    tag = "Brands"
)]
pub async fn rank_brand_names(
    State(state): State<AppState>,
    Json(request): Json<RankRequest<BrandNames>>,
) -> ApiResult<Vec<BrandNames>> {
    let names = match request.names {
        Some(names) => names,
        None => state.services.brands.brand_names().await?,
    };
    Ok(success_response(search::rank(names, &request.search)))
}
