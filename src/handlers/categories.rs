use super::common::{created_response, no_content_response, success_response, PaginationParams, RankRequest};
use crate::{
    dto::{Category, CategoryNames},
    errors::ApiError,
    search, ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/names", get(category_names))
        .route("/categories/names/rank", post(rank_category_names))
        .route(
            "/categories/:id",
            get(get_category).put(save_category).delete(remove_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    summary = "List categories",
    params(PaginationParams),
    responses(
        (status = 200, description = "Categories ordered by id", body = ApiResponse<Vec<Category>>),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<Category>> {
    let (limit, offset) = params.resolve(&state.config);
    let categories = state
        .services
        .categories
        .list_categories(limit, offset)
        .await?;
    Ok(success_response(categories))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    summary = "Create an empty category",
    responses(
        (status = 201, description = "Category created", body = ApiResponse<Category>),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let category = state.services.categories.create_category().await?;
    Ok(created_response(category))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    summary = "Get category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Category> {
    Ok(success_response(
        state.services.categories.get_category(id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    summary = "Save category",
    params(("id" = i32, Path, description = "Category id")),
    request_body = Category,
    responses(
        (status = 200, description = "Saved category", body = ApiResponse<Category>),
        (status = 400, description = "Unknown product ids", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn save_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<Category>,
) -> ApiResult<Category> {
    record.id = id;
    let category = state.services.categories.save_category(record).await?;
    Ok(success_response(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    summary = "Remove category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category removed"),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Categories"
)]
pub async fn remove_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.categories.remove_category(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/names",
    summary = "Category names",
    responses(
        (status = 200, description = "Id and name of every category", body = ApiResponse<Vec<CategoryNames>>),
    ),
    tag = "Categories"
)]
pub async fn category_names(State(state): State<AppState>) -> ApiResult<Vec<CategoryNames>> {
    Ok(success_response(
        state.services.categories.category_names().await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories/names/rank",
    summary = "Rank category names",
    request_body = RankRequest<CategoryNames>,
    responses(
        (status = 200, description = "Ranked names", body = ApiResponse<Vec<CategoryNames>>),
    ),
    tag = "Categories"
)]
pub async fn rank_category_names(
    State(state): State<AppState>,
    Json(request): Json<RankRequest<CategoryNames>>,
) -> ApiResult<Vec<CategoryNames>> {
    let names = match request.names {
        Some(names) => names,
        None => state.services.categories.category_names().await?,
    };
    Ok(success_response(search::rank(names, &request.search)))
}
