use super::common::{created_response, no_content_response, success_response, PaginationParams, RankRequest};
use crate::{
    dto::{Supplier, SupplierNames},
    errors::ApiError,
    search, ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of the standalone contact checks
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactCheckRequest {
    pub input: String,
}

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route("/suppliers/names", get(supplier_names))
        .route("/suppliers/names/rank", post(rank_supplier_names))
        .route("/suppliers/validate/email", post(validate_email))
        .route("/suppliers/validate/phone", post(validate_phone_number))
        .route(
            "/suppliers/:id",
            get(get_supplier).put(save_supplier).delete(remove_supplier),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    summary = "List suppliers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Suppliers ordered by id", body = ApiResponse<Vec<Supplier>>),
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<Supplier>> {
    let (limit, offset) = params.resolve(&state.config);
    let suppliers = state
        .services
        .suppliers
        .list_suppliers(limit, offset)
        .await?;
    Ok(success_response(suppliers))
}

#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    summary = "Create an empty supplier",
    responses(
        (status = 201, description = "Supplier created", body = ApiResponse<Supplier>),
    ),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Supplier>>), ApiError> {
    let supplier = state.services.suppliers.create_supplier().await?;
    Ok(created_response(supplier))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    summary = "Get supplier",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Supplier> {
    Ok(success_response(
        state.services.suppliers.get_supplier(id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    summary = "Save supplier",
    description = "Requires a well-formed phone number and email. `products` replaces the supplied product list.",
    params(("id" = i32, Path, description = "Supplier id")),
    request_body = Supplier,
    responses(
        (status = 200, description = "Saved supplier", body = ApiResponse<Supplier>),
        (status = 400, description = "Invalid contact details or unknown product ids", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Suppliers"
)]
pub async fn save_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<Supplier>,
) -> ApiResult<Supplier> {
    record.id = id;
    let supplier = state.services.suppliers.save_supplier(record).await?;
    Ok(success_response(supplier))
}

#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    summary = "Remove supplier",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Supplier removed"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Suppliers"
)]
pub async fn remove_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.suppliers.remove_supplier(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/names",
    summary = "Supplier names",
    responses(
        (status = 200, description = "Id and name of every supplier", body = ApiResponse<Vec<SupplierNames>>),
    ),
    tag = "Suppliers"
)]
pub async fn supplier_names(State(state): State<AppState>) -> ApiResult<Vec<SupplierNames>> {
    Ok(success_response(
        state.services.suppliers.supplier_names().await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/suppliers/names/rank",
    summary = "Rank supplier names",
    request_body = RankRequest<SupplierNames>,
    responses(
        (status = 200, description = "Ranked names", body = ApiResponse<Vec<SupplierNames>>),
    ),
    tag = "Suppliers"
)]
pub async fn rank_supplier_names(
    State(state): State<AppState>,
    Json(request): Json<RankRequest<SupplierNames>>,
) -> ApiResult<Vec<SupplierNames>> {
    let names = match request.names {
        Some(names) => names,
        None => state.services.suppliers.supplier_names().await?,
    };
    Ok(success_response(search::rank(names, &request.search)))
}

/// An empty input counts as valid.
#[utoipa::path(
    post,
    path = "/api/v1/suppliers/validate/email",
    summary = "Check an email address",
    request_body = ContactCheckRequest,
    responses(
        (status = 200, description = "Whether the input is acceptable", body = ApiResponse<bool>),
    ),
    tag = "Suppliers"
)]
pub async fn validate_email(
    State(state): State<AppState>,
    Json(request): Json<ContactCheckRequest>,
) -> ApiResult<bool> {
    Ok(success_response(
        state.services.suppliers.validate_email(&request.input),
    ))
}

/// An empty input counts as valid.
#[utoipa::path(
    post,
    path = "/api/v1/suppliers/validate/phone",
    summary = "Check a phone number",
    request_body = ContactCheckRequest,
    responses(
        (status = 200, description = "Whether the input is acceptable", body = ApiResponse<bool>),
    ),
    tag = "Suppliers"
)]
pub async fn validate_phone_number(
    State(state): State<AppState>,
    Json(request): Json<ContactCheckRequest>,
) -> ApiResult<bool> {
    Ok(success_response(
        state.services.suppliers.validate_phone_number(&request.input),
    ))
}
