use super::common::{
    created_response, no_content_response, success_response, validate_input, PaginationParams,
};
use crate::{
    dto::{us_date, PendingOrder, Product, ReceivedOrder},
    errors::ApiError,
    services::orders::Receipt,
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to open a pending order for a product
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreatePendingOrderRequest {
    #[validate(range(min = 1, message = "product_id must be a positive id"))]
    pub product_id: i32,
}

/// Request to check in a pending order
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct ReceiveOrderRequest {
    /// `MM/DD/YYYY`; today when omitted
    #[serde(with = "us_date", default)]
    #[schema(value_type = Option<String>, example = "03/07/2024")]
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "actually_received must be non-negative"))]
    pub actually_received: f64,
    #[validate(range(min = 0.0, message = "damaged must be non-negative"))]
    pub damaged: f64,
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders/pending",
            get(list_pending_orders).post(create_pending_order),
        )
        .route(
            "/orders/pending/:id",
            get(get_pending_order)
                .put(save_pending_order)
                .delete(remove_pending_order),
        )
        .route("/orders/pending/:id/receive", post(receive_pending_order))
        .route("/orders/pending/:id/product", get(pending_order_product))
        .route("/orders/received", get(list_received_orders))
        .route(
            "/orders/received/:id",
            get(get_received_order)
                .put(save_received_order)
                .delete(remove_received_order),
        )
        .route("/orders/received/:id/product", get(received_order_product))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/pending",
    summary = "List pending orders",
    params(PaginationParams),
    responses(
        (status = 200, description = "Pending orders ordered by id", body = ApiResponse<Vec<PendingOrder>>),
    ),
    tag = "Orders"
)]
pub async fn list_pending_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<PendingOrder>> {
    let (limit, offset) = params.resolve(&state.config);
    let orders = state
        .services
        .orders
        .list_pending_orders(limit, offset)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders/pending",
    summary = "Open a pending order",
    request_body = CreatePendingOrderRequest,
    responses(
        (status = 201, description = "Pending order created with amount 0", body = ApiResponse<PendingOrder>),
        (status = 400, description = "Unknown product", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn create_pending_order(
    State(state): State<AppState>,
    Json(payload): Json<CreatePendingOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PendingOrder>>), ApiError> {
    validate_input(&payload)?;
    let order = state
        .services
        .orders
        .create_pending_order(payload.product_id)
        .await?;
    Ok(created_response(order))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/pending/{id}",
    summary = "Get pending order",
    params(("id" = i32, Path, description = "Pending order id")),
    responses(
        (status = 200, description = "Pending order", body = ApiResponse<PendingOrder>),
        (status = 404, description = "Pending order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn get_pending_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<PendingOrder> {
    Ok(success_response(
        state.services.orders.get_pending_order(id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/pending/{id}",
    summary = "Save pending order",
    params(("id" = i32, Path, description = "Pending order id")),
    request_body = PendingOrder,
    responses(
        (status = 200, description = "Saved pending order", body = ApiResponse<PendingOrder>),
        (status = 400, description = "Negative amount or unknown product", body = crate::errors::ErrorResponse),
        (status = 404, description = "Pending order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn save_pending_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<PendingOrder>,
) -> ApiResult<PendingOrder> {
    record.id = id;
    let order = state.services.orders.save_pending_order(record).await?;
    Ok(success_response(order))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/pending/{id}",
    summary = "Remove pending order",
    params(("id" = i32, Path, description = "Pending order id")),
    responses(
        (status = 204, description = "Pending order removed"),
        (status = 404, description = "Pending order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn remove_pending_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.orders.remove_pending_order(id).await?;
    Ok(no_content_response())
}

/// Converts the pending order into a received order and adds the
/// delivered quantity to the product's stock.
#[utoipa::path(
    post,
    path = "/api/v1/orders/pending/{id}/receive",
    summary = "Receive a pending order",
    params(("id" = i32, Path, description = "Pending order id")),
    request_body = ReceiveOrderRequest,
    responses(
        (status = 201, description = "Received order created", body = ApiResponse<ReceivedOrder>),
        (status = 400, description = "Quantities exceed the ordered amount", body = crate::errors::ErrorResponse),
        (status = 404, description = "Pending order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn receive_pending_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReceiveOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReceivedOrder>>), ApiError> {
    validate_input(&payload)?;
    let receipt = Receipt {
        date: payload.date,
        actually_received: payload.actually_received,
        damaged: payload.damaged,
    };
    let received = state.services.orders.mark_received(id, receipt).await?;
    Ok(created_response(received))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/pending/{id}/product",
    summary = "Product of a pending order",
    params(("id" = i32, Path, description = "Pending order id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Pending order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn pending_order_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Product> {
    Ok(success_response(
        state.services.orders.pending_order_product(id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/received",
    summary = "List received orders",
    params(PaginationParams),
    responses(
        (status = 200, description = "Received orders ordered by id", body = ApiResponse<Vec<ReceivedOrder>>),
    ),
    tag = "Orders"
)]
pub async fn list_received_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<ReceivedOrder>> {
    let (limit, offset) = params.resolve(&state.config);
    let orders = state
        .services
        .orders
        .list_received_orders(limit, offset)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/received/{id}",
    summary = "Get received order",
    params(("id" = i32, Path, description = "Received order id")),
    responses(
        (status = 200, description = "Received order", body = ApiResponse<ReceivedOrder>),
        (status = 404, description = "Received order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn get_received_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ReceivedOrder> {
    Ok(success_response(
        state.services.orders.get_received_order(id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/received/{id}",
    summary = "Correct a received order",
    description = "Stock is not adjusted by corrections.",
    params(("id" = i32, Path, description = "Received order id")),
    request_body = ReceivedOrder,
    responses(
        (status = 200, description = "Saved received order", body = ApiResponse<ReceivedOrder>),
        (status = 400, description = "Quantities out of balance", body = crate::errors::ErrorResponse),
        (status = 404, description = "Received order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn save_received_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut record): Json<ReceivedOrder>,
) -> ApiResult<ReceivedOrder> {
    record.id = id;
    let order = state.services.orders.save_received_order(record).await?;
    Ok(success_response(order))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/received/{id}",
    summary = "Remove received order",
    params(("id" = i32, Path, description = "Received order id")),
    responses(
        (status = 204, description = "Received order removed"),
        (status = 404, description = "Received order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn remove_received_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.services.orders.remove_received_order(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/received/{id}/product",
    summary = "Product of a received order",
    params(("id" = i32, Path, description = "Received order id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Received order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn received_order_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Product> {
    Ok(success_response(
        state.services.orders.received_order_product(id).await?,
    ))
}
