use crate::{dto, errors::ErrorResponse, handlers};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
# Stockroom

Inventory catalog for a small shop: products with their stock levels,
the brands, categories and suppliers they belong to, and the orders that
replenish them.

## Receiving stock

A pending order records what was ordered. Receiving it replaces it with a
received order and adds the delivered quantity to the product's `amount`.
Delivered plus damaged units may never exceed the ordered amount.

## Name lookups

Every resource exposes a lightweight `names` projection and a `names/rank`
endpoint that orders those projections by similarity to a search string.

## Pagination

List endpoints accept `limit` and `offset` query parameters and return
records ordered by id.
        "#
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Brands", description = "Brand endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Suppliers", description = "Supplier endpoints"),
        (name = "Orders", description = "Pending and received order endpoints")
    ),
    paths(
        // Products
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::save_product,
        handlers::products::remove_product,
        handlers::products::product_names,
        handlers::products::rank_product_names,
        handlers::products::product_brand,
        handlers::products::product_categories,
        handlers::products::product_suppliers,
        // Brands
        handlers::brands::list_brands,
        handlers::brands::create_brand,
        handlers::brands::get_brand,
        handlers::brands::save_brand,
        handlers::brands::remove_brand,
        handlers::brands::brand_names,
        handlers::brands::rank_brand_names,
        // Categories
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::save_category,
        handlers::categories::remove_category,
        handlers::categories::category_names,
        handlers::categories::rank_category_names,
        // Suppliers
        handlers::suppliers::list_suppliers,
        handlers::suppliers::create_supplier,
        handlers::suppliers::get_supplier,
        handlers::suppliers::save_supplier,
        handlers::suppliers::remove_supplier,
        handlers::suppliers::supplier_names,
        handlers::suppliers::rank_supplier_names,
        handlers::suppliers::validate_email,
        handlers::suppliers::validate_phone_number,
        // Orders
        handlers::orders::list_pending_orders,
        handlers::orders::create_pending_order,
        handlers::orders::get_pending_order,
        handlers::orders::save_pending_order,
        handlers::orders::remove_pending_order,
        handlers::orders::receive_pending_order,
        handlers::orders::pending_order_product,
        handlers::orders::list_received_orders,
        handlers::orders::get_received_order,
        handlers::orders::save_received_order,
        handlers::orders::remove_received_order,
        handlers::orders::received_order_product,
    ),
    components(
        schemas(
            dto::Product,
            dto::Brand,
            dto::Category,
            dto::Supplier,
            dto::PendingOrder,
            dto::ReceivedOrder,
            dto::ProductNames,
            dto::BrandNames,
            dto::CategoryNames,
            dto::SupplierNames,
            handlers::orders::CreatePendingOrderRequest,
            handlers::orders::ReceiveOrderRequest,
            handlers::suppliers::ContactCheckRequest,
            crate::ResponseMeta,
            ErrorResponse,
        )
    )
)]
pub struct ApiDocV1;

/// Serves the generated document at `/api-docs/openapi.json`.
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDocV1::openapi()) }),
    )
}
