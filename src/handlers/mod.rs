pub mod brands;
pub mod categories;
pub mod common;
pub mod health;
pub mod orders;
pub mod products;
pub mod suppliers;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{
        brands::BrandService, categories::CategoryService, orders::OrderService,
        products::ProductService, suppliers::SupplierService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub brands: Arc<BrandService>,
    pub categories: Arc<CategoryService>,
    pub suppliers: Arc<SupplierService>,
    pub orders: Arc<OrderService>,
}

impl AppServices {
    /// Build every service over the same pool and event channel.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            products: Arc::new(ProductService::new(db_pool.clone(), event_sender.clone())),
            brands: Arc::new(BrandService::new(db_pool.clone(), event_sender.clone())),
            categories: Arc::new(CategoryService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            suppliers: Arc::new(SupplierService::new(db_pool.clone(), event_sender.clone())),
            orders: Arc::new(OrderService::new(db_pool, event_sender)),
        }
    }
}
