//! sea-orm entities backing the catalog and order tables.

pub mod brand;
pub mod category;
pub mod pending_order;
pub mod product;
pub mod product_category;
pub mod product_supplier;
pub mod received_order;
pub mod supplier;
