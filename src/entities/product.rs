use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Product name
    pub name: String,

    /// Barcode or UPC; empty when the product has none
    pub upc: String,

    pub description: String,

    /// Stock threshold for reordering
    pub buy_level: Option<f64>,

    /// Cost price, the decimal's own text so scale survives every backend
    #[sea_orm(column_type = "Text")]
    pub cost_price: String,

    /// Selling price, stored like `cost_price`
    #[sea_orm(column_type = "Text")]
    pub selling_price: String,

    /// Current stock (units or weight)
    pub amount: f64,

    /// Units per case
    pub case_size: Option<i32>,

    /// Stock is measured by weight rather than counted
    pub measure_by_weight: bool,

    /// Owning brand, if any
    pub brand_id: Option<i32>,
}

/// Product entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_delete = "SetNull"
    )]
    Brand,
    #[sea_orm(has_many = "super::product_category::Entity")]
    ProductCategories,
    #[sea_orm(has_many = "super::product_supplier::Entity")]
    ProductSuppliers,
    #[sea_orm(has_many = "super::pending_order::Entity")]
    PendingOrders,
    #[sea_orm(has_many = "super::received_order::Entity")]
    ReceivedOrders,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

impl Related<super::product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSuppliers.def()
    }
}

impl Related<super::pending_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PendingOrders.def()
    }
}

impl Related<super::received_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceivedOrders.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_category::Relation::Product.def().rev())
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_supplier::Relation::Supplier.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_supplier::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
