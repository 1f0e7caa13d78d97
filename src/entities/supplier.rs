use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier entity. Empty `phone_number` / `email` mean "not set".
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_supplier::Entity")]
    ProductSuppliers,
}

impl Related<super::product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSuppliers.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_supplier::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_supplier::Relation::Supplier.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
