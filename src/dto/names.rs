//! Id + display-name projections used by pick lists and autocomplete.
//!
//! Projections are only ever built from the full records (or their storage
//! rows) through the `From` impls below.

use super::{Brand, Category, Product, Supplier};
use crate::entities::{brand, category, product, supplier};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductNames {
    pub id: i32,
    pub name: String,
    pub upc: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BrandNames {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryNames {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierNames {
    pub id: i32,
    pub name: String,
}

impl From<&Product> for ProductNames {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            upc: product.upc.clone(),
        }
    }
}

impl From<&product::Model> for ProductNames {
    fn from(model: &product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            upc: model.upc.clone(),
        }
    }
}

macro_rules! named_projection {
    ($names:ident, $record:ident, $entity:ident) => {
        impl From<&$record> for $names {
            fn from(record: &$record) -> Self {
                Self {
                    id: record.id,
                    name: record.name.clone(),
                }
            }
        }

        impl From<&$entity::Model> for $names {
            fn from(model: &$entity::Model) -> Self {
                Self {
                    id: model.id,
                    name: model.name.clone(),
                }
            }
        }
    };
}

named_projection!(BrandNames, Brand, brand);
named_projection!(CategoryNames, Category, category);
named_projection!(SupplierNames, Supplier, supplier);

/// Text a projection is ranked on.
pub trait Searchable {
    fn search_key(&self, numeric_query: bool) -> &str;
}

impl Searchable for ProductNames {
    /// Numeric searches are matched against the UPC.
    fn search_key(&self, numeric_query: bool) -> &str {
        if numeric_query {
            &self.upc
        } else {
            &self.name
        }
    }
}

macro_rules! search_by_name {
    ($($names:ident),*) => {
        $(
            impl Searchable for $names {
                fn search_key(&self, _numeric_query: bool) -> &str {
                    &self.name
                }
            }
        )*
    };
}

search_by_name!(BrandNames, CategoryNames, SupplierNames);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_copy_source_fields() {
        let product = Product {
            id: 4,
            name: "Espresso beans".into(),
            upc: "8410076472".into(),
            ..Default::default()
        };
        assert_eq!(
            ProductNames::from(&product),
            ProductNames {
                id: 4,
                name: "Espresso beans".into(),
                upc: "8410076472".into(),
            }
        );

        let supplier = Supplier {
            id: 2,
            name: "North Roasters".into(),
            products: vec![4],
            ..Default::default()
        };
        let names = SupplierNames::from(&supplier);
        assert_eq!((names.id, names.name.as_str()), (2, "North Roasters"));

        let row = brand::Model {
            id: 8,
            name: "Lavazza".into(),
        };
        assert_eq!(
            BrandNames::from(&row),
            BrandNames {
                id: 8,
                name: "Lavazza".into()
            }
        );
    }

    #[test]
    fn product_search_key_switches_on_numeric_queries() {
        let names = ProductNames {
            id: 1,
            name: "Milk".into(),
            upc: "0001".into(),
        };
        assert_eq!(names.search_key(true), "0001");
        assert_eq!(names.search_key(false), "Milk");

        let category = CategoryNames {
            id: 1,
            name: "Dairy".into(),
        };
        assert_eq!(category.search_key(true), "Dairy");
    }
}
