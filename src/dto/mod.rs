//! Wire records exchanged over the API.
//!
//! Field names follow the historical client contract, which mixes
//! camelCase (`buyLevel`, `costPrice`, ...) with snake_case (`case_size`,
//! `product_id`, ...). Relationship lists on brands, categories and
//! suppliers are filled from the store on read.

pub mod names;
pub mod us_date;

pub use names::{BrandNames, CategoryNames, ProductNames, SupplierNames};

use crate::entities::{brand, category, pending_order, product, received_order, supplier};
use crate::errors::ServiceError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stocked product
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub upc: String,
    pub description: String,
    #[serde(rename = "buyLevel")]
    #[validate(range(min = 0.0, message = "buyLevel must be non-negative"))]
    pub buy_level: Option<f64>,
    #[serde(rename = "costPrice")]
    #[schema(value_type = String, example = "4.25")]
    pub cost_price: Decimal,
    #[serde(rename = "sellingPrice")]
    #[schema(value_type = String, example = "6.99")]
    pub selling_price: Decimal,
    /// Current stock
    #[validate(range(min = 0.0, message = "amount must be non-negative"))]
    pub amount: f64,
    #[validate(range(min = 0, message = "case_size must be non-negative"))]
    pub case_size: Option<i32>,
    #[serde(rename = "measureByWeight")]
    pub measure_by_weight: bool,
}

/// Reads a price column back exactly as it was written.
fn stored_price(raw: &str, product_id: i32) -> Result<Decimal, ServiceError> {
    Decimal::from_str_exact(raw).map_err(|e| {
        ServiceError::InternalError(format!(
            "product {} has unreadable price '{}': {}",
            product_id, raw, e
        ))
    })
}

impl TryFrom<product::Model> for Product {
    type Error = ServiceError;

    fn try_from(model: product::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            cost_price: stored_price(&model.cost_price, model.id)?,
            selling_price: stored_price(&model.selling_price, model.id)?,
            id: model.id,
            name: model.name,
            upc: model.upc,
            description: model.description,
            buy_level: model.buy_level,
            amount: model.amount,
            case_size: model.case_size,
            measure_by_weight: model.measure_by_weight,
        })
    }
}

impl Product {
    /// Copies every scalar field onto `model`. Id and brand are left alone.
    pub fn apply_to(&self, model: product::Model) -> product::ActiveModel {
        let mut active: product::ActiveModel = model.into();
        active.name = Set(self.name.clone());
        active.upc = Set(self.upc.trim().to_string());
        active.description = Set(self.description.clone());
        active.buy_level = Set(self.buy_level);
        active.cost_price = Set(self.cost_price.to_string());
        active.selling_price = Set(self.selling_price.to_string());
        active.amount = Set(self.amount);
        active.case_size = Set(self.case_size);
        active.measure_by_weight = Set(self.measure_by_weight);
        active
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    /// Ids of the products carrying this brand
    pub products: Vec<i32>,
}

impl Brand {
    pub fn from_parts(model: brand::Model, products: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            products,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    /// Ids of the products in this category
    pub products: Vec<i32>,
}

impl Category {
    pub fn from_parts(model: category::Model, products: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            products,
        }
    }
}

/// A supplier and the products it delivers.
///
/// Contact fields are optional when the record is created but both must be
/// present and well formed when it is saved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    #[validate(custom = "crate::validation::validate_required_phone_number")]
    pub phone_number: String,
    #[validate(custom = "crate::validation::validate_required_email")]
    pub email: String,
    pub products: Vec<i32>,
}

impl Supplier {
    pub fn from_parts(model: supplier::Model, products: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            email: model.email,
            products,
        }
    }
}

/// A delivery that has been checked in
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReceivedOrder {
    pub id: i32,
    /// Delivery date, `MM/DD/YYYY`
    #[serde(with = "us_date", default)]
    #[schema(value_type = Option<String>, example = "03/07/2024")]
    pub received: Option<NaiveDate>,
    pub product_id: i32,
    /// Quantity that was ordered
    #[validate(range(min = 0.0, message = "gross_amount must be non-negative"))]
    pub gross_amount: f64,
    #[validate(range(min = 0.0, message = "actually_received must be non-negative"))]
    pub actually_received: f64,
    #[validate(range(min = 0.0, message = "damaged must be non-negative"))]
    pub damaged: f64,
}

impl From<received_order::Model> for ReceivedOrder {
    fn from(model: received_order::Model) -> Self {
        Self {
            id: model.id,
            received: model.received,
            product_id: model.product_id,
            gross_amount: model.gross_amount,
            actually_received: model.actually_received,
            damaged: model.damaged,
        }
    }
}

impl ReceivedOrder {
    /// Delivered plus damaged units may not exceed what was ordered.
    pub fn is_balanced(&self) -> bool {
        self.actually_received + self.damaged <= self.gross_amount
    }

    pub fn apply_to(&self, model: received_order::Model) -> received_order::ActiveModel {
        let mut active: received_order::ActiveModel = model.into();
        active.received = Set(self.received);
        active.product_id = Set(self.product_id);
        active.gross_amount = Set(self.gross_amount);
        active.actually_received = Set(self.actually_received);
        active.damaged = Set(self.damaged);
        active
    }
}

/// An order that has not arrived yet
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PendingOrder {
    pub id: i32,
    /// Id of the ordered product
    pub product: i32,
    #[validate(range(min = 0.0, message = "amount must be non-negative"))]
    pub amount: f64,
}

impl From<pending_order::Model> for PendingOrder {
    fn from(model: pending_order::Model) -> Self {
        Self {
            id: model.id,
            product: model.product_id,
            amount: model.amount,
        }
    }
}

impl PendingOrder {
    pub fn apply_to(&self, model: pending_order::Model) -> pending_order::ActiveModel {
        let mut active: pending_order::ActiveModel = model.into();
        active.product_id = Set(self.product);
        active.amount = Set(self.amount);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_product() -> Product {
        Product {
            id: 3,
            name: "Rolled oats".into(),
            upc: "012345678905".into(),
            description: "1kg bag".into(),
            buy_level: Some(5.0),
            cost_price: dec!(2.10),
            selling_price: dec!(3.49),
            amount: 10.0,
            case_size: Some(12),
            measure_by_weight: false,
        }
    }

    #[test]
    fn product_uses_client_field_names() {
        let value = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "name": "Rolled oats",
                "upc": "012345678905",
                "description": "1kg bag",
                "buyLevel": 5.0,
                "costPrice": "2.10",
                "sellingPrice": "3.49",
                "amount": 10.0,
                "case_size": 12,
                "measureByWeight": false
            })
        );
    }

    #[test]
    fn supplier_and_orders_use_client_field_names() {
        let supplier = Supplier {
            id: 1,
            name: "Acme".into(),
            phone_number: "(212) 555-0142".into(),
            email: "orders@acme.com".into(),
            products: vec![3, 4],
        };
        let value = serde_json::to_value(&supplier).unwrap();
        assert_eq!(value["phoneNumber"], "(212) 555-0142");
        assert_eq!(value["products"], json!([3, 4]));

        let pending = PendingOrder {
            id: 2,
            product: 3,
            amount: 24.0,
        };
        assert_eq!(
            serde_json::to_value(&pending).unwrap(),
            json!({"id": 2, "product": 3, "amount": 24.0})
        );

        let received = ReceivedOrder {
            id: 9,
            received: NaiveDate::from_ymd_opt(2024, 11, 2),
            product_id: 3,
            gross_amount: 24.0,
            actually_received: 20.0,
            damaged: 1.0,
        };
        let value = serde_json::to_value(&received).unwrap();
        assert_eq!(value["received"], "11/02/2024");
        assert_eq!(value["gross_amount"], 24.0);
    }

    #[test]
    fn product_validation_rejects_negative_quantities() {
        let mut product = sample_product();
        assert!(product.validate().is_ok());

        product.amount = -1.0;
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));

        product.amount = 1.0;
        product.buy_level = Some(-2.0);
        assert!(product.validate().is_err());
    }

    #[test]
    fn supplier_validation_requires_contacts() {
        let mut supplier = Supplier {
            id: 1,
            name: "Acme".into(),
            ..Default::default()
        };
        let errors = supplier.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
        assert!(errors.field_errors().contains_key("email"));

        supplier.phone_number = "212-555-0142".into();
        supplier.email = "orders@acme.com".into();
        assert!(supplier.validate().is_ok());
    }

    #[test]
    fn received_order_balance() {
        let mut order = ReceivedOrder {
            gross_amount: 10.0,
            actually_received: 8.0,
            damaged: 2.0,
            ..Default::default()
        };
        assert!(order.is_balanced());
        order.damaged = 2.5;
        assert!(!order.is_balanced());
    }

    #[test]
    fn product_apply_keeps_identity_and_brand() {
        let model = product::Model {
            id: 3,
            name: String::new(),
            upc: String::new(),
            description: String::new(),
            buy_level: Some(0.0),
            cost_price: "0".into(),
            selling_price: "0".into(),
            amount: 0.0,
            case_size: Some(0),
            measure_by_weight: false,
            brand_id: Some(7),
        };
        let mut record = sample_product();
        record.id = 99;
        record.upc = "  012345678905 ".into();

        let active = record.apply_to(model);
        assert_eq!(active.id, sea_orm::ActiveValue::Unchanged(3));
        assert_eq!(active.brand_id, sea_orm::ActiveValue::Unchanged(Some(7)));
        assert_eq!(active.upc, Set("012345678905".to_string()));
        assert_eq!(active.cost_price, Set("2.10".to_string()));
    }

    #[test]
    fn stored_prices_keep_their_scale() {
        let model = product::Model {
            id: 5,
            name: "Tea".into(),
            upc: String::new(),
            description: String::new(),
            buy_level: None,
            cost_price: "12345678901234.56789".into(),
            selling_price: "0.10".into(),
            amount: 0.0,
            case_size: None,
            measure_by_weight: false,
            brand_id: None,
        };
        let product = Product::try_from(model.clone()).unwrap();
        assert_eq!(product.cost_price.to_string(), "12345678901234.56789");
        assert_eq!(product.selling_price.to_string(), "0.10");

        let corrupt = product::Model {
            selling_price: "ten".into(),
            ..model
        };
        assert!(matches!(
            Product::try_from(corrupt),
            Err(ServiceError::InternalError(_))
        ));
    }
}
