use crate::{
    db::DbPool,
    dto::{Brand, Category, Product, ProductNames, Supplier},
    entities::{
        brand, category, pending_order, product, product_category, product_supplier,
        received_order, supplier,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use super::{product_ids_by_brand, product_ids_by_category, product_ids_by_supplier};

/// Catalog operations on products and their relations.
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_model(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(|e| {
                error!(product_id = id, error = %e, "Failed to load product");
                ServiceError::db_error(e)
            })?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }

    /// Creates an empty product and returns it.
    #[instrument(skip(self))]
    pub async fn create_product(&self) -> Result<Product, ServiceError> {
        let model = product::ActiveModel {
            name: Set(String::new()),
            upc: Set(String::new()),
            description: Set(String::new()),
            buy_level: Set(Some(0.0)),
            cost_price: Set(Decimal::ZERO.to_string()),
            selling_price: Set(Decimal::ZERO.to_string()),
            amount: Set(0.0),
            case_size: Set(Some(0)),
            measure_by_weight: Set(false),
            brand_id: Set(None),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create product");
            ServiceError::db_error(e)
        })?;

        info!(product_id = model.id, "Product created");
        self.event_sender
            .send_or_log(Event::ProductCreated(model.id))
            .await;

        Product::try_from(model)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<Product, ServiceError> {
        Product::try_from(self.find_model(id).await?)
    }

    /// Products ordered by id.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: u64, offset: u64) -> Result<Vec<Product>, ServiceError> {
        let products = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        products.into_iter().map(Product::try_from).collect()
    }

    /// Overwrites every scalar field of an existing product.
    ///
    /// A non-empty UPC held by another product is a `Conflict`; the unique
    /// index on coded products decides, so concurrent saves cannot both win.
    #[instrument(skip(self, record), fields(product_id = record.id))]
    pub async fn save_product(&self, record: Product) -> Result<Product, ServiceError> {
        record.validate()?;
        let existing = self.find_model(record.id).await?;

        let old_amount = existing.amount;
        let upc = record.upc.trim().to_string();
        let updated = record
            .apply_to(existing)
            .update(&*self.db_pool)
            .await
            .map_err(|e| {
                let err = ServiceError::from_write(e, || {
                    format!("UPC {} is already used by another product", upc)
                });
                if !matches!(err, ServiceError::Conflict(_)) {
                    error!(error = %err, "Failed to save product");
                }
                err
            })?;

        self.event_sender
            .send_or_log(Event::ProductUpdated(updated.id))
            .await;
        if updated.amount != old_amount {
            self.event_sender
                .send_or_log(Event::StockChanged {
                    product_id: updated.id,
                    old_amount,
                    new_amount: updated.amount,
                })
                .await;
        }

        Product::try_from(updated)
    }

    /// Deletes a product together with its memberships and orders.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_model(id).await?;

        let txn = self.db_pool.begin().await?;
        product_category::Entity::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        product_supplier::Entity::delete_many()
            .filter(product_supplier::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        pending_order::Entity::delete_many()
            .filter(pending_order::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        received_order::Entity::delete_many()
            .filter(received_order::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await.map_err(|e| {
            error!(product_id = id, error = %e, "Failed to remove product");
            ServiceError::db_error(e)
        })?;

        info!(product_id = id, "Product removed");
        self.event_sender
            .send_or_log(Event::ProductRemoved(id))
            .await;
        Ok(())
    }

    /// Id, name and UPC of every product, ordered by id.
    #[instrument(skip(self))]
    pub async fn product_names(&self) -> Result<Vec<ProductNames>, ServiceError> {
        let products = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(products.iter().map(ProductNames::from).collect())
    }

    /// The brand of a product, if it has one.
    #[instrument(skip(self))]
    pub async fn product_brand(&self, id: i32) -> Result<Option<Brand>, ServiceError> {
        let product = self.find_model(id).await?;
        let Some(brand) = product
            .find_related(brand::Entity)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
        else {
            return Ok(None);
        };

        let mut members = product_ids_by_brand(&*self.db_pool, &[brand.id]).await?;
        let products = members.remove(&brand.id).unwrap_or_default();
        Ok(Some(Brand::from_parts(brand, products)))
    }

    /// Categories a product belongs to, ordered by id.
    #[instrument(skip(self))]
    pub async fn product_categories(&self, id: i32) -> Result<Vec<Category>, ServiceError> {
        let product = self.find_model(id).await?;
        let categories = product
            .find_related(category::Entity)
            .order_by_asc(category::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        let mut members = product_ids_by_category(&*self.db_pool, &ids).await?;
        Ok(categories
            .into_iter()
            .map(|c| {
                let products = members.remove(&c.id).unwrap_or_default();
                Category::from_parts(c, products)
            })
            .collect())
    }

    /// Suppliers of a product, ordered by id.
    #[instrument(skip(self))]
    pub async fn product_suppliers(&self, id: i32) -> Result<Vec<Supplier>, ServiceError> {
        let product = self.find_model(id).await?;
        let suppliers = product
            .find_related(supplier::Entity)
            .order_by_asc(supplier::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        let ids: Vec<i32> = suppliers.iter().map(|s| s.id).collect();
        let mut members = product_ids_by_supplier(&*self.db_pool, &ids).await?;
        Ok(suppliers
            .into_iter()
            .map(|s| {
                let products = members.remove(&s.id).unwrap_or_default();
                Supplier::from_parts(s, products)
            })
            .collect())
    }
}
