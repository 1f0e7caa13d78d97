use crate::{
    db::DbPool,
    dto::{Supplier, SupplierNames},
    entities::{product_supplier, supplier},
    errors::ServiceError,
    events::{Event, EventSender},
    validation,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use super::{ensure_products_exist, product_ids_by_supplier};

/// Service for managing suppliers
#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    /// Creates a new supplier service instance
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_model(&self, id: i32) -> Result<supplier::Model, ServiceError> {
        supplier::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Supplier", id))
    }

    async fn with_products(
        &self,
        models: Vec<supplier::Model>,
    ) -> Result<Vec<Supplier>, ServiceError> {
        let ids: Vec<i32> = models.iter().map(|s| s.id).collect();
        let mut members = product_ids_by_supplier(&*self.db_pool, &ids).await?;
        Ok(models
            .into_iter()
            .map(|s| {
                let products = members.remove(&s.id).unwrap_or_default();
                Supplier::from_parts(s, products)
            })
            .collect())
    }

    /// Creates a supplier with empty name and contact fields
    #[instrument(skip(self))]
    pub async fn create_supplier(&self) -> Result<Supplier, ServiceError> {
        let model = supplier::ActiveModel {
            name: Set(String::new()),
            phone_number: Set(String::new()),
            email: Set(String::new()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create supplier");
            ServiceError::db_error(e)
        })?;

        info!(supplier_id = model.id, "Supplier created");
        self.event_sender
            .send_or_log(Event::SupplierCreated(model.id))
            .await;
        Ok(Supplier::from_parts(model, Vec::new()))
    }

    /// Gets a supplier by ID
    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: i32) -> Result<Supplier, ServiceError> {
        let model = self.find_model(id).await?;
        self.with_products(vec![model])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Supplier", id))
    }

    /// Lists suppliers ordered by id
    #[instrument(skip(self))]
    pub async fn list_suppliers(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Supplier>, ServiceError> {
        let models = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        self.with_products(models).await
    }

    #[instrument(skip(self))]
    pub async fn supplier_names(&self) -> Result<Vec<SupplierNames>, ServiceError> {
        let models = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(models.iter().map(SupplierNames::from).collect())
    }

    /// Saves name and contact details and replaces the supplied products.
    ///
    /// Both the phone number and the email must be present and well formed.
    #[instrument(skip(self, record), fields(supplier_id = record.id))]
    pub async fn save_supplier(&self, mut record: Supplier) -> Result<Supplier, ServiceError> {
        record.phone_number = record.phone_number.trim().to_string();
        record.email = record.email.trim().to_string();
        record.validate().map_err(|e| {
            warn!(supplier_id = record.id, "Rejected supplier contact details");
            ServiceError::from(e)
        })?;
        let existing = self.find_model(record.id).await?;
        let products = ensure_products_exist(&*self.db_pool, &record.products).await?;

        let txn = self.db_pool.begin().await?;

        let mut active: supplier::ActiveModel = existing.into();
        active.name = Set(record.name.clone());
        active.phone_number = Set(record.phone_number.clone());
        active.email = Set(record.email.clone());
        let saved = active.update(&txn).await?;

        product_supplier::Entity::delete_many()
            .filter(product_supplier::Column::SupplierId.eq(saved.id))
            .exec(&txn)
            .await?;
        if !products.is_empty() {
            let rows = products.iter().map(|product_id| product_supplier::ActiveModel {
                product_id: Set(*product_id),
                supplier_id: Set(saved.id),
            });
            product_supplier::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to save supplier");
            ServiceError::db_error(e)
        })?;

        self.event_sender
            .send_or_log(Event::SupplierUpdated(saved.id))
            .await;
        self.get_supplier(saved.id).await
    }

    /// Deletes a supplier
    #[instrument(skip(self))]
    pub async fn remove_supplier(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_model(id).await?;

        let txn = self.db_pool.begin().await?;
        product_supplier::Entity::delete_many()
            .filter(product_supplier::Column::SupplierId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        info!(supplier_id = id, "Supplier removed");
        self.event_sender
            .send_or_log(Event::SupplierRemoved(id))
            .await;
        Ok(())
    }

    /// True for an empty string or a well-formed email address.
    pub fn validate_email(&self, input: &str) -> bool {
        validation::is_valid_email(input)
    }

    /// True for an empty string or a well-formed phone number.
    pub fn validate_phone_number(&self, input: &str) -> bool {
        validation::is_valid_phone_number(input)
    }
}
