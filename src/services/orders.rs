use crate::{
    db::DbPool,
    dto::{PendingOrder, Product, ReceivedOrder},
    entities::{pending_order, product, received_order},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{NaiveDate, Utc};
use metrics::counter;
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use super::ensure_products_exist;

/// Pending and received orders, including receiving stock.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

/// Quantities reported when a pending order is checked in.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Delivery date; today (UTC) when absent
    pub date: Option<NaiveDate>,
    pub actually_received: f64,
    pub damaged: f64,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_pending(&self, id: i32) -> Result<pending_order::Model, ServiceError> {
        pending_order::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Pending order", id))
    }

    async fn find_received(&self, id: i32) -> Result<received_order::Model, ServiceError> {
        received_order::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Received order", id))
    }

    // Pending orders

    /// Opens an order for `product_id` with amount 0.
    #[instrument(skip(self))]
    pub async fn create_pending_order(&self, product_id: i32) -> Result<PendingOrder, ServiceError> {
        ensure_products_exist(&*self.db_pool, &[product_id]).await?;

        let model = pending_order::ActiveModel {
            product_id: Set(product_id),
            amount: Set(0.0),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create pending order");
            ServiceError::db_error(e)
        })?;

        info!(order_id = model.id, product_id, "Pending order created");
        self.event_sender
            .send_or_log(Event::PendingOrderCreated {
                order_id: model.id,
                product_id,
            })
            .await;
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_pending_order(&self, id: i32) -> Result<PendingOrder, ServiceError> {
        Ok(self.find_pending(id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn list_pending_orders(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PendingOrder>, ServiceError> {
        let orders = pending_order::Entity::find()
            .order_by_asc(pending_order::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(orders.into_iter().map(PendingOrder::from).collect())
    }

    /// Updates the ordered product and amount.
    #[instrument(skip(self, record), fields(order_id = record.id))]
    pub async fn save_pending_order(
        &self,
        record: PendingOrder,
    ) -> Result<PendingOrder, ServiceError> {
        record.validate()?;
        let existing = self.find_pending(record.id).await?;
        ensure_products_exist(&*self.db_pool, &[record.product]).await?;

        let saved = record
            .apply_to(existing)
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send_or_log(Event::PendingOrderUpdated(saved.id))
            .await;
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn remove_pending_order(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_pending(id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send_or_log(Event::PendingOrderRemoved(id))
            .await;
        Ok(())
    }

    // Received orders

    #[instrument(skip(self))]
    pub async fn get_received_order(&self, id: i32) -> Result<ReceivedOrder, ServiceError> {
        Ok(self.find_received(id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn list_received_orders(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReceivedOrder>, ServiceError> {
        let orders = received_order::Entity::find()
            .order_by_asc(received_order::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(orders.into_iter().map(ReceivedOrder::from).collect())
    }

    /// Corrects a received order. Stock is not adjusted.
    #[instrument(skip(self, record), fields(order_id = record.id))]
    pub async fn save_received_order(
        &self,
        record: ReceivedOrder,
    ) -> Result<ReceivedOrder, ServiceError> {
        record.validate()?;
        if !record.is_balanced() {
            return Err(ServiceError::ValidationError(
                "actually_received + damaged exceeds gross_amount".to_string(),
            ));
        }
        let existing = self.find_received(record.id).await?;
        ensure_products_exist(&*self.db_pool, &[record.product_id]).await?;

        let saved = record
            .apply_to(existing)
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send_or_log(Event::ReceivedOrderUpdated(saved.id))
            .await;
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn remove_received_order(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_received(id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send_or_log(Event::ReceivedOrderRemoved(id))
            .await;
        Ok(())
    }

    // Lookups

    /// The product an order refers to.
    #[instrument(skip(self))]
    pub async fn order_product(&self, product_id: i32) -> Result<Product, ServiceError> {
        product::Entity::find_by_id(product_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Product", product_id))
            .and_then(Product::try_from)
    }

    pub async fn pending_order_product(&self, order_id: i32) -> Result<Product, ServiceError> {
        let order = self.find_pending(order_id).await?;
        self.order_product(order.product_id).await
    }

    pub async fn received_order_product(&self, order_id: i32) -> Result<Product, ServiceError> {
        let order = self.find_received(order_id).await?;
        self.order_product(order.product_id).await
    }

    // Receiving

    /// Turns a pending order into a received one and books the delivered
    /// quantity onto the product's stock, all in one transaction.
    #[instrument(skip(self))]
    pub async fn mark_received(
        &self,
        pending_id: i32,
        receipt: Receipt,
    ) -> Result<ReceivedOrder, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let pending = pending_order::Entity::find_by_id(pending_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Pending order", pending_id))?;

        let draft = ReceivedOrder {
            id: 0,
            received: Some(receipt.date.unwrap_or_else(|| Utc::now().date_naive())),
            product_id: pending.product_id,
            gross_amount: pending.amount,
            actually_received: receipt.actually_received,
            damaged: receipt.damaged,
        };
        draft.validate()?;
        if !draft.is_balanced() {
            return Err(ServiceError::ValidationError(format!(
                "actually_received + damaged exceeds the ordered amount {}",
                pending.amount
            )));
        }

        let product = product::Entity::find_by_id(pending.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", pending.product_id))?;

        let received = received_order::ActiveModel {
            received: Set(draft.received),
            product_id: Set(draft.product_id),
            gross_amount: Set(draft.gross_amount),
            actually_received: Set(draft.actually_received),
            damaged: Set(draft.damaged),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        pending.delete(&txn).await?;

        let old_amount = product.amount;
        let new_amount = old_amount + draft.actually_received;
        let mut stock: product::ActiveModel = product.into();
        stock.amount = Set(new_amount);
        stock.update(&txn).await?;

        txn.commit().await.map_err(|e| {
            error!(pending_id, error = %e, "Failed to commit receipt");
            ServiceError::db_error(e)
        })?;

        counter!("stockroom_orders.received", 1);
        info!(
            pending_id,
            received_id = received.id,
            product_id = received.product_id,
            "Pending order received"
        );
        self.event_sender
            .send_or_log(Event::OrderReceived {
                pending_order_id: pending_id,
                received_order_id: received.id,
                product_id: received.product_id,
                actually_received: received.actually_received,
                damaged: received.damaged,
            })
            .await;
        self.event_sender
            .send_or_log(Event::StockChanged {
                product_id: received.product_id,
                old_amount,
                new_amount,
            })
            .await;

        Ok(received.into())
    }
}
