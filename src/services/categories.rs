use crate::{
    db::DbPool,
    dto::{Category, CategoryNames},
    entities::{category, product_category},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{ensure_products_exist, product_ids_by_category};

#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_model(&self, id: i32) -> Result<category::Model, ServiceError> {
        category::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    async fn with_products(
        &self,
        models: Vec<category::Model>,
    ) -> Result<Vec<Category>, ServiceError> {
        let ids: Vec<i32> = models.iter().map(|c| c.id).collect();
        let mut members = product_ids_by_category(&*self.db_pool, &ids).await?;
        Ok(models
            .into_iter()
            .map(|c| {
                let products = members.remove(&c.id).unwrap_or_default();
                Category::from_parts(c, products)
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self) -> Result<Category, ServiceError> {
        let model = category::ActiveModel {
            name: Set(String::new()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create category");
            ServiceError::db_error(e)
        })?;

        info!(category_id = model.id, "Category created");
        self.event_sender
            .send_or_log(Event::CategoryCreated(model.id))
            .await;
        Ok(Category::from_parts(model, Vec::new()))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: i32) -> Result<Category, ServiceError> {
        let model = self.find_model(id).await?;
        self.with_products(vec![model])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Category>, ServiceError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        self.with_products(models).await
    }

    #[instrument(skip(self))]
    pub async fn category_names(&self) -> Result<Vec<CategoryNames>, ServiceError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(models.iter().map(CategoryNames::from).collect())
    }

    /// Saves the name and replaces the category's product list.
    #[instrument(skip(self, record), fields(category_id = record.id))]
    pub async fn save_category(&self, record: Category) -> Result<Category, ServiceError> {
        let existing = self.find_model(record.id).await?;
        let products = ensure_products_exist(&*self.db_pool, &record.products).await?;

        let txn = self.db_pool.begin().await?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(record.name.clone());
        let saved = active.update(&txn).await?;

        product_category::Entity::delete_many()
            .filter(product_category::Column::CategoryId.eq(saved.id))
            .exec(&txn)
            .await?;
        if !products.is_empty() {
            let rows = products.iter().map(|product_id| product_category::ActiveModel {
                product_id: Set(*product_id),
                category_id: Set(saved.id),
            });
            product_category::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to save category");
            ServiceError::db_error(e)
        })?;

        self.event_sender
            .send_or_log(Event::CategoryUpdated(saved.id))
            .await;
        self.get_category(saved.id).await
    }

    #[instrument(skip(self))]
    pub async fn remove_category(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_model(id).await?;

        let txn = self.db_pool.begin().await?;
        product_category::Entity::delete_many()
            .filter(product_category::Column::CategoryId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        info!(category_id = id, "Category removed");
        self.event_sender
            .send_or_log(Event::CategoryRemoved(id))
            .await;
        Ok(())
    }
}
