use crate::{
    db::DbPool,
    dto::{Brand, BrandNames},
    entities::{brand, product},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, Value,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{ensure_products_exist, product_ids_by_brand};

#[derive(Clone)]
pub struct BrandService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl BrandService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_model(&self, id: i32) -> Result<brand::Model, ServiceError> {
        brand::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Brand", id))
    }

    async fn with_products(&self, models: Vec<brand::Model>) -> Result<Vec<Brand>, ServiceError> {
        let ids: Vec<i32> = models.iter().map(|b| b.id).collect();
        let mut members = product_ids_by_brand(&*self.db_pool, &ids).await?;
        Ok(models
            .into_iter()
            .map(|b| {
                let products = members.remove(&b.id).unwrap_or_default();
                Brand::from_parts(b, products)
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn create_brand(&self) -> Result<Brand, ServiceError> {
        let model = brand::ActiveModel {
            name: Set(String::new()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create brand");
            ServiceError::db_error(e)
        })?;

        info!(brand_id = model.id, "Brand created");
        self.event_sender
            .send_or_log(Event::BrandCreated(model.id))
            .await;
        Ok(Brand::from_parts(model, Vec::new()))
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: i32) -> Result<Brand, ServiceError> {
        let model = self.find_model(id).await?;
        let mut brands = self.with_products(vec![model]).await?;
        brands
            .pop()
            .ok_or_else(|| ServiceError::not_found("Brand", id))
    }

    #[instrument(skip(self))]
    pub async fn list_brands(&self, limit: u64, offset: u64) -> Result<Vec<Brand>, ServiceError> {
        let models = brand::Entity::find()
            .order_by_asc(brand::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        self.with_products(models).await
    }

    #[instrument(skip(self))]
    pub async fn brand_names(&self) -> Result<Vec<BrandNames>, ServiceError> {
        let models = brand::Entity::find()
            .order_by_asc(brand::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(models.iter().map(BrandNames::from).collect())
    }

    /// Saves the name and makes `record.products` exactly the brand's products.
    /// Products listed here are moved away from any other brand.
    #[instrument(skip(self, record), fields(brand_id = record.id))]
    pub async fn save_brand(&self, record: Brand) -> Result<Brand, ServiceError> {
        let existing = self.find_model(record.id).await?;
        let products = ensure_products_exist(&*self.db_pool, &record.products).await?;

        let txn = self.db_pool.begin().await?;

        let mut active: brand::ActiveModel = existing.into();
        active.name = Set(record.name.clone());
        let saved = active.update(&txn).await?;

        product::Entity::update_many()
            .col_expr(product::Column::BrandId, Expr::value(Value::Int(None)))
            .filter(product::Column::BrandId.eq(saved.id))
            .exec(&txn)
            .await?;
        if !products.is_empty() {
            product::Entity::update_many()
                .col_expr(product::Column::BrandId, Expr::value(saved.id))
                .filter(product::Column::Id.is_in(products))
                .exec(&txn)
                .await?;
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to save brand");
            ServiceError::db_error(e)
        })?;

        self.event_sender
            .send_or_log(Event::BrandUpdated(saved.id))
            .await;
        self.get_brand(saved.id).await
    }

    /// Deletes a brand; its products are kept without a brand.
    #[instrument(skip(self))]
    pub async fn remove_brand(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_model(id).await?;

        let txn = self.db_pool.begin().await?;
        product::Entity::update_many()
            .col_expr(product::Column::BrandId, Expr::value(Value::Int(None)))
            .filter(product::Column::BrandId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        info!(brand_id = id, "Brand removed");
        self.event_sender.send_or_log(Event::BrandRemoved(id)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{products::ProductService, test_support::setup};

    #[tokio::test]
    async fn saving_membership_is_authoritative() {
        let (db, events) = setup().await;
        let products = ProductService::new(db.clone(), events.clone());
        let brands = BrandService::new(db, events);

        let p1 = products.create_product().await.unwrap().id;
        let p2 = products.create_product().await.unwrap().id;
        let p3 = products.create_product().await.unwrap().id;
        let brand = brands.create_brand().await.unwrap();

        let saved = brands
            .save_brand(Brand {
                id: brand.id,
                name: "Lavazza".into(),
                products: vec![p1, p2],
            })
            .await
            .unwrap();
        assert_eq!(saved.products, vec![p1, p2]);

        let saved = brands
            .save_brand(Brand {
                id: brand.id,
                name: "Lavazza".into(),
                products: vec![p3, p2],
            })
            .await
            .unwrap();
        assert_eq!(saved.products, vec![p2, p3]);
        assert_eq!(products.product_brand(p1).await.unwrap(), None);
        assert_eq!(
            products.product_brand(p3).await.unwrap().map(|b| b.name),
            Some("Lavazza".to_string())
        );
    }

    #[tokio::test]
    async fn product_moves_between_brands() {
        let (db, events) = setup().await;
        let products = ProductService::new(db.clone(), events.clone());
        let brands = BrandService::new(db, events);

        let p = products.create_product().await.unwrap().id;
        let a = brands.create_brand().await.unwrap().id;
        let b = brands.create_brand().await.unwrap().id;

        for id in [a, b] {
            brands
                .save_brand(Brand {
                    id,
                    name: format!("brand-{id}"),
                    products: vec![p],
                })
                .await
                .unwrap();
        }

        assert!(brands.get_brand(a).await.unwrap().products.is_empty());
        assert_eq!(brands.get_brand(b).await.unwrap().products, vec![p]);
    }

    #[tokio::test]
    async fn unknown_members_are_rejected() {
        let (db, events) = setup().await;
        let brands = BrandService::new(db, events);
        let brand = brands.create_brand().await.unwrap();

        let err = brands
            .save_brand(Brand {
                products: vec![999],
                ..brand
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn removing_a_brand_keeps_its_products() {
        let (db, events) = setup().await;
        let products = ProductService::new(db.clone(), events.clone());
        let brands = BrandService::new(db, events);

        let p = products.create_product().await.unwrap().id;
        let brand = brands.create_brand().await.unwrap();
        brands
            .save_brand(Brand {
                products: vec![p],
                ..brand.clone()
            })
            .await
            .unwrap();

        brands.remove_brand(brand.id).await.unwrap();
        assert!(matches!(
            brands.get_brand(brand.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(products.product_brand(p).await.unwrap(), None);
        assert!(brands.brand_names().await.unwrap().is_empty());
    }
}
