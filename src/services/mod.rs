// Catalog services
pub mod brands;
pub mod categories;
pub mod products;
pub mod suppliers;

// Ordering and receiving
pub mod orders;

use crate::entities::{product, product_category, product_supplier};
use crate::errors::ServiceError;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::{BTreeSet, HashMap};

/// Deduplicates `ids` (keeping first occurrence) and checks every one names
/// an existing product.
pub(crate) async fn ensure_products_exist<C>(db: &C, ids: &[i32]) -> Result<Vec<i32>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut seen = BTreeSet::new();
    let unique: Vec<i32> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    if unique.is_empty() {
        return Ok(unique);
    }

    let found: BTreeSet<i32> = product::Entity::find()
        .select_only()
        .column(product::Column::Id)
        .filter(product::Column::Id.is_in(unique.clone()))
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let missing: Vec<String> = unique
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::ValidationError(format!(
            "Unknown product ids: {}",
            missing.join(", ")
        )));
    }

    Ok(unique)
}

/// Product ids per brand, ascending.
pub(crate) async fn product_ids_by_brand<C>(
    db: &C,
    brand_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    if brand_ids.is_empty() {
        return Ok(grouped);
    }

    let rows: Vec<(i32, Option<i32>)> = product::Entity::find()
        .select_only()
        .column(product::Column::Id)
        .column(product::Column::BrandId)
        .filter(product::Column::BrandId.is_in(brand_ids.to_vec()))
        .order_by_asc(product::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    for (product_id, brand_id) in rows {
        if let Some(brand_id) = brand_id {
            grouped.entry(brand_id).or_default().push(product_id);
        }
    }
    Ok(grouped)
}

/// Product ids per category, ascending.
pub(crate) async fn product_ids_by_category<C>(
    db: &C,
    category_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    if category_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = product_category::Entity::find()
        .filter(product_category::Column::CategoryId.is_in(category_ids.to_vec()))
        .order_by_asc(product_category::Column::ProductId)
        .all(db)
        .await?;

    for row in rows {
        grouped.entry(row.category_id).or_default().push(row.product_id);
    }
    Ok(grouped)
}

/// Product ids per supplier, ascending.
pub(crate) async fn product_ids_by_supplier<C>(
    db: &C,
    supplier_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    if supplier_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = product_supplier::Entity::find()
        .filter(product_supplier::Column::SupplierId.is_in(supplier_ids.to_vec()))
        .order_by_asc(product_supplier::Column::ProductId)
        .all(db)
        .await?;

    for row in rows {
        grouped.entry(row.supplier_id).or_default().push(row.product_id);
    }
    Ok(grouped)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{establish_connection, run_migrations, DbPool};
    use crate::events::{self, EventSender};
    use std::sync::Arc;

    /// Fresh in-memory store with migrations applied and an event consumer running.
    pub async fn setup() -> (Arc<DbPool>, Arc<EventSender>) {
        let db = establish_connection("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        run_migrations(&db).await.expect("migrations");

        let (sender, rx) = events::channel(64);
        tokio::spawn(events::process_events(rx));

        (Arc::new(db), Arc::new(sender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::products::ProductService;

    #[tokio::test]
    async fn unknown_product_ids_are_reported() {
        let (db, events) = test_support::setup().await;
        let products = ProductService::new(db.clone(), events);
        let first = products.create_product().await.unwrap();

        let ids = ensure_products_exist(&*db, &[first.id, first.id]).await.unwrap();
        assert_eq!(ids, vec![first.id]);

        let err = ensure_products_exist(&*db, &[first.id, 404, 405])
            .await
            .unwrap_err();
        match err {
            ServiceError::ValidationError(msg) => assert!(msg.contains("404, 405")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
