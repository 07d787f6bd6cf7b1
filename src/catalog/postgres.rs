//! PostgreSQL catalog (`items` table, see `migrations/`).

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Catalog, CatalogError, Item, NewItem};

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Item>, CatalogError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, title, price FROM items WHERE id = ANY($1) ORDER BY id DESC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, title, price FROM items ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert(&self, item: NewItem) -> Result<Item, CatalogError> {
        let item = item.validated().map_err(CatalogError::Invalid)?;
        let created = sqlx::query_as::<_, Item>(
            "INSERT INTO items (title, price) VALUES ($1, $2) RETURNING id, title, price",
        )
        .bind(&item.title)
        .bind(item.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn insert_many(&self, items: Vec<NewItem>) -> Result<Vec<Item>, CatalogError> {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.validated()
                    .map_err(|e| CatalogError::Invalid(format!("record {}: {}", index, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut transaction = self.pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for item in &items {
            let row = sqlx::query_as::<_, Item>(
                "INSERT INTO items (title, price) VALUES ($1, $2) RETURNING id, title, price",
            )
            .bind(&item.title)
            .bind(item.price)
            .fetch_one(&mut *transaction)
            .await?;
            created.push(row);
        }
        transaction.commit().await?;

        Ok(created)
    }
}
