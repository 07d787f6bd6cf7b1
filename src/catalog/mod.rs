//! Catalog of purchasable items.
//!
//! - `model` - item types and their validation
//! - `postgres` - the PostgreSQL-backed catalog used by the server
//! - `import` - parsing of `{title, price}` bulk-load files
//! - `routes` - item listing and creation endpoints

pub mod import;
pub mod model;
pub mod postgres;
pub mod routes;
pub mod validation;


pub use model::{Item, NewItem};
pub use postgres::PgCatalog;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid item: {0}")]
    Invalid(String),
}

/// Read/write access to the item catalog.
///
/// Every listing is ordered by descending item id.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch all items whose id is in `ids`, in one lookup.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Item>, CatalogError>;

    async fn list(&self) -> Result<Vec<Item>, CatalogError>;

    async fn insert(&self, item: NewItem) -> Result<Item, CatalogError>;

    /// Insert every record or none of them.
    async fn insert_many(&self, items: Vec<NewItem>) -> Result<Vec<Item>, CatalogError>;
}
