#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cash_register_server::catalog::{Catalog, CatalogError, Item, NewItem};
use cash_register_server::receipt::{ConvertError, DocumentConverter};
use cash_register_server::{AppConfig, AppState};
use rust_decimal::Decimal;

/// In-memory implementation of `Catalog` for testing
pub struct MockCatalog {
    items: tokio::sync::Mutex<BTreeMap<i64, Item>>,
    lookups: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            items: tokio::sync::Mutex::new(BTreeMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Espresso (id 1, 10.50) and Croissant (id 2, 5.00).
    pub fn with_sample_items() -> Self {
        let catalog = Self::new();
        {
            let mut items = catalog.items.try_lock().expect("fresh mutex");
            items.insert(1, item(1, "Espresso", Decimal::new(1050, 2)));
            items.insert(2, item(2, "Croissant", Decimal::new(500, 2)));
        }
        catalog
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

pub fn item(id: i64, title: &str, price: Decimal) -> Item {
    Item {
        id,
        title: title.to_string(),
        price,
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Item>, CatalogError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().await;
        Ok(items
            .values()
            .rev()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        let items = self.items.lock().await;
        Ok(items.values().rev().cloned().collect())
    }

    async fn insert(&self, item: NewItem) -> Result<Item, CatalogError> {
        let item = item.validated().map_err(CatalogError::Invalid)?;
        let mut items = self.items.lock().await;
        let id = items.keys().next_back().copied().unwrap_or(0) + 1;
        let created = Item {
            id,
            title: item.title,
            price: item.price,
        };
        items.insert(id, created.clone());
        Ok(created)
    }

    async fn insert_many(&self, new_items: Vec<NewItem>) -> Result<Vec<Item>, CatalogError> {
        let validated = new_items
            .into_iter()
            .map(|item| item.validated().map_err(CatalogError::Invalid))
            .collect::<Result<Vec<_>, _>>()?;
        let mut created = Vec::with_capacity(validated.len());
        for item in validated {
            created.push(self.insert(item).await?);
        }
        Ok(created)
    }
}

/// Catalog whose database is unreachable.
pub struct BrokenCatalog;

#[async_trait]
impl Catalog for BrokenCatalog {
    async fn find_by_ids(&self, _ids: &[i64]) -> Result<Vec<Item>, CatalogError> {
        Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _item: NewItem) -> Result<Item, CatalogError> {
        Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert_many(&self, _items: Vec<NewItem>) -> Result<Vec<Item>, CatalogError> {
        Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Converter that wraps the Typst source in a fake PDF header instead of
/// running the compiler. Each output is unique.
pub struct StubConverter {
    outputs: std::sync::Mutex<Vec<Vec<u8>>>,
    sources: std::sync::Mutex<Vec<String>>,
}

impl StubConverter {
    pub fn new() -> Self {
        Self {
            outputs: std::sync::Mutex::new(Vec::new()),
            sources: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.outputs.lock().unwrap().len()
    }

    pub fn last_output(&self) -> Option<Vec<u8>> {
        self.outputs.lock().unwrap().last().cloned()
    }

    pub fn output(&self, index: usize) -> Vec<u8> {
        self.outputs.lock().unwrap()[index].clone()
    }

    pub fn last_source(&self) -> Option<String> {
        self.sources.lock().unwrap().last().cloned()
    }
}

impl DocumentConverter for StubConverter {
    fn convert(&self, source: &str) -> Result<Vec<u8>, ConvertError> {
        let mut outputs = self.outputs.lock().unwrap();
        let pdf = format!("%PDF-1.7\n% stub document {}\n{}", outputs.len(), source).into_bytes();
        outputs.push(pdf.clone());
        self.sources.lock().unwrap().push(source.to_string());
        Ok(pdf)
    }
}

/// Converter that behaves like a Typst CLI exiting with status 1.
pub struct FailingConverter;

impl DocumentConverter for FailingConverter {
    fn convert(&self, _source: &str) -> Result<Vec<u8>, ConvertError> {
        Err(ConvertError::Exit(1))
    }
}

pub fn test_state(
    media_root: &Path,
    catalog: Arc<dyn Catalog>,
    converter: Arc<dyn DocumentConverter>,
) -> AppState {
    AppState::new_with_parts(AppConfig::for_media_root(media_root), catalog, converter)
        .expect("bundled receipt template should load")
}

pub const BASE_URL: &str = "http://127.0.0.1:8080";

/// Path part of a retrieval URL returned in `X-Receipt-Url`.
pub fn url_path(url: &str) -> String {
    url.strip_prefix(BASE_URL).unwrap_or(url).to_string()
}
