//! Application state and database connection setup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Catalog, PgCatalog};
use crate::config::AppConfig;
use crate::receipt::{
    DocumentConverter, ReceiptError, ReceiptRenderer, ReceiptService, ReceiptSettings, ReceiptStore,
    TypstConverter,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub receipts: Arc<ReceiptService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to PostgreSQL, apply migrations and wire the Typst converter.
    pub async fn new_with_config(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = connect_pool(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("Database migrations applied");

        let catalog = Arc::new(PgCatalog::new(pool));
        let converter = Arc::new(TypstConverter::new(config.typst_bin.clone()));
        Ok(Self::new_with_parts(config, catalog, converter)?)
    }

    /// Build the state around an existing catalog and converter.
    ///
    /// Fails when the receipt template cannot be loaded.
    pub fn new_with_parts(
        config: AppConfig,
        catalog: Arc<dyn Catalog>,
        converter: Arc<dyn DocumentConverter>,
    ) -> Result<Self, ReceiptError> {
        let renderer = ReceiptRenderer::new(&config.template_dir)?;
        let store = ReceiptStore::new(&config.media_root);
        let settings = ReceiptSettings {
            base_url: config.base_url.clone(),
            utc_offset: config.utc_offset,
        };
        let receipts = Arc::new(ReceiptService::new(
            catalog.clone(),
            renderer,
            converter,
            store,
            settings,
        ));

        Ok(AppState {
            catalog,
            receipts,
            config: Arc::new(config),
        })
    }
}

pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(900))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
}
