//! Load catalog items from a JSON file of `{title, price}` records.
//!
//! Usage: `load_items <file.json>`

use std::path::PathBuf;

use anyhow::{bail, Context};
use cash_register_server::catalog::{import, Catalog, PgCatalog};
use cash_register_server::db::connect_pool;
use cash_register_server::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        bail!("usage: load_items <file.json>");
    };
    let path = PathBuf::from(path);

    let records = import::read_records(&path).with_context(|| format!("loading {}", path.display()))?;
    log::info!("Read {} records from {}", records.len(), path.display());

    let config = AppConfig::from_env()?;
    let pool = connect_pool(&config.database_url)
        .await
        .context("connecting to the database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("applying migrations")?;

    let catalog = PgCatalog::new(pool);
    let created = catalog.insert_many(records).await.context("inserting items")?;

    log::info!("Successfully loaded {} items", created.len());
    Ok(())
}
