//! The receipt request pipeline, independent of the HTTP layer.

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use log::info;
use uuid::Uuid;

use super::aggregate::aggregate_from_catalog;
use super::common::{format_amount, format_receipt_timestamp};
use super::engine::DocumentConverter;
use super::models::{CashMachineRequest, IssuedReceipt, Receipt};
use super::qr::encode_png;
use super::render::ReceiptRenderer;
use super::store::ReceiptStore;
use super::ReceiptError;
use crate::catalog::Catalog;

#[derive(Debug, Clone)]
pub struct ReceiptSettings {
    /// Public server URL; retrieval links are `<base_url>/media/<token>`.
    pub base_url: String,
    pub utc_offset: FixedOffset,
}

pub struct ReceiptService {
    catalog: Arc<dyn Catalog>,
    renderer: ReceiptRenderer,
    converter: Arc<dyn DocumentConverter>,
    store: ReceiptStore,
    settings: ReceiptSettings,
}

impl ReceiptService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        renderer: ReceiptRenderer,
        converter: Arc<dyn DocumentConverter>,
        store: ReceiptStore,
        settings: ReceiptSettings,
    ) -> Self {
        Self {
            catalog,
            renderer,
            converter,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    pub fn retrieval_url(&self, token: &Uuid) -> String {
        format!("{}/media/{}", self.settings.base_url.trim_end_matches('/'), token)
    }

    /// Run the whole pipeline for one request.
    ///
    /// The receipt becomes retrievable only once every step has succeeded.
    pub async fn issue(self: Arc<Self>, request: CashMachineRequest) -> Result<IssuedReceipt, ReceiptError> {
        let item_ids = request.item_ids()?;
        let receipt = aggregate_from_catalog(self.catalog.as_ref(), item_ids).await?;
        let issued_at = format_receipt_timestamp(Utc::now(), &self.settings.utc_offset);

        tokio::task::spawn_blocking(move || self.produce(receipt, issued_at))
            .await
            .map_err(|e| ReceiptError::Worker(e.to_string()))?
    }

    fn produce(&self, receipt: Receipt, issued_at: String) -> Result<IssuedReceipt, ReceiptError> {
        let source = self.renderer.render(&receipt, &issued_at);
        let pdf = self.converter.convert(&source)?;

        let token = Uuid::new_v4();
        let url = self.retrieval_url(&token);
        let qr_png = encode_png(&url)?;
        self.store.save(token, &pdf)?;

        info!(
            "Issued receipt {} ({} lines, total {}, {} bytes)",
            token,
            receipt.lines.len(),
            format_amount(&receipt.total_sum),
            pdf.len()
        );

        Ok(IssuedReceipt {
            token,
            url,
            qr_png,
            issued_at,
            receipt,
        })
    }
}
