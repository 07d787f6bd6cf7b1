//! Receipt pipeline: aggregation, Typst rendering, PDF conversion, storage
//! and QR code generation.
//!
//! - `aggregate` - quantities and totals for a list of item ids
//! - `render` - fills the Typst receipt template
//! - `engine` - compiles Typst source to PDF
//! - `store` - per-token PDF storage under the media root
//! - `qr` - PNG QR codes for retrieval URLs
//! - `service` - the request pipeline tying the steps together
//! - `handlers` - HTTP endpoints

pub mod aggregate;
pub mod common;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod qr;
pub mod render;
pub mod service;
pub mod store;

pub use engine::{DocumentConverter, TypstConverter};
pub use models::{CashMachineRequest, IssuedReceipt, Receipt, ReceiptLine};
pub use render::ReceiptRenderer;
pub use service::{ReceiptService, ReceiptSettings};
pub use store::ReceiptStore;

use crate::catalog::CatalogError;
use thiserror::Error;

/// Errors raised while compiling Typst source to PDF.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    Exit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Errors raised while encoding a QR code image.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("QR data rejected: {0}")]
    Qr(qrcode::types::QrError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("item list is empty or missing")]
    EmptyItems,
    #[error("none of the requested items exist: {0:?}")]
    ItemsNotFound(Vec<i64>),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to load receipt template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create media directory: {0}")]
    MediaDir(#[source] std::io::Error),
    #[error("failed to convert receipt to PDF: {0}")]
    Convert(#[from] ConvertError),
    #[error("failed to write receipt document: {0}")]
    WriteDocument(#[source] std::io::Error),
    #[error("failed to generate QR code: {0}")]
    Encode(#[from] EncodeError),
    #[error("receipt worker failed: {0}")]
    Worker(String),
}

/// How a `ReceiptError` is reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    NotFound,
    Internal,
}

impl ReceiptError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ReceiptError::EmptyItems => ErrorClass::BadRequest,
            ReceiptError::ItemsNotFound(_) => ErrorClass::NotFound,
            _ => ErrorClass::Internal,
        }
    }
}
