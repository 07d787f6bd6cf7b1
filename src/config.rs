//! Runtime configuration loaded from the environment (and `.env` when present).

use chrono::FixedOffset;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_PDF_NAME: &str = "cash_receipt.pdf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Public URL of this server, encoded into receipt QR codes.
    pub base_url: String,
    pub media_root: PathBuf,
    /// Filename offered in the `Content-Disposition` of downloaded receipts.
    pub pdf_name: String,
    pub template_dir: PathBuf,
    pub typst_bin: String,
    pub utc_offset: FixedOffset,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let port = match env::var("SERVER_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "SERVER_PORT", value })?,
            Err(_) => 8080,
        };

        let utc_offset = match env::var("RECEIPT_UTC_OFFSET_HOURS") {
            Ok(value) => value
                .parse::<i32>()
                .map_err(|_| ConfigError::Invalid { key: "RECEIPT_UTC_OFFSET_HOURS", value: value.clone() })
                .and_then(|hours| parse_utc_offset(hours, &value))?,
            Err(_) => moscow_offset(),
        };

        Ok(Self {
            database_url,
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./media")),
            pdf_name: sanitize_pdf_name(&env::var("PDF_NAME").unwrap_or_default()),
            template_dir: env::var("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_template_dir().to_path_buf()),
            typst_bin: env::var("TYPST_BIN").unwrap_or_else(|_| "typst".to_string()),
            utc_offset,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|value| parse_origins(&value))
                .unwrap_or_default(),
        })
    }

    /// Configuration for tests and tools that do not talk to a database.
    pub fn for_media_root(media_root: impl Into<PathBuf>) -> Self {
        Self {
            database_url: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://127.0.0.1:8080".to_string(),
            media_root: media_root.into(),
            pdf_name: DEFAULT_PDF_NAME.to_string(),
            template_dir: default_template_dir().to_path_buf(),
            typst_bin: "typst".to_string(),
            utc_offset: moscow_offset(),
            allowed_origins: Vec::new(),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Directory holding the bundled Typst templates.
pub fn default_template_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

fn moscow_offset() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).expect("+03:00 is a valid offset")
}

fn parse_utc_offset(hours: i32, raw: &str) -> Result<FixedOffset, ConfigError> {
    if !(-23..=23).contains(&hours) {
        return Err(ConfigError::Invalid { key: "RECEIPT_UTC_OFFSET_HOURS", value: raw.to_string() });
    }
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| ConfigError::Invalid { key: "RECEIPT_UTC_OFFSET_HOURS", value: raw.to_string() })
}

pub(crate) fn sanitize_pdf_name(raw: &str) -> String {
    let cleaned = sanitize_filename::sanitize(raw.trim());
    if cleaned.is_empty() {
        return DEFAULT_PDF_NAME.to_string();
    }
    if cleaned.to_ascii_lowercase().ends_with(".pdf") {
        cleaned
    } else {
        format!("{cleaned}.pdf")
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
