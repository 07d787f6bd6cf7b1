//! Bulk-load file parsing.
//!
//! A load file is a JSON array of `{"title": ..., "price": ...}` records;
//! prices may be JSON numbers or strings.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::NewItem;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read load file: {0}")]
    Read(#[source] std::io::Error),
    #[error("load file is not a JSON array of {{title, price}} records: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid record {index}: {message}")]
    Invalid { index: usize, message: String },
}

/// Parse and validate every record of a load file's contents.
pub fn parse_records(contents: &str) -> Result<Vec<NewItem>, ImportError> {
    let records: Vec<NewItem> = serde_json::from_str(contents).map_err(ImportError::Parse)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .validated()
                .map_err(|message| ImportError::Invalid { index, message })
        })
        .collect()
}

pub fn read_records(path: &Path) -> Result<Vec<NewItem>, ImportError> {
    let contents = fs::read_to_string(path).map_err(ImportError::Read)?;
    parse_records(&contents)
}
