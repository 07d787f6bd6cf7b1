//! Formatting helpers shared by the receipt renderer.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Format `now` as `DD.MM.YYYY HH:MM` at the given UTC offset.
pub fn format_receipt_timestamp(now: DateTime<Utc>, offset: &FixedOffset) -> String {
    now.with_timezone(offset).format(TIMESTAMP_FORMAT).to_string()
}

/// Money amount with exactly two decimal places.
pub fn format_amount(amount: &Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}
