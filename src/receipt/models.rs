use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ReceiptError;

/// Body of `POST /cash_machine`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct CashMachineRequest {
    /// Purchased item ids; repeat an id once per unit sold.
    #[serde(default)]
    #[schema(example = json!([1, 1, 2]))]
    pub items: Option<Vec<i64>>,
}

impl CashMachineRequest {
    pub fn new(items: Vec<i64>) -> Self {
        Self { items: Some(items) }
    }

    /// The submitted ids, or `EmptyItems` when missing or empty.
    pub fn item_ids(&self) -> Result<&[i64], ReceiptError> {
        match self.items.as_deref() {
            Some(ids) if !ids.is_empty() => Ok(ids),
            _ => Err(ReceiptError::EmptyItems),
        }
    }
}

/// One catalog entry's quantity and subtotal within a receipt.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReceiptLine {
    pub item_id: i64,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Receipt {
    /// In catalog order (descending item id).
    pub lines: Vec<ReceiptLine>,
    pub total_sum: Decimal,
    /// Submitted ids with no catalog entry; they do not appear on the receipt.
    pub unknown_ids: Vec<i64>,
}

/// Outcome of a successful `POST /cash_machine`.
#[derive(Debug, Clone)]
pub struct IssuedReceipt {
    pub token: Uuid,
    /// Retrieval URL encoded in the QR code.
    pub url: String,
    pub qr_png: Vec<u8>,
    pub issued_at: String,
    pub receipt: Receipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: CashMachineRequest = serde_json::from_str(r#"{"items": [1, 1, 2]}"#).unwrap();
        assert_eq!(request.item_ids().unwrap(), &[1, 1, 2]);
    }

    #[test]
    fn test_missing_or_empty_items_rejected() {
        for body in [r#"{}"#, r#"{"items": null}"#, r#"{"items": []}"#] {
            let request: CashMachineRequest = serde_json::from_str(body).unwrap();
            assert!(
                matches!(request.item_ids(), Err(ReceiptError::EmptyItems)),
                "body {body} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_integer_ids_fail_to_parse() {
        let result: Result<CashMachineRequest, _> = serde_json::from_str(r#"{"items": ["a"]}"#);
        assert!(result.is_err());
    }
}
