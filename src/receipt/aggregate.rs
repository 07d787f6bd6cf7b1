//! Quantities and totals for a list of purchased item ids.

use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};
use rust_decimal::Decimal;

use super::models::{Receipt, ReceiptLine};
use super::ReceiptError;
use crate::catalog::{Catalog, Item};

/// Occurrences of each distinct id in `item_ids`.
pub fn count_occurrences(item_ids: &[i64]) -> BTreeMap<i64, u32> {
    let mut counts = BTreeMap::new();
    for id in item_ids {
        *counts.entry(*id).or_insert(0) += 1;
    }
    counts
}

/// Build receipt lines for the catalog entries fetched for `item_ids`.
///
/// Lines keep the order of `items`. Ids without a matching entry are listed
/// in `unknown_ids` and contribute nothing to the total.
pub fn aggregate(item_ids: &[i64], items: Vec<Item>) -> Receipt {
    let counts = count_occurrences(item_ids);
    let mut lines = Vec::with_capacity(items.len());
    let mut total_sum = Decimal::ZERO;
    let mut matched = HashSet::with_capacity(items.len());

    for item in items {
        let Some(&quantity) = counts.get(&item.id) else {
            continue;
        };
        if !matched.insert(item.id) {
            continue;
        }

        let total_price = item.price * Decimal::from(quantity);
        total_sum += total_price;
        lines.push(ReceiptLine {
            item_id: item.id,
            title: item.title,
            quantity,
            unit_price: item.price,
            total_price,
        });
    }

    let unknown_ids = counts
        .keys()
        .filter(|id| !matched.contains(*id))
        .copied()
        .collect();

    Receipt {
        lines,
        total_sum,
        unknown_ids,
    }
}

/// Look up `item_ids` in the catalog with one bulk fetch and aggregate them.
///
/// Fails with `ItemsNotFound` when no id matched.
pub async fn aggregate_from_catalog(catalog: &dyn Catalog, item_ids: &[i64]) -> Result<Receipt, ReceiptError> {
    let unique_ids: Vec<i64> = count_occurrences(item_ids).into_keys().collect();
    debug!("Fetching {} distinct items from catalog", unique_ids.len());

    let items = catalog.find_by_ids(&unique_ids).await?;
    let receipt = aggregate(item_ids, items);

    if receipt.lines.is_empty() {
        return Err(ReceiptError::ItemsNotFound(receipt.unknown_ids));
    }
    if !receipt.unknown_ids.is_empty() {
        warn!("Ignoring unknown item ids: {:?}", receipt.unknown_ids);
    }

    Ok(receipt)
}
