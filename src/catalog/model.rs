use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::validation::{validate_text, ValidationError, ValidationErrors};

pub const MAX_TITLE_LEN: usize = 200;

/// A purchasable catalog entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, FromRow, ToSchema)]
pub struct Item {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Espresso")]
    pub title: String,
    #[schema(value_type = String, example = "10.50")]
    pub price: Decimal,
}

/// Item data as accepted by the bulk-load command and `POST /api/items`.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct NewItem {
    #[schema(example = "Espresso")]
    pub title: String,
    #[schema(value_type = String, example = "10.50")]
    pub price: Decimal,
}

impl NewItem {
    pub fn new(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }

    /// Validate the record and normalize it for storage: trimmed title,
    /// price rounded to two decimal places.
    pub fn validated(self) -> Result<Self, String> {
        let mut errors = ValidationErrors::new();
        validate_text(&self.title, "title", "Title", MAX_TITLE_LEN, &mut errors);

        let price = self.price.round_dp(2);
        if price < min_price() {
            errors.add(ValidationError::price_too_low("price"));
        } else if price >= max_price_exclusive() {
            errors.add(ValidationError::price_too_high("price"));
        }

        errors.into_result()?;
        Ok(Self {
            title: self.title.trim().to_string(),
            price,
        })
    }
}

fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

// NUMERIC(10, 2)
fn max_price_exclusive() -> Decimal {
    Decimal::new(100_000_000, 0)
}
