//! Typst receipt rendering.
//!
//! The template defines `cash_receipt(items, total, issued_at)`; rendering
//! appends a call to it with the receipt data as Typst literals.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use super::common::{escape_typst_string, format_amount};
use super::models::Receipt;
use super::ReceiptError;

pub const TEMPLATE_FILE: &str = "receipt.typ";

pub struct ReceiptRenderer {
    template: String,
}

impl ReceiptRenderer {
    /// Load `receipt.typ` from `template_dir`.
    pub fn new(template_dir: &Path) -> Result<Self, ReceiptError> {
        let template_path = template_dir.join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(ReceiptError::TemplateIo)?;
        Ok(Self { template })
    }

    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, receipt: &Receipt, issued_at: &str) -> String {
        let mut items = String::new();
        for line in &receipt.lines {
            // writing to a String cannot fail
            let _ = writeln!(
                items,
                r#"    (title: "{}", quantity: {}, price: "{}", total: "{}"),"#,
                escape_typst_string(&line.title),
                line.quantity,
                format_amount(&line.unit_price),
                format_amount(&line.total_price),
            );
        }

        format!(
            r#"{}

#cash_receipt(
  items: (
{}  ),
  total: "{}",
  issued_at: "{}",
)
"#,
            self.template.trim_end(),
            items,
            format_amount(&receipt.total_sum),
            escape_typst_string(issued_at),
        )
    }
}
