//! Tabular export of all receipts, one row per receipt.
//!
//! The engine only builds the rows; the server serializes them to CSV.

use serde::Serialize;

use crate::{ResultEngine, clock};

use super::Engine;

/// Customer cell value when no customer name was recorded.
const WALK_IN: &str = "Walk-in";

/// One export row. Field order is the column order of the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Receipt #")]
    pub receipt_number: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Business Name")]
    pub business_name: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Attendant")]
    pub attendant: String,
    #[serde(rename = "Items")]
    pub items: String,
    #[serde(rename = "Total Amount")]
    pub total_amount: String,
}

impl Engine {
    /// Build export rows for every receipt, newest first.
    pub async fn export_rows(&self) -> ResultEngine<Vec<ExportRow>> {
        let receipts = self.list_receipts(None).await?;

        Ok(receipts
            .into_iter()
            .map(|receipt| {
                let items = receipt
                    .items
                    .iter()
                    .map(|item| format!("{} ({}x)", item.description, item.quantity))
                    .collect::<Vec<_>>()
                    .join("; ");
                ExportRow {
                    receipt_number: receipt.receipt_number,
                    date: clock::format_stamp(receipt.created_at),
                    business_name: receipt.business_name,
                    customer: receipt
                        .customer_name
                        .unwrap_or_else(|| WALK_IN.to_string()),
                    attendant: receipt.attendant,
                    items,
                    total_amount: receipt.total_amount.to_decimal_string(),
                }
            })
            .collect())
    }
}
