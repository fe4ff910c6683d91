//! Receipt header: the persisted transaction record.
//!
//! A `Receipt` denormalizes the business profile at creation time so that
//! later profile edits never rewrite history, and owns its line items.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ReceiptItem, clock};

/// A persisted sale with its line items, totals, and payment info.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub receipt_number: String,
    pub created_at: DateTime<Utc>,
    pub business_name: String,
    pub business_email: Option<String>,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub total_amount: MoneyCents,
    pub money_received: MoneyCents,
    pub change_amount: MoneyCents,
    pub items: Vec<ReceiptItem>,
}

impl Receipt {
    /// Receipt date in the business timezone, e.g. `August 25, 2026`.
    #[must_use]
    pub fn display_date(&self) -> String {
        clock::format_long_date(self.created_at)
    }

    /// Receipt time in the business timezone, e.g. `03:41 PM`.
    #[must_use]
    pub fn display_time(&self) -> String {
        clock::format_clock_time(self.created_at)
    }
}

/// Generates a receipt number: sortable timestamp prefix plus a random
/// suffix so two receipts created within the same second never collide.
#[must_use]
pub fn generate_receipt_number(created_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        created_at.format("%Y%m%d%H%M%S"),
        &suffix[..4].to_uppercase()
    )
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub created_at: DateTimeUtc,
    pub business_name: String,
    pub business_email: Option<String>,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub total_amount_cents: i64,
    pub money_received_cents: i64,
    pub change_amount_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receipt_items::Entity")]
    ReceiptItems,
}

impl Related<super::receipt_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Receipt> for ActiveModel {
    fn from(receipt: &Receipt) -> Self {
        Self {
            id: ActiveValue::Set(receipt.id.to_string()),
            receipt_number: ActiveValue::Set(receipt.receipt_number.clone()),
            created_at: ActiveValue::Set(receipt.created_at),
            business_name: ActiveValue::Set(receipt.business_name.clone()),
            business_email: ActiveValue::Set(receipt.business_email.clone()),
            contact_number: ActiveValue::Set(receipt.contact_number.clone()),
            location: ActiveValue::Set(receipt.location.clone()),
            attendant: ActiveValue::Set(receipt.attendant.clone()),
            customer_name: ActiveValue::Set(receipt.customer_name.clone()),
            customer_address: ActiveValue::Set(receipt.customer_address.clone()),
            total_amount_cents: ActiveValue::Set(receipt.total_amount.cents()),
            money_received_cents: ActiveValue::Set(receipt.money_received.cents()),
            change_amount_cents: ActiveValue::Set(receipt.change_amount.cents()),
        }
    }
}

impl TryFrom<Model> for Receipt {
    type Error = EngineError;

    /// Items are loaded separately; the conversion starts with an empty list.
    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("receipt not exists".to_string()))?,
            receipt_number: model.receipt_number,
            created_at: model.created_at,
            business_name: model.business_name,
            business_email: model.business_email,
            contact_number: model.contact_number,
            location: model.location,
            attendant: model.attendant,
            customer_name: model.customer_name,
            customer_address: model.customer_address,
            total_amount: MoneyCents::new(model.total_amount_cents),
            money_received: MoneyCents::new(model.money_received_cents),
            change_amount: MoneyCents::new(model.change_amount_cents),
            items: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_number_keeps_timestamp_prefix() {
        let now = Utc::now();
        let number = generate_receipt_number(now);
        let prefix = now.format("%Y%m%d%H%M%S").to_string();
        assert!(number.starts_with(&prefix));
        assert_eq!(number.len(), prefix.len() + 5);
    }

    #[test]
    fn same_second_numbers_differ() {
        let now = Utc::now();
        assert_ne!(generate_receipt_number(now), generate_receipt_number(now));
    }
}
