//! Receipt operations: create, lookup, list, delete.

use chrono::{NaiveDate, Utc};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, MoneyCents, Receipt, ReceiptItem, ResultEngine, clock, receipt_items, receipts,
    receipts::generate_receipt_number,
};

use super::{Engine, normalize_optional, normalize_required, with_tx};

/// Sentinel in the item description dropdown that routes to the free-text
/// field instead.
const CUSTOM_DESCRIPTION: &str = "custom";

/// One line-item row as submitted, all fields raw strings.
#[derive(Clone, Debug, Default)]
pub struct ItemInput {
    pub description: String,
    pub custom_description: String,
    pub quantity: String,
    pub price: String,
}

/// Raw receipt form input. Business name, contact, location, and attendant
/// are required; everything else may be blank.
#[derive(Clone, Debug, Default)]
pub struct ReceiptInput {
    pub business_name: String,
    pub business_email: String,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
    pub customer_name: String,
    pub customer_address: String,
    pub money_received: String,
    pub items: Vec<ItemInput>,
}

impl Engine {
    /// Validate a receipt form and persist the receipt with its line items.
    ///
    /// Row policy, per the original workflow:
    /// - a row whose description, quantity, or price is blank is skipped
    ///   silently (incomplete rows are ignored, not an error);
    /// - a row with a non-blank but unparseable quantity or price aborts the
    ///   whole request, nothing is written;
    /// - money received defaults to 0 when blank or unparseable, and change
    ///   is always `received - total` (negative when underpaid).
    pub async fn create_receipt(&self, input: ReceiptInput) -> ResultEngine<Receipt> {
        let business_name = normalize_required(&input.business_name, "business name")?;
        let contact_number = normalize_required(&input.contact_number, "contact number")?;
        let location = normalize_required(&input.location, "location")?;
        let attendant = normalize_required(&input.attendant, "attendant")?;

        let mut items = Vec::new();
        for row in &input.items {
            let description = match row.description.trim() {
                CUSTOM_DESCRIPTION => row.custom_description.trim(),
                other => other,
            };
            let quantity = row.quantity.trim();
            let price = row.price.trim();
            if description.is_empty() || quantity.is_empty() || price.is_empty() {
                continue;
            }

            let quantity: i64 = quantity.parse().map_err(|_| {
                EngineError::Validation(format!("invalid quantity for item: {description}"))
            })?;
            let price: MoneyCents = price.parse().map_err(|_| {
                EngineError::Validation(format!("invalid price for item: {description}"))
            })?;

            items.push(ReceiptItem::new(description.to_string(), quantity, price)?);
        }

        let total_amount = items
            .iter()
            .fold(MoneyCents::ZERO, |acc, item| acc + item.subtotal);
        let money_received = input
            .money_received
            .trim()
            .parse::<MoneyCents>()
            .unwrap_or(MoneyCents::ZERO);
        let change_amount = money_received - total_amount;

        let created_at = Utc::now();
        let receipt = Receipt {
            id: uuid::Uuid::new_v4(),
            receipt_number: generate_receipt_number(created_at),
            created_at,
            business_name,
            business_email: normalize_optional(&input.business_email),
            contact_number,
            location,
            attendant,
            customer_name: normalize_optional(&input.customer_name),
            customer_address: normalize_optional(&input.customer_address),
            total_amount,
            money_received,
            change_amount,
            items,
        };

        with_tx!(self, |db_tx| {
            receipts::ActiveModel::from(&receipt).insert(&db_tx).await?;
            for item in &receipt.items {
                item.active_model(&receipt.id).insert(&db_tx).await?;
            }
            Ok::<(), EngineError>(())
        })?;

        tracing::info!(
            receipt_number = %receipt.receipt_number,
            items = receipt.items.len(),
            total_cents = receipt.total_amount.cents(),
            "receipt saved"
        );
        Ok(receipt)
    }

    /// Fetch one receipt (with items) by its receipt number.
    pub async fn receipt_by_number(&self, receipt_number: &str) -> ResultEngine<Receipt> {
        let model = receipts::Entity::find()
            .filter(receipts::Column::ReceiptNumber.eq(receipt_number))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(receipt_number.to_string()))?;

        let item_models = model
            .find_related(receipt_items::Entity)
            .order_by_asc(receipt_items::Column::Id)
            .all(&self.database)
            .await?;

        let mut receipt = Receipt::try_from(model)?;
        receipt.items = item_models
            .into_iter()
            .map(ReceiptItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(receipt)
    }

    /// List receipts newest first, optionally limited to an inclusive range
    /// of business-timezone calendar dates. Items are loaded for each.
    pub async fn list_receipts(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> ResultEngine<Vec<Receipt>> {
        let mut query = receipts::Entity::find();
        if let Some((start, end)) = range {
            if start > end {
                return Err(EngineError::Validation(
                    "start date is after end date".to_string(),
                ));
            }
            let (window_start, _) = clock::day_bounds_utc(start);
            let (_, window_end) = clock::day_bounds_utc(end);
            query = query
                .filter(receipts::Column::CreatedAt.gte(window_start))
                .filter(receipts::Column::CreatedAt.lt(window_end));
        }

        let rows = query
            .find_with_related(receipt_items::Entity)
            .order_by_desc(receipts::Column::CreatedAt)
            .all(&self.database)
            .await?;

        rows.into_iter()
            .map(|(model, item_models)| {
                let mut receipt = Receipt::try_from(model)?;
                receipt.items = item_models
                    .into_iter()
                    .map(ReceiptItem::try_from)
                    .collect::<ResultEngine<Vec<_>>>()?;
                Ok(receipt)
            })
            .collect()
    }

    /// Delete a receipt and all of its items.
    ///
    /// The schema declares `ON DELETE CASCADE`, but the items are removed
    /// explicitly inside the same transaction so the invariant does not
    /// depend on the backend honoring the FK.
    pub async fn delete_receipt(&self, receipt_number: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = receipts::Entity::find()
                .filter(receipts::Column::ReceiptNumber.eq(receipt_number))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(receipt_number.to_string()))?;

            receipt_items::Entity::delete_many()
                .filter(receipt_items::Column::ReceiptId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            receipts::Entity::delete_by_id(model.id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
