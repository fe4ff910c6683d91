//! Receipt line items.
//!
//! The subtotal is computed once at creation (quantity × unit price) and
//! stored; it is never re-derived afterwards.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// One product/quantity/price entry belonging to a receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: i64,
    pub price: MoneyCents,
    pub subtotal: MoneyCents,
}

impl ReceiptItem {
    /// Fails with [`EngineError::InvalidAmount`] when the subtotal would
    /// overflow `i64` cents.
    pub fn new(
        description: String,
        quantity: i64,
        price: MoneyCents,
    ) -> Result<Self, EngineError> {
        let subtotal = price.checked_mul(quantity).ok_or_else(|| {
            EngineError::InvalidAmount(format!("subtotal too large for item: {description}"))
        })?;
        Ok(Self {
            id: Uuid::new_v4(),
            description,
            quantity,
            price,
            subtotal,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "receipt_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub receipt_id: String,
    pub description: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub subtotal_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receipts::Entity",
        from = "Column::ReceiptId",
        to = "super::receipts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Receipts,
}

impl Related<super::receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ReceiptItem {
    /// Active model bound to the owning receipt.
    pub(crate) fn active_model(&self, receipt_id: &Uuid) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(self.id.to_string()),
            receipt_id: ActiveValue::Set(receipt_id.to_string()),
            description: ActiveValue::Set(self.description.clone()),
            quantity: ActiveValue::Set(self.quantity),
            price_cents: ActiveValue::Set(self.price.cents()),
            subtotal_cents: ActiveValue::Set(self.subtotal.cents()),
        }
    }
}

impl TryFrom<Model> for ReceiptItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("receipt item not exists".to_string()))?,
            description: model.description,
            quantity: model.quantity,
            price: MoneyCents::new(model.price_cents),
            subtotal: MoneyCents::new(model.subtotal_cents),
        })
    }
}
