//! The singleton business profile shown on new receipts.
//!
//! Exactly one row exists (fixed primary key); the engine upserts it rather
//! than inserting fresh rows.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Fixed primary key of the only profile row.
pub(crate) const SINGLETON_ID: i32 = 1;

/// The record describing the operating business.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub email: Option<String>,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "business_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for BusinessProfile {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            name: model.name,
            email: model.email,
            contact_number: model.contact_number,
            location: model.location,
            attendant: model.attendant,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
