//! Business profile operations: read and upsert of the singleton row.

use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{BusinessProfile, ResultEngine, business};

use super::{Engine, normalize_optional, normalize_required, with_tx};

/// Raw profile form input. Name, contact, location, and attendant are
/// required; email may be blank.
#[derive(Clone, Debug, Default)]
pub struct BusinessInput {
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub location: String,
    pub attendant: String,
}

impl Engine {
    /// The stored business profile, if one has been saved yet.
    pub async fn business_profile(&self) -> ResultEngine<Option<BusinessProfile>> {
        let model = business::Entity::find_by_id(business::SINGLETON_ID)
            .one(&self.database)
            .await?;
        model.map(BusinessProfile::try_from).transpose()
    }

    /// Create or update the singleton profile row.
    pub async fn update_business_profile(
        &self,
        input: BusinessInput,
    ) -> ResultEngine<BusinessProfile> {
        let name = normalize_required(&input.name, "business name")?;
        let contact_number = normalize_required(&input.contact_number, "contact number")?;
        let location = normalize_required(&input.location, "location")?;
        let attendant = normalize_required(&input.attendant, "attendant")?;
        let email = normalize_optional(&input.email);
        let now = Utc::now();

        with_tx!(self, |db_tx| {
            let existing = business::Entity::find_by_id(business::SINGLETON_ID)
                .one(&db_tx)
                .await?;

            let model = match existing {
                Some(model) => {
                    let mut active: business::ActiveModel = model.into();
                    active.name = ActiveValue::Set(name.clone());
                    active.email = ActiveValue::Set(email.clone());
                    active.contact_number = ActiveValue::Set(contact_number.clone());
                    active.location = ActiveValue::Set(location.clone());
                    active.attendant = ActiveValue::Set(attendant.clone());
                    active.updated_at = ActiveValue::Set(now);
                    active.update(&db_tx).await?
                }
                None => {
                    let active = business::ActiveModel {
                        id: ActiveValue::Set(business::SINGLETON_ID),
                        name: ActiveValue::Set(name.clone()),
                        email: ActiveValue::Set(email.clone()),
                        contact_number: ActiveValue::Set(contact_number.clone()),
                        location: ActiveValue::Set(location.clone()),
                        attendant: ActiveValue::Set(attendant.clone()),
                        created_at: ActiveValue::Set(now),
                        updated_at: ActiveValue::Set(now),
                    };
                    active.insert(&db_tx).await?
                }
            };

            BusinessProfile::try_from(model)
        })
    }
}
