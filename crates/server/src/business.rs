//! Business profile API endpoints

use api_types::business::{BusinessUpdate, BusinessView};
use axum::{Extension, Json, extract::State};
use engine::EngineError;

use crate::{ServerError, server::AdminUser, server::ServerState};

fn to_view(profile: engine::BusinessProfile) -> BusinessView {
    BusinessView {
        name: profile.name,
        email: profile.email,
        contact_number: profile.contact_number,
        location: profile.location,
        attendant: profile.attendant,
    }
}

/// The saved profile, pre-filling the receipt form. 404 until one is saved.
pub async fn get(State(state): State<ServerState>) -> Result<Json<BusinessView>, ServerError> {
    let profile = state
        .engine
        .business_profile()
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("business profile".to_string()))?;
    Ok(Json(to_view(profile)))
}

/// Upsert the singleton profile (admin only).
pub async fn update(
    Extension(admin): Extension<AdminUser>,
    State(state): State<ServerState>,
    Json(payload): Json<BusinessUpdate>,
) -> Result<Json<BusinessView>, ServerError> {
    let profile = state
        .engine
        .update_business_profile(engine::BusinessInput {
            name: payload.name,
            email: payload.email,
            contact_number: payload.contact_number,
            location: payload.location,
            attendant: payload.attendant,
        })
        .await?;

    tracing::info!(admin = %admin.0, "business profile updated");
    Ok(Json(to_view(profile)))
}
