//! Admin session API endpoints

use api_types::admin::{Login, SessionToken};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{ServerError, server::ServerState};

/// Verify credentials and mint a session token.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<SessionToken>, ServerError> {
    let token = state
        .engine
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(SessionToken { token }))
}

/// Drop the current session. Idempotent.
pub async fn logout(
    auth_header: TypedHeader<Authorization<Bearer>>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.logout(auth_header.token()).await?;
    Ok(StatusCode::NO_CONTENT)
}
