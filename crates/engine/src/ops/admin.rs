//! Admin credential store and session gate.
//!
//! Passwords are argon2-hashed; sessions are opaque uuid tokens persisted in
//! `admin_sessions`. A token row existing is the whole session state.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, admins, sessions};

use super::{Engine, normalize_required};

const BAD_CREDENTIALS: &str = "invalid username or password";

impl Engine {
    /// Create an admin account with an argon2-hashed password.
    pub async fn create_admin(&self, username: &str, password: &str) -> ResultEngine<()> {
        let username = normalize_required(username, "username")?;
        if password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        let existing = admins::Entity::find_by_id(username.clone())
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(username));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| EngineError::Validation(format!("failed to hash password: {err}")))?
            .to_string();

        admins::ActiveModel {
            username: ActiveValue::Set(username.clone()),
            password_hash: ActiveValue::Set(password_hash),
        }
        .insert(&self.database)
        .await?;

        tracing::info!(%username, "admin account created");
        Ok(())
    }

    /// Verify credentials and mint a session token.
    pub async fn login(&self, username: &str, password: &str) -> ResultEngine<String> {
        let admin = admins::Entity::find_by_id(username.trim().to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

        let parsed = PasswordHash::new(&admin.password_hash)
            .map_err(|_| EngineError::Unauthorized(BAD_CREDENTIALS.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| EngineError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

        let token = Uuid::new_v4().to_string();
        sessions::ActiveModel {
            token: ActiveValue::Set(token.clone()),
            username: ActiveValue::Set(admin.username.clone()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;

        tracing::info!(username = %admin.username, "admin logged in");
        Ok(token)
    }

    /// Drop a session. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> ResultEngine<()> {
        sessions::Entity::delete_by_id(token.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Resolve a session token to its admin username, for the route gate.
    pub async fn session_user(&self, token: &str) -> ResultEngine<String> {
        let session = sessions::Entity::find_by_id(token.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::Unauthorized("session not found".to_string()))?;
        Ok(session.username)
    }
}
