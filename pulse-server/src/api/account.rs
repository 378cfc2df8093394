//! Account handlers
//!
//! POST /api/register            — create a pending account + keypair
//! POST /api/approve/{username}  — flip a pending account to approved

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::directory;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Immediate manager; omitted for top-level employees.
    pub manager: Option<String>,
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<Value>> {
    let username = req.username.trim().to_lowercase();

    if username.is_empty() || !username.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ApiError::Validation(
            "username must be non-empty alphanumeric".into(),
        ));
    }
    if req.password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    if let Some(m) = &req.manager
        && m.trim().eq_ignore_ascii_case(&username)
    {
        return Err(ApiError::Validation("cannot be your own manager".into()));
    }

    if directory::find(&state.feedback, &username).await?.is_some() {
        return Err(ApiError::Conflict(username));
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hash error");
        ApiError::Internal
    })?;

    let manager = req.manager.as_deref().map(|m| m.trim().to_lowercase());
    let now = chrono::Utc::now().timestamp();
    directory::create(&state.feedback, &username, &hashed, manager.as_deref(), now).await?;

    // Keypair is minted at registration so feedback can reach this account
    // as soon as anyone below them submits.
    state.keys.generate(&username, &req.password)?;

    tracing::info!(%username, "account registered (pending approval)");
    Ok(Json(json!({ "username": username, "status": "pending" })))
}

pub async fn approve(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let updated =
        directory::set_status(&state.feedback, &username, directory::STATUS_APPROVED).await?;
    if !updated {
        return Err(ApiError::NotFound(username));
    }
    tracing::info!(%username, "account approved");
    Ok(Json(json!({ "username": username, "status": "approved" })))
}
