//! API routes for pulse-server

pub mod account;
pub mod inbox;
pub mod org;
pub mod submit;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/register", post(account::register))
        .route("/api/approve/{username}", post(account::approve))
        .route("/api/submit", post(submit::submit))
        .route("/api/inbox/{manager}", get(inbox::list))
        .route("/api/inbox/{manager}/open", post(inbox::open))
        .route("/api/org/chain/{username}", get(org::chain))
        .route("/api/org/reportees/{username}", get(org::reportees))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
