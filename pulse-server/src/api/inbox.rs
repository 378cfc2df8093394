//! Manager inbox handlers
//!
//! GET  /api/inbox/{manager}       — envelope metadata addressed to a manager
//! POST /api/inbox/{manager}/open  — unlock with the manager's password and
//!                                   decrypt every addressed envelope

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::services::inbox;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct InboxQuery {
    #[serde(default)]
    pub include_unapproved: bool,
}

#[derive(Deserialize)]
pub struct OpenRequest {
    pub password: String,
    #[serde(default)]
    pub include_unapproved: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Path(manager): Path<String>,
    Query(query): Query<InboxQuery>,
) -> ApiResult<Json<Vec<inbox::EnvelopeSummary>>> {
    let rows = inbox::list(&state, &manager, query.include_unapproved).await?;
    Ok(Json(rows))
}

pub async fn open(
    State(state): State<AppState>,
    Path(manager): Path<String>,
    Json(req): Json<OpenRequest>,
) -> ApiResult<Json<inbox::OpenedInbox>> {
    let opened =
        inbox::open_all(&state, &manager, &req.password, req.include_unapproved).await?;
    Ok(Json(opened))
}
