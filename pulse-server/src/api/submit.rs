//! Feedback submission handler
//!
//! POST /api/submit — validate, throttle-check, fan out encrypted envelopes.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ApiResult;
use crate::services::submit::{FanoutReport, submit_feedback};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub username: String,
    /// question id -> option ordinal (1..=4)
    pub responses: BTreeMap<String, u8>,
    #[serde(default)]
    pub comment: String,
}

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<Json<FanoutReport>> {
    let username = req.username.trim().to_lowercase();
    let report = submit_feedback(&state, &username, req.responses, req.comment).await?;
    Ok(Json(report))
}
