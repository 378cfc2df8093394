//! Organization query handlers
//!
//! GET /api/org/chain/{username}     — ordered manager chain
//! GET /api/org/reportees/{username} — direct/indirect reportee partition

use axum::Json;
use axum::extract::{Path, State};
use pulse_core::Reportees;
use serde_json::{Value, json};

use crate::db::directory;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn chain(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let tree = directory::org_tree(&state.feedback).await?;
    let chain = tree.manager_chain(&username)?;
    Ok(Json(json!({ "username": username, "chain": chain })))
}

pub async fn reportees(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Reportees>> {
    let tree = directory::org_tree(&state.feedback).await?;
    Ok(Json(tree.reportees(&username)?))
}
