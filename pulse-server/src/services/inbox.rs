//! Manager inbox: list envelope metadata, or unlock and open everything
//! addressed to one manager.

use pulse_core::RecipientPayload;
use serde::Serialize;

use crate::db::{directory, envelopes};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnvelopeSummary {
    pub id: i64,
    pub distance: String,
    pub approved: bool,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct OpenedInbox {
    pub submissions: Vec<RecipientPayload>,
    /// Envelopes that failed to decrypt or deserialize; logged, not fatal.
    pub unreadable: usize,
}

pub async fn list(
    state: &AppState,
    manager: &str,
    include_unapproved: bool,
) -> ApiResult<Vec<EnvelopeSummary>> {
    ensure_known(state, manager).await?;
    let rows = envelopes::fetch_for_manager(&state.feedback, manager, include_unapproved).await?;
    Ok(rows
        .into_iter()
        .map(|r| EnvelopeSummary {
            id: r.id,
            distance: r.distance,
            approved: r.approved,
            created_at: r.created_at,
        })
        .collect())
}

/// Unlock the manager's private key with their password and open every
/// addressed envelope. A record that fails to decrypt is skipped with a
/// diagnostic rather than failing the whole inbox.
pub async fn open_all(
    state: &AppState,
    manager: &str,
    password: &str,
    include_unapproved: bool,
) -> ApiResult<OpenedInbox> {
    ensure_known(state, manager).await?;
    let private = state.keys.private_key(manager, password)?;

    let rows = envelopes::fetch_for_manager(&state.feedback, manager, include_unapproved).await?;
    let mut submissions = Vec::with_capacity(rows.len());
    let mut unreadable = 0usize;

    for row in rows {
        match pulse_keys::open(&private, &row.blob) {
            Ok(plaintext) => match RecipientPayload::from_bytes(&plaintext) {
                Ok(payload) => submissions.push(payload),
                Err(e) => {
                    tracing::warn!(manager, envelope = row.id, error = %e, "payload deserialization failed");
                    unreadable += 1;
                }
            },
            Err(e) => {
                tracing::warn!(manager, envelope = row.id, error = %e, "envelope decryption failed");
                unreadable += 1;
            }
        }
    }

    Ok(OpenedInbox {
        submissions,
        unreadable,
    })
}

async fn ensure_known(state: &AppState, manager: &str) -> ApiResult<()> {
    directory::find(&state.feedback, manager)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(manager.to_string()))
}
