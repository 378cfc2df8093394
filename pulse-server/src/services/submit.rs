//! Submission fan-out: one plaintext in, one encrypted envelope per manager
//! in the submitter's chain out.
//!
//! Order of operations: validate, resolve the chain, seal every envelope,
//! then claim the throttle slot and write all rows in one transaction. A
//! seal failure therefore never burns the employee's one slot for the
//! period, and the ledger stays the single authority on "already submitted".

use pulse_core::{Distance, FeedbackSubmission};
use pulse_keys::SubmissionKey;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::envelopes::NewEnvelope;
use crate::db::{directory, envelopes, ledger};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Outcome of one fan-out, reported back to the submitter.
#[derive(Debug, Serialize)]
pub struct FanoutReport {
    /// Managers an envelope was stored for.
    pub recipients: usize,
    /// Managers skipped because they hold no keypair (or their seal failed).
    pub skipped: Vec<String>,
    /// Ledger key the submission was recorded under.
    pub period: String,
}

pub async fn submit_feedback(
    state: &AppState,
    username: &str,
    responses: BTreeMap<String, u8>,
    comment: String,
) -> ApiResult<FanoutReport> {
    let employee = directory::find(&state.feedback, username)
        .await?
        .ok_or_else(|| ApiError::NotFound(username.to_string()))?;

    state.questions.validate_responses(&responses)?;

    let now = chrono::Utc::now().timestamp();
    let period = state.period.label(now);

    // Early refusal so a repeat submitter gets the throttle message before
    // any crypto work happens.
    if ledger::has_submitted(&state.attendance, username, &period).await? {
        return Err(ApiError::AlreadySubmitted(username.to_string()));
    }

    let tree = directory::org_tree(&state.feedback).await?;
    let chain = tree.manager_chain(username)?;

    let submission = FeedbackSubmission {
        responses,
        comment,
        submitted_at: now,
        approved: employee.is_approved(),
    };

    let key = SubmissionKey::generate();
    let mut sealed: Vec<NewEnvelope> = Vec::with_capacity(chain.len());
    let mut skipped: Vec<String> = Vec::new();

    for (position, manager) in chain.iter().enumerate() {
        let distance = if position == 0 {
            Distance::Direct
        } else {
            Distance::Indirect
        };

        let public = match state.keys.public_key(manager) {
            Ok(Some(key)) => key,
            Ok(None) => {
                tracing::warn!(%manager, "no public key, skipping recipient");
                skipped.push(manager.clone());
                continue;
            }
            Err(e) => {
                tracing::warn!(%manager, error = %e, "unreadable public key, skipping recipient");
                skipped.push(manager.clone());
                continue;
            }
        };

        let payload = submission.payload_for(distance)?;
        match pulse_keys::seal(&key, &public, &payload) {
            Ok(blob) => sealed.push(NewEnvelope {
                manager: manager.clone(),
                distance: distance.as_str().to_string(),
                blob,
                approved: submission.approved,
                created_at: now,
            }),
            Err(e) => {
                tracing::warn!(%manager, error = %e, "seal failed, skipping recipient");
                skipped.push(manager.clone());
            }
        }
    }

    // Claim the slot last; a lost race here still refuses the duplicate.
    if !ledger::try_mark(&state.attendance, username, &period, now).await? {
        return Err(ApiError::AlreadySubmitted(username.to_string()));
    }

    envelopes::insert_all(&state.feedback, &sealed).await?;

    tracing::info!(
        username,
        recipients = sealed.len(),
        skipped = skipped.len(),
        %period,
        "feedback submitted"
    );

    Ok(FanoutReport {
        recipients: sealed.len(),
        skipped,
        period,
    })
}
