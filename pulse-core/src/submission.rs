//! Feedback submission value types and their canonical byte form.
//!
//! A submission is a single value created once per employee per period and
//! never mutated. It is physically fanned out as one encrypted copy per
//! recipient manager; the only per-recipient difference in the plaintext is
//! the distance tag.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How far below the recipient the submitter sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Submitter reports directly to the recipient.
    Direct,
    /// Submitter is two or more levels below the recipient.
    Indirect,
}

impl Distance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distance::Direct => "direct",
            Distance::Indirect => "indirect",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(Distance::Direct),
            "indirect" => Some(Distance::Indirect),
            _ => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's answers for one collection period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// question id -> chosen option ordinal (1..=4). `BTreeMap` keeps the
    /// canonical byte form deterministic.
    pub responses: BTreeMap<String, u8>,
    pub comment: String,
    pub submitted_at: i64,
    /// Submitter's account approval state at submission time.
    pub approved: bool,
}

impl FeedbackSubmission {
    /// Canonical plaintext bytes for one recipient. The distance tag is the
    /// only recipient-specific field.
    pub fn payload_for(&self, distance: Distance) -> Result<Vec<u8>> {
        let payload = RecipientPayload {
            distance,
            responses: self.responses.clone(),
            comment: self.comment.clone(),
            submitted_at: self.submitted_at,
            approved: self.approved,
        };
        Ok(serde_json::to_vec(&payload)?)
    }
}

/// What a recipient sees after opening their envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientPayload {
    pub distance: Distance,
    pub responses: BTreeMap<String, u8>,
    pub comment: String,
    pub submitted_at: i64,
    pub approved: bool,
}

impl RecipientPayload {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// How long the throttle ledger remembers a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPeriod {
    /// One submission per calendar month (UTC).
    #[default]
    Monthly,
    /// One submission ever; mirrors the legacy never-resetting ledger.
    Once,
}

impl SubmissionPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(SubmissionPeriod::Monthly),
            "once" => Some(SubmissionPeriod::Once),
            _ => None,
        }
    }

    /// Ledger key for a submission at `timestamp` (Unix seconds, UTC).
    pub fn label(&self, timestamp: i64) -> String {
        match self {
            SubmissionPeriod::Monthly => chrono::DateTime::from_timestamp(timestamp, 0)
                .unwrap_or_default()
                .format("%Y-%m")
                .to_string(),
            SubmissionPeriod::Once => "all".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> FeedbackSubmission {
        FeedbackSubmission {
            responses: BTreeMap::from([("q1".to_string(), 2u8), ("q2".to_string(), 4u8)]),
            comment: "keep doing the weekly 1:1s".to_string(),
            submitted_at: 1_756_000_000,
            approved: true,
        }
    }

    #[test]
    fn payload_differs_only_in_distance() {
        let s = submission();
        let direct = s.payload_for(Distance::Direct).unwrap();
        let indirect = s.payload_for(Distance::Indirect).unwrap();
        assert_ne!(direct, indirect);

        let d = RecipientPayload::from_bytes(&direct).unwrap();
        let i = RecipientPayload::from_bytes(&indirect).unwrap();
        assert_eq!(d.distance, Distance::Direct);
        assert_eq!(i.distance, Distance::Indirect);
        assert_eq!(d.responses, i.responses);
        assert_eq!(d.comment, i.comment);
    }

    #[test]
    fn payload_bytes_are_deterministic() {
        let s = submission();
        assert_eq!(
            s.payload_for(Distance::Direct).unwrap(),
            s.payload_for(Distance::Direct).unwrap()
        );
    }

    #[test]
    fn monthly_period_labels() {
        let p = SubmissionPeriod::Monthly;
        // Two timestamps in the same month share a label; a month boundary splits them.
        assert_eq!(p.label(1_787_000_000), p.label(1_787_500_000));
        assert_ne!(p.label(1_756_600_000), p.label(1_756_900_000));
        assert_eq!(SubmissionPeriod::Once.label(0), SubmissionPeriod::Once.label(i64::MAX / 2));
    }
}
