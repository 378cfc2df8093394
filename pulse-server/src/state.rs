//! Application state for pulse-server

use pulse_core::{QuestionBank, SubmissionPeriod};
use pulse_keys::KeyStore;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use crate::config::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Envelope store + employee directory
    pub feedback: SqlitePool,
    /// Submission attendance ledger
    pub attendance: SqlitePool,
    /// Per-account keypairs on disk
    pub keys: KeyStore,
    /// Question bank, loaded once at startup
    pub questions: Arc<QuestionBank>,
    /// Throttle scope
    pub period: SubmissionPeriod,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        // A missing or malformed question bank is fatal at startup.
        let questions = QuestionBank::load(&config.question_bank_path)?;
        tracing::info!(
            count = questions.len(),
            path = %config.question_bank_path,
            "question bank loaded"
        );

        let feedback = SqlitePoolOptions::new()
            .connect(&config.feedback_database_url)
            .await?;
        let attendance = SqlitePoolOptions::new()
            .connect(&config.attendance_database_url)
            .await?;

        db::init_feedback(&feedback).await?;
        db::init_attendance(&attendance).await?;

        let keys = KeyStore::open(&config.keys_dir)?;

        Ok(Self {
            feedback,
            attendance,
            keys,
            questions: Arc::new(questions),
            period: config.submission_period,
        })
    }
}
