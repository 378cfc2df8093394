//! Server configuration

use pulse_core::SubmissionPeriod;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL for envelopes + employee directory
    pub feedback_database_url: String,
    /// SQLite URL for the submission attendance ledger
    pub attendance_database_url: String,
    /// Directory holding per-account keypairs
    pub keys_dir: String,
    /// Path to the question bank JSON file
    pub question_bank_path: String,
    /// HTTP port
    pub http_port: u16,
    /// Throttle scope: monthly | once
    pub submission_period: SubmissionPeriod,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let submission_period = match std::env::var("SUBMISSION_PERIOD") {
            Ok(v) => SubmissionPeriod::parse(&v)
                .ok_or_else(|| format!("invalid SUBMISSION_PERIOD '{v}' (monthly | once)"))?,
            Err(_) => SubmissionPeriod::Monthly,
        };

        Ok(Self {
            feedback_database_url: std::env::var("FEEDBACK_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://feedback.db?mode=rwc".into()),
            attendance_database_url: std::env::var("ATTENDANCE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://attendance.db?mode=rwc".into()),
            keys_dir: std::env::var("KEYS_DIR").unwrap_or_else(|_| "keys".into()),
            question_bank_path: std::env::var("QUESTION_BANK_PATH")
                .unwrap_or_else(|_| "questions.json".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            submission_period,
        })
    }
}
