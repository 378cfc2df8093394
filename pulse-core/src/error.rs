use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("duplicate employee: {0}")]
    DuplicateEmployee(String),
    #[error("manager cycle detected at: {0}")]
    CycleDetected(String),
    #[error("question bank error: {0}")]
    QuestionBank(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
