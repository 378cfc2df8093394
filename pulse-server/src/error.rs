//! Unified API error type for pulse-server.
//!
//! Business-rule failures map to stable codes and client-facing messages;
//! infrastructure failures (sqlx, keystore IO) are logged and collapse to a
//! generic 500 so internals never leak to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pulse_core::CoreError;
use pulse_keys::KeyError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("wrong password")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    Conflict(String),
    #[error("'{0}' has already submitted this period")]
    AlreadySubmitted(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::AlreadySubmitted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::AlreadySubmitted(_) => "already_submitted",
            ApiError::Internal => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": { "code": self.code(), "message": self.to_string() }
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        ApiError::Internal
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownEmployee(name) => ApiError::NotFound(name),
            CoreError::InvalidResponse(msg) => ApiError::Validation(msg),
            CoreError::CycleDetected(at) => {
                tracing::error!(%at, "manager hierarchy contains a cycle");
                ApiError::Internal
            }
            other => {
                tracing::error!(error = %other, "core error");
                ApiError::Internal
            }
        }
    }
}

impl From<KeyError> for ApiError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::WrongPassword => ApiError::Unauthorized,
            KeyError::NotFound(name) => ApiError::NotFound(format!("keypair for {name}")),
            other => {
                tracing::error!(error = %other, "keystore error");
                ApiError::Internal
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
