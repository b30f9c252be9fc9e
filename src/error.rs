// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A handler-level failure: `message` goes to the client, `detail` only to the log.
    #[error("{message}: {detail}")]
    Failed {
        message: &'static str,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand used by the reminder handlers.
    pub fn reminder_not_found() -> Self {
        AppError::NotFound("Reminder not found".to_string())
    }

    /// Client-visible status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Failed { .. }
            | AppError::Database(_)
            | AppError::Mail(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::Conflict(msg) | AppError::NotFound(msg) | AppError::BadRequest(msg) => msg,
            AppError::Failed { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                message.to_string()
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                "Database error".to_string()
            }
            AppError::Mail(msg) => {
                tracing::error!(error = %msg, "Mail error");
                "Mail error".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Attach a handler's fixed failure message to store-level errors.
pub trait ResultExt<T> {
    /// Turn `Database`, `Mail` and `Internal` errors into `Failed { message }`.
    /// Other errors pass through unchanged.
    fn or_fail(self, message: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn or_fail(self, message: &'static str) -> Result<T> {
        self.map_err(|err| match err {
            AppError::Database(_) | AppError::Mail(_) | AppError::Internal(_) => AppError::Failed {
                message,
                detail: err.to_string(),
            },
            other => other,
        })
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
