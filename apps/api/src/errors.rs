#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::outlook::client::OutlookError;
use crate::programs::client::ProgramsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request input. Surfaced as 404, not 400: the page contract
    /// treats a malformed occupation code the same as an unknown one.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Outlook API error: {0}")]
    Outlook(#[from] OutlookError),

    #[error("Program directory error: {0}")]
    Programs(#[from] ProgramsError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::NOT_FOUND, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Outlook(e) => {
                tracing::error!("Outlook API error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The labour market outlook service is unavailable".to_string(),
                )
            }
            AppError::Programs(e) => {
                tracing::error!("Program directory error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The program directory service is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
