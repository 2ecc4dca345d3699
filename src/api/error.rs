//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::agenda::AgendaError;
use crate::pipeline::processor::ProcessingError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No letters to generate: {0}")]
    NoCases(String),
    #[error("{0}")]
    MeetingIdNotFound(String),
    #[error("{0}")]
    MeetingDateNotFound(String),
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NoCases(detail) => (StatusCode::UNPROCESSABLE_ENTITY, "NO_CASES", detail),
            ApiError::MeetingIdNotFound(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MEETING_ID_NOT_FOUND",
                detail,
            ),
            ApiError::MeetingDateNotFound(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MEETING_DATE_NOT_FOUND",
                detail,
            ),
            ApiError::DocumentUnreadable(detail) => {
                (StatusCode::BAD_REQUEST, "DOCUMENT_UNREADABLE", detail)
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Agenda(e @ AgendaError::MeetingIdentifierNotFound { .. }) => {
                ApiError::MeetingIdNotFound(e.to_string())
            }
            ProcessingError::Agenda(e @ AgendaError::MeetingDateNotFound { .. }) => {
                ApiError::MeetingDateNotFound(e.to_string())
            }
            ProcessingError::Extraction(e) => ApiError::DocumentUnreadable(e.to_string()),
            e @ (ProcessingError::Render(_) | ProcessingError::Archive(_)) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Processing task failed: {err}"))
    }
}
