//! API error types with JSON responses.
//!
//! Every error renders as `{"errors": [...]}`. The entries are plain
//! messages, except for a rejected bulk batch where each entry is
//! `{"index", "messages"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use readnotes_core::{BulkError, BulkItemError};
use readnotes_store::StoreError;
use serde::Serialize;

/// Message for integrity violations reported by PostgreSQL.
pub const CONSTRAINT_VIOLATED: &str = "DB constraint violated";

/// Message for anything the client cannot act on.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(e) => match e {
                StoreError::BookNotFound(_) | StoreError::NoteNotFound(_) => "NOT_FOUND",
                StoreError::Validation(_) => "UNPROCESSABLE_ENTITY",
                StoreError::Bulk(b) if b.is_malformed() => "BAD_REQUEST",
                StoreError::Bulk(_) => "BULK_INVALID",
                StoreError::Search(_) => "BAD_REQUEST",
                StoreError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATED",
                _ => "STORAGE_ERROR",
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(e) => match e {
                StoreError::BookNotFound(_) | StoreError::NoteNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Bulk(b) if b.is_malformed() => StatusCode::BAD_REQUEST,
                StoreError::Bulk(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Search(_) => StatusCode::BAD_REQUEST,
                StoreError::ConstraintViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Entries of the `errors` array.
    fn errors(&self) -> ErrorList {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => ErrorList::Messages(vec![msg.clone()]),
            Self::Store(e) => match e {
                StoreError::BookNotFound(id) => {
                    ErrorList::Messages(vec![format!("Couldn't find Book with 'id'={}", id)])
                }
                StoreError::NoteNotFound(id) => {
                    ErrorList::Messages(vec![format!("Couldn't find Note with 'id'={}", id)])
                }
                StoreError::Validation(errors) => ErrorList::Messages(errors.messages.clone()),
                StoreError::Bulk(BulkError::Invalid(items)) => ErrorList::Items(items.clone()),
                StoreError::Bulk(b) => ErrorList::Messages(vec![b.to_string()]),
                StoreError::Search(s) => ErrorList::Messages(vec![s.to_string()]),
                StoreError::ConstraintViolation { .. } => {
                    ErrorList::Messages(vec![CONSTRAINT_VIOLATED.to_string()])
                }
                _ => ErrorList::Messages(vec![INTERNAL_SERVER_ERROR.to_string()]),
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: ErrorList,
}

/// Contents of the `errors` array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorList {
    Messages(Vec<String>),
    Items(Vec<BulkItemError>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else if matches!(self, Self::Store(StoreError::ConstraintViolation { .. })) {
            tracing::warn!(error = %self, "Database constraint rejected write");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            errors: self.errors(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
