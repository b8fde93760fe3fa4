//! Error types for the storage layer.

use readnotes_core::{BookId, BulkError, NoteId, SearchParamError, ValidationErrors};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Which integrity rule PostgreSQL enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Check => "check",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error that is not an integrity violation.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The database rejected a write because of an integrity constraint.
    #[error("{kind} constraint violated{}", .constraint.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
    },

    /// Book missing or soft-deleted.
    #[error("book not found: {0}")]
    BookNotFound(BookId),

    /// Note missing.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// A single record failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A bulk batch was rejected before any write.
    #[error(transparent)]
    Bulk(#[from] BulkError),

    /// Search parameters could not be normalized.
    #[error(transparent)]
    Search(#[from] SearchParamError),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let classified = err.as_database_error().and_then(|db| {
            let kind = match db.kind() {
                ErrorKind::UniqueViolation => ConstraintKind::Unique,
                ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                ErrorKind::CheckViolation => ConstraintKind::Check,
                _ => return None,
            };
            Some(Self::ConstraintViolation {
                kind,
                constraint: db.constraint().map(str::to_string),
            })
        });

        classified.unwrap_or(Self::Database(err))
    }
}
