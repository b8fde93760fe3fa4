//! Debug routes, mounted only when `ENABLE_DEBUG_ROUTES=true`.
//!
//! POST /api/debug/db_errors/{kind} issues a write that PostgreSQL rejects,
//! so the constraint mapping can be checked end to end. The write runs in
//! a transaction that is never committed.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use readnotes_store::StoreError;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Constraint a debug request should trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    NotNull,
    Check,
    ForeignKey,
}

impl ViolationKind {
    /// Parse the `{kind}` path segment.
    pub fn from_path(kind: &str) -> Option<Self> {
        match kind {
            "not_null" => Some(Self::NotNull),
            "check" => Some(Self::Check),
            "fk" => Some(Self::ForeignKey),
            _ => None,
        }
    }

    fn statement(self) -> &'static str {
        match self {
            Self::NotNull => r#"INSERT INTO books (title) VALUES (NULL)"#,
            Self::Check => r#"INSERT INTO notes (book_id, page, quote) VALUES (1, 0, 'x')"#,
            Self::ForeignKey => {
                r#"
                INSERT INTO notes (book_id, page, quote)
                SELECT COALESCE(MAX(id), 0) + 1, 1, 'x' FROM books
                "#
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub ok: bool,
}

/// POST /api/debug/db_errors/{kind}
async fn db_errors(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Json<DebugResponse>> {
    let kind = ViolationKind::from_path(&kind)
        .ok_or_else(|| ApiError::BadRequest("unknown kind".to_string()))?;

    tracing::warn!(?kind, "Triggering database constraint violation");

    let mut tx = state.store().pool().begin().await.map_err(StoreError::from)?;
    sqlx::query(kind.statement())
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from)?;
    tx.rollback().await.map_err(StoreError::from)?;

    Ok(Json(DebugResponse { ok: true }))
}

/// Build debug routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/debug/db_errors/{kind}", post(db_errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds() {
        assert_eq!(ViolationKind::from_path("not_null"), Some(ViolationKind::NotNull));
        assert_eq!(ViolationKind::from_path("check"), Some(ViolationKind::Check));
        assert_eq!(ViolationKind::from_path("fk"), Some(ViolationKind::ForeignKey));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(ViolationKind::from_path("unique"), None);
        assert_eq!(ViolationKind::from_path("FK"), None);
    }
}
