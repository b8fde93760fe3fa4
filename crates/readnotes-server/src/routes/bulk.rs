//! Bulk note creation.
//!
//! POST /api/books/{book_id}/notes/bulk creates up to
//! `MAX_NOTES_PER_REQUEST` notes or none at all. The handler only checks
//! the shape of the body; batch size, the book and every note are checked
//! by the repository before the transaction opens.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{DateTime, Utc};
use readnotes_core::{BookId, Note, NoteInput};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, PathId};
use crate::routes::notes::note_input_from_object;
use crate::state::AppState;

/// A created note in the bulk response.
#[derive(Debug, Serialize)]
pub struct BulkNoteResponse {
    pub id: i64,
    pub page: i32,
    pub quote: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for BulkNoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.get(),
            page: note.page,
            quote: note.quote,
            memo: note.memo,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkMeta {
    pub created_count: usize,
}

/// Response for a successful bulk create.
#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub notes: Vec<BulkNoteResponse>,
    pub meta: BulkMeta,
}

/// Check the request shape and collect the note inputs in order.
fn parse_notes(body: &Value) -> Result<Vec<NoteInput>, ApiError> {
    let raw = match body.get("notes") {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest("notes must be provided".to_string()));
        }
        Some(raw) => raw,
    };

    let Value::Array(items) = raw else {
        return Err(ApiError::BadRequest("notes must be an array".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(object) => Ok(note_input_from_object(object)),
            _ => Err(ApiError::BadRequest(format!("notes[{}] must be an object", i))),
        })
        .collect()
}

/// POST /api/books/{book_id}/notes/bulk
async fn bulk_create(
    State(state): State<AppState>,
    PathId(book_id): PathId<BookId>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<(StatusCode, Json<BulkCreateResponse>)> {
    let inputs = parse_notes(&body)?;

    let notes = state.repo().bulk_create_notes(book_id, &inputs).await?;

    let response = BulkCreateResponse {
        meta: BulkMeta {
            created_count: notes.len(),
        },
        notes: notes.into_iter().map(BulkNoteResponse::from).collect(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Build bulk routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/books/{book_id}/notes/bulk", post(bulk_create))
}
