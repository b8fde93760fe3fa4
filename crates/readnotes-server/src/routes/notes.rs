//! Single note routes.
//!
//! - POST /api/books/{book_id}/notes - Create a note
//! - GET /api/books/{book_id}/notes - Search notes (see `search`)
//! - DELETE /api/notes/{id} - Delete a note

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use readnotes_core::{BookId, Note, NoteId, NoteInput, PageValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, PathId};
use crate::routes::search::search_notes;
use crate::state::AppState;

/// A note as exposed by the API.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub book_id: i64,
    pub page: i32,
    pub quote: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.get(),
            book_id: note.book_id.get(),
            page: note.page,
            quote: note.quote,
            memo: note.memo,
            created_at: note.created_at,
        }
    }
}

/// Request body for POST /api/books/{book_id}/notes.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub note: Value,
}

/// Read the permitted note fields out of a JSON object.
///
/// Unknown keys are ignored. Scalars are accepted for every field and
/// left to validation; arrays, objects and null count as absent.
pub(crate) fn note_input_from_object(object: &Map<String, Value>) -> NoteInput {
    NoteInput {
        page: object.get("page").and_then(page_value),
        quote: object.get("quote").and_then(scalar_text),
        memo: object.get("memo").and_then(scalar_text),
    }
}

fn page_value(value: &Value) -> Option<PageValue> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(PageValue::Integer)
            .or_else(|| n.as_f64().map(PageValue::Decimal)),
        Value::String(s) => Some(PageValue::Text(s.clone())),
        Value::Bool(b) => Some(PageValue::Text(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// POST /api/books/{book_id}/notes
async fn create_note(
    State(state): State<AppState>,
    PathId(book_id): PathId<BookId>,
    ApiJson(request): ApiJson<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let Value::Object(object) = &request.note else {
        return Err(ApiError::BadRequest("note must be an object".to_string()));
    };

    let note = state
        .repo()
        .create_note(book_id, &note_input_from_object(object))
        .await?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

/// DELETE /api/notes/{id}
async fn delete_note(
    State(state): State<AppState>,
    PathId(id): PathId<NoteId>,
) -> ApiResult<StatusCode> {
    state.repo().delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/books/{book_id}/notes",
            get(search_notes).post(create_note),
        )
        .route("/api/notes/{id}", delete(delete_note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_permitted_fields_only() {
        let input = note_input_from_object(&object(json!({
            "page": 12,
            "quote": "q",
            "memo": "m",
            "book_id": 99,
        })));
        assert_eq!(input.page, Some(PageValue::Integer(12)));
        assert_eq!(input.quote.as_deref(), Some("q"));
        assert_eq!(input.memo.as_deref(), Some("m"));
    }

    #[test]
    fn test_page_shapes() {
        assert_eq!(page_value(&json!(3)), Some(PageValue::Integer(3)));
        assert_eq!(page_value(&json!(1.5)), Some(PageValue::Decimal(1.5)));
        assert_eq!(page_value(&json!("7")), Some(PageValue::Text("7".to_string())));
        assert_eq!(page_value(&json!(null)), None);
        assert_eq!(page_value(&json!([1])), None);
    }

    #[test]
    fn test_non_string_quote_is_stringified() {
        let input = note_input_from_object(&object(json!({"quote": 42, "memo": {"x": 1}})));
        assert_eq!(input.quote.as_deref(), Some("42"));
        assert_eq!(input.memo, None);
        assert_eq!(input.page, None);
    }

    #[test]
    fn test_note_response_shape() {
        let now = Utc::now();
        let response = NoteResponse::from(Note {
            id: NoteId(5),
            book_id: BookId(2),
            page: 10,
            quote: "q".to_string(),
            memo: None,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["book_id"], 2);
        assert_eq!(json["memo"], Value::Null);
        assert!(json.get("updated_at").is_none());
    }
}
