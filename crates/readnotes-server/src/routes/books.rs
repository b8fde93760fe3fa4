//! Book routes.
//!
//! - GET /api/books - List alive books, newest first
//! - POST /api/books - Create a book
//! - DELETE /api/books/{book_id} - Soft-delete a book

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use readnotes_core::{Book, BookId, BookInput};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{ApiJson, PathId};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// A book as exposed by the API.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.get(),
            title: book.title,
            author: book.author,
        }
    }
}

/// Request body for POST /api/books.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub book: BookInput,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/books
async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<BookResponse>>> {
    let books = state.repo().list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// POST /api/books
async fn create_book(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookRequest>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let book = state.repo().create_book(&request.book).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// DELETE /api/books/{book_id}
async fn delete_book(
    State(state): State<AppState>,
    PathId(book_id): PathId<BookId>,
) -> ApiResult<StatusCode> {
    state.repo().soft_delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build book routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/{book_id}", delete(delete_book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_create_book_request_deserialize() {
        let json = r#"{"book": {"title": "Dune", "author": "Herbert", "isbn": "ignored"}}"#;
        let request: CreateBookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.book.title.as_deref(), Some("Dune"));
        assert_eq!(request.book.author.as_deref(), Some("Herbert"));
    }

    #[test]
    fn test_create_book_request_requires_envelope() {
        let json = r#"{"title": "Dune"}"#;
        assert!(serde_json::from_str::<CreateBookRequest>(json).is_err());
    }

    #[test]
    fn test_book_response_hides_timestamps() {
        let now = Utc::now();
        let response = BookResponse::from(Book {
            id: BookId(3),
            title: "Dune".to_string(),
            author: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "title": "Dune", "author": null})
        );
    }
}
