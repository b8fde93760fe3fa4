//! Note search.
//!
//! - GET /api/books/{book_id}/notes
//! - GET /api/books/{book_id}/notes_search (alias)
//!
//! Query: `q`, `page_from`, `page_to`, `page`, `limit`.

use axum::{Json, Router, extract::State, routing::get};
use readnotes_core::{BookId, PageMeta, SearchParams};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extract::{ApiQuery, PathId};
use crate::routes::notes::NoteResponse;
use crate::state::AppState;

/// Response for a note search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub notes: Vec<NoteResponse>,
    pub meta: PageMeta,
}

/// GET /api/books/{book_id}/notes and its `notes_search` alias.
pub(crate) async fn search_notes(
    State(state): State<AppState>,
    PathId(book_id): PathId<BookId>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let page = state.repo().search_notes(book_id, &params).await?;

    tracing::debug!(
        book_id = book_id.get(),
        total_count = page.meta.total_count,
        "Searched notes"
    );

    Ok(Json(SearchResponse {
        notes: page.notes.into_iter().map(NoteResponse::from).collect(),
        meta: page.meta,
    }))
}

/// Build search routes. The primary path is mounted with note creation.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/books/{book_id}/notes_search", get(search_notes))
}
