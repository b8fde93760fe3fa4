//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They convert into the domain types of readnotes-core.

use chrono::{DateTime, Utc};
use readnotes_core::{Book, BookId, Note, NoteId};
use sqlx::FromRow;

/// Database row for the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId(row.id),
            title: row.title,
            author: row.author,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub book_id: i64,
    pub page: i32,
    pub quote: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: NoteId(row.id),
            book_id: BookId(row.book_id),
            page: row.page,
            quote: row.quote,
            memo: row.memo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
