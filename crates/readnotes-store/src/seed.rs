//! Demo data for local development.
//!
//! Running the seed twice leaves the database as it was after the first
//! run: the book is only created when no alive book exists, and only the
//! missing demo pages are inserted.

use readnotes_core::{BookId, NewBook, NewNote};

use crate::Store;
use crate::error::StoreResult;
use crate::models::BookRow;

/// Number of demo notes, one per page starting at 1.
pub const SEED_NOTE_COUNT: i32 = 12;

/// What a seed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub book_id: BookId,
    pub book_created: bool,
    pub notes_created: usize,
}

/// Ensure a demo book with `SEED_NOTE_COUNT` notes exists.
pub async fn seed_demo_data(store: &Store) -> StoreResult<SeedSummary> {
    let existing = sqlx::query_as::<_, BookRow>(
        r#"
        SELECT id, title, author, deleted_at, created_at, updated_at
        FROM books
        WHERE deleted_at IS NULL
        ORDER BY created_at ASC, id ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(store.pool())
    .await?;

    let (book, book_created) = match existing {
        Some(book) => (book, false),
        None => {
            let book = store
                .insert_book(&NewBook {
                    title: "Seed Book".to_string(),
                    author: Some("Seed Author".to_string()),
                })
                .await?;
            (book, true)
        }
    };
    let book_id = BookId(book.id);
    let notes_created = seed_demo_notes(store, book_id).await?;

    tracing::info!(
        book_id = book.id,
        book_created,
        notes_created,
        "Demo data seeded"
    );

    Ok(SeedSummary {
        book_id,
        book_created,
        notes_created,
    })
}

/// Insert whichever demo pages `book_id` is missing. Returns how many
/// notes were written.
pub async fn seed_demo_notes(store: &Store, book_id: BookId) -> StoreResult<usize> {
    let present: Vec<i32> = sqlx::query_scalar(r#"SELECT DISTINCT page FROM notes WHERE book_id = $1"#)
        .bind(book_id.get())
        .fetch_all(store.pool())
        .await?;

    let missing = missing_demo_notes(book_id, &present);
    if !missing.is_empty() {
        store.insert_notes_atomic(&missing).await?;
    }

    Ok(missing.len())
}

fn missing_demo_notes(book_id: BookId, present: &[i32]) -> Vec<NewNote> {
    (1..=SEED_NOTE_COUNT)
        .filter(|page| !present.contains(page))
        .map(|page| NewNote {
            book_id,
            page,
            quote: format!("引用 {page} のテキストです。"),
            memo: Some(format!("メモ {page}")),
        })
        .collect()
}
