//! Repository layer providing domain-typed interfaces to the storage layer.
//!
//! This module wraps the raw Store operations with readnotes-core types
//! and owns the order of checks for every write:
//!
//! - the book must exist and be alive
//! - input is validated before anything touches the database
//! - bulk inserts are all-or-nothing

use readnotes_core::{
    Book, BookId, BookInput, Note, NoteId, NoteInput, NotePage, NoteQuery, SearchParams,
    bulk, validate_book, validate_note,
};

use crate::Store;
use crate::error::StoreResult;

/// Repository providing domain-typed access to the store.
#[derive(Debug, Clone)]
pub struct Repository {
    store: Store,
}

impl Repository {
    /// Create a new repository wrapping the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Get reference to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    // ========================================================================
    // Book Operations
    // ========================================================================

    /// List alive books, newest first.
    pub async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let rows = self.store.list_alive_books().await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Validate and create a book.
    pub async fn create_book(&self, input: &BookInput) -> StoreResult<Book> {
        let new_book = validate_book(input)?;
        let row = self.store.insert_book(&new_book).await?;

        tracing::info!(book_id = row.id, "Created book");
        Ok(row.into())
    }

    /// Soft-delete a book. Its notes are kept but become unreachable.
    pub async fn soft_delete_book(&self, id: BookId) -> StoreResult<Book> {
        let row = self.store.soft_delete_book(id).await?;

        tracing::info!(book_id = row.id, "Soft-deleted book");
        Ok(row.into())
    }

    // ========================================================================
    // Note Operations
    // ========================================================================

    /// Create one note in an alive book.
    pub async fn create_note(&self, book_id: BookId, input: &NoteInput) -> StoreResult<Note> {
        self.store.get_alive_book(book_id).await?;

        let new_note = validate_note(book_id, input)?;
        let row = self.store.insert_note(&new_note).await?;

        tracing::debug!(book_id = book_id.get(), note_id = row.id, "Created note");
        Ok(row.into())
    }

    /// Create up to `MAX_NOTES_PER_REQUEST` notes in one transaction.
    ///
    /// The batch size is checked first, then the book, then every item.
    /// Any invalid item rejects the whole batch before a write happens.
    /// Notes come back in input order.
    pub async fn bulk_create_notes(
        &self,
        book_id: BookId,
        inputs: &[NoteInput],
    ) -> StoreResult<Vec<Note>> {
        bulk::check_batch_size(inputs.len())?;
        self.store.get_alive_book(book_id).await?;

        let new_notes = bulk::prepare_batch(book_id, inputs)?;
        let rows = self.store.insert_notes_atomic(&new_notes).await?;

        tracing::info!(
            book_id = book_id.get(),
            created_count = rows.len(),
            "Bulk created notes"
        );
        Ok(rows.into_iter().map(Note::from).collect())
    }

    /// Search the notes of an alive book.
    ///
    /// The book is looked up first, so an unknown book is reported as
    /// not-found whatever the query parameters hold.
    pub async fn search_notes(
        &self,
        book_id: BookId,
        params: &SearchParams,
    ) -> StoreResult<NotePage> {
        self.store.get_alive_book(book_id).await?;
        let query = NoteQuery::normalize(book_id, params)?;

        let (rows, total_count) = self.store.search_notes(&query).await?;

        Ok(NotePage {
            notes: rows.into_iter().map(Note::from).collect(),
            meta: query.meta(total_count),
        })
    }

    /// Hard-delete a note.
    pub async fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        self.store.delete_note(id).await?;

        tracing::debug!(note_id = id.get(), "Deleted note");
        Ok(())
    }
}
