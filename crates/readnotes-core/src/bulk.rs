//! Bulk note preparation.
//!
//! Bulk creation runs in two phases. This module is the first one: it
//! checks the batch size and validates every input, returning either the
//! complete list of insertable notes or every failure keyed by the
//! zero-based position of the input. The storage layer only ever sees a
//! fully valid batch and writes it in a single transaction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BookId, NewNote, NoteInput};
use crate::validation::validate_note;

/// Largest batch accepted by one bulk request.
pub const MAX_NOTES_PER_REQUEST: usize = 20;

/// Violations for one input of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemError {
    /// Zero-based position in the submitted list.
    pub index: usize,
    pub messages: Vec<String>,
}

/// Reasons a batch is rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkError {
    /// No inputs were submitted.
    #[error("notes must be a non-empty array")]
    Empty,

    /// More inputs than `MAX_NOTES_PER_REQUEST`.
    #[error("too many notes (max {max})")]
    TooMany { max: usize, given: usize },

    /// At least one input failed validation.
    #[error("bulk create invalid: {} of the notes failed validation", .0.len())]
    Invalid(Vec<BulkItemError>),
}

impl BulkError {
    /// Whether the batch itself has the wrong shape (as opposed to
    /// containing invalid notes).
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Empty | Self::TooMany { .. })
    }
}

/// Reject empty or oversized batches.
pub fn check_batch_size(len: usize) -> Result<(), BulkError> {
    if len == 0 {
        return Err(BulkError::Empty);
    }
    if len > MAX_NOTES_PER_REQUEST {
        return Err(BulkError::TooMany {
            max: MAX_NOTES_PER_REQUEST,
            given: len,
        });
    }
    Ok(())
}

/// Validate a whole batch for `book_id`.
///
/// Returns the normalized notes in submission order, or every failing
/// input with its messages. No failure is dropped.
pub fn prepare_batch(book_id: BookId, inputs: &[NoteInput]) -> Result<Vec<NewNote>, BulkError> {
    check_batch_size(inputs.len())?;

    let mut notes = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        match validate_note(book_id, input) {
            Ok(note) => notes.push(note),
            Err(errors) => failures.push(BulkItemError {
                index,
                messages: errors.messages,
            }),
        }
    }

    if failures.is_empty() {
        Ok(notes)
    } else {
        Err(BulkError::Invalid(failures))
    }
}
