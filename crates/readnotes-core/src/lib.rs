//! readnotes-core: domain layer for the reading notes service
//!
//! This crate provides:
//! - Identifier newtypes and the `Book` / `Note` domain types
//! - Entity validators that trim, check and normalize raw input
//! - Bulk batch preparation (validate every input before any write)
//! - Search parameter normalization and the token AND matcher
//!
//! Nothing in here touches the database. The storage crate turns the
//! normalized values produced here into SQL.
//!
//! # Usage
//!
//! ```rust
//! use readnotes_core::{BookId, NoteInput, PageValue, bulk::prepare_batch};
//!
//! let inputs = vec![NoteInput {
//!     page: Some(PageValue::Integer(12)),
//!     quote: Some("  a quote  ".to_string()),
//!     memo: None,
//! }];
//! let notes = prepare_batch(BookId(1), &inputs).unwrap();
//! assert_eq!(notes[0].quote, "a quote");
//! ```

pub mod bulk;
pub mod search;
pub mod types;
pub mod validation;

pub use bulk::{BulkError, BulkItemError, MAX_NOTES_PER_REQUEST};
pub use search::{NotePage, NoteQuery, PageMeta, SearchParamError, SearchParams};
pub use types::*;
pub use validation::{ValidationErrors, validate_book, validate_note};
