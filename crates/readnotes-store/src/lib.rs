//! readnotes-store: Storage layer for the reading notes service
//!
//! This crate provides:
//! - PostgreSQL storage for books and notes
//! - Embedded, idempotent schema migrations
//! - The `Repository` that runs bulk note creation and note search
//! - An idempotent demo seed
//!
//! # Architecture
//!
//! `Store` owns the connection pool and speaks raw rows. `Repository`
//! wraps it with domain types from readnotes-core, applies validation and
//! the "alive" book predicate, and decides what happens before and inside
//! a transaction.
//!
//! # Usage
//!
//! ```rust,ignore
//! use readnotes_store::{Repository, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let repo = Repository::new(Store::connect(config).await?);
//!
//! let notes = repo.bulk_create_notes(book_id, &inputs).await?;
//! let page = repo.search_notes(book_id, &params).await?;
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod store;

pub use error::{ConstraintKind, StoreError, StoreResult};
pub use models::{BookRow, NoteRow};
pub use repository::Repository;
pub use seed::{SeedSummary, seed_demo_data, seed_demo_notes};
pub use store::{Store, StoreConfig};

// Re-export readnotes-core for downstream crates
pub use readnotes_core;
