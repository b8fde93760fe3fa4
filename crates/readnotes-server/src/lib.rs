//! readnotes-server: HTTP API server for the reading notes service
//!
//! This crate provides:
//! - REST endpoints for books, notes, bulk note creation and note search
//! - A uniform `{"errors": [...]}` envelope for every failure
//! - Opt-in debug routes that trigger database constraint violations
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use readnotes_server::{AppState, ServerConfig, routes};
//! use readnotes_store::{Store, StoreConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//! let app = routes::build_router(AppState::new(store, config));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use readnotes_core;
pub use readnotes_store;
