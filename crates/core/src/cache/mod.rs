//! SQLite-backed store for documents and cached query answers.
//!
//! This module provides persistent storage using SQLite with async access
//! via tokio-rusqlite. It supports:
//!
//! - Document records with typed metadata
//! - An append-only query cache keyed by (query, document set, model)
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Age-based cache expiry

pub mod connection;
pub mod documents;
pub mod key;
pub mod migrations;
pub mod queries;

pub use crate::Error;

pub use connection::CacheDb;
pub use documents::{DocumentMetadata, DocumentRecord};
pub use key::{compute_cache_key, validate_document_ids};
pub use queries::CachedQuery;
