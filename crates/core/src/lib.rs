//! Core types and shared functionality for mcp-docqa.
//!
//! This crate provides:
//! - Document and query-cache storage with a SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, CachedQuery, DocumentMetadata, DocumentRecord, compute_cache_key, validate_document_ids};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
