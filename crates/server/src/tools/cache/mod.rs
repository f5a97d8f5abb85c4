//! Cache-related MCP tools.
//!
//! This module provides tools for managing the query answer cache.

pub mod purge;
