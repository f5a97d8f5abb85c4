//! Document management MCP tools.
//!
//! CRUD and search over the stored documents that queries run against.

pub mod add;
pub mod get;
pub mod list;
pub mod remove;
pub mod search;
pub mod update;
