//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-docqa server.

pub mod cache;
pub mod doc_query;
pub mod documents;
pub mod extract_refs;
pub mod key_validate;

/// Parse the JSON text payload out of a successful tool result.
#[cfg(test)]
pub(crate) fn parse_output<T: serde::de::DeserializeOwned>(result: &rmcp::model::CallToolResult) -> T {
    let content_val = serde_json::to_value(&result.content[0]).expect("content should serialize");
    let text = content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).expect("Expected valid JSON output")
}
