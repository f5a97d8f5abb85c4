//! doc_search tool implementation.
//!
//! Substring search over stored document content, file names, and
//! metadata.

use docqa_core::{CacheDb, DocumentRecord, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the doc_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocSearchParams {
    /// Search term (required).
    pub query: String,
}

/// Output from the doc_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocSearchOutput {
    /// Matching documents, newest upload first.
    pub documents: Vec<DocumentRecord>,
}

/// Implementation of the doc_search tool.
pub async fn search_impl(db: &CacheDb, params: DocSearchParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("search query cannot be empty".to_string()).into());
    }

    let documents = db.search_documents(&params.query).await?;

    tracing::debug!("search for {:?} matched {} documents", params.query, documents.len());

    let output = DocSearchOutput { documents };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
