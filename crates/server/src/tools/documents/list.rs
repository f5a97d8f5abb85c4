//! doc_list tool implementation.
//!
//! Lists every stored document, newest upload first.

use docqa_core::{CacheDb, DocumentRecord, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the doc_list tool (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DocListParams {}

/// Output from the doc_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocListOutput {
    /// All stored documents, newest upload first.
    pub documents: Vec<DocumentRecord>,
}

/// Implementation of the doc_list tool.
pub async fn list_impl(db: &CacheDb, _params: DocListParams) -> Result<CallToolResult, McpError> {
    let documents = db.list_documents().await?;

    tracing::debug!("listing {} documents", documents.len());

    let output = DocListOutput { documents };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
