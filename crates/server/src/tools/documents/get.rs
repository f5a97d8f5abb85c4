//! doc_get tool implementation.
//!
//! Retrieves a stored document by id.

use docqa_core::{CacheDb, DocumentRecord, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the doc_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocGetParams {
    /// The id of the document to retrieve.
    pub id: String,
}

/// Output from the doc_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocGetOutput {
    /// The stored document.
    pub document: DocumentRecord,
}

/// Implementation of the doc_get tool.
pub async fn get_impl(db: &CacheDb, params: DocGetParams) -> Result<CallToolResult, McpError> {
    let document = db
        .get_document(&params.id)
        .await?
        .ok_or_else(|| Error::DocumentNotFound(params.id.clone()))?;

    let output = DocGetOutput { document };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
