//! doc_update tool implementation.
//!
//! Replaces every stored field of an existing document.

use docqa_core::{CacheDb, DocumentRecord, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upload size limit, matching the 10MB file cap.
const MAX_CONTENT_BYTES: usize = 10 * 1024 * 1024;

/// Parameters for the doc_update tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocUpdateParams {
    /// Full replacement document; the id selects the row to overwrite.
    pub document: DocumentRecord,
}

/// Output from the doc_update tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocUpdateOutput {
    /// The document as stored.
    pub document: DocumentRecord,
}

/// Implementation of the doc_update tool.
pub async fn update_impl(db: &CacheDb, params: DocUpdateParams) -> Result<CallToolResult, McpError> {
    let document = params.document;

    if document.id.trim().is_empty() {
        return Err(Error::InvalidInput("document id cannot be empty".to_string()).into());
    }
    if document.content.is_empty() {
        return Err(Error::InvalidInput("content cannot be empty".to_string()).into());
    }
    if document.content.len() > MAX_CONTENT_BYTES {
        return Err(Error::InvalidInput(format!(
            "content size {} exceeds the 10MB limit",
            document.content.len()
        ))
        .into());
    }

    let updated = db.update_document(&document).await?;
    if updated == 0 {
        return Err(Error::DocumentNotFound(document.id).into());
    }

    tracing::debug!("updated document {}", document.id);

    let output = DocUpdateOutput { document };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
