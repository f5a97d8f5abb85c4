//! doc_remove tool implementation.
//!
//! Deletes a stored document by id.

use docqa_core::{CacheDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the doc_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocRemoveParams {
    /// The id of the document to delete.
    pub id: String,
}

/// Output from the doc_remove tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocRemoveOutput {
    /// The id of the deleted document.
    pub id: String,
}

/// Implementation of the doc_remove tool.
pub async fn remove_impl(db: &CacheDb, params: DocRemoveParams) -> Result<CallToolResult, McpError> {
    let deleted = db.delete_document(&params.id).await?;
    if deleted == 0 {
        return Err(Error::DocumentNotFound(params.id).into());
    }

    tracing::debug!("removed document {}", params.id);

    let output = DocRemoveOutput { id: params.id };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
