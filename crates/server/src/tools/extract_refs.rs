//! extract_references tool implementation.
//!
//! Scans answer text for citations and resolves them against the given
//! documents. Pure text processing; no model call is made.

use docqa_client::{DocumentRef, Reference, extract_references};
use docqa_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_references tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRefsParams {
    /// Text to scan for citations.
    pub text: String,

    /// Documents citations may resolve to.
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

/// Output from the extract_references tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRefsOutput {
    /// Citations in text order.
    pub references: Vec<Reference>,
}

/// Implementation of the extract_references tool.
pub async fn extract_refs_impl(params: ExtractRefsParams) -> Result<CallToolResult, McpError> {
    let references = extract_references(&params.text, &params.documents);

    tracing::debug!("extracted {} references", references.len());

    let output = ExtractRefsOutput { references };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
