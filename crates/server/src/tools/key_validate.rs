//! key_validate tool implementation.
//!
//! Checks the configured Gemini API key against the API's model metadata
//! endpoint. A missing or rejected key reports `valid: false`; transport
//! failures surface as errors so they aren't mistaken for a bad key.

use docqa_client::{GeminiClient, GeminiConfig, GeminiError};
use docqa_core::{AppConfig, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the key_validate tool (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeyValidateParams {}

/// Output from the key_validate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyValidateOutput {
    /// Whether the API accepted the configured key.
    pub valid: bool,
}

/// Implementation of the key_validate tool.
pub async fn key_validate_impl(config: &AppConfig, _params: KeyValidateParams) -> Result<CallToolResult, McpError> {
    let valid = match config.require_gemini_api_key() {
        Err(_) => {
            tracing::debug!("no Gemini API key configured");
            false
        }
        Ok(api_key) => {
            let client = GeminiClient::new(GeminiConfig {
                api_key: api_key.to_string(),
                timeout: config.timeout(),
                ..Default::default()
            })
            .map_err(Error::from)?;

            match client.validate_key().await {
                Ok(()) => true,
                Err(GeminiError::AuthError) => false,
                Err(e) => return Err(Error::from(e).into()),
            }
        }
    };

    let output = KeyValidateOutput { valid };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Serialization(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
