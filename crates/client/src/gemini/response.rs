//! Gemini response types and normalization.

use serde::{Deserialize, Serialize};

use super::GeminiError;

/// Raw response from the generateContent endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageMetadata {
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Normalized generation result.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAnswer {
    /// Concatenated text of the first candidate.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

impl GenerateContentResponse {
    /// Collapse the first candidate into a normalized answer.
    ///
    /// A blocked prompt or a candidate stopped for anything other than
    /// STOP surfaces as `GeminiError::Blocked`.
    pub(crate) fn into_answer(self) -> Result<GeneratedAnswer, GeminiError> {
        let total_tokens = self.usage_metadata.and_then(|u| u.total_token_count);

        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(GeminiError::Blocked(reason));
            }
            return Err(GeminiError::Parse("response contained no candidates".to_string()));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();

        if text.is_empty()
            && let Some(reason) = candidate.finish_reason.as_deref()
            && reason != "STOP"
        {
            return Err(GeminiError::Blocked(format!("generation stopped: {reason}")));
        }

        Ok(GeneratedAnswer { text, finish_reason: candidate.finish_reason, total_tokens })
    }
}
