//! Gemini request types, prompt assembly, and validation.

use serde::Serialize;

use super::{GeminiConfig, GeminiError};

/// A document handed to the model as grounding context.
#[derive(Debug, Clone, Default)]
pub struct DocumentSource {
    /// File name shown to the model; citations refer back to it.
    pub name: String,
    /// Extracted text content.
    pub content: String,
}

/// A grounded generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Natural-language question to answer.
    pub query: String,
    /// Documents the answer must be grounded in.
    pub documents: Vec<DocumentSource>,
}

impl GenerateRequest {
    /// Validate the generation request.
    ///
    /// Returns an error if the query is empty, no documents were supplied,
    /// or a document has no name to cite.
    pub fn validate(&self) -> Result<(), GeminiError> {
        if self.query.is_empty() {
            return Err(GeminiError::InvalidRequest("query cannot be empty".to_string()));
        }

        if self.documents.is_empty() {
            return Err(GeminiError::InvalidRequest("at least one document is required".to_string()));
        }

        if self.documents.iter().any(|d| d.name.is_empty()) {
            return Err(GeminiError::InvalidRequest("document name cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Assemble the grounding prompt sent to the model.
    pub fn build_prompt(&self) -> String {
        let mut prompt = String::from(
            "You are an AI assistant that helps users find information in their documents.\n\n\
             Below are the contents of the documents:\n\n",
        );

        for doc in &self.documents {
            prompt.push_str(&format!("Document: {}\nContent: {}\n\n", doc.name, doc.content));
        }

        prompt.push_str(&format!("User query: {}\n\n", self.query));
        // the citation format here must stay in sync with references::extract_references
        prompt.push_str(
            "Please provide a comprehensive answer based on the documents above. \
             When you reference information from a document, cite it as \
             [document name, page: page number] or [document name, section: \"section name\"].",
        );

        prompt
    }

    /// Convert to the wire format the generateContent endpoint expects.
    pub(crate) fn to_wire(&self, config: &GeminiConfig) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![WireContent {
                role: "user".to_string(),
                parts: vec![WirePart { text: self.build_prompt() }],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
            },
            safety_settings: SafetySetting::default_set(),
        }
    }
}

/// Wire request for POST models/{model}:generateContent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<WireContent>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireContent {
    role: String,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WirePart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct SafetySetting {
    category: HarmCategory,
    threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// All four harm categories at the medium-and-above threshold.
    fn default_set() -> Vec<SafetySetting> {
        [
            HarmCategory::Harassment,
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| SafetySetting { category, threshold: HarmBlockThreshold::MediumAndAbove })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    MediumAndAbove,
}
