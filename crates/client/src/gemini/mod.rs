//! Gemini generateContent API client.
//!
//! Provides a client for Google's Gemini API tuned for grounded document
//! question answering: the prompt embeds the selected documents and asks
//! the model to cite them in a machine-readable format.
//!
//! ### API
//!
//! - **Endpoint**: `https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent`
//! - **Authentication**: API key passed as the `key` query parameter.
//! - **Models**: `gemini-1.5-flash` (default) and `gemini-1.5-pro`, with
//!   short aliases `flash` and `pro`.
//! - **Safety**: All four harm categories are sent at BLOCK_MEDIUM_AND_ABOVE.

pub mod error;
pub mod request;
pub mod response;

pub use error::GeminiError;
pub use request::{DocumentSource, GenerateRequest};
pub use response::GeneratedAnswer;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the Gemini API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Supported Gemini models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    Flash,
    Pro,
}

impl GeminiModel {
    /// Full model name as it appears in API paths.
    pub fn as_str(self) -> &'static str {
        match self {
            GeminiModel::Flash => "gemini-1.5-flash",
            GeminiModel::Pro => "gemini-1.5-pro",
        }
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = GeminiError;

    /// Accepts the short aliases "flash" and "pro" as well as full model names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flash" | "gemini-1.5-flash" => Ok(GeminiModel::Flash),
            "pro" | "gemini-1.5-pro" => Ok(GeminiModel::Pro),
            other => Err(GeminiError::InvalidModel(other.to_string())),
        }
    }
}

/// Gemini API client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key from GEMINI_API_KEY env var.
    pub api_key: String,
    /// Model to generate with (default: flash).
    pub model: GeminiModel,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// Sampling temperature (default: 0.7).
    pub temperature: f64,
    /// Top-k sampling (default: 40).
    pub top_k: u32,
    /// Nucleus sampling (default: 0.95).
    pub top_p: f64,
    /// Output token cap (default: 8192).
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: GeminiModel::Flash,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads GEMINI_API_KEY from environment. Returns error if not set.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;

        Ok(Self { api_key, ..Default::default() })
    }
}

/// Gemini generateContent client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Create a new Gemini client from environment variables.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// The model this client generates with.
    pub fn model(&self) -> GeminiModel {
        self.config.model
    }

    /// Generate an answer for a query grounded in the given documents.
    ///
    /// This method handles request validation, prompt assembly, and
    /// normalization of the candidate response.
    pub async fn generate(&self, req: GenerateRequest) -> Result<GeneratedAnswer, GeminiError> {
        req.validate()?;

        let start = Instant::now();
        let url = format!("{}/models/{}:generateContent", self.config.base_url, self.config.model.as_str());

        tracing::debug!("generating answer: model={}, documents={}", self.config.model, req.documents.len());

        let http_response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&req.to_wire(&self.config))
            .send()
            .await
            .map_err(
                |e| {
                    if e.is_timeout() { GeminiError::Timeout } else { GeminiError::Network(Arc::new(e)) }
                },
            )?;

        let status = http_response.status();
        tracing::debug!("Gemini API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(GeminiError::AuthError);
        }

        if status == 429 {
            return Err(GeminiError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(GeminiError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response
            .bytes()
            .await
            .map_err(|e| GeminiError::Network(Arc::new(e)))?;
        let api_response: response::GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(|e| GeminiError::Parse(e.to_string()))?;

        let answer = api_response.into_answer()?;

        tracing::debug!("generation completed in {:?}, {} chars", start.elapsed(), answer.text.len());

        Ok(answer)
    }

    /// Check that the configured API key is accepted by the API.
    ///
    /// Performs a cheap metadata GET against the configured model.
    pub async fn validate_key(&self) -> Result<(), GeminiError> {
        let url = format!("{}/models/{}", self.config.base_url, self.config.model.as_str());

        tracing::debug!("validating Gemini API key against {}", self.config.model);

        let http_response = self.http.get(&url).query(&[("key", self.config.api_key.as_str())]).send().await?;

        let status = http_response.status();
        if status.is_success() {
            return Ok(());
        }

        // the metadata endpoint reports a bad key as 400 API_KEY_INVALID
        if status == 400 || status == 401 || status == 403 {
            return Err(GeminiError::AuthError);
        }

        if status == 429 {
            return Err(GeminiError::RateLimited);
        }

        Err(GeminiError::HttpError { status: status.as_u16() })
    }
}
