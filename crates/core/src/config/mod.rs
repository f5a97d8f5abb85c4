//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_DOCQA_*)
//! 2. TOML config file (if MCP_DOCQA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MCP_DOCQA_*)
/// 2. TOML config file (if MCP_DOCQA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key for answer generation.
    ///
    /// Set via MCP_DOCQA_GEMINI_API_KEY environment variable.
    /// Required only when a tool actually calls the Gemini API.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Path to the SQLite database holding documents and the query cache.
    ///
    /// Set via MCP_DOCQA_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Model used when a query doesn't name one.
    ///
    /// Set via MCP_DOCQA_DEFAULT_MODEL environment variable.
    /// Accepts "flash", "pro", or a full model name.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Whether answers are cached and served from cache.
    ///
    /// Set via MCP_DOCQA_CACHE_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Default age in days after which cached answers are considered stale.
    ///
    /// Set via MCP_DOCQA_MAX_CACHE_AGE_DAYS environment variable.
    #[serde(default = "default_max_cache_age_days")]
    pub max_cache_age_days: i64,

    /// Gemini request timeout in milliseconds.
    ///
    /// Set via MCP_DOCQA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature passed to the model.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Top-k sampling parameter passed to the model.
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Nucleus sampling parameter passed to the model.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Maximum tokens the model may generate per answer.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./mcp-docqa.sqlite")
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_true() -> bool {
    true
}

fn default_max_cache_age_days() -> i64 {
    30
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    8192
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            db_path: default_db_path(),
            default_model: default_model(),
            cache_enabled: true,
            max_cache_age_days: default_max_cache_age_days(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MCP_DOCQA_`
    /// 2. TOML file from `MCP_DOCQA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MCP_DOCQA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MCP_DOCQA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the Gemini API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Gemini API key is not set.
    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "gemini_api_key".into(),
            hint: "Set MCP_DOCQA_GEMINI_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./mcp-docqa.sqlite"));
        assert_eq!(config.default_model, "gemini-1.5-flash");
        assert!(config.cache_enabled);
        assert_eq!(config.max_cache_age_days, 30);
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_output_tokens, 8192);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_require_gemini_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_gemini_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_gemini_api_key_present() {
        let config = AppConfig { gemini_api_key: Some("test-key".into()), ..Default::default() };
        let result = config.require_gemini_api_key();
        assert_eq!(result.unwrap(), "test-key");
    }
}
