//! Configuration validation rules.
//!
//! Checks `AppConfig` values after loading: cache age and timeout
//! bounds, plus the sampling-parameter ranges the Gemini API accepts.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_cache_age_days` is less than 1
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `default_model` is empty
    /// - a sampling parameter is outside the range the API accepts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cache_age_days < 1 {
            return Err(ConfigError::Invalid {
                field: "max_cache_age_days".into(),
                reason: "must be at least 1 day".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.default_model.is_empty() {
            return Err(ConfigError::Invalid { field: "default_model".into(), reason: "must not be empty".into() });
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature".into(),
                reason: "must be between 0.0 and 2.0".into(),
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::Invalid { field: "top_k".into(), reason: "must be at least 1".into() });
        }

        if self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(ConfigError::Invalid {
                field: "top_p".into(),
                reason: "must be greater than 0.0 and at most 1.0".into(),
            });
        }

        if self.max_output_tokens == 0 || self.max_output_tokens > 8192 {
            return Err(ConfigError::Invalid {
                field: "max_output_tokens".into(),
                reason: "must be between 1 and 8192".into(),
            });
        }

        if self.gemini_api_key.is_none() {
            tracing::warn!(
                "No Gemini API key configured; query tools will fail until \
                 MCP_DOCQA_GEMINI_API_KEY is set"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_cache_age_zero() {
        let config = AppConfig { max_cache_age_days: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cache_age_days"));
    }

    #[test]
    fn test_validate_cache_age_negative() {
        let config = AppConfig { max_cache_age_days: -7, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cache_age_days"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() }; // 5min 1sec
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_model() {
        let config = AppConfig { default_model: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "default_model"));
    }

    #[test]
    fn test_validate_temperature_out_of_range() {
        let config = AppConfig { temperature: 2.5, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "temperature"));
    }

    #[test]
    fn test_validate_top_p_out_of_range() {
        let config = AppConfig { top_p: 0.0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "top_p"));
    }

    #[test]
    fn test_validate_max_output_tokens_too_large() {
        let config = AppConfig { max_output_tokens: 10_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_output_tokens"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            max_cache_age_days: 1,
            timeout_ms: 100,
            temperature: 0.0,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_values() {
        let config = AppConfig {
            timeout_ms: 300_000,
            temperature: 2.0,
            max_output_tokens: 8192,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
