//! # AI Configuration Module
//!
//! This module defines configuration structures for the chat-completions API,
//! including endpoint settings, retry behavior and circuit breaker parameters.

use std::env;

use crate::ai_errors::AiError;

// Constants for AI configuration
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const TIMEOUT_VAR: &str = "OPENAI_TIMEOUT_SECS";

/// Recovery configuration for error handling
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts after the first request
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for a single API request in seconds
    pub operation_timeout_secs: u64,
    /// Circuit breaker failure threshold
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000,  // 1 second
            max_retry_delay_ms: 10000,  // 10 seconds
            operation_timeout_secs: DEFAULT_TIMEOUT_SECS,
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// Connection settings for an OpenAI-compatible chat-completions API
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token sent with every request
    pub api_key: String,
    /// API root, without the trailing `/chat/completions`
    pub base_url: String,
    /// Model name (e.g., "gpt-3.5-turbo")
    pub model: String,
    /// Recovery and error handling configuration
    pub recovery: RecoveryConfig,
}

impl AiConfig {
    /// Configuration with default endpoint, model and recovery settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            recovery: RecoveryConfig::default(),
        }
    }

    /// Point the client at another API root (proxies, compatible providers, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_recovery(mut self, recovery: RecoveryConfig) -> Self {
        self.recovery = recovery;
        self
    }

    /// Load configuration from process environment variables
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL`, `OPENAI_MODEL` and
    /// `OPENAI_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::Configuration(format!("{API_KEY_VAR} must be set")))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            config.recovery.operation_timeout_secs = timeout.trim().parse().map_err(|_| {
                AiError::Configuration(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got '{timeout}'"
                ))
            })?;
        }

        Ok(config)
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = AiConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.recovery.operation_timeout_secs, 30);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AiConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:8080/v1/"),
            (MODEL_VAR, "gpt-4o-mini"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.recovery.operation_timeout_secs, 5);
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let result = AiConfig::from_lookup(lookup_from(&[(MODEL_VAR, "gpt-4o")]));
        assert!(matches!(result, Err(AiError::Configuration(_))));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let result = AiConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (TIMEOUT_VAR, "soon"),
        ]));
        assert!(matches!(result, Err(AiError::Configuration(_))));
    }
}
