//! # AI Error Types Module
//!
//! This module defines the error type for calls to the chat-completions API.

/// Custom error types for AI operations
#[derive(Debug, Clone, PartialEq)]
pub enum AiError {
    /// Missing or malformed configuration
    Configuration(String),
    /// Transport errors (connection refused, DNS, TLS, ...)
    Request(String),
    /// Non-success HTTP status from the API
    Status { code: u16, body: String },
    /// The reply could not be read as the expected JSON
    InvalidResponse(String),
    /// The request exceeded its timeout
    Timeout(String),
    /// Too many recent failures; requests are rejected without being sent
    CircuitOpen,
}

impl AiError {
    /// Whether sending the same request again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Request(_) | AiError::Timeout(_) => true,
            AiError::Status { code, .. } => *code == 429 || *code >= 500,
            AiError::Configuration(_) | AiError::InvalidResponse(_) | AiError::CircuitOpen => {
                false
            }
        }
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            AiError::Request(msg) => write!(f, "Request error: {msg}"),
            AiError::Status { code, body } => write!(f, "API returned status {code}: {body}"),
            AiError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
            AiError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
            AiError::CircuitOpen => write!(f, "Circuit breaker open: AI requests are paused"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<anyhow::Error> for AiError {
    fn from(err: anyhow::Error) -> Self {
        AiError::Request(err.to_string())
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout(err.to_string())
        } else if err.is_decode() {
            AiError::InvalidResponse(err.to_string())
        } else {
            AiError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::InvalidResponse(err.to_string())
    }
}
