//! # AI Client Module
//!
//! Minimal client for OpenAI-compatible chat-completions APIs.
//!
//! Every call goes through the circuit breaker, and transport errors, timeouts, 429s and
//! 5xx replies are retried with exponential backoff plus jitter. Model replies are expected
//! to carry a JSON object, possibly wrapped in prose or code fences; [`extract_json_object`]
//! cuts it out.

use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ai_config::{AiConfig, RecoveryConfig};
use crate::ai_errors::AiError;
use crate::circuit_breaker::CircuitBreaker;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client shared by the nutrition estimator and the meal planner
pub struct ChatClient {
    config: AiConfig,
    client: reqwest::Client,
    circuit_breaker: CircuitBreaker,
}

impl ChatClient {
    /// Build a client; the HTTP timeout comes from `recovery.operation_timeout_secs`
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.recovery.operation_timeout_secs))
            .build()
            .map_err(|e| AiError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        let circuit_breaker = CircuitBreaker::new(&config.recovery);

        Ok(Self {
            config,
            client,
            circuit_breaker,
        })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    /// Send a system + user prompt pair and return the assistant's text
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, AiError> {
        if self.circuit_breaker.is_open() {
            warn!("Circuit breaker open, skipping request to {}", self.config.model);
            return Err(AiError::CircuitOpen);
        }

        let recovery = &self.config.recovery;
        let mut attempt: u32 = 0;

        loop {
            match self.send_once(system_prompt, user_prompt, temperature).await {
                Ok(content) => {
                    self.circuit_breaker.record_success();
                    return Ok(content);
                }
                Err(err) if err.is_retryable() && attempt < recovery.max_retries => {
                    attempt += 1;
                    let delay = calculate_retry_delay(attempt, recovery);
                    warn!(
                        "AI request failed ({}), retry {}/{} in {}ms",
                        err, attempt, recovery.max_retries, delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(err) => {
                    self.circuit_breaker.record_failure();
                    warn!("AI request failed after {} retries: {}", attempt, err);
                    return Err(err);
                }
            }
        }
    }

    /// Like [`complete`](Self::complete), then deserialize the JSON object in the reply
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<T, AiError> {
        let content = self.complete(system_prompt, user_prompt, temperature).await?;
        let json = extract_json_object(&content).ok_or_else(|| {
            AiError::InvalidResponse(format!(
                "no JSON object found in reply: {}",
                preview(&content)
            ))
        })?;
        Ok(serde_json::from_str(json)?)
    }

    async fn send_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
        };

        debug!(
            "Sending chat completion to {} (model {}, temperature {})",
            self.config.completions_url(),
            self.config.model,
            temperature
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::InvalidResponse("reply has no message content".to_string()))?;

        info!("Received chat completion ({} characters)", content.len());
        Ok(content.trim().to_string())
    }
}

/// Exponential backoff delay in milliseconds for the given retry attempt (1-based)
///
/// The delay doubles per attempt, is capped at `max_retry_delay_ms`, and carries up to
/// 10% random jitter on top.
pub fn calculate_retry_delay(attempt: u32, recovery: &RecoveryConfig) -> u64 {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = recovery
        .base_retry_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(recovery.max_retry_delay_ms);
    let jitter_bound = delay / 10;
    let jitter = if jitter_bound > 0 {
        rand::thread_rng().gen_range(0..=jitter_bound)
    } else {
        0
    };
    delay + jitter
}

/// The text between the first `{` and the last `}` (inclusive), if any
///
/// # Examples
///
/// ```rust
/// use mealmind::ai_client::extract_json_object;
///
/// let reply = "Here you go:\n```json\n{\"calories\": 95}\n```";
/// assert_eq!(extract_json_object(reply), Some("{\"calories\": 95}"));
/// assert_eq!(extract_json_object("no json here"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn preview(text: &str) -> String {
    text.chars().take(300).collect()
}
