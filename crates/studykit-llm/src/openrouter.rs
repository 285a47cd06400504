//! OpenRouter Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. OpenRouter is
//! the default, but a local gateway works the same way.
//!
//! # Features
//!
//! - Async HTTP communication, exposed through the blocking `LlmProvider` trait
//! - Configurable endpoint, model and request timeout
//! - Opt-in retries with exponential backoff (a single attempt by default)
//!
//! # Examples
//!
//! ```no_run
//! use studykit_llm::OpenRouterProvider;
//! use studykit_domain::traits::LlmProvider;
//!
//! let provider = OpenRouterProvider::new(
//!     "https://openrouter.ai/api/v1",
//!     "meta-llama/llama-4-maverick:free",
//!     "sk-or-...",
//! ).unwrap();
//! let reply = provider.complete("Say hello", 0.7).unwrap();
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use studykit_domain::traits::LlmProvider;
use tracing::{debug, warn};

/// Default OpenRouter API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick:free";

/// Environment variable holding the API key by default
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts (no retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Longest wait between two attempts
const MAX_BACKOFF_SECS: u64 = 60;

/// OpenAI-compatible chat completion provider
///
/// Owns a current-thread tokio runtime and blocks on it for each call, so it
/// must not be used from inside another tokio runtime.
pub struct OpenRouterProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    max_attempts: u32,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://openrouter.ai/api/v1")
    /// - `model`: Model identifier understood by the endpoint
    /// - `api_key`: Bearer token
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            runtime,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Create a provider whose API key is read from the environment variable `key_env`
    pub fn from_env(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        key_env: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredentials(key_env.to_string()))?;
        Self::with_timeout(endpoint, model, api_key, timeout)
    }

    /// Set the maximum number of attempts per call
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat completion request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable or times out
    /// - The model is not available (HTTP 404)
    /// - The provider rate-limits the request (HTTP 429)
    /// - The response has no message content
    pub async fn complete_async(&self, prompt: &str, temperature: f64) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_attempts {
            debug!("POST {} (model {}, attempt {})", url, self.model, attempts + 1);

            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response
                            .json::<ChatResponse>()
                            .await
                            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
                        return reply_content(body);
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_attempts {
                let delay = backoff_delay(attempts);
                warn!("LLM request failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max attempts exceeded".to_string())))
    }
}

/// Exponential backoff after the `attempt`-th failure: 1s, 2s, 4s, capped at a minute
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

fn reply_content(body: ChatResponse) -> Result<String, LlmError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}

impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, temperature: f64) -> Result<String, Self::Error> {
        // Blocking wrapper for async function
        self.runtime.block_on(self.complete_async(prompt, temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenRouterProvider::new("http://localhost:8000/v1/", "llama", "key").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8000/v1");
        assert_eq!(provider.model(), "llama");
        assert_eq!(provider.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_provider_with_max_attempts() {
        let provider = OpenRouterProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "key")
            .unwrap()
            .with_max_attempts(0);
        assert_eq!(provider.max_attempts, 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(7), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff_delay(65), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_secs(MAX_BACKOFF_SECS));
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = OpenRouterProvider::from_env(
            DEFAULT_ENDPOINT,
            DEFAULT_MODEL,
            "STUDYKIT_TEST_KEY_THAT_IS_NEVER_SET",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(LlmError::MissingCredentials(name)) if name == "STUDYKIT_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_request_serialization() {
        let body = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_reply_content_extraction() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_content(body).unwrap(), "hello");
    }

    #[test]
    fn test_reply_without_content() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(reply_content(body), Err(LlmError::InvalidResponse(_))));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap();
        assert!(matches!(reply_content(body), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_error_handling() {
        // Use invalid endpoint to trigger error
        let provider = OpenRouterProvider::new("http://localhost:99999", "llama", "key").unwrap();

        let result = provider.complete("test", 0.7);
        assert!(result.is_err());

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            _ => panic!("Expected Communication error"),
        }
    }

    // Integration test (requires network access and OPENROUTER_API_KEY)
    #[test]
    #[ignore]
    fn test_openrouter_integration() {
        let provider = OpenRouterProvider::from_env(
            DEFAULT_ENDPOINT,
            DEFAULT_MODEL,
            DEFAULT_API_KEY_ENV,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .unwrap();
        let reply = provider.complete("Say 'hello' and nothing else", 0.7).unwrap();
        assert!(!reply.is_empty());
    }
}
