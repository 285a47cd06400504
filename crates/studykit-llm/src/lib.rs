//! Studykit LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `studykit-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted, deterministic provider for tests
//! - `OpenRouterProvider`: OpenAI-compatible chat completions over HTTP
//!
//! # Examples
//!
//! ```
//! use studykit_llm::MockProvider;
//! use studykit_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete("test prompt", 0.7).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openrouter;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use studykit_domain::traits::LlmProvider;
use thiserror::Error;

pub use openrouter::OpenRouterProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No API key found in the named environment variable
    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns scripted replies without any network calls. Queued replies and
/// errors are consumed in order; once the queue is empty every call gets the
/// default reply. Clones share the queue, the call log and the counter.
///
/// # Examples
///
/// ```
/// use studykit_llm::MockProvider;
/// use studykit_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_reply("first");
/// provider.push_error("provider down");
///
/// assert_eq!(provider.complete("a", 0.7).unwrap(), "first");
/// assert!(provider.complete("b", 0.7).is_err());
/// assert_eq!(provider.complete("c", 0.7).unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: String,
    queue: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<(String, f64)>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all prompts
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider that answers with `replies` in order
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for reply in replies {
            provider.push_reply(reply);
        }
        provider
    }

    /// Queue a reply for the next unanswered call
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.queue).push_back(Ok(reply.into()));
    }

    /// Queue a provider failure for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        lock(&self.queue).push_back(Err(message.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    /// The most recent prompt, if any call was made
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().map(|(prompt, _)| prompt.clone())
    }

    /// The temperature of the most recent call
    pub fn last_temperature(&self) -> Option<f64> {
        lock(&self.calls).last().map(|(_, temperature)| *temperature)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str, temperature: f64) -> Result<String, Self::Error> {
        lock(&self.calls).push((prompt.to_string(), temperature));

        match lock(&self.queue).pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_reply.clone()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete("any prompt", 0.7);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_queued_replies() {
        let provider = MockProvider::with_replies(["one", "two"]);

        assert_eq!(provider.complete("p1", 0.7).unwrap(), "one");
        assert_eq!(provider.complete("p2", 0.7).unwrap(), "two");
        assert_eq!(provider.complete("p3", 0.7).unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.complete("prompt1", 0.7).unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.complete("prompt2", 0.7).unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_records_prompt_and_temperature() {
        let provider = MockProvider::new("ok");
        assert!(provider.last_prompt().is_none());

        provider.complete("first", 0.7).unwrap();
        provider.complete("second", 0.9).unwrap();

        assert_eq!(provider.last_prompt().as_deref(), Some("second"));
        assert_eq!(provider.last_temperature(), Some(0.9));
    }

    #[test]
    fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.push_error("bad gateway");

        let result = provider.complete("bad prompt", 0.7);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LlmError::Other(msg) if msg == "bad gateway"));
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete("test", 0.7).unwrap();

        // Both should share the same call log due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
