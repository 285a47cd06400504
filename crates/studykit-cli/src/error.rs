//! Error types for the CLI application.

use studykit_document::DocumentError;
use studykit_generator::GenerationError;
use studykit_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be read
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Study aid could not be generated
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Model provider could not be set up
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}

impl CliError {
    /// The raw model reply behind a generation failure, if any
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            CliError::Generation(e) => e.raw_reply(),
            _ => None,
        }
    }
}
