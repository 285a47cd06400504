//! Error types for the Generator

use std::fmt;
use studykit_domain::ArtifactKind;
use thiserror::Error;

/// Errors that can occur while generating a study aid
///
/// Every variant is terminal; nothing is retried. Reply-related variants keep
/// the raw model reply for diagnostics.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The language model call failed
    #[error("LLM error: {0}")]
    Provider(String),

    /// The reply contains nothing JSON-shaped
    #[error("No structured {kind} payload found in model reply")]
    NoStructuredPayload {
        /// Requested artifact kind
        kind: ArtifactKind,
        /// Raw model reply
        raw: String,
    },

    /// A candidate payload mentions the expected keys but is not valid JSON
    #[error("Malformed {kind} payload: {reason}")]
    MalformedPayload {
        /// Requested artifact kind
        kind: ArtifactKind,
        /// Parser message
        reason: String,
        /// Raw model reply
        raw: String,
    },

    /// The payload parsed but breaks the artifact's schema
    #[error("Schema violation in {kind} payload: {rule}")]
    SchemaViolation {
        /// Requested artifact kind
        kind: ArtifactKind,
        /// The broken rule
        rule: SchemaRule,
        /// Raw model reply
        raw: String,
    },

    /// Quiz and Notes need non-blank document text
    #[error("Empty input: {0} needs non-empty text")]
    EmptyInput(ArtifactKind),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GenerationError {
    /// The raw model reply, when the failure happened after the model answered
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            GenerationError::NoStructuredPayload { raw, .. }
            | GenerationError::MalformedPayload { raw, .. }
            | GenerationError::SchemaViolation { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// A schema rule broken by an otherwise well-formed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRule {
    /// An expected key is absent
    MissingKey(&'static str),
    /// The value under the key is not a list
    NotAList(&'static str),
    /// The value under the key is not a string
    NotAString(&'static str),
    /// Quiz questions and answers differ in length
    LengthMismatch {
        /// Number of questions
        questions: usize,
        /// Number of answers
        answers: usize,
    },
    /// A required list is empty
    EmptyList(&'static str),
    /// A required string is empty after trimming
    EmptyText(&'static str),
}

impl fmt::Display for SchemaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRule::MissingKey(key) => write!(f, "missing key '{}'", key),
            SchemaRule::NotAList(key) => write!(f, "'{}' must be a list", key),
            SchemaRule::NotAString(key) => write!(f, "'{}' must be a string", key),
            SchemaRule::LengthMismatch { questions, answers } => write!(
                f,
                "{} questions but {} answers",
                questions, answers
            ),
            SchemaRule::EmptyList(key) => write!(f, "'{}' must not be empty", key),
            SchemaRule::EmptyText(key) => write!(f, "'{}' must not be blank", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_rule_messages() {
        assert_eq!(SchemaRule::MissingKey("answers").to_string(), "missing key 'answers'");
        assert_eq!(
            SchemaRule::LengthMismatch { questions: 3, answers: 2 }.to_string(),
            "3 questions but 2 answers"
        );
    }

    #[test]
    fn test_raw_reply_is_kept() {
        let err = GenerationError::NoStructuredPayload {
            kind: ArtifactKind::Notes,
            raw: "I cannot help".to_string(),
        };
        assert_eq!(err.raw_reply(), Some("I cannot help"));
        assert_eq!(err.to_string(), "No structured notes payload found in model reply");

        assert!(GenerationError::Provider("down".to_string()).raw_reply().is_none());
    }
}
