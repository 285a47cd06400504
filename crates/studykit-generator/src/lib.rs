//! Studykit Generator
//!
//! The prompt/response contract layer: turns document text or a word list
//! into a quiz, study notes, mnemonics or a story by prompting a language
//! model and validating its reply.
//!
//! # Architecture
//!
//! ```text
//! Request → PromptBuilder → LlmProvider → payload locator → schema checks → Artifact
//! ```
//!
//! One algorithm serves every artifact kind; the kind selects the prompt
//! template, the expected keys and the validation rules. Model replies are
//! untrusted: the JSON payload may be wrapped in code fences or prose, and a
//! reply that does not match the schema is an error, never a guess.
//!
//! # Example Usage
//!
//! ```
//! use studykit_generator::Generator;
//! use studykit_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"Here you go: {"quiz": ["Q1"], "answers": ["A1"]}"#);
//! let generator = Generator::new(llm);
//!
//! let quiz = generator.generate_quiz("Cells are the unit of life.")?;
//! assert_eq!(quiz.questions(), ["Q1"]);
//! assert_eq!(quiz.answers(), ["A1"]);
//! # Ok::<(), studykit_generator::GenerationError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod parser;
mod payload;
mod prompt;

#[cfg(test)]
mod tests;

pub use config::{GeneratorConfig, DEFAULT_STORY_FALLBACK_MIN_CHARS, DEFAULT_STORY_TEMPERATURE, DEFAULT_TEMPERATURE};
pub use error::{GenerationError, SchemaRule};
pub use generator::Generator;
pub use parser::{parse_reply, ReplyParser};
pub use prompt::{instructions, PromptBuilder};
