//! Studykit Domain Layer
//!
//! Core vocabulary shared by every other crate in the workspace. It has ZERO
//! external dependencies and defines the artifact kinds, request and result
//! types, and the trait boundary to the language model.
//!
//! ## Key Concepts
//!
//! - **Artifact kind**: Quiz, Notes, Mnemonics or Story; selects the prompt
//!   template and the result schema
//! - **Word list**: caller-supplied vocabulary for Mnemonics and Story
//! - **Generation request**: an artifact kind paired with its input
//! - **Results**: strictly shaped values returned once a model reply has been
//!   parsed and validated
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - No I/O and no global state
//! - Model access goes through the [`traits::LlmProvider`] trait, implemented
//!   in `studykit-llm`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod request;
pub mod results;
pub mod traits;
pub mod words;

// Re-exports for convenience
pub use artifact::ArtifactKind;
pub use request::{GenerationInput, GenerationRequest};
pub use results::{Artifact, MnemonicsResult, NotesResult, QuizResult, StoryResult};
pub use traits::LlmProvider;
pub use words::WordList;
