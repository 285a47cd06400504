//! Generation requests - an artifact kind paired with its input

use crate::{ArtifactKind, WordList};

/// Input carried by a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationInput {
    /// Flattened document text (Quiz, Notes)
    Text(String),

    /// Vocabulary supplied by the caller (Mnemonics, Story)
    Words(WordList),
}

/// An immutable request for one study aid
///
/// Built through the per-kind constructors so the input always matches the
/// kind.
///
/// # Examples
///
/// ```
/// use studykit_domain::{ArtifactKind, GenerationRequest, WordList};
///
/// let request = GenerationRequest::story(WordList::parse("moon, tide"));
/// assert_eq!(request.kind(), ArtifactKind::Story);
/// assert_eq!(request.words().map(|w| w.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    kind: ArtifactKind,
    input: GenerationInput,
}

impl GenerationRequest {
    /// Quiz request over document text
    pub fn quiz(text: impl Into<String>) -> Self {
        Self {
            kind: ArtifactKind::Quiz,
            input: GenerationInput::Text(text.into()),
        }
    }

    /// Notes request over document text
    pub fn notes(text: impl Into<String>) -> Self {
        Self {
            kind: ArtifactKind::Notes,
            input: GenerationInput::Text(text.into()),
        }
    }

    /// Mnemonics request over a word list
    pub fn mnemonics(words: impl Into<WordList>) -> Self {
        Self {
            kind: ArtifactKind::Mnemonics,
            input: GenerationInput::Words(words.into()),
        }
    }

    /// Story request over a word list
    pub fn story(words: impl Into<WordList>) -> Self {
        Self {
            kind: ArtifactKind::Story,
            input: GenerationInput::Words(words.into()),
        }
    }

    /// The requested artifact kind
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// The request input
    pub fn input(&self) -> &GenerationInput {
        &self.input
    }

    /// Document text, for text-driven kinds
    pub fn text(&self) -> Option<&str> {
        match &self.input {
            GenerationInput::Text(text) => Some(text),
            GenerationInput::Words(_) => None,
        }
    }

    /// Word list, for word-driven kinds
    pub fn words(&self) -> Option<&WordList> {
        match &self.input {
            GenerationInput::Words(words) => Some(words),
            GenerationInput::Text(_) => None,
        }
    }
}
