//! Typed study aids returned once a model reply has been validated
//!
//! Constructors enforce the shape invariants so a value of these types is
//! always well-formed. Ownership passes to the caller; nothing is cached.

use crate::ArtifactKind;

/// Quiz questions with an index-aligned answer key
///
/// Invariant: `questions.len() == answers.len()` and both are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl QuizResult {
    /// Create a quiz, rejecting empty or misaligned lists
    pub fn new(questions: Vec<String>, answers: Vec<String>) -> Result<Self, String> {
        if questions.is_empty() {
            return Err("Quiz must contain at least one question".to_string());
        }
        if questions.len() != answers.len() {
            return Err(format!(
                "Quiz has {} questions but {} answers",
                questions.len(),
                answers.len()
            ));
        }
        Ok(Self { questions, answers })
    }

    /// The questions, in order
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// The answers, aligned with [`QuizResult::questions`]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Number of question/answer pairs
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; a quiz holds at least one pair
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate over `(question, answer)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }

    /// Split into the two owned lists
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.questions, self.answers)
    }
}

/// Study notes: a summary followed by bullet points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResult {
    notes: Vec<String>,
}

impl NotesResult {
    /// Create notes, rejecting an empty list
    pub fn new(notes: Vec<String>) -> Result<Self, String> {
        if notes.is_empty() {
            return Err("Notes must contain at least a summary".to_string());
        }
        Ok(Self { notes })
    }

    /// The summary line
    pub fn summary(&self) -> &str {
        &self.notes[0]
    }

    /// The bullet points after the summary
    pub fn bullets(&self) -> &[String] {
        &self.notes[1..]
    }

    /// All entries, summary first
    pub fn as_slice(&self) -> &[String] {
        &self.notes
    }

    /// Take ownership of the entries
    pub fn into_vec(self) -> Vec<String> {
        self.notes
    }
}

/// One mnemonic per input word, each entry reading `Word: <word> - Mnemonic: <mnemonic>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MnemonicsResult {
    mnemonics: Vec<String>,
}

impl MnemonicsResult {
    /// Wrap a list of mnemonics
    pub fn new(mnemonics: Vec<String>) -> Self {
        Self { mnemonics }
    }

    /// The result for an empty word list
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no mnemonics are present
    pub fn is_empty(&self) -> bool {
        self.mnemonics.is_empty()
    }

    /// Number of mnemonics
    pub fn len(&self) -> usize {
        self.mnemonics.len()
    }

    /// The entries, in order
    pub fn as_slice(&self) -> &[String] {
        &self.mnemonics
    }

    /// Take ownership of the entries
    pub fn into_vec(self) -> Vec<String> {
        self.mnemonics
    }
}

/// A short narrative built from a word list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryResult {
    story: String,
}

impl StoryResult {
    /// Wrap a narrative
    pub fn new(story: impl Into<String>) -> Self {
        Self {
            story: story.into(),
        }
    }

    /// The result for an empty word list
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the story is empty
    pub fn is_empty(&self) -> bool {
        self.story.is_empty()
    }

    /// Borrow the narrative
    pub fn as_str(&self) -> &str {
        &self.story
    }

    /// Take ownership of the narrative
    pub fn into_string(self) -> String {
        self.story
    }
}

/// Any of the four study aids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Quiz result
    Quiz(QuizResult),
    /// Notes result
    Notes(NotesResult),
    /// Mnemonics result
    Mnemonics(MnemonicsResult),
    /// Story result
    Story(StoryResult),
}

impl Artifact {
    /// The kind of this artifact
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Quiz(_) => ArtifactKind::Quiz,
            Artifact::Notes(_) => ArtifactKind::Notes,
            Artifact::Mnemonics(_) => ArtifactKind::Mnemonics,
            Artifact::Story(_) => ArtifactKind::Story,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quiz_accepts_aligned_lists() {
        let quiz = QuizResult::new(strings(&["Q1", "Q2"]), strings(&["A1", "A2"])).unwrap();
        assert_eq!(quiz.len(), 2);
        let pairs: Vec<_> = quiz.pairs().collect();
        assert_eq!(pairs, vec![("Q1", "A1"), ("Q2", "A2")]);
    }

    #[test]
    fn test_quiz_rejects_mismatch() {
        let err = QuizResult::new(strings(&["Q1", "Q2"]), strings(&["A1"])).unwrap_err();
        assert!(err.contains("2 questions"));
        assert!(err.contains("1 answers"));
    }

    #[test]
    fn test_quiz_rejects_empty() {
        assert!(QuizResult::new(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_notes_summary_and_bullets() {
        let notes = NotesResult::new(strings(&["Summary", "- one", "- two"])).unwrap();
        assert_eq!(notes.summary(), "Summary");
        assert_eq!(notes.bullets(), &strings(&["- one", "- two"])[..]);
    }

    #[test]
    fn test_notes_summary_only() {
        let notes = NotesResult::new(strings(&["Summary"])).unwrap();
        assert!(notes.bullets().is_empty());
        assert!(NotesResult::new(Vec::new()).is_err());
    }

    #[test]
    fn test_empty_word_results() {
        assert!(MnemonicsResult::empty().is_empty());
        assert!(StoryResult::empty().is_empty());
        assert_eq!(StoryResult::new("Once").as_str(), "Once");
    }

    #[test]
    fn test_artifact_kind() {
        assert_eq!(Artifact::Story(StoryResult::empty()).kind(), ArtifactKind::Story);
        assert_eq!(
            Artifact::Mnemonics(MnemonicsResult::empty()).kind(),
            ArtifactKind::Mnemonics
        );
    }
}
