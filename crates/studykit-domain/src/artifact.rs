//! Artifact kinds - the four study aids the pipeline can produce

use std::fmt;

/// Kind of study aid requested from the model
///
/// The kind decides three things:
/// - which instruction template is sent
/// - which keys the structured payload must carry
/// - which validation rules the parsed payload must pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Questions with an index-aligned answer key
    Quiz,

    /// A summary followed by bullet points
    Notes,

    /// One memory aid per input word
    Mnemonics,

    /// A single narrative using every input word
    Story,
}

impl ArtifactKind {
    /// Every kind, in menu order
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Quiz,
        ArtifactKind::Notes,
        ArtifactKind::Mnemonics,
        ArtifactKind::Story,
    ];

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Quiz => "quiz",
            ArtifactKind::Notes => "notes",
            ArtifactKind::Mnemonics => "mnemonics",
            ArtifactKind::Story => "story",
        }
    }

    /// Parse a kind from a string, accepting the one-letter shorthands
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "quiz" | "q" => Some(ArtifactKind::Quiz),
            "notes" | "n" => Some(ArtifactKind::Notes),
            "mnemonics" | "m" => Some(ArtifactKind::Mnemonics),
            "story" | "s" => Some(ArtifactKind::Story),
            _ => None,
        }
    }

    /// Keys the structured payload must contain for this kind
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Quiz => &["quiz", "answers"],
            ArtifactKind::Notes => &["notes"],
            ArtifactKind::Mnemonics => &["mnemonics"],
            ArtifactKind::Story => &["story"],
        }
    }

    /// Whether the kind is generated from a word list rather than document text
    pub fn takes_words(&self) -> bool {
        matches!(self, ArtifactKind::Mnemonics | ArtifactKind::Story)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid artifact kind: {}", s))
    }
}
