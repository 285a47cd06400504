//! Validate model replies into typed study aids

use crate::config::DEFAULT_STORY_FALLBACK_MIN_CHARS;
use crate::error::{GenerationError, SchemaRule};
use crate::payload::{locate, Payload};
use serde_json::{Map, Value};
use studykit_domain::{
    Artifact, ArtifactKind, MnemonicsResult, NotesResult, QuizResult, StoryResult,
};
use tracing::{debug, warn};

/// Parse a stored or fresh model reply with default settings
///
/// `word_count` is the number of words the request carried; it only matters
/// for Mnemonics.
///
/// # Examples
///
/// ```
/// use studykit_domain::{Artifact, ArtifactKind};
/// use studykit_generator::parse_reply;
///
/// let reply = "```json\n{\"quiz\": [\" Q1 \"], \"answers\": [\"A1\"]}\n```";
/// match parse_reply(ArtifactKind::Quiz, reply, 0)? {
///     Artifact::Quiz(quiz) => assert_eq!(quiz.questions(), ["Q1"]),
///     _ => unreachable!(),
/// }
/// # Ok::<(), studykit_generator::GenerationError>(())
/// ```
pub fn parse_reply(kind: ArtifactKind, reply: &str, word_count: usize) -> Result<Artifact, GenerationError> {
    ReplyParser::default().parse(kind, reply, word_count)
}

/// Turns raw model text into validated, normalized results
#[derive(Debug, Clone, Copy)]
pub struct ReplyParser {
    story_fallback_min_chars: usize,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new(DEFAULT_STORY_FALLBACK_MIN_CHARS)
    }
}

impl ReplyParser {
    /// Create a parser that accepts plain-prose stories longer than `story_fallback_min_chars`
    pub fn new(story_fallback_min_chars: usize) -> Self {
        Self { story_fallback_min_chars }
    }

    /// Parse a reply for any artifact kind
    pub fn parse(&self, kind: ArtifactKind, reply: &str, word_count: usize) -> Result<Artifact, GenerationError> {
        match kind {
            ArtifactKind::Quiz => self.parse_quiz(reply).map(Artifact::Quiz),
            ArtifactKind::Notes => self.parse_notes(reply).map(Artifact::Notes),
            ArtifactKind::Mnemonics => self.parse_mnemonics(reply, word_count).map(Artifact::Mnemonics),
            ArtifactKind::Story => self.parse_story(reply).map(Artifact::Story),
        }
    }

    /// Parse a quiz reply: equal-length, non-empty `quiz` and `answers` lists
    pub fn parse_quiz(&self, reply: &str) -> Result<QuizResult, GenerationError> {
        let kind = ArtifactKind::Quiz;
        let object = payload(kind, reply)?;

        let questions = string_list(&object, "quiz").map_err(|rule| violation(kind, rule, reply))?;
        let answers = string_list(&object, "answers").map_err(|rule| violation(kind, rule, reply))?;

        if questions.len() != answers.len() {
            let rule = SchemaRule::LengthMismatch {
                questions: questions.len(),
                answers: answers.len(),
            };
            return Err(violation(kind, rule, reply));
        }
        if questions.is_empty() {
            return Err(violation(kind, SchemaRule::EmptyList("quiz"), reply));
        }

        debug!("Parsed quiz with {} questions", questions.len());
        QuizResult::new(questions, answers).map_err(|_| violation(kind, SchemaRule::EmptyList("quiz"), reply))
    }

    /// Parse a notes reply: a non-empty `notes` list
    pub fn parse_notes(&self, reply: &str) -> Result<NotesResult, GenerationError> {
        let kind = ArtifactKind::Notes;
        let object = payload(kind, reply)?;

        let notes = string_list(&object, "notes").map_err(|rule| violation(kind, rule, reply))?;
        debug!("Parsed {} notes", notes.len());
        NotesResult::new(notes).map_err(|_| violation(kind, SchemaRule::EmptyList("notes"), reply))
    }

    /// Parse a mnemonics reply for a request that carried `word_count` words
    pub fn parse_mnemonics(&self, reply: &str, word_count: usize) -> Result<MnemonicsResult, GenerationError> {
        let kind = ArtifactKind::Mnemonics;
        let object = payload(kind, reply)?;

        let mnemonics = string_list(&object, "mnemonics").map_err(|rule| violation(kind, rule, reply))?;
        if mnemonics.is_empty() && word_count > 0 {
            return Err(violation(kind, SchemaRule::EmptyList("mnemonics"), reply));
        }
        if mnemonics.len() != word_count {
            warn!(
                "Model returned {} mnemonics for {} words",
                mnemonics.len(),
                word_count
            );
        }

        Ok(MnemonicsResult::new(mnemonics))
    }

    /// Parse a story reply
    ///
    /// A reply with nothing JSON-shaped is accepted as the story itself when
    /// its trimmed length exceeds the fallback threshold.
    pub fn parse_story(&self, reply: &str) -> Result<StoryResult, GenerationError> {
        let kind = ArtifactKind::Story;
        let object = match locate(reply, kind.expected_keys()) {
            Payload::Absent => return self.story_fallback(reply),
            found => resolve(kind, found, reply)?,
        };

        let story = match object.get("story") {
            Some(Value::String(story)) => story.trim(),
            _ => return Err(violation(kind, SchemaRule::NotAString("story"), reply)),
        };
        if story.is_empty() {
            return Err(violation(kind, SchemaRule::EmptyText("story"), reply));
        }

        Ok(StoryResult::new(story))
    }

    fn story_fallback(&self, reply: &str) -> Result<StoryResult, GenerationError> {
        let prose = strip_code_fence(reply.trim());
        if prose.chars().count() > self.story_fallback_min_chars {
            debug!("No JSON in story reply, using {} chars of prose", prose.len());
            return Ok(StoryResult::new(prose));
        }
        Err(GenerationError::NoStructuredPayload {
            kind: ArtifactKind::Story,
            raw: reply.to_string(),
        })
    }
}

fn payload(kind: ArtifactKind, reply: &str) -> Result<Map<String, Value>, GenerationError> {
    resolve(kind, locate(reply, kind.expected_keys()), reply)
}

fn resolve(kind: ArtifactKind, found: Payload<'static>, reply: &str) -> Result<Map<String, Value>, GenerationError> {
    match found {
        Payload::Found(object) => Ok(object),
        Payload::MissingKey(key) => Err(violation(kind, SchemaRule::MissingKey(key), reply)),
        Payload::Malformed(reason) => Err(GenerationError::MalformedPayload {
            kind,
            reason,
            raw: reply.to_string(),
        }),
        Payload::Absent => Err(GenerationError::NoStructuredPayload {
            kind,
            raw: reply.to_string(),
        }),
    }
}

/// Trimmed strings from the list under `key`; other element types become compact JSON
fn string_list(object: &Map<String, Value>, key: &'static str) -> Result<Vec<String>, SchemaRule> {
    let items = match object.get(key) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SchemaRule::NotAList(key)),
        None => return Err(SchemaRule::MissingKey(key)),
    };

    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
        .collect())
}

fn violation(kind: ArtifactKind, rule: SchemaRule, reply: &str) -> GenerationError {
    GenerationError::SchemaViolation {
        kind,
        rule,
        raw: reply.to_string(),
    }
}

/// Drop a surrounding markdown code fence
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Skip the info string (e.g. ```text) on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_trims_and_keeps_order() {
        let quiz = ReplyParser::default()
            .parse_quiz(r#"{"quiz": ["  Q1 ", "Q2"], "answers": ["A1", " A2\n"]}"#)
            .unwrap();
        assert_eq!(quiz.questions(), ["Q1", "Q2"]);
        assert_eq!(quiz.answers(), ["A1", "A2"]);
    }

    #[test]
    fn test_quiz_length_mismatch() {
        let err = ReplyParser::default()
            .parse_quiz(r#"{"quiz": ["Q1", "Q2"], "answers": ["A1"]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation {
                rule: SchemaRule::LengthMismatch { questions: 2, answers: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_quiz_empty_lists() {
        let err = ReplyParser::default()
            .parse_quiz(r#"{"quiz": [], "answers": []}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::EmptyList("quiz"), .. }
        ));
    }

    #[test]
    fn test_quiz_answers_not_a_list() {
        let err = ReplyParser::default()
            .parse_quiz(r#"{"quiz": ["Q1"], "answers": "A1"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::NotAList("answers"), .. }
        ));
    }

    #[test]
    fn test_non_string_elements_are_coerced() {
        let quiz = ReplyParser::default()
            .parse_quiz(r#"{"quiz": ["2 + 2 = ?", "Is water wet?"], "answers": [4, true]}"#)
            .unwrap();
        assert_eq!(quiz.answers(), ["4", "true"]);

        let notes = ReplyParser::default()
            .parse_notes(r#"{"notes": ["Summary", {"term": "ATP"}]}"#)
            .unwrap();
        assert_eq!(notes.as_slice()[1], r#"{"term":"ATP"}"#);
    }

    #[test]
    fn test_notes_empty_list() {
        let err = ReplyParser::default().parse_notes(r#"{"notes": []}"#).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::EmptyList("notes"), .. }
        ));
    }

    #[test]
    fn test_mnemonics_count_mismatch_is_accepted() {
        let result = ReplyParser::default()
            .parse_mnemonics(r#"{"mnemonics": ["Word: cat - Mnemonic: Cute Animal Tail"]}"#, 2)
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_mnemonics_empty_for_words() {
        let err = ReplyParser::default()
            .parse_mnemonics(r#"{"mnemonics": []}"#, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::EmptyList("mnemonics"), .. }
        ));

        assert!(ReplyParser::default().parse_mnemonics(r#"{"mnemonics": []}"#, 0).unwrap().is_empty());
    }

    #[test]
    fn test_story_from_json() {
        let story = ReplyParser::default()
            .parse_story("Sure!\n{\"story\": \"  Once upon a time.  \"}")
            .unwrap();
        assert_eq!(story.as_str(), "Once upon a time.");
    }

    #[test]
    fn test_story_must_be_a_string() {
        let err = ReplyParser::default().parse_story(r#"{"story": ["one", "two"]}"#).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::NotAString("story"), .. }
        ));
    }

    #[test]
    fn test_story_blank() {
        let err = ReplyParser::default().parse_story(r#"{"story": "   "}"#).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::EmptyText("story"), .. }
        ));
    }

    #[test]
    fn test_story_prose_fallback() {
        let prose = "The moon pulled the tide across the sleepy harbour while gulls argued overhead.";
        let story = ReplyParser::default().parse_story(&format!("\n{}\n", prose)).unwrap();
        assert_eq!(story.as_str(), prose);

        let fenced = format!("```text\n{}\n```", prose);
        assert_eq!(ReplyParser::default().parse_story(&fenced).unwrap().as_str(), prose);
    }

    #[test]
    fn test_story_short_prose_fails() {
        let err = ReplyParser::default().parse_story("I can't do that.").unwrap_err();
        assert!(matches!(err, GenerationError::NoStructuredPayload { .. }));
        assert_eq!(err.raw_reply(), Some("I can't do that."));
    }

    #[test]
    fn test_story_fallback_threshold_is_configurable() {
        let parser = ReplyParser::new(5);
        assert_eq!(parser.parse_story("A short tale.").unwrap().as_str(), "A short tale.");
    }

    #[test]
    fn test_story_malformed_json_does_not_fall_back() {
        let reply = r#"{"story": "The moon and the tide were old friends who met every evening" "again"}"#;
        let err = ReplyParser::default().parse_story(reply).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedPayload { .. }));
    }

    #[test]
    fn test_parse_reply_dispatches_by_kind() {
        let artifact = parse_reply(ArtifactKind::Notes, r#"{"notes": ["Summary: cells"]}"#, 0).unwrap();
        assert_eq!(artifact.kind(), ArtifactKind::Notes);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```\nbody\n```"), "body");
        assert_eq!(strip_code_fence("plain"), "plain");
        assert_eq!(strip_code_fence("```unclosed"), "```unclosed");
    }
}
