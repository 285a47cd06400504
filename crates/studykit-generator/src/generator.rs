//! Core Generator implementation

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::parser::ReplyParser;
use crate::prompt::PromptBuilder;
use std::fmt::Display;
use studykit_domain::traits::LlmProvider;
use studykit_domain::{
    Artifact, ArtifactKind, GenerationInput, GenerationRequest, MnemonicsResult, NotesResult,
    QuizResult, StoryResult, WordList,
};
use tracing::{debug, info, warn};

/// The Generator turns document text or word lists into study aids
///
/// Each call builds one prompt, makes one blocking model call and validates
/// the reply. Nothing is retried and no state is kept between calls.
pub struct Generator<L> {
    llm: L,
    config: GeneratorConfig,
    parser: ReplyParser,
}

impl<L> Generator<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Generator with the default configuration
    pub fn new(llm: L) -> Self {
        let config = GeneratorConfig::default();
        Self {
            llm,
            parser: ReplyParser::new(config.story_fallback_min_chars),
            config,
        }
    }

    /// Create a new Generator with a validated configuration
    pub fn with_config(llm: L, config: GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::Config)?;
        Ok(Self {
            llm,
            parser: ReplyParser::new(config.story_fallback_min_chars),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The model collaborator
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Generate whichever artifact `request` asks for
    pub fn generate(&self, request: &GenerationRequest) -> Result<Artifact, GenerationError> {
        match (request.kind(), request.input()) {
            (ArtifactKind::Quiz, GenerationInput::Text(text)) => self.generate_quiz(text).map(Artifact::Quiz),
            (ArtifactKind::Notes, GenerationInput::Text(text)) => self.generate_notes(text).map(Artifact::Notes),
            (ArtifactKind::Mnemonics, GenerationInput::Words(words)) => {
                self.generate_mnemonics(words).map(Artifact::Mnemonics)
            }
            (ArtifactKind::Story, GenerationInput::Words(words)) => self.generate_story(words).map(Artifact::Story),
            (kind, _) => Err(GenerationError::Config(format!(
                "{} request carries the wrong kind of input",
                kind
            ))),
        }
    }

    /// Generate a quiz with an index-aligned answer key from document text
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptyInput`] for blank text (no model call)
    /// - [`GenerationError::Provider`] when the model call fails
    /// - payload errors when the reply does not hold a valid quiz
    pub fn generate_quiz(&self, text: &str) -> Result<QuizResult, GenerationError> {
        let reply = self.complete_text(ArtifactKind::Quiz, text)?;
        let quiz = self.parser.parse_quiz(&reply)?;
        info!("Generated quiz with {} questions", quiz.len());
        Ok(quiz)
    }

    /// Generate study notes (summary first, then bullets) from document text
    pub fn generate_notes(&self, text: &str) -> Result<NotesResult, GenerationError> {
        let reply = self.complete_text(ArtifactKind::Notes, text)?;
        let notes = self.parser.parse_notes(&reply)?;
        info!("Generated {} notes", notes.as_slice().len());
        Ok(notes)
    }

    /// Generate one mnemonic per word
    ///
    /// An empty word list yields an empty result without calling the model.
    pub fn generate_mnemonics(&self, words: &WordList) -> Result<MnemonicsResult, GenerationError> {
        if words.is_empty() {
            debug!("No words given, skipping mnemonics");
            return Ok(MnemonicsResult::empty());
        }
        let reply = self.complete(ArtifactKind::Mnemonics, &GenerationInput::Words(words.clone()))?;
        let mnemonics = self.parser.parse_mnemonics(&reply, words.len())?;
        info!("Generated {} mnemonics for {} words", mnemonics.len(), words.len());
        Ok(mnemonics)
    }

    /// Generate a story that uses every word
    ///
    /// An empty word list yields an empty story without calling the model.
    pub fn generate_story(&self, words: &WordList) -> Result<StoryResult, GenerationError> {
        if words.is_empty() {
            debug!("No words given, skipping story");
            return Ok(StoryResult::empty());
        }
        let reply = self.complete(ArtifactKind::Story, &GenerationInput::Words(words.clone()))?;
        let story = self.parser.parse_story(&reply)?;
        info!("Generated story of {} chars", story.as_str().len());
        Ok(story)
    }

    fn complete_text(&self, kind: ArtifactKind, text: &str) -> Result<String, GenerationError> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyInput(kind));
        }
        let text = self.limit_input(text);
        self.complete(kind, &GenerationInput::Text(text.to_string()))
    }

    fn limit_input<'t>(&self, text: &'t str) -> &'t str {
        let Some(max) = self.config.max_input_chars else {
            return text;
        };
        match text.char_indices().nth(max) {
            Some((cut, _)) => {
                warn!(
                    "Input text has more than {} chars, truncating before prompting",
                    max
                );
                &text[..cut]
            }
            None => text,
        }
    }

    fn complete(&self, kind: ArtifactKind, input: &GenerationInput) -> Result<String, GenerationError> {
        let prompt = PromptBuilder::new(kind, input).build();
        let temperature = self.config.temperature(kind);

        debug!(
            "Requesting {} (prompt {} chars, temperature {})",
            kind,
            prompt.len(),
            temperature
        );

        let reply = self
            .llm
            .complete(&prompt, temperature)
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        debug!("LLM response length: {} chars", reply.len());
        Ok(reply)
    }
}
