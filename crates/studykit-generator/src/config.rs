//! Configuration for the Generator

use serde::{Deserialize, Serialize};
use studykit_domain::ArtifactKind;

/// Sampling temperature for Quiz, Notes and Mnemonics
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Sampling temperature for Story
pub const DEFAULT_STORY_TEMPERATURE: f64 = 0.8;

/// Minimum length of a plain-prose reply accepted as a story
pub const DEFAULT_STORY_FALLBACK_MIN_CHARS: usize = 50;

/// Configuration for the Generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Temperature for quiz prompts
    pub quiz_temperature: f64,

    /// Temperature for notes prompts
    pub notes_temperature: f64,

    /// Temperature for mnemonics prompts
    pub mnemonics_temperature: f64,

    /// Temperature for story prompts
    pub story_temperature: f64,

    /// Cut document text to this many characters before prompting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_chars: Option<usize>,

    /// A story reply with no JSON is accepted verbatim above this length
    pub story_fallback_min_chars: usize,
}

impl GeneratorConfig {
    /// Temperature used for `kind`
    pub fn temperature(&self, kind: ArtifactKind) -> f64 {
        match kind {
            ArtifactKind::Quiz => self.quiz_temperature,
            ArtifactKind::Notes => self.notes_temperature,
            ArtifactKind::Mnemonics => self.mnemonics_temperature,
            ArtifactKind::Story => self.story_temperature,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for kind in ArtifactKind::ALL {
            let temperature = self.temperature(kind);
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "{}_temperature must be between 0.0 and 2.0, got {}",
                    kind, temperature
                ));
            }
        }
        if self.max_input_chars == Some(0) {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            quiz_temperature: DEFAULT_TEMPERATURE,
            notes_temperature: DEFAULT_TEMPERATURE,
            mnemonics_temperature: DEFAULT_TEMPERATURE,
            story_temperature: DEFAULT_STORY_TEMPERATURE,
            max_input_chars: None,
            story_fallback_min_chars: DEFAULT_STORY_FALLBACK_MIN_CHARS,
        }
    }
}

impl GeneratorConfig {
    /// Focused preset: lower temperatures for more literal output
    pub fn focused() -> Self {
        Self {
            quiz_temperature: 0.3,
            notes_temperature: 0.3,
            mnemonics_temperature: 0.5,
            story_temperature: 0.6,
            ..Self::default()
        }
    }

    /// Creative preset: looser mnemonics and stories
    pub fn creative() -> Self {
        Self {
            mnemonics_temperature: 0.9,
            story_temperature: 1.0,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
