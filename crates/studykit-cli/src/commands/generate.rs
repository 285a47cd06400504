//! Quiz, notes, mnemonics and story command implementations.

use crate::cli::{NotesArgs, QuizArgs, WordsArgs};
use crate::config::{Config, Settings};
use crate::error::{CliError, Result};
use crate::output::render_plain;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use studykit_domain::traits::LlmProvider;
use studykit_domain::Artifact;
use studykit_generator::Generator;
use studykit_llm::OpenRouterProvider;
use tracing::{debug, info};

/// A generated study aid and where it came from.
#[derive(Debug)]
pub struct Generated {
    /// The validated result
    pub artifact: Artifact,
    /// Short description of the input (file name, or "text"/"words")
    pub source: String,
    /// File the result was saved to
    pub saved_to: Option<PathBuf>,
}

/// Build a generator for the active profile.
///
/// The API key is read from the environment variable named by the profile.
pub fn build_generator(config: &Config) -> Result<Generator<OpenRouterProvider>> {
    let profile = config.get_active_profile()?;
    debug!("Using model {} at {}", profile.model, profile.base_url);

    let llm = OpenRouterProvider::from_env(
        profile.base_url.as_str(),
        profile.model.as_str(),
        &profile.api_key_env,
        Duration::from_secs(profile.timeout_secs),
    )?
    .with_max_attempts(profile.max_attempts);

    Ok(Generator::with_config(llm, config.settings.generator.clone())?)
}

/// Execute the quiz command.
pub fn execute_quiz<L>(args: &QuizArgs, generator: &Generator<L>, settings: &Settings) -> Result<Generated>
where
    L: LlmProvider,
    L::Error: Display,
{
    let text = read_document(&args.file)?;
    let quiz = generator.generate_quiz(&text)?;
    finish(Artifact::Quiz(quiz), file_label(&args.file), args.save, settings)
}

/// Execute the notes command, from a document or direct text.
pub fn execute_notes<L>(args: &NotesArgs, generator: &Generator<L>, settings: &Settings) -> Result<Generated>
where
    L: LlmProvider,
    L::Error: Display,
{
    let (text, source) = match (&args.text, &args.file) {
        (Some(text), _) => (text.clone(), "text".to_string()),
        (None, Some(file)) => (read_document(file)?, file_label(file)),
        (None, None) => {
            return Err(CliError::InvalidInput("notes needs a file or --text".to_string()));
        }
    };

    let notes = generator.generate_notes(&text)?;
    finish(Artifact::Notes(notes), source, args.save, settings)
}

/// Execute the mnemonics command.
pub fn execute_mnemonics<L>(args: &WordsArgs, generator: &Generator<L>, settings: &Settings) -> Result<Generated>
where
    L: LlmProvider,
    L::Error: Display,
{
    let words = args.word_list();
    let mnemonics = generator.generate_mnemonics(&words)?;
    finish(Artifact::Mnemonics(mnemonics), words.joined(), args.save, settings)
}

/// Execute the story command.
pub fn execute_story<L>(args: &WordsArgs, generator: &Generator<L>, settings: &Settings) -> Result<Generated>
where
    L: LlmProvider,
    L::Error: Display,
{
    let words = args.word_list();
    let story = generator.generate_story(&words)?;
    finish(Artifact::Story(story), words.joined(), args.save, settings)
}

/// Write `artifact` as plain text to `<dir>/<kind>_<unix-seconds>.txt`.
pub fn save_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = dir.join(format!("{}_{}.txt", artifact.kind(), timestamp));

    fs::write(&path, render_plain(artifact))?;
    info!("Saved {} to {}", artifact.kind(), path.display());
    Ok(path)
}

fn finish(artifact: Artifact, source: String, save: bool, settings: &Settings) -> Result<Generated> {
    let saved_to = if save {
        Some(save_artifact(&settings.output_dir, &artifact)?)
    } else {
        None
    };

    Ok(Generated {
        artifact,
        source,
        saved_to,
    })
}

fn read_document(path: &Path) -> Result<String> {
    let text = studykit_document::extract_text(path)?;
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no extractable text",
            path.display()
        )));
    }
    info!("Read {} chars from {}", text.len(), path.display());
    Ok(text)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
