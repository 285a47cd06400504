//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use studykit_domain::WordList;

/// Studykit - Turn lecture material into quizzes, notes, mnemonics and stories.
#[derive(Debug, Parser)]
#[command(name = "studykit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STUDYKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the plain text extracted from a document
    Extract(ExtractArgs),

    /// Generate a quiz from a document
    Quiz(QuizArgs),

    /// Generate study notes from a document or direct text
    Notes(NotesArgs),

    /// Generate one mnemonic per word
    Mnemonics(WordsArgs),

    /// Generate a short story that uses every word
    Story(WordsArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Document to read (.txt, .pdf, .docx, .pptx)
    pub file: PathBuf,
}

/// Arguments for the quiz command.
#[derive(Debug, Parser)]
pub struct QuizArgs {
    /// Document to build the quiz from
    pub file: PathBuf,

    /// Print the answer key after the questions
    #[arg(short, long)]
    pub answers: bool,

    /// Save the result under the output directory
    #[arg(short, long)]
    pub save: bool,
}

/// Arguments for the notes command.
#[derive(Debug, Parser)]
pub struct NotesArgs {
    /// Document to summarize
    #[arg(required_unless_present = "text")]
    pub file: Option<PathBuf>,

    /// Summarize this text instead of a document
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Save the result under the output directory
    #[arg(short, long)]
    pub save: bool,
}

/// Arguments for the word-driven commands.
#[derive(Debug, Parser)]
pub struct WordsArgs {
    /// Words, as separate arguments and/or comma-separated
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Save the result under the output directory
    #[arg(short, long)]
    pub save: bool,
}

impl WordsArgs {
    /// The words as a trimmed list, splitting on commas
    pub fn word_list(&self) -> WordList {
        WordList::new(self.words.iter().flat_map(|arg| arg.split(',')))
    }
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Base URL of an OpenAI-compatible API
        #[arg(short, long)]
        url: String,
        /// Model identifier
        #[arg(short, long)]
        model: String,
        /// Environment variable holding the API key
        #[arg(short = 'k', long)]
        api_key_env: Option<String>,
        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["studykit"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_quiz_command() {
        let cli = Cli::try_parse_from(["studykit", "quiz", "week1.pptx", "--answers", "-vv"]).unwrap();
        match cli.command {
            Some(Command::Quiz(args)) => {
                assert_eq!(args.file, PathBuf::from("week1.pptx"));
                assert!(args.answers);
                assert!(!args.save);
            }
            _ => panic!("Expected Quiz command"),
        }
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_notes_needs_file_or_text() {
        assert!(Cli::try_parse_from(["studykit", "notes"]).is_err());
        assert!(Cli::try_parse_from(["studykit", "notes", "a.txt", "--text", "x"]).is_err());

        let cli = Cli::try_parse_from(["studykit", "notes", "--text", "Cells divide."]).unwrap();
        match cli.command {
            Some(Command::Notes(args)) => assert_eq!(args.text.as_deref(), Some("Cells divide.")),
            _ => panic!("Expected Notes command"),
        }
    }

    #[test]
    fn test_words_split_on_commas() {
        let cli = Cli::try_parse_from(["studykit", "story", "moon,tide", "harbour", "--save"]).unwrap();
        match cli.command {
            Some(Command::Story(args)) => {
                assert!(args.save);
                assert_eq!(args.word_list().as_slice(), ["moon", "tide", "harbour"]);
            }
            _ => panic!("Expected Story command"),
        }
    }

    #[test]
    fn test_words_are_required() {
        assert!(Cli::try_parse_from(["studykit", "mnemonics"]).is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::try_parse_from(["studykit", "extract", "notes.txt", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
