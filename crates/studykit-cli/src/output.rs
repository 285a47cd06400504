//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::{json, Value};
use studykit_domain::{Artifact, QuizResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Column width for quiz tables
const QUIZ_COLUMN_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a generated study aid.
    ///
    /// Quiz answers are only included when `show_answers` is set.
    pub fn format_artifact(&self, artifact: &Artifact, show_answers: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&artifact_json(artifact, show_answers))?),
            OutputFormat::Text => Ok(self.format_artifact_text(artifact, show_answers)),
        }
    }

    /// Format extracted document text.
    pub fn format_extracted(&self, file: &str, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "file": file,
                "characters": text.chars().count(),
                "text": text,
            }))?),
            OutputFormat::Text => Ok(text.to_string()),
        }
    }

    fn format_artifact_text(&self, artifact: &Artifact, show_answers: bool) -> String {
        match artifact {
            Artifact::Quiz(quiz) => self.format_quiz_table(quiz, show_answers),
            Artifact::Notes(notes) => {
                let mut out = self.colorize(notes.summary(), "cyan");
                for bullet in notes.bullets() {
                    out.push('\n');
                    out.push_str(bullet);
                }
                out
            }
            Artifact::Mnemonics(mnemonics) => {
                if mnemonics.is_empty() {
                    return self.colorize("No mnemonics generated.", "yellow");
                }
                mnemonics.as_slice().join("\n\n")
            }
            Artifact::Story(story) => {
                if story.is_empty() {
                    return self.colorize("No story generated.", "yellow");
                }
                story.as_str().to_string()
            }
        }
    }

    /// Format a quiz as a table.
    fn format_quiz_table(&self, quiz: &QuizResult, show_answers: bool) -> String {
        let mut builder = Builder::default();
        if show_answers {
            builder.push_record(["#", "Question", "Answer"]);
        } else {
            builder.push_record(["#", "Question"]);
        }

        for (index, (question, answer)) in quiz.pairs().enumerate() {
            let number = (index + 1).to_string();
            if show_answers {
                builder.push_record([number.as_str(), question, answer]);
            } else {
                builder.push_record([number.as_str(), question]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(QUIZ_COLUMN_WIDTH)))
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON representation of a study aid.
pub fn artifact_json(artifact: &Artifact, show_answers: bool) -> Value {
    let kind = artifact.kind().as_str();
    match artifact {
        Artifact::Quiz(quiz) if show_answers => json!({
            "kind": kind,
            "questions": quiz.questions(),
            "answers": quiz.answers(),
        }),
        Artifact::Quiz(quiz) => json!({
            "kind": kind,
            "questions": quiz.questions(),
        }),
        Artifact::Notes(notes) => json!({
            "kind": kind,
            "summary": notes.summary(),
            "bullets": notes.bullets(),
        }),
        Artifact::Mnemonics(mnemonics) => json!({
            "kind": kind,
            "mnemonics": mnemonics.as_slice(),
        }),
        Artifact::Story(story) => json!({
            "kind": kind,
            "story": story.as_str(),
        }),
    }
}

/// Plain-text rendering used for saved files; quizzes include their answer key.
pub fn render_plain(artifact: &Artifact) -> String {
    match artifact {
        Artifact::Quiz(quiz) => format!(
            "Questions:\n{}\n\nAnswers:\n{}\n",
            quiz.questions().join("\n"),
            quiz.answers().join("\n")
        ),
        Artifact::Notes(notes) => format!("{}\n", notes.as_slice().join("\n\n")),
        Artifact::Mnemonics(mnemonics) => format!("{}\n", mnemonics.as_slice().join("\n\n")),
        Artifact::Story(story) => format!("{}\n", story.as_str()),
    }
}
