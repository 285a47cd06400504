//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{Command, ExtractArgs, NotesArgs, ProfileAction, ProfileArgs, QuizArgs, WordsArgs};
use crate::commands::{self, Generated};
use crate::config::{studykit_dir, Config};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;
use studykit_domain::traits::LlmProvider;
use studykit_domain::{Artifact, ArtifactKind};
use studykit_generator::Generator;
use studykit_llm::OpenRouterProvider;

/// Run the interactive REPL.
pub fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Studykit REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let mut session = Session::without_generator(config.settings.history_size);
    load_generator(&mut session, config, formatter);

    // Initialize readline editor
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("studykit> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        let active_profile = config.active_profile.clone();
                        match session.execute(cmd, config, formatter) {
                            Ok(Some(output)) => println!("{}", output),
                            Ok(None) => {}
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                        if config.active_profile != active_profile {
                            load_generator(&mut session, config, formatter);
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// Build the active profile's generator, or leave the session without one.
///
/// Commands that need no model keep working when this fails.
fn load_generator(session: &mut Session<OpenRouterProvider>, config: &Config, formatter: &Formatter) {
    match commands::build_generator(config) {
        Ok(generator) => session.set_generator(Some(generator)),
        Err(e) => {
            session.set_generator(None);
            eprintln!(
                "{}",
                formatter.warning(&format!("{}; quiz, notes, mnemonics and story are unavailable", e))
            );
        }
    }
}

/// REPL command type.
#[derive(Debug)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// List study aids generated in this session
    History,
    /// Forget this session's study aids
    ClearHistory,
    /// Show a history entry again (1-based)
    Show(usize),
    /// Show the answer key of the most recent quiz
    Answers,
    /// Save the most recent study aid
    Save,
    /// Run a regular CLI command
    Run(Command),
}

/// One study aid generated during the session.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The study aid
    pub artifact: Artifact,
    /// Where its input came from
    pub source: String,
}

impl HistoryEntry {
    /// Label shown in the history list, e.g. `Quiz - week1.pptx`.
    pub fn label(&self) -> String {
        format!("{} - {}", kind_title(self.artifact.kind()), self.source)
    }
}

/// REPL state: the generator, if one could be built, and an in-memory history of results.
pub struct Session<L> {
    generator: Option<Generator<L>>,
    history: Vec<HistoryEntry>,
    history_limit: usize,
}

impl<L> Session<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a session keeping at most `history_limit` results.
    pub fn new(generator: Generator<L>, history_limit: usize) -> Self {
        let mut session = Self::without_generator(history_limit);
        session.generator = Some(generator);
        session
    }

    /// Create a session that can only run commands needing no model.
    pub fn without_generator(history_limit: usize) -> Self {
        Self {
            generator: None,
            history: Vec::new(),
            history_limit: history_limit.max(1),
        }
    }

    /// Use a different generator from now on (after a profile switch).
    pub fn set_generator(&mut self, generator: Option<Generator<L>>) {
        self.generator = generator;
    }

    /// Whether generation commands can run.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    fn generator(&self) -> Result<&Generator<L>> {
        self.generator.as_ref().ok_or_else(|| {
            CliError::Config(
                "No model available for the active profile; run 'profile show' to check its API key variable"
                    .to_string(),
            )
        })
    }

    /// Results generated so far, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Execute one command, returning text to print.
    pub fn execute(&mut self, cmd: ReplCommand, config: &mut Config, formatter: &Formatter) -> Result<Option<String>> {
        match cmd {
            ReplCommand::Exit | ReplCommand::Help => Ok(None),
            ReplCommand::History => Ok(Some(self.format_history(formatter))),
            ReplCommand::ClearHistory => {
                self.history.clear();
                Ok(Some(formatter.success("History cleared")))
            }
            ReplCommand::Show(index) => {
                let entry = index
                    .checked_sub(1)
                    .and_then(|i| self.history.get(i))
                    .ok_or_else(|| CliError::InvalidInput(format!("No history entry {}", index)))?;
                formatter.format_artifact(&entry.artifact, false).map(Some)
            }
            ReplCommand::Answers => {
                let quiz = self
                    .history
                    .iter()
                    .rev()
                    .find(|entry| entry.artifact.kind() == ArtifactKind::Quiz)
                    .ok_or_else(|| CliError::InvalidInput("No quiz generated yet".to_string()))?;
                formatter.format_artifact(&quiz.artifact, true).map(Some)
            }
            ReplCommand::Save => {
                let entry = self
                    .history
                    .last()
                    .ok_or_else(|| CliError::InvalidInput("Nothing to save yet".to_string()))?;
                let path = commands::save_artifact(&config.settings.output_dir, &entry.artifact)?;
                Ok(Some(formatter.success(&format!("Saved to {}", path.display()))))
            }
            ReplCommand::Run(command) => self.run(command, config, formatter),
        }
    }

    fn run(&mut self, command: Command, config: &mut Config, formatter: &Formatter) -> Result<Option<String>> {
        let generated = match command {
            Command::Extract(args) => return commands::execute_extract(&args, formatter).map(Some),
            Command::Profile(args) => {
                commands::execute_profile(args, config, formatter)?;
                return Ok(None);
            }
            Command::Repl => {
                return Err(CliError::InvalidInput("Already in the REPL".to_string()));
            }
            Command::Quiz(args) => commands::execute_quiz(&args, self.generator()?, &config.settings)?,
            Command::Notes(args) => commands::execute_notes(&args, self.generator()?, &config.settings)?,
            Command::Mnemonics(args) => commands::execute_mnemonics(&args, self.generator()?, &config.settings)?,
            Command::Story(args) => commands::execute_story(&args, self.generator()?, &config.settings)?,
        };

        let output = formatter.format_artifact(&generated.artifact, false)?;
        self.remember(generated);
        Ok(Some(output))
    }

    fn remember(&mut self, generated: Generated) {
        if self.history.len() >= self.history_limit {
            self.history.remove(0);
        }
        self.history.push(HistoryEntry {
            artifact: generated.artifact,
            source: generated.source,
        });
    }

    fn format_history(&self, formatter: &Formatter) -> String {
        if self.history.is_empty() {
            return formatter.info("History is empty");
        }
        self.history
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a REPL command line.
///
/// Everything after the command word is one argument, so file paths may
/// contain spaces and word lists are comma-separated.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "history" => Ok(ReplCommand::History),
        "clear-history" => Ok(ReplCommand::ClearHistory),
        "answers" => Ok(ReplCommand::Answers),
        "save" => Ok(ReplCommand::Save),
        "show" => rest
            .parse()
            .map(ReplCommand::Show)
            .map_err(|_| CliError::InvalidInput("Usage: show <number>".to_string())),
        "extract" => Ok(ReplCommand::Run(Command::Extract(ExtractArgs {
            file: require(rest, "extract <file>")?.into(),
        }))),
        "quiz" => Ok(ReplCommand::Run(Command::Quiz(QuizArgs {
            file: require(rest, "quiz <file>")?.into(),
            answers: false,
            save: false,
        }))),
        "notes" => Ok(ReplCommand::Run(Command::Notes(NotesArgs {
            file: Some(require(rest, "notes <file>")?.into()),
            text: None,
            save: false,
        }))),
        "notes-text" => Ok(ReplCommand::Run(Command::Notes(NotesArgs {
            file: None,
            text: Some(require(rest, "notes-text <text>")?.to_string()),
            save: false,
        }))),
        "mnemonics" => Ok(ReplCommand::Run(Command::Mnemonics(words_args(rest, "mnemonics")?))),
        "story" => Ok(ReplCommand::Run(Command::Story(words_args(rest, "story")?))),
        "profile" => parse_profile_command(rest),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        ))),
    }
}

fn require<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        return Err(CliError::InvalidInput(format!("Usage: {}", usage)));
    }
    Ok(rest)
}

fn words_args(rest: &str, command: &str) -> Result<WordsArgs> {
    let words = require(rest, &format!("{} <word>, <word>, ...", command))?;
    Ok(WordsArgs {
        words: vec![words.to_string()],
        save: false,
    })
}

fn parse_profile_command(rest: &str) -> Result<ReplCommand> {
    let args: Vec<&str> = rest.split_whitespace().collect();

    let action = match args.first() {
        None | Some(&"show") => ProfileAction::Show,
        Some(&"list") => ProfileAction::List,
        Some(&"switch") => {
            let name = args
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: profile switch <name>".to_string()))?;
            ProfileAction::Switch {
                name: name.to_string(),
            }
        }
        Some(other) => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", other))),
    };

    Ok(ReplCommand::Run(Command::Profile(ProfileArgs { action })))
}

fn kind_title(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Quiz => "Quiz",
        ArtifactKind::Notes => "Notes",
        ArtifactKind::Mnemonics => "Mnemonics",
        ArtifactKind::Story => "Story",
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = studykit_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  quiz <file>                    - Generate a quiz from a document");
    println!("  answers                        - Show the answer key of the last quiz");
    println!("  notes <file>                   - Generate study notes from a document");
    println!("  notes-text <text>              - Generate study notes from typed text");
    println!("  mnemonics <w1>, <w2>, ...      - One mnemonic per word");
    println!("  story <w1>, <w2>, ...          - A short story using every word");
    println!("  extract <file>                 - Print a document's text");
    println!("  history                        - List results from this session");
    println!("  show <n>                       - Show history entry n again");
    println!("  save                           - Save the last result to the output directory");
    println!("  clear-history                  - Forget this session's results");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
