//! Studykit CLI - Turn lecture material into study aids from the command line.

use clap::Parser;
use studykit_cli::commands;
use studykit_cli::repl;
use studykit_cli::{Cli, Command, Config, Formatter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        if let Some(raw) = e.raw_reply() {
            debug!("Raw model reply:\n{}", raw);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> studykit_cli::Result<()> {
    // Load config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter)?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(Command::Extract(args)) => {
            println!("{}", commands::execute_extract(&args, &formatter)?);
        }
        Some(cmd) => {
            // Commands that need a model
            let generator = commands::build_generator(&config)?;
            let settings = &config.settings;

            let (generated, show_answers) = match cmd {
                Command::Quiz(args) => (commands::execute_quiz(&args, &generator, settings)?, args.answers),
                Command::Notes(args) => (commands::execute_notes(&args, &generator, settings)?, false),
                Command::Mnemonics(args) => (commands::execute_mnemonics(&args, &generator, settings)?, false),
                Command::Story(args) => (commands::execute_story(&args, &generator, settings)?, false),
                _ => unreachable!(),
            };

            println!("{}", formatter.format_artifact(&generated.artifact, show_answers)?);
            if let Some(path) = generated.saved_to {
                eprintln!("{}", formatter.success(&format!("Saved to {}", path.display())));
            }
        }
    }

    Ok(())
}
