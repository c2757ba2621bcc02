//! Parley CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive conversation (typed lines or a script)
//! - `ask`      — Answer a single utterance
//! - `onboard`  — Create config and a sample knowledge file
//! - `doctor`   — Diagnose config and knowledge source
//! - `config`   — Validate, show, or locate the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley — a small rule-based conversational responder",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively
    Chat {
        /// Knowledge CSV to use instead of the configured one
        #[arg(short, long, env = "PARLEY_KNOWLEDGE")]
        knowledge: Option<PathBuf>,

        /// Replay utterances from a file (one per line) instead of reading stdin
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Write the transcript as JSON when the conversation ends
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },

    /// Answer a single utterance and exit
    Ask {
        /// The utterance
        message: String,

        /// Knowledge CSV to use instead of the configured one
        #[arg(short, long, env = "PARLEY_KNOWLEDGE")]
        knowledge: Option<PathBuf>,
    },

    /// Initialize configuration and a sample knowledge file
    Onboard,

    /// Diagnose configuration and knowledge source
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the config file
    Validate,
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat {
            knowledge,
            script,
            transcript,
        } => commands::chat::run(knowledge, script, transcript).await?,
        Commands::Ask { message, knowledge } => commands::ask::run(message, knowledge).await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
