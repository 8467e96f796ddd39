//! wardrobectl - command-line front end for the wardrobe configurator.
//!
//! Loads a layout state file, runs free-text commands through the core
//! pipeline, and writes the result back. The LLM backend is opt-in via
//! the config file; without it, parsing is fully deterministic.

mod config;
mod llm;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use wardrobe_core::{run, IntentParser, LayoutState, Outcome};

#[derive(Parser)]
#[command(name = "wardrobectl")]
#[command(about = "Wardrobe configurator - natural-language layout editing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh default state file
    New {
        /// Path of the state file to create
        #[arg(long, default_value = "wardrobe.json")]
        state: PathBuf,
    },

    /// Pretty-print a state file
    Show {
        #[arg(long, default_value = "wardrobe.json")]
        state: PathBuf,
    },

    /// Parse a command and print the intent without applying it
    Parse {
        /// Command text, e.g. "add a door"
        command: String,
    },

    /// Run a command against a state file and write the result back
    Apply {
        #[arg(long, default_value = "wardrobe.json")]
        state: PathBuf,

        /// Command text, e.g. "make it 200cm wide"
        command: String,

        /// Print the new state instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::New { state } => cmd_new(&state),
        Commands::Show { state } => cmd_show(&state),
        Commands::Parse { command } => cmd_parse(&command),
        Commands::Apply {
            state,
            command,
            dry_run,
        } => cmd_apply(&state, &command, dry_run),
    }
}

/// Wire the parser from configuration: model-backed when enabled,
/// deterministic otherwise.
fn build_parser() -> Result<IntentParser> {
    let config = config::CtlConfig::load()?;
    if config.llm.enabled {
        let backend = llm::HttpTextBackend::new(config.llm)?;
        Ok(IntentParser::with_backend(Box::new(backend)))
    } else {
        Ok(IntentParser::deterministic())
    }
}

fn cmd_new(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    store::save(path, &LayoutState::new())?;
    println!("{} wrote {}", "✓".green().bold(), path.display());
    Ok(())
}

fn cmd_show(path: &Path) -> Result<()> {
    let state = store::load(path)?;
    println!("{}", state.to_json()?);
    Ok(())
}

fn cmd_parse(command: &str) -> Result<()> {
    let parser = build_parser()?;
    let intent = parser.parse(command);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}

fn cmd_apply(path: &Path, command: &str, dry_run: bool) -> Result<()> {
    let state = store::load(path)?;
    let parser = build_parser()?;
    tracing::info!("applying command against {}", path.display());

    match run(&parser, &state, command) {
        Outcome::NeedsClarification { message, .. } => {
            println!("{} {}", "?".yellow().bold(), message);
        }
        Outcome::Invalid { error, .. } => {
            println!("{} {}", "✗".red().bold(), error);
        }
        Outcome::Applied {
            intent,
            state: next,
        } => {
            if dry_run {
                println!("{}", next.to_json()?);
            } else {
                store::save(path, &next)?;
            }
            println!(
                "{} applied {} (confidence {:.2})",
                "✓".green().bold(),
                intent.action,
                intent.confidence
            );
        }
    }
    Ok(())
}
