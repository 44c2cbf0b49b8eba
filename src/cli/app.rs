//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{replay, tui};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "An in-memory shopping list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, global = true, env = "SHOPPING_LIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive shopping list (default)
    Tui,

    /// Apply recorded actions to an empty list and print the result
    Replay {
        /// JSON Lines file with one action per line, or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Shopping list starting");
    output.verbose_ctx("config", &format!("{:?}", config));

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run(&output, &config)?,
        Commands::Replay { input } => {
            output.verbose_ctx("replay", &format!("Reading actions from: {}", input));
            replay::run(&output, &input)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
