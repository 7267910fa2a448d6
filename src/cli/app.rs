//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::logging::{self, LogSink};
use super::output::{Output, OutputFormat};
use super::{replay, tui, validate};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "projboard")]
#[command(author, version, about = "Terminal project board with drag-and-drop between lists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "PROJBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board (default)
    Tui,

    /// Check project form input without creating anything
    Validate {
        /// Project title
        #[arg(long, default_value = "")]
        title: String,

        /// Project description
        #[arg(long, default_value = "")]
        description: String,

        /// Number of people assigned
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        people: String,
    },

    /// Apply a JSONL script of create/move operations and print the lists
    Replay {
        /// Script file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("projboard starting");

    let config = Config::load(cli.config.as_deref())?;
    output.verbose_ctx("config", &format!("Loaded config: {:?}", config));

    let command = cli.command.unwrap_or(Commands::Tui);

    match command {
        Commands::Tui => {
            match config.log_path() {
                Some(path) => {
                    output.verbose_ctx("log", &format!("Logging to {}", path.display()));
                    logging::init(&config.log_level, LogSink::File(&path))?;
                }
                None => logging::init(&config.log_level, LogSink::Off)?,
            }
            tui::run(&output, &config)?
        }

        Commands::Validate {
            title,
            description,
            people,
        } => {
            init_cli_logging(&output, &config)?;
            validate::run(&output, &config.validation, &title, &description, &people)?
        }

        Commands::Replay { file } => {
            init_cli_logging(&output, &config)?;
            replay::run(&output, file.as_deref(), &config.validation)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Non-interactive commands log to stderr, and only in verbose mode
fn init_cli_logging(output: &Output, config: &Config) -> Result<()> {
    let sink = if output.is_verbose() {
        LogSink::Stderr
    } else {
        LogSink::Off
    };
    logging::init(&config.log_level, sink)
}
