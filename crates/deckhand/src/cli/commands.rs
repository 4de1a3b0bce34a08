//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use deckhand::{DeckhandConfig, DeckhandResult};
use std::path::PathBuf;

/// Deckhand - improv slide decks from a language model and an image model
#[derive(Parser, Debug)]
#[command(name = "deckhand")]
#[command(about = "Generate improv slide decks and serve them over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Load this configuration file instead of the layered defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log one JSON object per line
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl Cli {
    /// The explicit `--config` file, or the layered configuration.
    pub fn load_config(&self) -> DeckhandResult<DeckhandConfig> {
        match &self.config {
            Some(path) => DeckhandConfig::from_file(path),
            None => DeckhandConfig::load(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Override `[server] host`
        #[arg(long)]
        host: Option<String>,

        /// Override `[server] port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate one deck and exit
    Generate {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List stored decks, newest first
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// How results are printed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Readable summary
    Human,
    /// Pretty JSON
    Json,
}
