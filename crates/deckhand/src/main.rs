//! Deckhand CLI binary.
//!
//! - `deckhand serve` runs the HTTP API
//! - `deckhand generate` runs the pipeline once
//! - `deckhand list` prints the catalog of stored decks

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, generate_once, list_presentations, run_server};

    // Credentials may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    deckhand::init_tracing(cli.verbose, cli.json_logs);

    let config = cli.load_config()?;

    match cli.command {
        Commands::Serve { host, port } => run_server(config, host, port).await?,
        Commands::Generate { format } => generate_once(&config, format).await?,
        Commands::List { format } => list_presentations(&config, format).await?,
    }

    Ok(())
}
