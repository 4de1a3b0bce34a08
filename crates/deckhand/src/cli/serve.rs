//! `deckhand serve`.

use deckhand::{AppState, DeckhandConfig, build_orchestrator, create_router, serve};
use tracing::info;

/// Wire the pipeline and serve the HTTP API until Ctrl-C.
pub async fn run_server(
    mut config: DeckhandConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let orchestrator = build_orchestrator(&config)?;
    let router = create_router(AppState::new(orchestrator), &config.storage.root);

    info!(
        host = %config.server.host,
        port = config.server.port,
        storage = %config.storage.root.display(),
        "Starting Deckhand server"
    );
    serve(&config.server, router).await?;

    info!("Server stopped");
    Ok(())
}
