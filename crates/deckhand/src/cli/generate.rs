//! `deckhand generate`.

use super::OutputFormat;
use deckhand::{DeckhandConfig, GenerationBody, JsonError, build_orchestrator};

/// Run the pipeline once and print the outcome.
///
/// A failed run is printed like a successful one and then returned as an
/// error, so the process exits non-zero.
pub async fn generate_once(config: &DeckhandConfig, format: OutputFormat) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let report = orchestrator.run().await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&GenerationBody::from(&report))
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!("{:-<80}", "");
            println!("Topic:  {}", report.topic.as_deref().unwrap_or("(none)"));
            println!("State:  {} (reached {})", report.state, report.reached);
            if let Some(location) = &report.location {
                println!("Stored: {}", location.path().display());
                for path in location.image_paths() {
                    println!("  {}", path);
                }
            } else {
                println!("Images: {} produced", report.images.len());
            }
            println!("{:-<80}", "");
        }
    }

    match report.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
