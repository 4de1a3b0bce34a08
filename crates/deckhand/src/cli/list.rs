//! `deckhand list`.

use super::OutputFormat;
use deckhand::{ArtifactStore, DeckhandConfig, FileSystemArtifactStore, JsonError};

/// Print the catalog of stored decks.
pub async fn list_presentations(config: &DeckhandConfig, format: OutputFormat) -> anyhow::Result<()> {
    let store = FileSystemArtifactStore::new(&config.storage.root);
    let entries = store.list_all().await?;

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&entries).map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!("Decks in {}:", config.storage.root.display());
            println!("{:-<80}", "");
            for entry in &entries {
                let title = entry
                    .title()
                    .as_ref()
                    .map(|title| title.content.as_str())
                    .unwrap_or("");
                println!(
                    "{}  {}  {} images  {}",
                    entry.date().format("%Y-%m-%d %H:%M:%S"),
                    entry.topic(),
                    entry.image_paths().len(),
                    title
                );
            }
            println!("{:-<80}", "");
            println!("Total: {} decks", entries.len());
        }
    }

    Ok(())
}
