//! Filesystem-backed artifact store.

use crate::{GenerationKey, Manifest, StoredSlide};
use chrono::{DateTime, Utc};
use deckhand_core::{CatalogEntry, CompletedGeneration, StoredLocation};
use deckhand_error::{DeckhandResult, StorageError, StorageErrorKind};
use deckhand_interface::ArtifactStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const TOPIC_FILE: &str = "topic.txt";
const MANIFEST_FILE: &str = "slides.json";
const MANIFEST_TEMP_FILE: &str = "slides.json.tmp";
const IMAGES_DIR: &str = "images";

/// Stores each generation in its own directory under a root.
///
/// # Example
///
/// ```no_run
/// use deckhand_interface::ArtifactStore;
/// use deckhand_storage::FileSystemArtifactStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileSystemArtifactStore::new("public/logs");
/// for entry in store.list_all().await? {
///     println!("{} {}", entry.date(), entry.topic());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemArtifactStore {
    root: PathBuf,
}

impl FileSystemArtifactStore {
    /// Store generations under `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a generation as if it completed at `date`.
    #[instrument(skip(self, generation), fields(topic = %generation.topic, root = %self.root.display()))]
    pub async fn persist_at(
        &self,
        generation: &CompletedGeneration,
        date: DateTime<Utc>,
    ) -> DeckhandResult<StoredLocation> {
        let missing = generation.images.missing_for(&generation.outline);
        if !missing.is_empty() {
            return Err(StorageError::new(StorageErrorKind::IncompleteGeneration(format!(
                "no image for slides {:?}",
                missing
            )))
            .into());
        }

        let key = GenerationKey::new(date, &generation.topic);
        let dir = self.root.join(key.as_str());

        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.root.display(),
                e
            )))
        })?;

        tokio::fs::create_dir(&dir).await.map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StorageError::new(StorageErrorKind::AlreadyExists(key.as_str().to_string()))
            } else {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            }
        })?;

        match self.write_generation(generation, &key, &dir).await {
            Ok(location) => {
                info!(id = %location.id(), images = location.image_paths().len(), "Stored generation");
                Ok(location)
            }
            Err(e) => {
                warn!(error = %e, dir = %dir.display(), "Failed to store generation, removing partial directory");
                if let Err(cleanup) = tokio::fs::remove_dir_all(&dir).await {
                    warn!(error = %cleanup, "Failed to remove partial generation directory");
                }
                Err(e)
            }
        }
    }

    async fn write_generation(
        &self,
        generation: &CompletedGeneration,
        key: &GenerationKey,
        dir: &Path,
    ) -> DeckhandResult<StoredLocation> {
        write_file(&dir.join(TOPIC_FILE), generation.topic.as_bytes()).await?;

        let images_dir = dir.join(IMAGES_DIR);
        tokio::fs::create_dir(&images_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                images_dir.display(),
                e
            )))
        })?;

        let mut slides = Vec::with_capacity(generation.outline.slides.len());
        let mut image_paths = Vec::new();

        for (index, slide) in generation.outline.slides.iter().enumerate() {
            let path = match slide.as_image() {
                Some(_) => {
                    let image = generation.images.get(index).ok_or_else(|| {
                        StorageError::new(StorageErrorKind::IncompleteGeneration(format!(
                            "no image for slide {}",
                            index
                        )))
                    })?;
                    let file_name = format!("image_{}.{}", index, image.extension());
                    write_file(&images_dir.join(&file_name), &image.data).await?;
                    debug!(slide = index, file = %file_name, size = image.data.len(), "Wrote image");

                    let relative = format!("{}/{}/{}", key.as_str(), IMAGES_DIR, file_name);
                    image_paths.push(relative.clone());
                    Some(relative)
                }
                None => None,
            };

            if let Some(stored) = StoredSlide::from_slide(slide, path) {
                slides.push(stored);
            }
        }

        let manifest = Manifest {
            topic: generation.topic.clone(),
            title: generation.outline.title.clone(),
            presenter: generation.outline.presenter.clone(),
            slides,
        };
        let encoded = serde_json::to_vec_pretty(&manifest).map_err(|e| {
            StorageError::new(StorageErrorKind::Manifest(format!(
                "Failed to encode manifest: {}",
                e
            )))
        })?;

        let temp_path = dir.join(MANIFEST_TEMP_FILE);
        let manifest_path = dir.join(MANIFEST_FILE);
        write_file(&temp_path, &encoded).await?;
        tokio::fs::rename(&temp_path, &manifest_path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "rename {} to {}: {}",
                    temp_path.display(),
                    manifest_path.display(),
                    e
                )))
            })?;

        Ok(StoredLocation::new(key.as_str(), dir, image_paths))
    }

    async fn read_entry(&self, name: &str, dir: &Path) -> DeckhandResult<Option<CatalogEntry>> {
        let Some(key) = GenerationKey::parse(name) else {
            warn!(dir = %name, "Skipping directory with unrecognized name");
            return Ok(None);
        };

        let manifest_path = dir.join(MANIFEST_FILE);
        let raw = match tokio::fs::read(&manifest_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %name, "Skipping directory without manifest");
                return Ok(None);
            }
            Err(e) => {
                warn!(dir = %name, error = %e, "Skipping directory with unreadable manifest");
                return Ok(None);
            }
        };

        let manifest: Manifest = match serde_json::from_slice(&raw) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(dir = %name, error = %e, "Skipping directory with unparseable manifest");
                return Ok(None);
            }
        };

        let topic = match tokio::fs::read_to_string(dir.join(TOPIC_FILE)).await {
            Ok(topic) if !topic.trim().is_empty() => topic.trim().to_string(),
            _ if !manifest.topic.is_empty() => manifest.topic.clone(),
            _ => key.slug().to_string(),
        };

        Ok(Some(CatalogEntry::new(
            name,
            key.date(),
            topic,
            manifest.title.clone(),
            manifest.presenter.clone(),
            manifest.image_paths(),
        )))
    }
}

async fn write_file(path: &Path, data: &[u8]) -> DeckhandResult<()> {
    tokio::fs::write(path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}

#[async_trait::async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    async fn persist(&self, generation: &CompletedGeneration) -> DeckhandResult<StoredLocation> {
        self.persist_at(generation, Utc::now()).await
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn list_all(&self) -> DeckhandResult<Vec<CatalogEntry>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Storage root does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.root.display(),
                    e
                )))
                .into());
            }
        };

        let mut catalog = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.root.display(),
                    e
                )))
            })?;
            let Some(entry) = entry else { break };

            let is_dir = entry
                .file_type()
                .await
                .map(|kind| kind.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(item) = self.read_entry(&name, &entry.path()).await? {
                catalog.push(item);
            }
        }

        catalog.sort_by(|a, b| b.date().cmp(a.date()).then_with(|| a.topic().cmp(b.topic())));

        debug!(count = catalog.len(), "Listed generations");
        Ok(catalog)
    }
}
