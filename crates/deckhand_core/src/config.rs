//! Layered TOML configuration.
//!
//! Sources, later ones overriding earlier ones key by key:
//! 1. Bundled defaults (`deckhand.toml` compiled into the binary)
//! 2. `~/.config/deckhand/deckhand.toml`
//! 3. `./deckhand.toml`
//!
//! Credentials are never read from these files; providers read them from the
//! environment.

use config::{Config, File, FileFormat};
use deckhand_error::{ConfigError, DeckhandError, DeckhandResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Text provider settings for the topic and outline requests.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum output tokens per request
    pub max_tokens: u32,
    /// Extended-output opt-in sent as the `anthropic-beta` header on outline requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20240620".to_string(),
            temperature: 0.8,
            max_tokens: 8000,
            beta: Some("max-tokens-3-5-sonnet-2024-07-15".to_string()),
        }
    }
}

/// Which image provider renders slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    /// OpenAI image generations endpoint
    #[display("openai")]
    OpenAi,
    /// Stability AI stable-image ultra endpoint
    #[display("stability")]
    Stability,
}

/// How OpenAI should return generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    /// Short-lived hosted URL
    Url,
    /// Base64 image data inline in the JSON body
    B64Json,
}

/// Image provider settings, rate-limit backoff and fan-out admission.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Provider selection
    pub provider: ImageProviderKind,
    /// Model identifier
    pub model: String,
    /// Requested image size
    pub size: String,
    /// Response format (OpenAI only)
    pub response_format: ImageResponseFormat,
    /// Wait used when a 429 carries no reset hint
    pub default_reset_secs: u64,
    /// Upper bound of the random jitter added to each rate-limit wait
    pub max_jitter_ms: u64,
    /// Cap on rate-limit retries per image; absent means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_retries: Option<u32>,
    /// Maximum image requests in flight at once
    pub max_concurrent: usize,
    /// Optional local quota on image requests per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_minute: Option<u32>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProviderKind::OpenAi,
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            response_format: ImageResponseFormat::Url,
            default_reset_secs: 60,
            max_jitter_ms: 1000,
            max_rate_limit_retries: None,
            max_concurrent: 4,
            requests_per_minute: None,
        }
    }
}

/// Deck shape and run-level limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Slides requested from the model
    pub total_slides: usize,
    /// Slides allowed to carry overlaid text
    pub max_text_slides: usize,
    /// Title slides accepted in an outline
    pub max_title_slides: usize,
    /// Ask for an opening title slide with a made-up presenter
    pub opening_title_slide: bool,
    /// Subjects the model is asked to avoid
    pub avoid_subjects: Vec<String>,
    /// Deadline for the topic, outline and image stages; absent means no deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            total_slides: 10,
            max_text_slides: 3,
            max_title_slides: 3,
            opening_title_slide: false,
            avoid_subjects: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// Where topics come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSourceKind {
    /// Ask the text provider
    Llm,
    /// Draw from a pre-seeded topics file
    Pool,
}

/// Topic source settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TopicConfig {
    /// Strategy
    pub source: TopicSourceKind,
    /// Newline-separated topics file used by the pool strategy
    pub pool_path: PathBuf,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            source: TopicSourceKind::Llm,
            pool_path: PathBuf::from("topics.txt"),
        }
    }
}

/// Artifact storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one subdirectory per generation
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public/logs"),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Top-level Deckhand configuration.
///
/// # Example
///
/// ```no_run
/// use deckhand_core::DeckhandConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DeckhandConfig::load()?;
/// println!("Image provider: {}", config.image.provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DeckhandConfig {
    /// Text provider settings
    #[serde(default)]
    pub text: TextConfig,
    /// Image provider settings
    #[serde(default)]
    pub image: ImageConfig,
    /// Deck shape and run limits
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Topic source
    #[serde(default)]
    pub topic: TopicConfig,
    /// Artifact storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
}

impl DeckhandConfig {
    /// Load configuration from one file, with struct defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DeckhandResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                DeckhandError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DeckhandError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    #[instrument]
    pub fn load() -> DeckhandResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../deckhand.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/deckhand/deckhand.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("deckhand").required(false));

        builder
            .build()
            .map_err(|e| {
                DeckhandError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DeckhandError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
