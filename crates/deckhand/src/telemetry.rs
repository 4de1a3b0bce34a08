use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,deckhand=info,deckhand_pipeline=info,tower_http=info";

const VERBOSE_LOG_FILTER: &str = "info,deckhand=debug,deckhand_pipeline=debug,deckhand_models=debug,deckhand_storage=debug,deckhand_rate_limit=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over both built-in filters. `json` switches the fmt layer
/// to one JSON object per line.
pub fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}
