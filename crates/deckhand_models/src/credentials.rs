//! API keys from the environment.

use deckhand_error::{DeckhandResult, ProviderError, ProviderErrorKind};
use tracing::debug;

/// First non-empty value among `names`, or `MissingApiKey` naming the first.
///
/// # Example
///
/// ```
/// use deckhand_models::api_key_from_env;
///
/// let err = api_key_from_env(&["DECKHAND_DOC_TEST_UNSET_KEY"]).unwrap_err();
/// assert!(format!("{}", err).contains("DECKHAND_DOC_TEST_UNSET_KEY"));
/// ```
pub fn api_key_from_env(names: &[&str]) -> DeckhandResult<String> {
    for name in names {
        if let Ok(value) = std::env::var(name) {
            if !value.trim().is_empty() {
                debug!(variable = name, "Found API key");
                return Ok(value);
            }
        }
    }

    let primary = names.first().copied().unwrap_or("API key");
    Err(ProviderError::new(ProviderErrorKind::MissingApiKey(primary.to_string())).into())
}
