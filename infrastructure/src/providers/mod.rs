//! Think backends
//!
//! [`resolve_capability`] turns the `[provider]` config section into the
//! immutable backend snapshot a session thinks through.

pub mod gemini;
pub mod kind;
pub mod openai_compatible;

pub use gemini::GeminiCapability;
pub use kind::ProviderKind;
pub use openai_compatible::OpenAiCompatibleCapability;

use crate::config::FileProviderConfig;
use armykit_application::{BoundCapability, ThinkError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors building a backend from otherwise valid configuration
#[derive(Debug, Error)]
pub enum ProviderSetupError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Build the backend described by `config`.
///
/// Returns `Ok(None)` when the provider is not usable as configured: a
/// remote provider without an API key, or Azure without an endpoint. The
/// session then ends with a configuration error.
pub fn resolve_capability(
    config: &FileProviderConfig,
) -> Result<Option<BoundCapability>, ProviderSetupError> {
    let kind = config.kind;

    let Some(api_key) = config.api_key() else {
        warn!("No API key found for provider {}", kind);
        return Ok(None);
    };
    let Some(base_url) = config.base_url() else {
        warn!("Provider {} requires base_url", kind);
        return Ok(None);
    };

    let timeout = Duration::from_secs(config.timeout_seconds);
    let model = config.model();
    info!("Using provider {} ({}) at {}", kind, model, base_url);

    let capability: BoundCapability = if kind.is_openai_compatible() {
        Arc::new(OpenAiCompatibleCapability::new(
            kind, base_url, api_key, model, timeout,
        )?)
    } else {
        Arc::new(GeminiCapability::new(base_url, api_key, model, timeout)?)
    };
    Ok(Some(capability))
}

/// Translate a transport-level `reqwest` failure.
pub(crate) fn map_transport_error(e: reqwest::Error) -> ThinkError {
    if e.is_timeout() {
        ThinkError::Timeout
    } else if e.is_connect() {
        ThinkError::ConnectionError(e.to_string())
    } else {
        ThinkError::RequestFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armykit_application::ThinkCapability;

    fn provider(kind: ProviderKind) -> FileProviderConfig {
        FileProviderConfig {
            kind,
            api_key_env: Some("ARMYKIT_UNSET_TEST_VAR".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_remote_without_key_is_unconfigured() {
        let capability = resolve_capability(&provider(ProviderKind::OpenAi)).unwrap();
        assert!(capability.is_none());
    }

    #[test]
    fn test_local_needs_no_key() {
        let capability = resolve_capability(&provider(ProviderKind::Gpt4All))
            .unwrap()
            .unwrap();
        assert_eq!(capability.name(), "gpt4all");
        assert_eq!(capability.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_azure_without_endpoint_is_unconfigured() {
        let config = FileProviderConfig {
            api_key: Some("key".to_string()),
            ..provider(ProviderKind::Azure)
        };
        assert!(resolve_capability(&config).unwrap().is_none());

        let config = FileProviderConfig {
            base_url: Some("https://example.openai.azure.com/openai".to_string()),
            ..config
        };
        let capability = resolve_capability(&config).unwrap().unwrap();
        assert_eq!(capability.name(), "azure");
        assert_eq!(capability.model(), "gpt-4");
    }

    #[test]
    fn test_google_uses_gemini_backend() {
        let config = FileProviderConfig {
            api_key: Some("key".to_string()),
            model: Some("gemini-pro".to_string()),
            ..provider(ProviderKind::Google)
        };
        let capability = resolve_capability(&config).unwrap().unwrap();
        assert_eq!(capability.name(), "google");
        assert_eq!(capability.model(), "gemini-pro");
    }
}
