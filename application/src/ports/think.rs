//! Think capability port
//!
//! Defines the interface for communicating with a text-generation backend.

use armykit_domain::AgentIdentity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during a backend invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThinkError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// A text-generation backend
///
/// Exactly one implementation is bound per session, resolved before the
/// session starts. Implementations (adapters) live in the infrastructure
/// layer. `generate` must be callable repeatedly and report every backend
/// failure through its `Result`.
#[async_trait]
pub trait ThinkCapability: Send + Sync {
    /// Backend label (e.g. "openai", "ollama")
    fn name(&self) -> &str;

    /// Model the backend generates with
    fn model(&self) -> &str;

    /// Generate text for `prompt` on behalf of `identity`
    async fn generate(&self, identity: &AgentIdentity, prompt: &str) -> Result<String, ThinkError>;

    /// Models the backend can serve. Defaults to the configured model.
    async fn available_models(&self) -> Result<Vec<String>, ThinkError> {
        Ok(vec![self.model().to_string()])
    }
}

/// Immutable per-session snapshot of the bound backend
pub type BoundCapability = Arc<dyn ThinkCapability>;
