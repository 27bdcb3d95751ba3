//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way a session can end other than `Completed`.
///
/// Display texts are the messages hosts already show to users, so they are
/// kept verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SessionError {
    /// No think backend was bound before the session started.
    #[error("AI client not configured. Please set API provider and keys.")]
    Configuration,

    /// A backend invocation failed. Only ever rendered into text; the
    /// pipeline continues with that text as the think result.
    #[error("Error: {0}")]
    Provider(String),

    /// The validator did not accept the interpreted spec.
    #[error("Spec validation failed.")]
    ValidationRejected,

    /// Any failure outside a think call. Aborts the session.
    #[error("Error: {0}")]
    Unhandled(String),

    /// The session's cancellation token fired.
    #[error("Operation cancelled")]
    Cancelled,
}

impl SessionError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Cancelled)
    }

    /// Short machine-readable tag for logs. Matches the serialized `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Configuration => "configuration",
            SessionError::Provider(_) => "provider",
            SessionError::ValidationRejected => "validation_rejected",
            SessionError::Unhandled(_) => "unhandled",
            SessionError::Cancelled => "cancelled",
        }
    }
}
