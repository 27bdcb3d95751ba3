//! Audit log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What an agent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Think,
    Dissolve,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Think => "think",
            AuditAction::Dissolve => "dissolve",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable record in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "agent")]
    pub agent_name: String,
    pub action: AuditAction,
    /// Generated text for `Think`, empty for `Dissolve`.
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn think(agent_name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            action: AuditAction::Think,
            result: result.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn dissolve(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            action: AuditAction::Dissolve,
            result: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_think(&self) -> bool {
        self.action == AuditAction::Think
    }

    pub fn is_dissolve(&self) -> bool {
        self.action == AuditAction::Dissolve
    }
}
