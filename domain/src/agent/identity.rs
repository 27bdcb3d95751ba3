//! Agent identity and lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle state of an agent.
///
/// The only transition is `Active -> Dissolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Active,
    Dissolved,
}

impl AgentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Active => "active",
            AgentState::Dissolved => "dissolved",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who an agent is: a session-unique name, a human-readable role, and
/// where it is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    name: String,
    role: String,
    state: AgentState,
}

impl AgentIdentity {
    /// Create a new identity in the `Active` state.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            state: AgentState::Active,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AgentState::Active
    }

    /// Move to `Dissolved`.
    ///
    /// Returns `true` only for the call that performed the transition;
    /// later calls leave the state alone and return `false`.
    pub fn dissolve(&mut self) -> bool {
        if self.state == AgentState::Dissolved {
            return false;
        }
        self.state = AgentState::Dissolved;
        true
    }
}
