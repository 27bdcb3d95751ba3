//! Session entity and its state machine

use super::module::ModuleSpec;
use crate::agent::identity::AgentIdentity;
use crate::core::error::SessionError;
use serde::{Deserialize, Serialize};

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Completed,
    ValidationFailed,
    ConfigurationError,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Completed => "completed",
            SessionStatus::ValidationFailed => "validation_failed",
            SessionStatus::ConfigurationError => "configuration_error",
            SessionStatus::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the driver is in the pipeline.
///
/// ```text
/// Start -> Interpreted -> Validated{false} -> Done
///                      -> Validated{true}  -> Decomposed -> Module{0..n} -> Done
/// ```
///
/// `Done` is reachable from every phase so an abort can close the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Start,
    Interpreted,
    Validated { accepted: bool },
    Decomposed,
    Module { index: usize },
    Done,
}

impl SessionPhase {
    pub fn can_transition_to(&self, next: &SessionPhase) -> bool {
        use SessionPhase::{Decomposed, Done, Interpreted, Module, Start, Validated};

        match (self, next) {
            (_, Done) => *self != Done,
            (Start, Interpreted) => true,
            (Interpreted, Validated { .. }) => true,
            (Validated { accepted: true }, Decomposed) => true,
            (Decomposed, Module { index: 0 }) => true,
            (Module { index }, Module { index: next }) => *next == index + 1,
            _ => false,
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Start => write!(f, "start"),
            SessionPhase::Interpreted => write!(f, "interpreted"),
            SessionPhase::Validated { accepted } => write!(f, "validated({})", accepted),
            SessionPhase::Decomposed => write!(f, "decomposed"),
            SessionPhase::Module { index } => write!(f, "module[{}]", index),
            SessionPhase::Done => write!(f, "done"),
        }
    }
}

/// One user request's run through the agent hierarchy (Entity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_input: String,
    pub interpreted_spec: String,
    pub validated: bool,
    pub modules: Vec<ModuleSpec>,
    pub module_results: Vec<String>,
    /// `None` until the session ends.
    pub status: Option<SessionStatus>,
    pub error: Option<SessionError>,
    /// Final identities of every agent created during the run, in creation order.
    pub agents: Vec<AgentIdentity>,
    phase: SessionPhase,
}

impl Session {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            interpreted_spec: String::new(),
            validated: false,
            modules: Vec::new(),
            module_results: Vec::new(),
            status: None,
            error: None,
            agents: Vec::new(),
            phase: SessionPhase::Start,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Advance the state machine.
    pub fn enter(&mut self, next: SessionPhase) -> Result<(), SessionError> {
        if !self.phase.can_transition_to(&next) {
            return Err(SessionError::Unhandled(format!(
                "invalid session transition from {} to {}",
                self.phase, next
            )));
        }
        self.phase = next;
        Ok(())
    }

    /// Close the session successfully.
    pub fn complete(&mut self) {
        self.phase = SessionPhase::Done;
        self.status = Some(SessionStatus::Completed);
    }

    /// Close the session with `error`, choosing the status from its kind.
    pub fn fail(&mut self, error: SessionError) {
        let status = match error {
            SessionError::Configuration => SessionStatus::ConfigurationError,
            SessionError::ValidationRejected => SessionStatus::ValidationFailed,
            SessionError::Provider(_) | SessionError::Unhandled(_) | SessionError::Cancelled => {
                SessionStatus::Failed
            }
        };
        self.phase = SessionPhase::Done;
        self.status = Some(status);
        self.error = Some(error);
    }
}
