//! The agent record
//!
//! An [`Agent`] is one identity playing one [`Role`], bound to the
//! session's backend snapshot and audit log. It can `think` while active
//! and is `dissolve`d exactly once. Role-specific operations live in
//! [`behaviors`].

pub mod behaviors;

use crate::audit::AuditLog;
use crate::ports::think::BoundCapability;
use armykit_domain::{AgentIdentity, LogEntry, PromptTemplate, Role, SessionError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result text of a think call made without a bound backend.
pub const NO_CAPABILITY: &str = "No AI client configured";

/// Returns `Err(SessionError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), SessionError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(SessionError::Cancelled);
    }
    Ok(())
}

/// One short-lived, single-purpose agent.
pub struct Agent {
    role: Role,
    identity: AgentIdentity,
    capability: Option<BoundCapability>,
    audit: AuditLog,
    cancellation: Option<CancellationToken>,
}

impl Agent {
    /// Create an `Active` agent for `role`.
    pub fn create(role: Role, capability: Option<BoundCapability>, audit: AuditLog) -> Self {
        let identity = role.identity();
        debug!("Agent {} created ({})", identity.name(), identity.role());
        Self {
            role,
            identity,
            capability,
            audit,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn is_active(&self) -> bool {
        self.identity.is_active()
    }

    /// Ask the bound backend to respond to `prompt` in this agent's persona.
    ///
    /// Backend failures do not surface as `Err`: they come back as
    /// `"Error: ..."` text, and only successful responses are appended to
    /// the audit log. Without a backend the result is [`NO_CAPABILITY`].
    ///
    /// `Err` is reserved for conditions that must abort the session: the
    /// agent is already dissolved, or the session was cancelled.
    pub async fn think(&self, prompt: &str) -> Result<String, SessionError> {
        if !self.is_active() {
            return Err(SessionError::Unhandled(format!(
                "agent {} is dissolved",
                self.name()
            )));
        }
        check_cancelled(&self.cancellation)?;

        let Some(capability) = &self.capability else {
            warn!("Agent {} has no think capability bound", self.name());
            return Ok(NO_CAPABILITY.to_string());
        };

        let prompt = PromptTemplate::compose(self.name(), self.identity.role(), prompt);
        debug!(
            "Agent {} thinking via {} ({} bytes)",
            self.name(),
            capability.name(),
            prompt.len()
        );

        let outcome = match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(SessionError::Cancelled),
                    outcome = capability.generate(&self.identity, &prompt) => outcome,
                }
            }
            None => capability.generate(&self.identity, &prompt).await,
        };

        match outcome {
            Ok(text) => {
                self.audit.append(LogEntry::think(self.name(), text.clone()));
                Ok(text)
            }
            Err(e) => {
                warn!("Agent {} think failed: {}", self.name(), e);
                Ok(SessionError::Provider(e.to_string()).to_string())
            }
        }
    }

    /// Mark the agent `Dissolved` and record it. Idempotent.
    pub fn dissolve(&mut self) {
        if self.identity.dissolve() {
            debug!("Agent {} dissolved", self.name());
            self.audit.append(LogEntry::dissolve(self.name()));
        }
    }

    /// Child agent sharing this agent's backend snapshot, log and token.
    pub(crate) fn spawn(&self, role: Role) -> Agent {
        let child = Agent::create(role, self.capability.clone(), self.audit.clone());
        match &self.cancellation {
            Some(token) => child.with_cancellation(token.clone()),
            None => child,
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.identity.name())
            .field("state", &self.identity.state())
            .field("bound", &self.capability.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::think::ThinkError;
    use crate::test_support::ScriptedCapability;
    use armykit_domain::{AgentState, AuditAction};
    use std::sync::Arc;

    fn assistant(capability: Option<BoundCapability>, audit: &AuditLog) -> Agent {
        Agent::create(Role::Assistant, capability, audit.clone())
    }

    #[tokio::test]
    async fn test_think_composes_persona_and_logs() {
        let audit = AuditLog::new();
        let backend = Arc::new(ScriptedCapability::replying("a spec"));
        let agent = assistant(Some(backend.clone()), &audit);

        let text = agent.think("Do the thing").await.unwrap();

        assert_eq!(text, "a spec");
        assert_eq!(
            backend.calls(),
            vec![(
                "MasterAssistantAI".to_string(),
                "You are MasterAssistantAI, a Human Interface Agent. Do the thing".to_string()
            )]
        );
        let history = audit.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Think);
        assert_eq!(history[0].result, "a spec");
    }

    #[tokio::test]
    async fn test_failed_think_returns_text_without_logging() {
        let audit = AuditLog::new();
        let backend = Arc::new(
            ScriptedCapability::replying("unused")
                .failing_when("Do", ThinkError::RequestFailed("boom".to_string())),
        );
        let agent = assistant(Some(backend), &audit);

        let text = agent.think("Do the thing").await.unwrap();

        assert_eq!(text, "Error: Request failed: boom");
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn test_think_without_capability_fails_closed() {
        let audit = AuditLog::new();
        let agent = assistant(None, &audit);

        let text = agent.think("anything").await.unwrap();

        assert_eq!(text, NO_CAPABILITY);
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn test_think_after_dissolve_is_rejected() {
        let audit = AuditLog::new();
        let backend = Arc::new(ScriptedCapability::replying("x"));
        let mut agent = assistant(Some(backend.clone()), &audit);
        agent.dissolve();

        let err = agent.think("anything").await.unwrap_err();

        assert!(matches!(err, SessionError::Unhandled(_)));
        assert!(backend.calls().is_empty());
        assert_eq!(audit.count("MasterAssistantAI", AuditAction::Think), 0);
    }

    #[tokio::test]
    async fn test_think_after_cancel_is_rejected() {
        let audit = AuditLog::new();
        let token = CancellationToken::new();
        let backend = Arc::new(ScriptedCapability::replying("x"));
        let agent = assistant(Some(backend.clone()), &audit).with_cancellation(token.clone());
        token.cancel();

        let err = agent.think("anything").await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_dissolve_is_idempotent() {
        let audit = AuditLog::new();
        let mut agent = assistant(None, &audit);

        agent.dissolve();
        agent.dissolve();

        assert_eq!(agent.identity().state(), AgentState::Dissolved);
        assert_eq!(audit.count("MasterAssistantAI", AuditAction::Dissolve), 1);
        assert_eq!(audit.len(), 1);
        assert!(audit.history()[0].result.is_empty());
    }

    #[test]
    fn test_spawned_child_shares_log() {
        let audit = AuditLog::new();
        let parent = Agent::create(
            Role::Submanager {
                module: "UI".to_string(),
            },
            None,
            audit.clone(),
        );
        let mut child = parent.spawn(Role::TeamLeader {
            module: "UI".to_string(),
        });

        child.dissolve();

        assert_eq!(audit.count("TeamLeader-UI", AuditAction::Dissolve), 1);
    }
}
