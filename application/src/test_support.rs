//! Scripted collaborators shared by the application tests.

use crate::ports::progress::ProgressNotifier;
use crate::ports::think::{ThinkCapability, ThinkError};
use armykit_domain::{AgentIdentity, ModuleSpec, Session, SessionError, SessionStatus};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// What the scripted backend does for a matching prompt
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail(ThinkError),
}

/// Backend whose replies are chosen by prompt substring
pub(crate) struct ScriptedCapability {
    rules: Vec<(String, Reply)>,
    fallback: Reply,
    calls: Mutex<Vec<(String, String)>>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl ScriptedCapability {
    /// Replies `fallback` to every prompt
    pub(crate) fn replying(fallback: &str) -> Self {
        Self {
            rules: Vec::new(),
            fallback: Reply::Text(fallback.to_string()),
            calls: Mutex::new(Vec::new()),
            cancel_on: None,
        }
    }

    /// Reply `text` to prompts containing `needle`
    pub(crate) fn when(mut self, needle: &str, text: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Text(text.to_string())));
        self
    }

    /// Fail prompts containing `needle`
    pub(crate) fn failing_when(mut self, needle: &str, error: ThinkError) -> Self {
        self.rules.push((needle.to_string(), Reply::Fail(error)));
        self
    }

    /// Cancel `token` while answering a prompt containing `needle`
    pub(crate) fn cancelling_when(mut self, needle: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((needle.to_string(), token));
        self
    }

    /// `(agent name, prompt)` for every call, in order
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ThinkCapability for ScriptedCapability {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, identity: &AgentIdentity, prompt: &str) -> Result<String, ThinkError> {
        self.calls
            .lock()
            .unwrap()
            .push((identity.name().to_string(), prompt.to_string()));

        if let Some((needle, token)) = &self.cancel_on
            && prompt.contains(needle.as_str())
        {
            token.cancel();
        }

        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(error) => Err(error),
        }
    }
}

/// Progress milestones as observed by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Milestone {
    Interpreted(String),
    Validation(bool),
    ModuleStart(String),
    ModuleResult(String, String),
    Complete(SessionStatus),
    Failed(SessionError),
}

/// Progress notifier that records every milestone
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<Milestone>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<Milestone> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, milestone: Milestone) {
        self.events.lock().unwrap().push(milestone);
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_spec_interpreted(&self, spec: &str) {
        self.push(Milestone::Interpreted(spec.to_string()));
    }

    fn on_validation(&self, accepted: bool) {
        self.push(Milestone::Validation(accepted));
    }

    fn on_module_start(&self, module: &ModuleSpec) {
        self.push(Milestone::ModuleStart(module.name.clone()));
    }

    fn on_module_result(&self, module: &ModuleSpec, result: &str) {
        self.push(Milestone::ModuleResult(
            module.name.clone(),
            result.to_string(),
        ));
    }

    fn on_session_complete(&self, session: &Session) {
        if let Some(status) = session.status {
            self.push(Milestone::Complete(status));
        }
    }

    fn on_session_failed(&self, error: &SessionError) {
        self.push(Milestone::Failed(error.clone()));
    }
}
