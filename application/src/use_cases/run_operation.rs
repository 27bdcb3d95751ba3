//! Run Operation use case
//!
//! Runs one role operation outside a session: a single agent is created,
//! performs its operation and is dissolved, all against the given audit
//! log. This is how hosts call an individual step of the hierarchy.

use crate::agent::Agent;
use crate::audit::AuditLog;
use crate::ports::think::BoundCapability;
use armykit_domain::{ModuleSpec, PipelinePolicy, Role, SessionError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// One stand-alone role operation and its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Assistant: user request -> spec
    Interpret(String),
    /// Validator: spec -> verdict
    Validate(String),
    /// Decomposer: spec -> modules
    Decompose(String),
    /// Create and dissolve a submanager for a domain
    SpawnSubmanager(String),
    /// Create and dissolve a team leader for a module
    SpawnTeamLeader(String),
    /// Create and dissolve a mini army for a feature
    SpawnMiniArmy(String),
    /// MiniArmy: feature -> result
    ExecuteFeature(String),
}

impl Operation {
    /// Role of the single agent this operation creates.
    pub fn role(&self) -> Role {
        match self {
            Operation::Interpret(_) => Role::Assistant,
            Operation::Validate(_) => Role::Validator,
            Operation::Decompose(_) => Role::Decomposer,
            Operation::SpawnSubmanager(domain) => Role::Submanager {
                module: domain.clone(),
            },
            Operation::SpawnTeamLeader(module) => Role::TeamLeader {
                module: module.clone(),
            },
            Operation::SpawnMiniArmy(feature) | Operation::ExecuteFeature(feature) => {
                Role::MiniArmy {
                    feature: feature.clone(),
                }
            }
        }
    }
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    Text(String),
    Verdict(bool),
    Modules(Vec<ModuleSpec>),
    /// Name of the agent that was created and dissolved.
    Spawned(String),
}

/// Use case for running one role operation
pub struct RunOperationUseCase {
    audit: AuditLog,
    policy: PipelinePolicy,
    cancellation: Option<CancellationToken>,
}

impl RunOperationUseCase {
    pub fn new(audit: AuditLog) -> Self {
        Self {
            audit,
            policy: PipelinePolicy::default(),
            cancellation: None,
        }
    }

    /// Swap the validation/decomposition rules
    pub fn with_policy(mut self, policy: PipelinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Abort the think call when `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Execute `operation` with a fresh agent.
    ///
    /// Without a backend, thinking operations still run and yield the
    /// fail-closed text. The agent is dissolved whether or not the
    /// operation succeeds.
    pub async fn execute(
        &self,
        operation: &Operation,
        capability: Option<BoundCapability>,
    ) -> Result<OperationOutput, SessionError> {
        let agent = Agent::create(operation.role(), capability, self.audit.clone());
        let mut agent = match &self.cancellation {
            Some(token) => agent.with_cancellation(token.clone()),
            None => agent,
        };
        info!("Running {:?} with {}", operation, agent.name());

        let output = self.perform(&agent, operation).await;
        agent.dissolve();

        if let Err(error) = &output {
            warn!("Operation aborted ({}): {}", error.kind(), error);
        }
        output
    }

    async fn perform(
        &self,
        agent: &Agent,
        operation: &Operation,
    ) -> Result<OperationOutput, SessionError> {
        match operation {
            Operation::Interpret(user_input) => {
                agent.interpret(user_input).await.map(OperationOutput::Text)
            }
            Operation::Validate(spec) => agent
                .validate(spec, self.policy.validation)
                .await
                .map(OperationOutput::Verdict),
            Operation::Decompose(spec) => agent
                .decompose(spec, self.policy.decomposition)
                .await
                .map(OperationOutput::Modules),
            Operation::SpawnSubmanager(_)
            | Operation::SpawnTeamLeader(_)
            | Operation::SpawnMiniArmy(_) => {
                Ok(OperationOutput::Spawned(agent.name().to_string()))
            }
            Operation::ExecuteFeature(_) => {
                agent.execute_feature().await.map(OperationOutput::Text)
            }
        }
    }
}
