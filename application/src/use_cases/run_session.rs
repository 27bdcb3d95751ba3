//! Run Session use case
//!
//! Drives one user request through the agent hierarchy:
//!
//! ```text
//! Assistant.interpret -> Validator.validate -> Decomposer.decompose
//!   -> for each module, in order: Submanager -> TeamLeader -> MiniArmy
//! ```
//!
//! Modules are processed strictly one at a time. Agents are dissolved in
//! reverse creation order: each branch innermost-first right after its
//! result is reported, then Decomposer, Validator, Assistant.

use crate::agent::{Agent, check_cancelled};
use crate::audit::AuditLog;
use crate::ports::progress::ProgressNotifier;
use crate::ports::think::BoundCapability;
use armykit_domain::{
    AgentIdentity, ModuleSpec, PipelinePolicy, Role, Session, SessionError, SessionPhase,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Run one session against the process-wide audit log with the default
/// decision rules.
pub async fn run_session(
    user_input: &str,
    progress: &dyn ProgressNotifier,
    capability: Option<BoundCapability>,
) -> Session {
    RunSessionUseCase::new(AuditLog::global().clone())
        .execute(user_input, progress, capability)
        .await
}

/// Use case for running one session
pub struct RunSessionUseCase {
    audit: AuditLog,
    policy: PipelinePolicy,
    cancellation: Option<CancellationToken>,
}

impl RunSessionUseCase {
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

    /// Abort the session when `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Execute the use case.
    ///
    /// `capability` is the backend snapshot for the whole session; `None`
    /// ends the session with `ConfigurationError` before any agent exists.
    /// Every failure is reported once through `progress` and recorded on the
    /// returned session; agents still alive at that point are dissolved
    /// innermost-first.
    pub async fn execute(
        &self,
        user_input: &str,
        progress: &dyn ProgressNotifier,
        capability: Option<BoundCapability>,
    ) -> Session {
        let mut session = Session::new(user_input);

        let Some(capability) = capability else {
            warn!("No think capability bound, session not started");
            let error = SessionError::Configuration;
            progress.on_session_failed(&error);
            session.fail(error);
            return session;
        };

        info!(
            "Starting session via {} ({}), validation={}, decomposition={}",
            capability.name(),
            capability.model(),
            self.policy.validation,
            self.policy.decomposition
        );

        let mut roster = Roster::new(capability, self.audit.clone(), self.cancellation.clone());

        if let Err(error) = self.drive(&mut session, &mut roster, progress).await {
            warn!("Session aborted ({}): {}", error.kind(), error);
            roster.dissolve_active();
            progress.on_session_failed(&error);
            session.fail(error);
        }

        session.agents = roster.identities();
        info!(
            "Session finished: {}",
            session.status.map(|s| s.as_str()).unwrap_or("unknown")
        );
        session
    }

    async fn drive(
        &self,
        session: &mut Session,
        roster: &mut Roster,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), SessionError> {
        // 1. Interpret
        let assistant = roster.create(Role::Assistant);
        let spec = roster.get(assistant).interpret(&session.user_input).await?;
        session.interpreted_spec = spec.clone();
        session.enter(SessionPhase::Interpreted)?;
        progress.on_spec_interpreted(&spec);

        // 2. Validate
        let validator = roster.create(Role::Validator);
        let accepted = roster
            .get(validator)
            .validate(&spec, self.policy.validation)
            .await?;
        session.validated = accepted;
        session.enter(SessionPhase::Validated { accepted })?;
        progress.on_validation(accepted);

        // 3. Rejected: stop after exactly two agents
        if !accepted {
            let error = SessionError::ValidationRejected;
            progress.on_session_failed(&error);
            roster.dissolve(validator);
            roster.dissolve(assistant);
            session.fail(error);
            return Ok(());
        }

        // 4. Decompose, then one branch per module
        let decomposer = roster.create(Role::Decomposer);
        let modules = roster
            .get(decomposer)
            .decompose(&spec, self.policy.decomposition)
            .await?;
        session.modules = modules.clone();
        session.enter(SessionPhase::Decomposed)?;
        info!("Processing {} modules", modules.len());

        for (index, module) in modules.iter().enumerate() {
            check_cancelled(&self.cancellation)?;
            session.enter(SessionPhase::Module { index })?;
            progress.on_module_start(module);

            let result = self.run_branch(roster, module, progress).await?;
            session.module_results.push(result);
        }

        // 5. Tear down upstream agents
        roster.dissolve(decomposer);
        roster.dissolve(validator);
        roster.dissolve(assistant);
        session.complete();
        progress.on_session_complete(session);
        Ok(())
    }

    async fn run_branch(
        &self,
        roster: &mut Roster,
        module: &ModuleSpec,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, SessionError> {
        debug!("Spawning branch for module {}", module.name);

        let submanager = roster.create(Role::Submanager {
            module: module.name.clone(),
        });
        let leader = roster.get(submanager).spawn_team_leader(module)?;
        let leader = roster.adopt(leader);
        let army = roster.get(leader).spawn_mini_army(module)?;
        let army = roster.adopt(army);

        let result = roster.get(army).execute_feature().await?;
        progress.on_module_result(module, &result);

        roster.dissolve(army);
        roster.dissolve(leader);
        roster.dissolve(submanager);
        Ok(result)
    }
}

/// Every agent created during one session, in creation order.
///
/// Agents are addressed by their creation index and never removed, so the
/// session can report every identity at the end.
struct Roster {
    capability: BoundCapability,
    audit: AuditLog,
    cancellation: Option<CancellationToken>,
    agents: Vec<Agent>,
}

impl Roster {
    fn new(
        capability: BoundCapability,
        audit: AuditLog,
        cancellation: Option<CancellationToken>,
    ) -> Self {
        Self {
            capability,
            audit,
            cancellation,
            agents: Vec::new(),
        }
    }

    /// Create a root agent bound to the session's snapshot.
    fn create(&mut self, role: Role) -> usize {
        let agent = Agent::create(role, Some(self.capability.clone()), self.audit.clone());
        let agent = match &self.cancellation {
            Some(token) => agent.with_cancellation(token.clone()),
            None => agent,
        };
        self.adopt(agent)
    }

    /// Track an agent spawned by another agent.
    fn adopt(&mut self, agent: Agent) -> usize {
        self.agents.push(agent);
        self.agents.len() - 1
    }

    fn get(&self, index: usize) -> &Agent {
        &self.agents[index]
    }

    fn dissolve(&mut self, index: usize) {
        self.agents[index].dissolve();
    }

    /// Dissolve every still-active agent, newest first.
    fn dissolve_active(&mut self) {
        for agent in self.agents.iter_mut().rev().filter(|a| a.is_active()) {
            agent.dissolve();
        }
    }

    fn identities(&self) -> Vec<AgentIdentity> {
        self.agents.iter().map(|a| a.identity().clone()).collect()
    }
}
