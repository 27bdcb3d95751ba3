//! Role operations.
//!
//! Each role adds exactly one operation on top of [`Agent::think`]: the
//! role's task prompt plus a post-processing rule. Calling an operation on
//! an agent of the wrong role is an unhandled failure.

use super::Agent;
use armykit_domain::{DecompositionRule, ModuleSpec, Role, SessionError, ValidationRule};
use tracing::{debug, info};

impl Agent {
    /// Assistant: turn the user request into a spec, verbatim.
    pub async fn interpret(&self, user_input: &str) -> Result<String, SessionError> {
        self.expect_role("interpret", |r| matches!(r, Role::Assistant))?;
        self.think(&self.task_prompt(user_input)?).await
    }

    /// Validator: decide whether the spec may proceed.
    pub async fn validate(&self, spec: &str, rule: ValidationRule) -> Result<bool, SessionError> {
        self.expect_role("validate", |r| matches!(r, Role::Validator))?;
        let response = self.think(&self.task_prompt(spec)?).await?;
        let accepted = rule.accepts(&response);
        info!("Spec {} by {} rule", verdict(accepted), rule);
        Ok(accepted)
    }

    /// Decomposer: split the spec into modules.
    ///
    /// The response is always recorded in the audit log; whether it shapes
    /// the module list depends on `rule`.
    pub async fn decompose(
        &self,
        spec: &str,
        rule: DecompositionRule,
    ) -> Result<Vec<ModuleSpec>, SessionError> {
        self.expect_role("decompose", |r| matches!(r, Role::Decomposer))?;
        let response = self.think(&self.task_prompt(spec)?).await?;
        let modules = rule
            .decompose(&response)
            .map_err(|e| SessionError::Unhandled(e.to_string()))?;
        debug!("Decomposed into {} modules by {} rule", modules.len(), rule);
        Ok(modules)
    }

    /// Submanager: create the team leader for `module`.
    pub fn spawn_team_leader(&self, module: &ModuleSpec) -> Result<Agent, SessionError> {
        self.expect_role("spawn a team leader", |r| {
            matches!(r, Role::Submanager { .. })
        })?;
        self.spawn_next(module)
    }

    /// TeamLeader: create the mini army for `module`'s feature.
    pub fn spawn_mini_army(&self, module: &ModuleSpec) -> Result<Agent, SessionError> {
        self.expect_role("spawn a mini army", |r| matches!(r, Role::TeamLeader { .. }))?;
        self.spawn_next(module)
    }

    /// MiniArmy: produce the result for its feature.
    pub async fn execute_feature(&self) -> Result<String, SessionError> {
        self.expect_role("execute a feature", |r| matches!(r, Role::MiniArmy { .. }))?;
        self.think(&self.task_prompt("")?).await
    }

    fn task_prompt(&self, subject: &str) -> Result<String, SessionError> {
        self.role()
            .task_prompt(subject)
            .ok_or_else(|| self.wrong_role("think"))
    }

    fn spawn_next(&self, module: &ModuleSpec) -> Result<Agent, SessionError> {
        let role = self
            .role()
            .spawns(module)
            .ok_or_else(|| self.wrong_role("spawn"))?;
        Ok(self.spawn(role))
    }

    fn expect_role(
        &self,
        operation: &str,
        allowed: impl Fn(&Role) -> bool,
    ) -> Result<(), SessionError> {
        if allowed(self.role()) {
            Ok(())
        } else {
            Err(self.wrong_role(operation))
        }
    }

    fn wrong_role(&self, operation: &str) -> SessionError {
        SessionError::Unhandled(format!(
            "{} ({}) cannot {}",
            self.name(),
            self.role(),
            operation
        ))
    }
}

fn verdict(accepted: bool) -> &'static str {
    if accepted { "accepted" } else { "rejected" }
}
