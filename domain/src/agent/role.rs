//! The closed set of agent roles.
//!
//! Every agent in a session plays exactly one [`Role`]. The role fixes the
//! agent's name, its human-readable description, and the prompt template
//! its single operation sends. Behaviour is dispatched on the tag rather
//! than through a type hierarchy.

use super::identity::AgentIdentity;
use crate::prompt::PromptTemplate;
use crate::session::ModuleSpec;
use serde::{Deserialize, Serialize};

/// Role tag carried by every agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    /// Turns the raw user request into a spec.
    Assistant,
    /// Decides whether the spec may proceed.
    Validator,
    /// Splits the spec into modules.
    Decomposer,
    /// Owns one module's branch and spawns its team leader.
    Submanager { module: String },
    /// Spawns the mini army for one module.
    TeamLeader { module: String },
    /// Produces the result for one feature.
    MiniArmy { feature: String },
}

impl Role {
    /// Session-unique agent name for this role.
    pub fn agent_name(&self) -> String {
        match self {
            Role::Assistant => "MasterAssistantAI".to_string(),
            Role::Validator => "MasterAgent".to_string(),
            Role::Decomposer => "ManagerAgent".to_string(),
            Role::Submanager { module } => format!("Submanager-{}", module),
            Role::TeamLeader { module } => format!("TeamLeader-{}", module),
            Role::MiniArmy { feature } => format!("MiniArmy-{}", feature),
        }
    }

    /// Human-readable role description used in the persona prompt.
    pub fn description(&self) -> String {
        match self {
            Role::Assistant => "Human Interface Agent".to_string(),
            Role::Validator => "Orchestrator Agent".to_string(),
            Role::Decomposer => "Task Breakdown Agent".to_string(),
            Role::Submanager { module } => format!("{} Submanager", module),
            Role::TeamLeader { module } => format!("Team Leader for {}", module),
            Role::MiniArmy { feature } => format!("Mini AI Army for {}", feature),
        }
    }

    /// Fresh `Active` identity for an agent playing this role.
    pub fn identity(&self) -> AgentIdentity {
        AgentIdentity::new(self.agent_name(), self.description())
    }

    /// The task prompt this role sends for `subject`.
    ///
    /// Pass-through roles (`Submanager`, `TeamLeader`) never think and
    /// return `None`. `MiniArmy` ignores `subject` and uses its own feature.
    pub fn task_prompt(&self, subject: &str) -> Option<String> {
        match self {
            Role::Assistant => Some(PromptTemplate::interpret(subject)),
            Role::Validator => Some(PromptTemplate::validate(subject)),
            Role::Decomposer => Some(PromptTemplate::decompose(subject)),
            Role::MiniArmy { feature } => Some(PromptTemplate::feature(feature)),
            Role::Submanager { .. } | Role::TeamLeader { .. } => None,
        }
    }

    /// Role that a spawner of this role creates next, if any.
    pub fn spawns(&self, module: &ModuleSpec) -> Option<Role> {
        match self {
            Role::Submanager { .. } => Some(Role::TeamLeader {
                module: module.name.clone(),
            }),
            Role::TeamLeader { .. } => Some(Role::MiniArmy {
                feature: module.description.clone(),
            }),
            _ => None,
        }
    }

    /// Short tag for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::Validator => "validator",
            Role::Decomposer => "decomposer",
            Role::Submanager { .. } => "submanager",
            Role::TeamLeader { .. } => "team_leader",
            Role::MiniArmy { .. } => "mini_army",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
