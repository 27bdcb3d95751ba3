//! Domain layer for armykit
//!
//! This crate contains the core entities, value objects and decision rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! An agent is a short-lived, single-purpose identity playing one fixed
//! [`Role`]. Agents are created when the pipeline stage they serve starts
//! and dissolved when it ends; `Active -> Dissolved` happens exactly once.
//!
//! ## Sessions
//!
//! A [`Session`] follows one user request through
//! interpret -> validate -> decompose -> one branch per module, and owns
//! every agent created on the way.
//!
//! ## Audit
//!
//! Every successful think and every dissolution becomes a [`LogEntry`].

pub mod agent;
pub mod audit;
pub mod core;
pub mod policy;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use agent::{
    identity::{AgentIdentity, AgentState},
    role::Role,
};
pub use audit::entry::{AuditAction, LogEntry};
pub use core::error::SessionError;
pub use policy::{DecompositionError, DecompositionRule, PipelinePolicy, ValidationRule};
pub use prompt::PromptTemplate;
pub use session::{ModuleSpec, Session, SessionPhase, SessionStatus};
