//! Application layer for armykit
//!
//! This crate contains the agent record, the shared audit log, the session
//! driver and the port definitions adapters implement.
//! It depends only on the domain layer.

pub mod agent;
pub mod audit;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use agent::{Agent, NO_CAPABILITY};
pub use audit::AuditLog;
pub use ports::{
    audit_sink::AuditSink,
    progress::{NoProgress, ProgressNotifier},
    think::{BoundCapability, ThinkCapability, ThinkError},
};
pub use use_cases::run_operation::{Operation, OperationOutput, RunOperationUseCase};
pub use use_cases::run_session::{RunSessionUseCase, run_session};
