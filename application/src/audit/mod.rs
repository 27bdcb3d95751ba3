//! Audit log
//!
//! Process-wide, append-only record of agent actions with a read-only
//! public interface.

mod log;

pub use log::AuditLog;
