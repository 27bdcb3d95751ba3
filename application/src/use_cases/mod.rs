//! Use cases

pub mod run_operation;
pub mod run_session;
