//! Agent domain
//!
//! - [`identity::AgentIdentity`]: name, role description, lifecycle state
//! - [`role::Role`]: the six fixed role tags and what each one sends

pub mod identity;
pub mod role;
