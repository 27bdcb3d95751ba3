//! Session domain
//!
//! A [`Session`](entities::Session) starts at the user request and ends when
//! its status is set. It owns every agent identity created along the way.

pub mod entities;
pub mod module;

pub use entities::{Session, SessionPhase, SessionStatus};
pub use module::ModuleSpec;
