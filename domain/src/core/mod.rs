//! Core domain concepts shared across all subdomains.
//!
//! - [`error::SessionError`]: the tagged failure taxonomy of a session

pub mod error;
