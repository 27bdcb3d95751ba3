//! Audit domain
//!
//! The append-only record of every agent's Think and Dissolve actions.

pub mod entry;
