//! Module value object

use serde::{Deserialize, Serialize};

/// A named unit of decomposed work.
///
/// Produced by decomposition and never modified afterwards; each one drives
/// exactly one Submanager -> TeamLeader -> MiniArmy branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub name: String,
    pub description: String,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for ModuleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}
