//! Decision policies applied to generated text
//!
//! Both the validator's yes/no decision and the decomposer's module list are
//! named, swappable rules. The session driver only ever calls `accepts` and
//! `decompose`, so a structured-output parser can replace either rule
//! without touching its control flow.

mod decomposition;
mod validation;

pub use decomposition::{DecompositionError, DecompositionRule};
pub use validation::ValidationRule;

use serde::{Deserialize, Serialize};

/// The pair of rules a session runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelinePolicy {
    pub validation: ValidationRule,
    pub decomposition: DecompositionRule,
}

impl PipelinePolicy {
    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validation = rule;
        self
    }

    pub fn with_decomposition(mut self, rule: DecompositionRule) -> Self {
        self.decomposition = rule;
        self
    }

    /// Whether both rules are the defaults
    pub fn is_default(&self) -> bool {
        self.validation.is_default() && self.decomposition.is_default()
    }
}
