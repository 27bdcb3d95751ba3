//! Validation rules for deciding whether a spec may proceed
//!
//! The validator's think result is free text; a [`ValidationRule`] turns it
//! into a yes/no decision.

use serde::{Deserialize, Serialize};

/// Words accepted as a positive verdict by [`ValidationRule::Verdict`].
const VERDICT_WORDS: &[&str] = &["valid", "approved", "yes", "feasible"];

/// Rule for turning a validator response into a decision
///
/// - `Substring`: lower-cased response contains `"valid"` anywhere (default).
///   This also accepts `"Invalid, missing detail"`, because `"invalid"`
///   contains `"valid"`. Hosts rely on that exact behaviour.
/// - `Verdict`: the first word must be a positive verdict
///   (`valid`, `approved`, `yes`, `feasible`). Opt-in; differs from
///   `Substring` for responses such as `"Invalid ..."`.
///
/// # Example
///
/// ```
/// use armykit_domain::policy::ValidationRule;
///
/// let rule = ValidationRule::Substring;
/// assert!(rule.accepts("This spec is valid."));
/// assert!(rule.accepts("Invalid, missing detail"));
/// assert!(!rule.accepts("Rejected, insufficient detail"));
///
/// assert!(!ValidationRule::Verdict.accepts("Invalid, missing detail"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationRule {
    #[default]
    Substring,
    Verdict,
}

impl ValidationRule {
    /// Decide whether `response` accepts the spec
    pub fn accepts(&self, response: &str) -> bool {
        match self {
            ValidationRule::Substring => response.to_lowercase().contains("valid"),
            ValidationRule::Verdict => {
                let first = response
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                VERDICT_WORDS.contains(&first.as_str())
            }
        }
    }

    /// Whether this is the default rule
    pub fn is_default(&self) -> bool {
        matches!(self, ValidationRule::Substring)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationRule::Substring => "substring",
            ValidationRule::Verdict => "verdict",
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ValidationRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(ValidationRule::Substring),
            "verdict" => Ok(ValidationRule::Verdict),
            _ => Err(format!(
                "Unknown validation rule: {}. Valid: substring, verdict",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_rule() {
        let rule = ValidationRule::Substring;
        assert!(rule.accepts("This spec is valid."));
        assert!(rule.accepts("Valid: looks good"));
        assert!(rule.accepts("Invalid, missing detail"));
        assert!(rule.accepts("VALIDATED"));
        assert!(!rule.accepts("Rejected, insufficient detail"));
        assert!(!rule.accepts("Not acceptable"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn test_substring_rule_on_provider_error_text() {
        // Provider failures reach the rule as ordinary text.
        assert!(!ValidationRule::Substring.accepts("Error: connection refused"));
        assert!(ValidationRule::Substring.accepts("Error: invalid api key"));
    }

    #[test]
    fn test_verdict_rule() {
        let rule = ValidationRule::Verdict;
        assert!(rule.accepts("Valid: looks good"));
        assert!(rule.accepts("**Approved** with minor notes"));
        assert!(rule.accepts("yes."));
        assert!(!rule.accepts("Invalid, missing detail"));
        assert!(!rule.accepts("The spec is valid"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "substring".parse::<ValidationRule>().unwrap(),
            ValidationRule::Substring
        );
        assert_eq!(
            "Verdict".parse::<ValidationRule>().unwrap(),
            ValidationRule::Verdict
        );
        assert!("semantic".parse::<ValidationRule>().is_err());
    }

    #[test]
    fn test_default_rule() {
        assert!(ValidationRule::default().is_default());
    }
}
