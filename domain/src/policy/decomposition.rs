//! Decomposition rules for turning a decomposer response into modules

use crate::session::ModuleSpec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a decomposition rule can raise
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    #[error("no modules found in decomposer response")]
    NoModules,
}

/// Rule for extracting modules from the decomposer's response
///
/// - `Fixed`: ignore the response and return `UI` then `Backend` (default).
///   The response is still recorded in the audit log.
/// - `List`: parse `- Name: description` lines (also `*`, `1.` and `1)`
///   bullets). Opt-in; fails when no
///   line matches. Repeated names or descriptions keep the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecompositionRule {
    #[default]
    Fixed,
    List,
}

impl DecompositionRule {
    /// Extract modules from `response`
    pub fn decompose(&self, response: &str) -> Result<Vec<ModuleSpec>, DecompositionError> {
        match self {
            DecompositionRule::Fixed => Ok(Self::placeholder_modules()),
            DecompositionRule::List => {
                let mut modules: Vec<ModuleSpec> = Vec::new();
                for module in response.lines().filter_map(parse_module_line) {
                    // Branch agent names derive from name and description
                    if modules
                        .iter()
                        .any(|m| m.name == module.name || m.description == module.description)
                    {
                        continue;
                    }
                    modules.push(module);
                }
                if modules.is_empty() {
                    return Err(DecompositionError::NoModules);
                }
                Ok(modules)
            }
        }
    }

    /// The fixed pair returned by [`DecompositionRule::Fixed`]
    pub fn placeholder_modules() -> Vec<ModuleSpec> {
        vec![
            ModuleSpec::new("UI", "User interface"),
            ModuleSpec::new("Backend", "Server logic"),
        ]
    }

    /// Whether this is the default rule
    pub fn is_default(&self) -> bool {
        matches!(self, DecompositionRule::Fixed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecompositionRule::Fixed => "fixed",
            DecompositionRule::List => "list",
        }
    }
}

impl std::fmt::Display for DecompositionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecompositionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(DecompositionRule::Fixed),
            "list" => Ok(DecompositionRule::List),
            _ => Err(format!(
                "Unknown decomposition rule: {}. Valid: fixed, list",
                s
            )),
        }
    }
}

/// Parse one `- Name: description` line
fn parse_module_line(line: &str) -> Option<ModuleSpec> {
    let body = strip_bullet(line.trim())?;
    let (name, description) = body.split_once(':')?;

    let name = name.trim().trim_matches('*').trim();
    let description = description.trim().trim_matches('*').trim();
    if name.is_empty() || description.is_empty() {
        return None;
    }
    Some(ModuleSpec::new(name, description))
}

fn strip_bullet(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest);
    }

    // Numbered: "1. " or "1) "
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ignores_response() {
        for response in ["", "Error: timeout", "- Auth: login\n- DB: storage"] {
            let modules = DecompositionRule::Fixed.decompose(response).unwrap();
            assert_eq!(modules.len(), 2);
            assert_eq!(modules[0], ModuleSpec::new("UI", "User interface"));
            assert_eq!(modules[1], ModuleSpec::new("Backend", "Server logic"));
        }
    }

    #[test]
    fn test_list_parses_bullets_in_order() {
        let response = "Here are the modules:\n\
                        - UI: Screens and forms\n\
                        * **Auth**: Login and sessions\n\
                        3. DB: Persistence layer\n\
                        4) Backend: REST API\n\
                        Thanks!";

        let modules = DecompositionRule::List.decompose(response).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["UI", "Auth", "DB", "Backend"]);
        assert_eq!(modules[1].description, "Login and sessions");
    }

    #[test]
    fn test_list_without_matches_fails() {
        let err = DecompositionRule::List
            .decompose("One big module, no bullets")
            .unwrap_err();
        assert_eq!(err, DecompositionError::NoModules);
    }

    #[test]
    fn test_list_skips_incomplete_lines() {
        let modules = DecompositionRule::List
            .decompose("- UI:\n- : nothing\n- Backend: Server logic")
            .unwrap();
        assert_eq!(modules, vec![ModuleSpec::new("Backend", "Server logic")]);
    }

    #[test]
    fn test_list_keeps_first_duplicate() {
        let modules = DecompositionRule::List
            .decompose("- UI: Screens\n- UI: Forms\n- Admin: Screens\n- DB: Storage")
            .unwrap();
        assert_eq!(
            modules,
            vec![ModuleSpec::new("UI", "Screens"), ModuleSpec::new("DB", "Storage")]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "LIST".parse::<DecompositionRule>().unwrap(),
            DecompositionRule::List
        );
        assert!("json".parse::<DecompositionRule>().is_err());
    }
}
