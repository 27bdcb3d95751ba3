//! Prompt templates for each role

/// Templates for the fixed prompt every role sends
pub struct PromptTemplate;

impl PromptTemplate {
    /// Persona prefix identifying the thinking agent
    pub fn persona(name: &str, role: &str) -> String {
        format!("You are {}, a {}.", name, role)
    }

    /// Final prompt handed to the think backend
    pub fn compose(name: &str, role: &str, prompt: &str) -> String {
        format!("{} {}", Self::persona(name, role), prompt)
    }

    /// Assistant: turn the raw request into a spec
    pub fn interpret(user_input: &str) -> String {
        format!(
            "Interpret this user request and create a clear spec: {}",
            user_input
        )
    }

    /// Validator: judge the spec
    pub fn validate(spec: &str) -> String {
        format!(
            "Validate this spec for structure and feasibility: {}",
            spec
        )
    }

    /// Decomposer: split the spec into modules
    pub fn decompose(spec: &str) -> String {
        format!(
            "Break this spec into modules (UI, backend, auth, DB, etc.): {}",
            spec
        )
    }

    /// MiniArmy: produce one feature
    pub fn feature(feature: &str) -> String {
        format!("Generate code and logic for feature: {}", feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_prefixes_persona() {
        assert_eq!(
            PromptTemplate::compose("MasterAgent", "Orchestrator Agent", "Hello"),
            "You are MasterAgent, a Orchestrator Agent. Hello"
        );
    }

    #[test]
    fn test_role_prompts() {
        assert_eq!(
            PromptTemplate::interpret("build a todo app"),
            "Interpret this user request and create a clear spec: build a todo app"
        );
        assert_eq!(
            PromptTemplate::validate("spec"),
            "Validate this spec for structure and feasibility: spec"
        );
        assert_eq!(
            PromptTemplate::decompose("spec"),
            "Break this spec into modules (UI, backend, auth, DB, etc.): spec"
        );
    }
}
