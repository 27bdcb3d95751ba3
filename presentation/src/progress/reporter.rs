//! Progress reporting for session execution

use armykit_application::ProgressNotifier;
use armykit_domain::{ModuleSpec, Session, SessionError};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Milestone texts shared by the reporters.
pub(crate) mod text {
    use super::*;

    pub fn spec_interpreted(spec: &str) -> String {
        format!("{} {}", "Interpreted Spec:".cyan().bold(), spec)
    }

    pub fn processing() -> String {
        "Processing through agent hierarchy...".to_string()
    }

    pub fn validated() -> String {
        "Spec validated. Breaking into modules...".green().to_string()
    }

    pub fn module_start(module: &ModuleSpec) -> String {
        format!(
            "{} {} - {}",
            "Processing module:".cyan(),
            module.name,
            module.description
        )
    }

    pub fn module_result(module: &ModuleSpec, result: &str) -> String {
        format!(
            "{} {}",
            format!("Result for {}:", module.name).yellow().bold(),
            result
        )
    }

    pub fn completed() -> String {
        "All modules processed. Agent hierarchy dissolved."
            .green()
            .bold()
            .to_string()
    }

    pub fn failed(error: &SessionError) -> String {
        error.to_string().red().to_string()
    }
}

/// Reports progress with a spinner while agents think
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("armykit");
        spinner.set_message("Interpreting request...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_spec_interpreted(&self, spec: &str) {
        self.spinner.println(text::spec_interpreted(spec));
        self.spinner.println(text::processing());
        self.spinner.set_message("Validating spec...");
    }

    fn on_validation(&self, accepted: bool) {
        if accepted {
            self.spinner.println(text::validated());
            self.spinner.set_message("Breaking spec into modules...");
        }
    }

    fn on_module_start(&self, module: &ModuleSpec) {
        self.spinner.println(text::module_start(module));
        self.spinner
            .set_message(format!("MiniArmy-{} working...", module.description));
    }

    fn on_module_result(&self, module: &ModuleSpec, result: &str) {
        self.spinner.println(text::module_result(module, result));
        self.spinner.set_message("Dissolving branch...");
    }

    fn on_session_complete(&self, _session: &Session) {
        self.spinner.finish_and_clear();
        println!("{}", text::completed());
    }

    fn on_session_failed(&self, error: &SessionError) {
        self.spinner.finish_and_clear();
        eprintln!("{}", text::failed(error));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_spec_interpreted(&self, spec: &str) {
        println!("{}", text::spec_interpreted(spec));
        println!("{}", text::processing());
    }

    fn on_validation(&self, accepted: bool) {
        if accepted {
            println!("{}", text::validated());
        }
    }

    fn on_module_start(&self, module: &ModuleSpec) {
        println!("{} {}", "->".cyan(), text::module_start(module));
    }

    fn on_module_result(&self, module: &ModuleSpec, result: &str) {
        println!("{}", text::module_result(module, result));
        println!();
    }

    fn on_session_complete(&self, _session: &Session) {
        println!("{}", text::completed());
    }

    fn on_session_failed(&self, error: &SessionError) {
        eprintln!("{}", text::failed(error));
    }
}

#[cfg(test)]
mod tests {
    use super::text;
    use armykit_domain::{ModuleSpec, SessionError};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_milestone_texts() {
        plain();
        let module = ModuleSpec::new("UI", "User interface");

        assert_eq!(text::spec_interpreted("a spec"), "Interpreted Spec: a spec");
        assert_eq!(
            text::module_start(&module),
            "Processing module: UI - User interface"
        );
        assert_eq!(text::module_result(&module, "done"), "Result for UI: done");
        assert_eq!(
            text::completed(),
            "All modules processed. Agent hierarchy dissolved."
        );
    }

    #[test]
    fn test_failure_texts() {
        plain();
        assert_eq!(
            text::failed(&SessionError::ValidationRejected),
            "Spec validation failed."
        );
        assert_eq!(
            text::failed(&SessionError::Configuration),
            "AI client not configured. Please set API provider and keys."
        );
    }
}
