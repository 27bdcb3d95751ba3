//! Console output formatter for sessions

use armykit_application::OperationOutput;
use armykit_domain::{AgentState, LogEntry, Session};
use colored::Colorize;
use serde_json::json;

/// Longest result shown per line in the audit history
const HISTORY_PREVIEW: usize = 80;

/// Formats sessions and the audit log for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session
    pub fn format(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Hierarchy Session"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Request:".cyan().bold(),
            session.user_input
        ));
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), Self::status(session)));

        if !session.interpreted_spec.is_empty() {
            output.push_str(&Self::section_header("Interpreted Spec"));
            output.push_str(&format!("\n{}\n", session.interpreted_spec));
        }

        if !session.modules.is_empty() {
            output.push_str(&Self::section_header("Modules"));
            for (index, module) in session.modules.iter().enumerate() {
                let title = format!("── {} ──", module).yellow().bold();
                let body = match session.module_results.get(index) {
                    Some(result) => result.normal(),
                    None => "(not processed)".dimmed(),
                };
                output.push_str(&format!("\n{}\n{}\n", title, body));
            }
        }

        if !session.agents.is_empty() {
            output.push_str(&Self::section_header("Agents"));
            for agent in &session.agents {
                let state = match agent.state() {
                    AgentState::Active => agent.state().as_str().yellow(),
                    AgentState::Dissolved => agent.state().as_str().dimmed(),
                };
                output.push_str(&format!("  {} ({}) [{}]\n", agent.name(), agent.role(), state));
            }
        }

        if let Some(error) = &session.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(session: &Session) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the module results only (concise output)
    pub fn format_results(session: &Session) -> String {
        let mut output = String::new();

        for (module, result) in session.modules.iter().zip(&session.module_results) {
            output.push_str(&format!(
                "{}\n{}\n\n",
                format!("=== {} ===", module.name).cyan().bold(),
                result
            ));
        }

        if let Some(error) = &session.error {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }

        output
    }

    /// Format the output of a single-step command
    pub fn format_operation(output: &OperationOutput) -> String {
        match output {
            OperationOutput::Text(text) => text.clone(),
            OperationOutput::Verdict(accepted) => accepted.to_string(),
            OperationOutput::Modules(modules) => modules
                .iter()
                .map(|module| format!("- {}", module))
                .collect::<Vec<_>>()
                .join("\n"),
            OperationOutput::Spawned(name) => format!("Spawned {}", name),
        }
    }

    /// Format the output of a single-step command as JSON
    pub fn format_operation_json(output: &OperationOutput) -> String {
        let value = match output {
            OperationOutput::Text(text) => json!({ "result": text }),
            OperationOutput::Verdict(accepted) => json!({ "valid": accepted }),
            OperationOutput::Modules(modules) => json!({ "modules": modules }),
            OperationOutput::Spawned(name) => json!({ "spawned": name }),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format audit entries as a JSON array
    pub fn format_history_json(entries: &[LogEntry]) -> String {
        serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format audit entries, one line each
    pub fn format_history(entries: &[LogEntry]) -> String {
        let mut output = Self::section_header(&format!("Audit Log ({} entries)", entries.len()));

        for entry in entries {
            let action = if entry.is_think() {
                entry.action.as_str().green()
            } else {
                entry.action.as_str().dimmed()
            };
            let line = format!(
                "{} {:<28} {:<9}",
                entry.timestamp.format("%H:%M:%S%.3f").to_string().dimmed(),
                entry.agent_name,
                action
            );
            if entry.result.is_empty() {
                output.push_str(&format!("{}\n", line.trim_end()));
            } else {
                output.push_str(&format!("{} {}\n", line, Self::preview(&entry.result)));
            }
        }

        output
    }

    fn status(session: &Session) -> String {
        match session.status {
            Some(status) if status.is_success() => status.as_str().green().to_string(),
            Some(status) => status.as_str().red().to_string(),
            None => "running".yellow().to_string(),
        }
    }

    /// First line of `text`, cut to a fixed width
    fn preview(text: &str) -> String {
        let first = text.lines().next().unwrap_or_default().trim();
        if first.chars().count() > HISTORY_PREVIEW || text.lines().nth(1).is_some() {
            let cut: String = first.chars().take(HISTORY_PREVIEW).collect();
            format!("{}...", cut)
        } else {
            first.to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
