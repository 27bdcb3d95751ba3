//! CLI command definitions

use armykit_application::Operation;
use armykit_domain::{DecompositionRule, ValidationRule};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for session results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report: spec, modules, results and agents
    Full,
    /// Only the per-module results
    Results,
    /// JSON output
    Json,
}

/// CLI arguments for armykit
#[derive(Parser, Debug)]
#[command(name = "armykit")]
#[command(author, version, about = "Agent hierarchy - turn a request into per-module results")]
#[command(long_about = r#"
armykit routes a request through a short-lived hierarchy of AI agents:

1. MasterAssistantAI interprets the request into a spec
2. MasterAgent validates the spec
3. ManagerAgent breaks it into modules
4. Each module gets a Submanager -> TeamLeader -> MiniArmy branch, and the
   MiniArmy produces the module's result

Every agent is dissolved once its work is done; all thoughts and
dissolutions are recorded in the audit log (--history).

Configuration files are loaded from (in priority order):
1. ARMYKIT_* environment variables (e.g. ARMYKIT_PROVIDER__KIND=ollama)
2. --config <path>     Explicit config file
3. ./armykit.toml      Project-level config
4. ~/.config/armykit/config.toml   Global config

Single steps run one agent and dissolve it:
  armykit interpret|validate|decompose <TEXT>
  armykit spawn-submanager|spawn-team-leader|spawn-mini-army <NAME>
  armykit execute-feature <FEATURE>
  armykit history        Entries recorded in the JSONL audit log

Example:
  armykit "Build a todo app with login"
  armykit --provider ollama --model llama3 "Build a chat server"
  armykit --provider deepseek --list-models
  armykit --audit-log audit.jsonl validate "A todo app with login"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// The request to hand to the agent hierarchy
    pub request: Option<String>,

    /// Think backend (openai, azure, github, google, deepseek, sherpa, local, gpt4all, ollama)
    #[arg(short, long, value_name = "KIND")]
    pub provider: Option<String>,

    /// Model name for the selected backend
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Validation rule (substring, verdict)
    #[arg(long, value_name = "RULE")]
    pub validation: Option<ValidationRule>,

    /// Decomposition rule (fixed, list)
    #[arg(long, value_name = "RULE")]
    pub decomposition: Option<DecompositionRule>,

    /// List models offered by the backend and exit
    #[arg(long)]
    pub list_models: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Print the audit log after the session
    #[arg(long)]
    pub history: bool,

    /// Mirror audit entries to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Also write diagnostics to daily log files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Single-step commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interpret a request into a spec (MasterAssistantAI)
    Interpret { user_input: String },

    /// Validate a spec (MasterAgent)
    Validate { spec: String },

    /// Break a spec into modules (ManagerAgent)
    Decompose { spec: String },

    /// Create and dissolve a submanager for a domain
    SpawnSubmanager { domain: String },

    /// Create and dissolve a team leader for a module
    SpawnTeamLeader { module: String },

    /// Create and dissolve a mini army for a feature
    SpawnMiniArmy { feature: String },

    /// Generate the result for one feature (MiniArmy)
    ExecuteFeature { feature: String },

    /// Print the entries recorded in the JSONL audit log
    History,
}

impl Command {
    /// The role operation this command runs, or `None` for `history`.
    pub fn operation(&self) -> Option<Operation> {
        let operation = match self {
            Command::Interpret { user_input } => Operation::Interpret(user_input.clone()),
            Command::Validate { spec } => Operation::Validate(spec.clone()),
            Command::Decompose { spec } => Operation::Decompose(spec.clone()),
            Command::SpawnSubmanager { domain } => Operation::SpawnSubmanager(domain.clone()),
            Command::SpawnTeamLeader { module } => Operation::SpawnTeamLeader(module.clone()),
            Command::SpawnMiniArmy { feature } => Operation::SpawnMiniArmy(feature.clone()),
            Command::ExecuteFeature { feature } => Operation::ExecuteFeature(feature.clone()),
            Command::History => return None,
        };
        Some(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_with_defaults() {
        let cli = Cli::parse_from(["armykit", "build a todo app"]);
        assert_eq!(cli.request.as_deref(), Some("build a todo app"));
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputFormat::Full);
        assert!(cli.provider.is_none());
        assert!(cli.validation.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "armykit",
            "--provider",
            "ollama",
            "-m",
            "llama3",
            "--validation",
            "verdict",
            "--decomposition",
            "list",
            "-o",
            "json",
            "--history",
            "-vv",
            "x",
        ]);
        assert_eq!(cli.provider.as_deref(), Some("ollama"));
        assert_eq!(cli.model.as_deref(), Some("llama3"));
        assert_eq!(cli.validation, Some(ValidationRule::Verdict));
        assert_eq!(cli.decomposition, Some(DecompositionRule::List));
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.history);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_unknown_rule() {
        assert!(Cli::try_parse_from(["armykit", "--validation", "vibes", "x"]).is_err());
    }

    #[test]
    fn test_parse_single_step_commands() {
        let cli = Cli::parse_from(["armykit", "-o", "json", "validate", "A todo app"]);
        assert!(cli.request.is_none());
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(
            cli.command.and_then(|c| c.operation()),
            Some(Operation::Validate("A todo app".to_string()))
        );

        let cli = Cli::parse_from(["armykit", "spawn-team-leader", "UI"]);
        assert_eq!(
            cli.command,
            Some(Command::SpawnTeamLeader {
                module: "UI".to_string()
            })
        );

        let cli = Cli::parse_from(["armykit", "execute-feature", "Login form"]);
        assert_eq!(
            cli.command.and_then(|c| c.operation()),
            Some(Operation::ExecuteFeature("Login form".to_string()))
        );
    }

    #[test]
    fn test_history_has_no_operation() {
        let cli = Cli::parse_from(["armykit", "history"]);
        assert_eq!(cli.command, Some(Command::History));
        assert!(Command::History.operation().is_none());
    }

    #[test]
    fn test_single_step_requires_text() {
        assert!(Cli::try_parse_from(["armykit", "interpret"]).is_err());
    }
}
