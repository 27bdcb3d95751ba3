//! CLI entrypoint for armykit
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Result, anyhow, bail};
use armykit_application::{
    AuditLog, BoundCapability, NoProgress, Operation, ProgressNotifier, RunOperationUseCase,
    RunSessionUseCase, ThinkCapability,
};
use armykit_domain::SessionError;
use armykit_infrastructure::{ConfigLoader, FileConfig, JsonlAuditSink, resolve_capability};
use armykit_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose, cli.log_dir.as_deref());

    info!("Starting armykit");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    if cli.command == Some(Command::History) {
        print_recorded_history(&cli, &config)?;
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    // Resolve the backend once; every agent of the session shares it.
    let capability = resolve_capability(&config.provider)?;

    if cli.list_models {
        let Some(capability) = capability else {
            bail!("{}", SessionError::Configuration);
        };
        for model in capability.available_models().await? {
            println!("{}", model);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let operation = cli.command.as_ref().and_then(Command::operation);
    let request = cli.request.clone().filter(|r| !r.trim().is_empty());
    if operation.is_none() && request.is_none() {
        bail!("A request is required, e.g. armykit \"Build a todo app\"");
    }

    let audit = AuditLog::global();
    if let Some(path) = audit_log_path(&cli, &config) {
        match JsonlAuditSink::new(&path) {
            Some(sink) => {
                info!("Mirroring audit log to {}", sink.path().display());
                audit.attach_sink(Arc::new(sink));
            }
            None => warn!("Audit log file disabled: {}", path.display()),
        }
    }

    // Ctrl-C cancels the running session
    let cancellation = CancellationToken::new();
    let on_signal = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling session");
            on_signal.cancel();
        }
    });

    if let Some(operation) = operation {
        return run_single_step(&cli, &config, &operation, capability, audit, cancellation).await;
    }
    let request = request.unwrap_or_default();

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!();
        println!("+============================================================+");
        println!("|           armykit - Agent Hierarchy                        |");
        println!("+============================================================+");
        println!();
        println!("Request: {}", request);
        if let Some(capability) = &capability {
            println!("Backend: {} ({})", capability.name(), capability.model());
        }
        println!();
    }

    let use_case = RunSessionUseCase::new(audit.clone())
        .with_policy(config.pipeline.to_policy())
        .with_cancellation(cancellation);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet || cli.output == OutputFormat::Json {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let session = use_case
        .execute(&request, progress.as_ref(), capability)
        .await;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&session),
        OutputFormat::Results => ConsoleFormatter::format_results(&session),
        OutputFormat::Json => ConsoleFormatter::format_json(&session),
    };
    println!("{}", output);

    if cli.history {
        println!("{}", ConsoleFormatter::format_history(&audit.history()));
    }

    let succeeded = session.status.is_some_and(|s| s.is_success());
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one role operation with a fresh agent against the global log.
async fn run_single_step(
    cli: &Cli,
    config: &FileConfig,
    operation: &Operation,
    capability: Option<BoundCapability>,
    audit: &AuditLog,
    cancellation: CancellationToken,
) -> Result<ExitCode> {
    if capability.is_none() {
        warn!("No think backend configured; thinking steps return a placeholder");
    }

    let output = RunOperationUseCase::new(audit.clone())
        .with_policy(config.pipeline.to_policy())
        .with_cancellation(cancellation)
        .execute(operation, capability)
        .await?;

    match cli.output {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_operation_json(&output)),
        OutputFormat::Full | OutputFormat::Results => {
            println!("{}", ConsoleFormatter::format_operation(&output))
        }
    }

    if cli.history {
        println!("{}", ConsoleFormatter::format_history(&audit.history()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the entries previously mirrored to the JSONL audit log.
fn print_recorded_history(cli: &Cli, config: &FileConfig) -> Result<()> {
    let Some(path) = audit_log_path(cli, config) else {
        bail!("No audit log file configured; pass --audit-log or set [audit] jsonl_path");
    };
    let entries = JsonlAuditSink::read_history(&path)
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

    let output = match cli.output {
        OutputFormat::Json => ConsoleFormatter::format_history_json(&entries),
        OutputFormat::Full | OutputFormat::Results => ConsoleFormatter::format_history(&entries),
    };
    println!("{}", output);
    Ok(())
}

fn audit_log_path(cli: &Cli, config: &FileConfig) -> Option<PathBuf> {
    cli.audit_log.clone().or_else(|| config.audit.jsonl_path.clone())
}

/// Merge config sources, then apply CLI overrides on top.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(provider) = &cli.provider {
        config.provider.kind = provider.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(model) = &cli.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(rule) = cli.validation {
        config.pipeline.validation = rule;
    }
    if let Some(rule) = cli.decomposition {
        config.pipeline.decomposition = rule;
    }

    config.validate()?;
    Ok(config)
}
