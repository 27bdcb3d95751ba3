//! Diagnostic tracing setup.
//!
//! - **Tracing (this module)**: operational diagnostics to stderr, filtered
//!   by `-v` count or `RUST_LOG`; optionally mirrored to daily files.
//! - **Audit log**: the product record of agent actions, written through
//!   the `AuditSink` port. Unaffected by verbosity.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter for the given `-v` count. `RUST_LOG` wins when set.
fn filter_for(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Initialize the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub fn init(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "armykit.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter_for(verbose))
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter_for(verbose))
                .with(stderr_layer)
                .init();
            None
        }
    }
}
