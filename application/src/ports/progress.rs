//! Progress notification port
//!
//! Defines the interface for reporting progress during a session.

use armykit_domain::{ModuleSpec, Session, SessionError};

/// Callback for progress updates during a session
///
/// Implementations live in the presentation layer (console, chat panel, ...).
/// The driver calls them in this order:
///
/// 1. [`on_spec_interpreted`](Self::on_spec_interpreted)
/// 2. [`on_validation`](Self::on_validation)
/// 3. per module, if validated: [`on_module_start`](Self::on_module_start)
///    then [`on_module_result`](Self::on_module_result)
/// 4. exactly one of [`on_session_complete`](Self::on_session_complete) or
///    [`on_session_failed`](Self::on_session_failed)
///
/// A session that fails early stops the sequence at the failing step and
/// still ends with `on_session_failed`.
pub trait ProgressNotifier: Send + Sync {
    /// Called once the assistant has produced a spec
    fn on_spec_interpreted(&self, spec: &str);

    /// Called with the validator's decision
    fn on_validation(&self, accepted: bool);

    /// Called before a module's branch is spawned
    fn on_module_start(&self, module: &ModuleSpec);

    /// Called with the module's result, before its branch is dissolved
    fn on_module_result(&self, module: &ModuleSpec, result: &str);

    /// Called after every module was processed and all agents dissolved
    fn on_session_complete(&self, session: &Session);

    /// Called exactly once when the session ends without completing
    fn on_session_failed(&self, error: &SessionError);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_spec_interpreted(&self, _spec: &str) {}
    fn on_validation(&self, _accepted: bool) {}
    fn on_module_start(&self, _module: &ModuleSpec) {}
    fn on_module_result(&self, _module: &ModuleSpec, _result: &str) {}
    fn on_session_complete(&self, _session: &Session) {}
    fn on_session_failed(&self, _error: &SessionError) {}
}
