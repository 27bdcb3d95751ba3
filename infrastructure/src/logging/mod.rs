//! Logging infrastructure: the JSONL audit sink.
//!
//! Provides [`JsonlAuditSink`], a JSONL file writer that implements the
//! [`AuditSink`](armykit_application::AuditSink) port.

mod jsonl_sink;

pub use jsonl_sink::JsonlAuditSink;
