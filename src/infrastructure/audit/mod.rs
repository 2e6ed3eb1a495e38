//! Audit event fan-out.
//!
//! A registry of named sinks notified after successful mutating operations.
//! The publisher never takes part in storage decisions and every sink swallows
//! its own delivery failures.
//!
//! # Sinks
//!
//! - [`FileAuditSink`] - synchronous JSON-line append to a local file
//! - [`HttpAuditSink`] - asynchronous POST to a remote receiver

pub mod file_sink;
pub mod http_sink;
pub mod publisher;

pub use file_sink::FileAuditSink;
pub use http_sink::HttpAuditSink;
pub use publisher::{AuditEvent, AuditPublisher, AuditSink};
