//! Audit sink appending JSON lines to a local file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::infrastructure::audit::publisher::{AuditEvent, AuditSink};

/// Synchronous file sink: one JSON line per event.
///
/// Delivery is best-effort; a failed append is logged and forgotten.
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", event.to_json())
    }
}

impl AuditSink for FileAuditSink {
    fn id(&self) -> &str {
        "audit-file"
    }

    fn deliver(&self, event: &AuditEvent) {
        if let Err(e) = self.append(event) {
            tracing::warn!(path = %self.path.display(), error = %e, "audit file append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let sink = FileAuditSink::new(&path);

        sink.deliver(&AuditEvent::allocation(1, "https://a.example"));
        sink.deliver(&AuditEvent::allocation(2, "https://b.example"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("https://a.example"));
        assert!(lines[1].contains("\"user_id\":\"2\""));
    }

    #[test]
    fn test_failed_append_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path cannot be opened for appending.
        let sink = FileAuditSink::new(dir.path());
        sink.deliver(&AuditEvent::allocation(1, "https://a.example"));
    }
}
