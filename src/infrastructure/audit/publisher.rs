//! Observer registry for audit events.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;

/// A mutation event handed to every registered sink.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// Unix timestamp of the event.
    pub ts: i64,
    pub action: String,
    pub user_id: String,
    pub url: String,
}

impl AuditEvent {
    /// Event for a freshly allocated short code.
    pub fn allocation(owner_id: i64, url: &str) -> Self {
        Self {
            ts: Utc::now().timestamp(),
            action: "shorten".to_string(),
            user_id: owner_id.to_string(),
            url: url.to_string(),
        }
    }

    /// JSON rendering used by the sinks.
    pub fn to_json(&self) -> String {
        // Serialization of this struct cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A named audit event consumer.
///
/// `deliver` must not block the caller for long and must swallow its own
/// failures; the publisher never inspects delivery results.
pub trait AuditSink: Send + Sync {
    /// Stable identity used for registration and deregistration.
    fn id(&self) -> &str;

    /// Hands one event to the sink.
    fn deliver(&self, event: &AuditEvent);
}

/// Fan-out registry of audit sinks, keyed by sink identity.
///
/// Triggered after successful mutating operations. The publisher never
/// participates in storage success or failure decisions.
#[derive(Default)]
pub struct AuditPublisher {
    sinks: RwLock<HashMap<String, Arc<dyn AuditSink>>>,
}

impl AuditPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sink, replacing any previous sink with the same identity.
    pub async fn register(&self, sink: Arc<dyn AuditSink>) {
        let id = sink.id().to_string();
        self.sinks.write().await.insert(id, sink);
    }

    /// Removes the sink with the given identity, if present.
    pub async fn deregister(&self, id: &str) {
        self.sinks.write().await.remove(id);
    }

    /// Delivers the event to every registered sink.
    pub async fn notify(&self, event: AuditEvent) {
        let sinks = self.sinks.read().await;
        for sink in sinks.values() {
            sink.deliver(&event);
        }
    }

    /// Number of registered sinks.
    pub async fn sink_count(&self) -> usize {
        self.sinks.read().await.len()
    }
}
