//! Audit sink posting events to a remote HTTP receiver.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::infrastructure::audit::publisher::{AuditEvent, AuditSink};

/// Events buffered between `deliver` and the forwarder task.
const FORWARD_QUEUE_CAPACITY: usize = 64;

/// Fire-and-forget HTTP sink.
///
/// Delivery runs on an explicit forwarder task fed through a bounded channel,
/// not as detached one-off spawns, so the task can be joined on shutdown and
/// delivery errors end up in one place. `deliver` never blocks: when the
/// buffer is full the event is dropped.
pub struct HttpAuditSink {
    tx: mpsc::Sender<AuditEvent>,
    worker: JoinHandle<()>,
}

impl HttpAuditSink {
    /// Spawns the forwarder task posting to `endpoint`.
    pub fn new(endpoint: String) -> Self {
        let (tx, rx) = mpsc::channel(FORWARD_QUEUE_CAPACITY);
        let worker = tokio::spawn(forward_events(rx, endpoint));
        Self { tx, worker }
    }

    /// Stops accepting events and waits for the forwarder to finish the
    /// buffered ones.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.worker.await;
    }
}

impl AuditSink for HttpAuditSink {
    fn id(&self) -> &str {
        "audit-http"
    }

    fn deliver(&self, event: &AuditEvent) {
        if self.tx.try_send(event.clone()).is_err() {
            tracing::warn!("audit http queue full, event dropped");
        }
    }
}

async fn forward_events(mut rx: mpsc::Receiver<AuditEvent>, endpoint: String) {
    while let Some(event) = rx.recv().await {
        let url = endpoint.clone();
        // ureq is a blocking client; keep it off the async workers.
        let posted =
            tokio::task::spawn_blocking(move || ureq::post(&url).send_json(&event)).await;

        match posted {
            Ok(Err(e)) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "audit http delivery failed")
            }
            Err(e) => tracing::warn!(error = %e, "audit http delivery task panicked"),
            Ok(Ok(_)) => {}
        }
    }
    tracing::debug!("audit http forwarder stopped");
}
