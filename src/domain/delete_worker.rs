//! Background worker applying queued soft-deletes.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::delete_request::DeleteRequest;
use crate::domain::repositories::LinkStore;

/// Default capacity of the delete queue.
pub const DEFAULT_DELETE_QUEUE_CAPACITY: usize = 100;

/// Spawns the delete worker and returns the producer handle.
///
/// The sender's `send().await` blocks the producer when the queue is full (no
/// drop policy). Dropping every sender lets the worker drain what is already
/// queued and then exit; work never enqueued is simply lost on shutdown.
pub fn spawn_delete_worker(
    store: Arc<dyn LinkStore>,
    capacity: usize,
) -> (mpsc::Sender<DeleteRequest>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity);
    let handle = tokio::spawn(run_delete_worker(rx, store));
    (tx, handle)
}

/// Drains the queue for the lifetime of the channel.
///
/// Failures are logged and the worker moves on; a single bad batch must not
/// stall deletion for everyone else.
pub async fn run_delete_worker(mut rx: mpsc::Receiver<DeleteRequest>, store: Arc<dyn LinkStore>) {
    while let Some(req) = rx.recv().await {
        if let Err(e) = store.soft_delete(&req.codes, req.owner_id).await {
            tracing::warn!(
                owner_id = req.owner_id,
                codes = ?req.codes,
                error = %e,
                "soft delete batch failed"
            );
        }
    }
    tracing::debug!("delete worker stopped");
}
