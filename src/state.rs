//! Engine construction and dependency wiring.
//!
//! The storage backend, allocator, audit publisher, and delete worker are
//! built exactly once here and handed to consumers by reference; there is no
//! process-wide registry to reach into.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::services::Allocator;
use crate::config::{Config, StorageKind};
use crate::domain::delete_request::DeleteRequest;
use crate::domain::delete_worker::spawn_delete_worker;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::audit::{AuditPublisher, FileAuditSink, HttpAuditSink};
use crate::infrastructure::persistence::{FileStore, MemoryStore, PgStore};
use crate::utils::code_generator::CodeGenerator;

/// Shared handles of one engine instance.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub allocator: Arc<Allocator<dyn LinkStore, CodeGenerator>>,
    pub delete_tx: mpsc::Sender<DeleteRequest>,
    pub audit: Arc<AuditPublisher>,
}

impl AppState {
    /// Builds the engine from configuration.
    ///
    /// Selects the storage backend (the single place backend kinds are
    /// branched on), registers configured audit sinks, and spawns the delete
    /// worker. The returned handle joins the worker after every
    /// `delete_tx` clone is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the relational backend cannot be reached or
    /// migrated.
    pub async fn build(config: &Config) -> Result<(Self, JoinHandle<()>)> {
        let store: Arc<dyn LinkStore> = match config.storage_kind() {
            StorageKind::Postgres => {
                let Some(url) = config.database_url.as_deref() else {
                    anyhow::bail!("relational backend selected without DATABASE_URL");
                };
                Arc::new(
                    PgStore::connect(
                        url,
                        config.db_max_connections,
                        Duration::from_secs(config.db_connect_timeout),
                    )
                    .await?,
                )
            }
            StorageKind::Snapshot => {
                let Some(path) = config.snapshot_path.as_deref() else {
                    anyhow::bail!("snapshot backend selected without FILE_STORAGE_PATH");
                };
                Arc::new(FileStore::open(path))
            }
            StorageKind::Memory => Arc::new(MemoryStore::new()),
        };

        let audit = Arc::new(AuditPublisher::new());
        if let Some(path) = &config.audit_file {
            audit.register(Arc::new(FileAuditSink::new(path))).await;
        }
        if let Some(url) = &config.audit_url {
            audit.register(Arc::new(HttpAuditSink::new(url.clone()))).await;
        }

        let generator = Arc::new(CodeGenerator::new(config.code_length, &config.alphabet));
        let allocator = Arc::new(
            Allocator::new(store.clone(), generator, config.max_attempts)
                .with_audit(audit.clone()),
        );

        let (delete_tx, worker) = spawn_delete_worker(store.clone(), config.delete_queue_capacity);

        Ok((
            Self {
                store,
                allocator,
                delete_tx,
                audit,
            },
            worker,
        ))
    }

    /// Queues a bulk soft-delete for the background worker.
    ///
    /// Blocks only when the queue is at capacity. Completion is not
    /// acknowledged; the worker logs failures.
    pub async fn enqueue_delete(&self, owner_id: i64, codes: Vec<String>) -> Result<()> {
        self.delete_tx
            .send(DeleteRequest::new(owner_id, codes))
            .await
            .map_err(|_| anyhow::anyhow!("delete worker is gone"))
    }
}
