//! File-snapshotted storage backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::entities::{ANONYMOUS_OWNER, Resolution, ShortLink};
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

/// On-disk snapshot document.
///
/// The current schema stores full records under `links`. Early deployments
/// wrote a bare code-to-URL map under `Data` with no owner or deletion
/// metadata; such files are still read, their entries becoming active records
/// of the anonymous owner.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    links: Vec<ShortLink>,

    #[serde(default, alias = "Data", skip_serializing)]
    data: HashMap<String, String>,
}

/// Map backend with a durable JSON snapshot.
///
/// Mutations rewrite the whole snapshot synchronously inside the same critical
/// section as the in-memory change. A failed write is logged and the in-memory
/// mutation stands; durability is best-effort, not transactional.
pub struct FileStore {
    path: PathBuf,
    links: Mutex<HashMap<String, ShortLink>>,
}

impl FileStore {
    /// Opens the store, loading the snapshot at `path`.
    ///
    /// An absent or unreadable snapshot starts the store empty; the engine
    /// must come up even when the file is damaged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let links = match Self::load(&path) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "snapshot unreadable, starting empty"
                );
                HashMap::new()
            }
        };

        tracing::info!(path = %path.display(), records = links.len(), "snapshot loaded");
        Self {
            path,
            links: Mutex::new(links),
        }
    }

    fn load(path: &Path) -> anyhow::Result<HashMap<String, ShortLink>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let raw = std::fs::read_to_string(path)?;
        let doc: SnapshotDocument = serde_json::from_str(&raw)?;

        let mut links: HashMap<String, ShortLink> = doc
            .links
            .into_iter()
            .map(|record| (record.code.clone(), record))
            .collect();

        for (code, url) in doc.data {
            links
                .entry(code.clone())
                .or_insert_with(|| ShortLink::new(code, url, ANONYMOUS_OWNER));
        }

        Ok(links)
    }

    /// Serializes the whole map to disk. Called with the lock held.
    fn persist(&self, links: &HashMap<String, ShortLink>) -> Result<(), StoreError> {
        let doc = SnapshotDocument {
            links: links.values().cloned().collect(),
            data: HashMap::new(),
        };

        let raw = serde_json::to_vec(&doc).map_err(|e| StoreError::Snapshot {
            path: self.path.clone(),
            source: e.into(),
        })?;

        std::fs::write(&self.path, raw).map_err(|e| StoreError::Snapshot {
            path: self.path.clone(),
            source: e,
        })
    }

    fn persist_best_effort(&self, links: &HashMap<String, ShortLink>) {
        if let Err(e) = self.persist(links) {
            tracing::error!(error = %e, "snapshot write failed, in-memory state kept");
        }
    }
}

#[async_trait]
impl LinkStore for FileStore {
    async fn resolve(&self, code: &str) -> Result<Resolution, StoreError> {
        let links = self.links.lock().await;
        Ok(match links.get(code) {
            None => Resolution::Missing,
            Some(record) if record.deleted => Resolution::Gone,
            Some(record) => Resolution::Active(record.url.clone()),
        })
    }

    async fn try_insert(
        &self,
        code: &str,
        url: &str,
        owner_id: i64,
    ) -> Result<InsertOutcome, StoreError> {
        let mut links = self.links.lock().await;

        if let Some(existing) = links.values().find(|r| r.is_active() && r.url == url) {
            return Ok(InsertOutcome::Existing {
                code: existing.code.clone(),
            });
        }

        if links.contains_key(code) {
            return Err(StoreError::CodeCollision {
                code: code.to_string(),
            });
        }

        links.insert(code.to_string(), ShortLink::new(code, url, owner_id));
        self.persist_best_effort(&links);
        Ok(InsertOutcome::Inserted)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<HashMap<String, String>, StoreError> {
        let links = self.links.lock().await;
        Ok(links
            .values()
            .filter(|r| r.is_active() && r.owner_id == owner_id)
            .map(|r| (r.code.clone(), r.url.clone()))
            .collect())
    }

    async fn soft_delete(&self, codes: &[String], owner_id: i64) -> Result<(), StoreError> {
        let mut links = self.links.lock().await;
        let mut changed = false;

        for code in codes {
            if let Some(record) = links.get_mut(code)
                && record.owner_id == owner_id
                && !record.deleted
            {
                record.deleted = true;
                changed = true;
            }
        }

        if changed {
            self.persist_best_effort(&links);
        }
        Ok(())
    }
}
