//! Transient in-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::{Resolution, ShortLink};
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

/// Process-lifetime map backend; everything is lost on exit.
///
/// One exclusive lock linearizes all mutations. The dedup check and the
/// insert in [`LinkStore::try_insert`] run under the same guard, so two
/// concurrent callers can never both become canonical for one URL.
#[derive(Default)]
pub struct MemoryStore {
    links: Mutex<HashMap<String, ShortLink>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
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

        // Tombstones keep their slot: deleted records still count as occupied.
        if links.contains_key(code) {
            return Err(StoreError::CodeCollision {
                code: code.to_string(),
            });
        }

        links.insert(code.to_string(), ShortLink::new(code, url, owner_id));
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
        for code in codes {
            if let Some(record) = links.get_mut(code)
                && record.owner_id == owner_id
            {
                record.deleted = true;
            }
        }
        Ok(())
    }
}
