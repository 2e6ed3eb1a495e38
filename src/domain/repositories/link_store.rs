//! Storage trait for short link records.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::Resolution;
use crate::error::StoreError;

/// Outcome of a successful [`LinkStore::try_insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was written under the caller's candidate code.
    Inserted,
    /// An active record for the same URL already existed; nothing was written.
    /// Carries the canonical code of that record.
    Existing { code: String },
}

/// Storage interface shared by all backends.
///
/// Callers never know which variant is active; the backend is chosen once at
/// startup and injected everywhere as `Arc<dyn LinkStore>`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryStore`] - process-lifetime map
/// - [`crate::infrastructure::persistence::FileStore`] - map with a JSON snapshot
/// - [`crate::infrastructure::persistence::PgStore`] - PostgreSQL table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Looks up a code, distinguishing missing, deleted, and active records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on backend failure.
    async fn resolve(&self, code: &str) -> Result<Resolution, StoreError>;

    /// Inserts a record if the code slot is free and no active record for
    /// `url` exists.
    ///
    /// The dedup check and the write are one atomic step: concurrent calls for
    /// the same URL never both insert, and at most one record ever becomes the
    /// canonical one. A soft-deleted record still occupies its code slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CodeCollision`] if the code is held by an
    /// unrelated URL, [`StoreError::Database`] on backend failure.
    async fn try_insert(
        &self,
        code: &str,
        url: &str,
        owner_id: i64,
    ) -> Result<InsertOutcome, StoreError>;

    /// Returns the active records of one owner as a code-to-URL map.
    ///
    /// An owner without records gets an empty map, not an error.
    async fn list_by_owner(&self, owner_id: i64) -> Result<HashMap<String, String>, StoreError>;

    /// Marks each code deleted, but only where it is owned by `owner_id`.
    ///
    /// Codes owned by someone else or unknown codes are silently skipped, so
    /// the operation leaks nothing about other owners' records. Best-effort
    /// bulk semantics: no partial-failure reporting.
    async fn soft_delete(&self, codes: &[String], owner_id: i64) -> Result<(), StoreError>;
}
