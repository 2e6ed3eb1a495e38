//! Short code allocation service.

use std::sync::Arc;

use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;
use crate::infrastructure::audit::{AuditEvent, AuditPublisher};
use crate::utils::code_generator::CodeSource;

/// Attempts before allocation gives up.
///
/// Deliberately small: the code space vastly exceeds realistic load, so the
/// loop only absorbs rare collisions rather than implementing a fallback.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Result of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub code: String,
    /// True when the URL already had a canonical code and no write happened.
    pub preexisting: bool,
}

/// One item of a bulk allocation request, tagged with a caller correlation id.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub id: String,
    pub url: String,
}

/// One successfully allocated item of a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAllocation {
    pub id: String,
    pub code: String,
}

/// Orchestrates the code generator and the storage backend.
///
/// Retries collisions, reports dedup hits as `preexisting`, and notifies the
/// audit publisher after each fresh insert.
pub struct Allocator<S: LinkStore + ?Sized, G: CodeSource + ?Sized> {
    store: Arc<S>,
    codes: Arc<G>,
    max_attempts: u32,
    audit: Option<Arc<AuditPublisher>>,
}

impl<S: LinkStore + ?Sized, G: CodeSource + ?Sized> Allocator<S, G> {
    /// Creates an allocator without audit notification.
    pub fn new(store: Arc<S>, codes: Arc<G>, max_attempts: u32) -> Self {
        Self {
            store,
            codes,
            max_attempts,
            audit: None,
        }
    }

    /// Attaches an audit publisher notified on every fresh allocation.
    pub fn with_audit(mut self, audit: Arc<AuditPublisher>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Allocates a code for `url`, or returns the existing canonical one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationExhausted`] when every attempt hit an
    /// occupied code; any other backend error propagates untouched.
    pub async fn allocate(&self, url: &str, owner_id: i64) -> Result<Allocation, StoreError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.codes.next_code();

            match self.store.try_insert(&candidate, url, owner_id).await {
                Ok(InsertOutcome::Inserted) => {
                    if let Some(audit) = &self.audit {
                        audit.notify(AuditEvent::allocation(owner_id, url)).await;
                    }
                    return Ok(Allocation {
                        code: candidate,
                        preexisting: false,
                    });
                }
                Ok(InsertOutcome::Existing { code }) => {
                    return Ok(Allocation {
                        code,
                        preexisting: true,
                    });
                }
                Err(StoreError::CodeCollision { code }) => {
                    tracing::debug!(code = %code, attempt, "candidate code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StoreError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Applies [`Self::allocate`] to each item independently.
    ///
    /// A failing item does not abort the batch; it is logged and omitted from
    /// the result, leaving the caller to report partial success.
    pub async fn allocate_batch(
        &self,
        items: Vec<BatchRequest>,
        owner_id: i64,
    ) -> Vec<BatchAllocation> {
        let mut allocated = Vec::with_capacity(items.len());

        for item in items {
            match self.allocate(&item.url, owner_id).await {
                Ok(allocation) => allocated.push(BatchAllocation {
                    id: item.id,
                    code: allocation.code,
                }),
                Err(e) => {
                    tracing::debug!(id = %item.id, url = %item.url, error = %e, "batch item failed");
                }
            }
        }

        allocated
    }
}
