//! Error taxonomy for the storage engine.
//!
//! Only [`StoreError::CodeCollision`] is recoverable: the allocator absorbs it
//! by retrying with a fresh candidate code. Everything else propagates to the
//! caller untouched, annotated with the failing operation so logs stay useful.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by storage backends and the allocator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The candidate code is already occupied by an unrelated URL.
    ///
    /// Retried internally by the allocator; callers only see it from a direct
    /// `try_insert` with a code of their own choosing.
    #[error("short code already in use: {code}")]
    CodeCollision { code: String },

    /// Every allocation attempt hit an occupied code.
    #[error("gave up allocating a short code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// The relational backend failed; not retried at this layer.
    #[error("database error during {op}")]
    Database {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The snapshot file could not be written.
    ///
    /// Surfaced only from explicit persistence calls; mutations log this and
    /// keep the in-memory state (durability is best-effort).
    #[error("snapshot write failed for {path}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wraps an sqlx error with the name of the failing operation.
    pub fn database(op: &'static str, source: sqlx::Error) -> Self {
        Self::Database { op, source }
    }

    /// Returns true for the recoverable collision case.
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::CodeCollision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_is_recoverable() {
        let err = StoreError::CodeCollision {
            code: "abc123".to_string(),
        };
        assert!(err.is_collision());
    }

    #[test]
    fn test_exhausted_is_not_recoverable() {
        let err = StoreError::AllocationExhausted { attempts: 5 };
        assert!(!err.is_collision());
        assert!(err.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_database_error_names_operation() {
        let err = StoreError::database("insert link", sqlx::Error::PoolClosed);
        assert!(err.to_string().contains("insert link"));
    }
}
