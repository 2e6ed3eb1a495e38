//! Storage backend implementations.
//!
//! Three interchangeable implementations of
//! [`crate::domain::repositories::LinkStore`], selected once at startup:
//!
//! - [`MemoryStore`] - transient in-memory map
//! - [`FileStore`] - in-memory map with a synchronous JSON snapshot
//! - [`PgStore`] - PostgreSQL table, no in-memory cache

pub mod file_store;
pub mod memory_store;
pub mod pg_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
