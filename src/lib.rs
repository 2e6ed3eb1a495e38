//! # Shortlinks
//!
//! Short-code allocation and storage engine: collision-free code generation,
//! URL deduplication, per-owner tracking, and soft-deletion over three
//! interchangeable storage backends.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, the storage trait, and the
//!   async delete pipeline
//! - **Application Layer** ([`application`]) - The allocator orchestrating
//!   generator and storage
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory, file-snapshotted,
//!   and PostgreSQL backends, plus audit sinks
//!
//! ## Backends
//!
//! | Variant | Durability | Selection |
//! |---------|------------|-----------|
//! | [`infrastructure::persistence::MemoryStore`] | none | default |
//! | [`infrastructure::persistence::FileStore`] | JSON snapshot per mutation | `FILE_STORAGE_PATH` |
//! | [`infrastructure::persistence::PgStore`] | PostgreSQL | `DATABASE_URL` |
//!
//! All three expose the identical [`domain::repositories::LinkStore`]
//! contract; callers never learn which one is active.
//!
//! ## Quick start
//!
//! ```ignore
//! let config = shortlinks::config::load_from_env()?;
//! let (state, _worker) = shortlinks::AppState::build(&config).await?;
//!
//! let allocation = state.allocator.allocate("https://example.com", 0).await?;
//! println!("{}", allocation.code);
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;

pub use error::StoreError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Allocation, Allocator, BatchRequest};
    pub use crate::domain::entities::{Resolution, ShortLink};
    pub use crate::domain::repositories::{InsertOutcome, LinkStore};
    pub use crate::error::StoreError;
    pub use crate::state::AppState;
}
