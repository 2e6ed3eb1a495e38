//! Core domain entities of the storage engine.
//!
//! Entities are plain data structures without business logic:
//!
//! - [`ShortLink`] - A code-to-URL mapping with owner and deletion state
//! - [`Resolution`] - Three-way lookup outcome (missing / gone / active)

pub mod link;

pub use link::{ANONYMOUS_OWNER, Resolution, ShortLink};
