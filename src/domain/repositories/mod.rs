//! Storage trait definitions for the domain layer.
//!
//! The [`LinkStore`] trait abstracts the three storage backends behind one
//! contract. Concrete implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.

pub mod link_store;

pub use link_store::{InsertOutcome, LinkStore};

#[cfg(test)]
pub use link_store::MockLinkStore;
