//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`delete_request`] - Bulk delete request model
//! - [`delete_worker`] - Asynchronous delete processing worker
//!
//! # Design Principles
//!
//! - The domain layer has no dependencies on infrastructure concerns
//! - The [`repositories::LinkStore`] trait defines the contract implemented by
//!   the backends in `crate::infrastructure::persistence`
//! - Allocation logic is encapsulated in `crate::application::services`
//!
//! # Delete Processing Flow
//!
//! 1. A caller builds a [`delete_request::DeleteRequest`]
//! 2. The request is sent to a bounded channel (backpressure on a full queue)
//! 3. [`delete_worker::run_delete_worker`] applies the batch via
//!    [`repositories::LinkStore::soft_delete`]
//! 4. The caller has already answered; failures surface only in logs

pub mod delete_request;
pub mod delete_worker;
pub mod entities;
pub mod repositories;
