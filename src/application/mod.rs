//! Application layer services implementing business logic.
//!
//! Orchestrates domain operations over the storage trait. The only service is
//! [`services::allocator::Allocator`], which turns the stateless code
//! generator and the storage backend into a collision-free allocation API.

pub mod services;
