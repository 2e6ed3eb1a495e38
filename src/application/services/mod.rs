//! Business logic services for the application layer.

pub mod allocator;

pub use allocator::{Allocation, Allocator, BatchAllocation, BatchRequest, DEFAULT_MAX_ATTEMPTS};
