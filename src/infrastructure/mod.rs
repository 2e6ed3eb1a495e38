//! Infrastructure layer: storage backends and audit delivery.

pub mod audit;
pub mod persistence;
