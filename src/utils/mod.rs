//! Utility functions shared across the engine.
//!
//! - [`code_generator`] - Random short code generation

pub mod code_generator;

pub use code_generator::{CodeGenerator, CodeSource, DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH};
