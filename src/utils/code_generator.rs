//! Random short code generation.
//!
//! The generator gives no uniqueness guarantee on its own; collisions are rare
//! (62^6 codes at the default length) and are absorbed by the allocator's
//! retry loop, so a well-distributed non-cryptographic source is enough.

use rand::Rng;

/// Alphanumeric alphabet used in the reference configuration.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Source of candidate codes for the allocator.
///
/// A trait seam so tests can force deterministic candidates.
#[cfg_attr(test, mockall::automock)]
pub trait CodeSource: Send + Sync {
    /// Produces the next candidate code.
    fn next_code(&self) -> String;
}

/// Stateless generator producing fixed-length codes from a fixed alphabet.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl CodeGenerator {
    /// Creates a generator for `length`-character codes over `alphabet`.
    pub fn new(length: usize, alphabet: &str) -> Self {
        Self {
            length,
            alphabet: alphabet.chars().collect(),
        }
    }

    /// Code length this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH, DEFAULT_ALPHABET)
    }
}

impl CodeSource for CodeGenerator {
    fn next_code(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}
