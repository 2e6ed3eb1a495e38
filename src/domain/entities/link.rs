//! Short link entity representing a code-to-URL mapping.

use serde::{Deserialize, Serialize};

/// Owner id used for records created without an authenticated owner.
pub const ANONYMOUS_OWNER: i64 = 0;

/// A short link record.
///
/// `code` is the primary key; a soft-deleted record keeps occupying its code
/// slot forever, so a tombstone can never be silently resurrected by a later
/// insert. Ownership is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub url: String,
    pub owner_id: i64,
    pub deleted: bool,
}

impl ShortLink {
    /// Creates a new active record.
    pub fn new(code: impl Into<String>, url: impl Into<String>, owner_id: i64) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            owner_id,
            deleted: false,
        }
    }

    /// Returns true if the record is live (not soft-deleted).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// Outcome of resolving a code.
///
/// Distinguishes "never existed" from "existed but was deleted" so the caller
/// can answer with a distinct gone signal instead of a plain miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No record for this code, active or deleted.
    Missing,
    /// A record exists but was soft-deleted; never served for redirection.
    Gone,
    /// An active record; carries the original URL.
    Active(String),
}

impl Resolution {
    /// Returns the URL only for an active record.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Active(url) => Some(url),
            _ => None,
        }
    }
}
