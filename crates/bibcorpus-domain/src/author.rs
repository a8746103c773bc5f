//! Author representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense 0-based surrogate key for an author.
///
/// Ids are assigned in first-seen order during ingestion and index
/// directly into the corpus author list, so they are stable for the
/// lifetime of a loaded corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorId(pub usize);

impl AuthorId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An author, keyed by the exact name string from the source.
///
/// Names are compared literally — no normalization or case-folding —
/// so two spellings of the same person are distinct authors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Sort key as `(surname, given names)`.
    pub fn name_sort_key(&self) -> (String, String) {
        split_surname(&self.name)
    }
}

/// Split a display name into `(surname, given names)`.
///
/// The surname is the last whitespace-separated token; everything before
/// it is the given-name part. A single-token name has empty given names.
pub fn split_surname(name: &str) -> (String, String) {
    let mut parts: Vec<&str> = name.split(' ').filter(|s| !s.is_empty()).collect();
    match parts.pop() {
        Some(surname) => (surname.to_string(), parts.join(" ")),
        None => (String::new(), String::new()),
    }
}
