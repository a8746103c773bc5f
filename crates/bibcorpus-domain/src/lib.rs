//! Domain types for the bibcorpus suite.
//!
//! This crate defines the entities every other bibcorpus crate works with:
//! - `PublicationKind` — the fixed four-way publication classification
//! - `Publication` — an admitted record with its ordered author list
//! - `Author` / `AuthorId` — authors keyed by exact name, with dense
//!   surrogate ids assigned in first-seen order

pub mod author;
pub mod publication;

pub use author::{split_surname, Author, AuthorId};
pub use publication::{Publication, PublicationKind};
