//! Publication domain model

use crate::author::AuthorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four publication kinds the corpus distinguishes.
///
/// The discriminant order is fixed: report columns and per-kind tallies
/// are always emitted Conference Paper, Journal, Book, Book Chapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationKind {
    ConferencePaper,
    Journal,
    Book,
    BookChapter,
}

impl PublicationKind {
    /// All kinds in column order.
    pub const ALL: [PublicationKind; 4] = [
        PublicationKind::ConferencePaper,
        PublicationKind::Journal,
        PublicationKind::Book,
        PublicationKind::BookChapter,
    ];

    /// Stable bucket index, 0..4.
    pub fn index(self) -> usize {
        match self {
            PublicationKind::ConferencePaper => 0,
            PublicationKind::Journal => 1,
            PublicationKind::Book => 2,
            PublicationKind::BookChapter => 3,
        }
    }

    /// Human-readable label used in report headers and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            PublicationKind::ConferencePaper => "Conference Paper",
            PublicationKind::Journal => "Journal",
            PublicationKind::Book => "Book",
            PublicationKind::BookChapter => "Book Chapter",
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single admitted publication.
///
/// The author list is ordered: index 0 is the first author, the final
/// index the last author, and a one-element list denotes sole authorship.
/// A missing title is allowed; a missing year or empty author list is
/// rejected at ingestion and never reaches this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub kind: PublicationKind,
    pub title: Option<String>,
    pub year: i32,
    pub authors: Vec<AuthorId>,
}

impl Publication {
    pub fn new(kind: PublicationKind, title: Option<String>, year: i32, authors: Vec<AuthorId>) -> Self {
        Self {
            kind,
            title,
            year,
            authors,
        }
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn has_author(&self, id: AuthorId) -> bool {
        self.authors.contains(&id)
    }

    /// True when this publication has exactly one author, `id`.
    pub fn is_sole_author(&self, id: AuthorId) -> bool {
        self.authors.len() == 1 && self.authors[0] == id
    }

    /// True when `id` leads a multi-author list.
    pub fn is_first_author(&self, id: AuthorId) -> bool {
        self.authors.len() > 1 && self.authors[0] == id
    }

    /// True when `id` closes a multi-author list.
    pub fn is_last_author(&self, id: AuthorId) -> bool {
        self.authors.len() > 1 && self.authors.last() == Some(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<AuthorId> {
        raw.iter().copied().map(AuthorId).collect()
    }

    #[test]
    fn test_kind_indices_are_stable() {
        for (i, kind) in PublicationKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(PublicationKind::BookChapter.label(), "Book Chapter");
    }

    #[test]
    fn test_author_position_helpers() {
        let p = Publication::new(PublicationKind::Journal, None, 2001, ids(&[3, 1, 7]));
        assert!(p.is_first_author(AuthorId(3)));
        assert!(!p.is_first_author(AuthorId(1)));
        assert!(p.is_last_author(AuthorId(7)));
        assert!(!p.is_last_author(AuthorId(3)));
        assert!(!p.is_sole_author(AuthorId(3)));
        assert!(p.has_author(AuthorId(1)));
    }

    #[test]
    fn test_publication_json_round_trip() {
        let p = Publication::new(
            PublicationKind::ConferencePaper,
            Some("T".into()),
            2001,
            ids(&[0, 1]),
        );
        let json = serde_json::to_string(&p).unwrap();
        let back: Publication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_sole_author_excludes_first_last() {
        let p = Publication::new(PublicationKind::Book, Some("T".into()), 1999, ids(&[2]));
        assert!(p.is_sole_author(AuthorId(2)));
        // first/last only apply to multi-author lists
        assert!(!p.is_first_author(AuthorId(2)));
        assert!(!p.is_last_author(AuthorId(2)));
    }
}
