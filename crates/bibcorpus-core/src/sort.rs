//! Composite-key row sorting for report output.
//!
//! Every sortable report reorders its rows through [`sort_rows`] with a
//! single composite key per row. Descending order reverses the whole
//! composite — value and name tie-break together — so a descending
//! numeric sort also reverses alphabetical ordering among ties.

use bibcorpus_domain::split_surname;
use serde::{Deserialize, Serialize};

/// The closed set of sortable report columns.
///
/// Reports accept only the variants that name one of their own columns
/// and reject the rest up front, so there is no runtime lookup failure
/// halfway through a sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    Author,
    Year,
    Details,
    ConferencePapers,
    Journals,
    Books,
    BookChapters,
    Total,
    CoAuthors,
    FirstAuthor,
    LastAuthor,
    SoleAuthor,
}

impl SortColumn {
    /// Parse the column names used by the query surface.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "author" => Some(SortColumn::Author),
            "year" => Some(SortColumn::Year),
            "details" => Some(SortColumn::Details),
            "conference" | "conferencepaper" => Some(SortColumn::ConferencePapers),
            "journal" | "journals" => Some(SortColumn::Journals),
            "book" | "books" => Some(SortColumn::Books),
            "chapters" | "bookchapter" => Some(SortColumn::BookChapters),
            "total" => Some(SortColumn::Total),
            "coauthor" | "coauthors" => Some(SortColumn::CoAuthors),
            "first" => Some(SortColumn::FirstAuthor),
            "last" => Some(SortColumn::LastAuthor),
            "sole" => Some(SortColumn::SoleAuthor),
            _ => None,
        }
    }
}

/// A sort request: which column, and whether to reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: SortColumn) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// One element of a composite sort key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

/// An ordered composite sort key; parts compare left to right.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(pub Vec<KeyPart>);

impl SortKey {
    /// `(surname, given names)` key for an author-name identity column.
    pub fn by_author_name(name: &str) -> Self {
        let (surname, given) = split_surname(name);
        SortKey(vec![KeyPart::Text(surname), KeyPart::Text(given)])
    }

    /// `(value, surname, given names)` key for a value column with
    /// author-name tie-break.
    pub fn by_value_then_author(value: KeyPart, name: &str) -> Self {
        let (surname, given) = split_surname(name);
        SortKey(vec![value, KeyPart::Text(surname), KeyPart::Text(given)])
    }

    /// Single-part key (plain year or value column without tie-break).
    pub fn by_value(value: KeyPart) -> Self {
        SortKey(vec![value])
    }
}

/// Stable sort by one reversible composite key.
pub fn sort_rows<R>(rows: &mut Vec<R>, descending: bool, key: impl Fn(&R) -> SortKey) {
    let mut keyed: Vec<(SortKey, R)> = rows.drain(..).map(|r| (key(&r), r)).collect();
    keyed.sort_by(|a, b| {
        if descending {
            b.0.cmp(&a.0)
        } else {
            a.0.cmp(&b.0)
        }
    });
    rows.extend(keyed.into_iter().map(|(_, r)| r));
}
