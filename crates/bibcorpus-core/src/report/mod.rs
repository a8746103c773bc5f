//! Aggregation reports over a loaded corpus.
//!
//! Every report is a pure function of `&Corpus` returning a [`Table`]:
//! an ordered header and ordered rows of [`Cell`] values. Averaged
//! variants additionally take the [`Reducer`](bibcorpus_stats::Reducer)
//! to apply per group; sortable variants take an optional
//! [`SortSpec`](crate::sort::SortSpec).

pub mod averages;
pub mod by_author;
pub mod by_year;
pub mod profile;
pub mod summary;

pub use averages::{
    average_authors_in_a_year, average_authors_per_publication,
    average_publications_in_a_year, average_publications_per_author,
};
pub use by_author::{
    average_authors_per_publication_by_author, publications_by_author, stats_for_author,
};
pub use by_year::{
    author_totals_by_year, average_authors_per_publication_by_year,
    average_publications_per_author_by_year, publications_by_year,
};
pub use profile::{
    coauthor_count, first_author_counts, last_author_counts, publication_counts,
    sole_author_counts, ProfileCounts,
};
pub use summary::{publication_summary, publication_summary_average};

use bibcorpus_stats::{Reducer, StatValue};
use serde::Serialize;
use std::fmt;

/// A report result: column labels plus row tuples, never streamed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(header: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

/// One report cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Count(u32),
    Year(i32),
    Stat(StatValue),
    /// An averaged cell whose group had no measurements.
    Missing,
}

impl Cell {
    pub fn as_count(&self) -> Option<u32> {
        match self {
            Cell::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stat(&self) -> Option<&StatValue> {
        match self {
            Cell::Stat(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{n}"),
            Cell::Year(y) => write!(f, "{y}"),
            Cell::Stat(v) => write!(f, "{v}"),
            Cell::Missing => f.write_str("-"),
        }
    }
}

/// Reduce a group into a cell, mapping an empty group to `Cell::Missing`
/// instead of calling the reducer on it.
pub(crate) fn stat_cell(reducer: Reducer, values: &[u32]) -> Cell {
    match reducer.apply(values) {
        Ok(v) => Cell::Stat(v),
        Err(_) => Cell::Missing,
    }
}

/// Header tail shared by the kind-bucketed reports.
pub(crate) const KIND_LABELS: [&str; 4] = ["Conference Paper", "Journal", "Book", "Book Chapter"];
