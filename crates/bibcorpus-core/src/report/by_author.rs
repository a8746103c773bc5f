//! Per-author reports: one row per corpus author (or per matched author
//! for the filtered profile table).

use super::averages::per_author_kind_counts;
use super::{stat_cell, Cell, Table};
use crate::error::QueryError;
use crate::model::Corpus;
use crate::sort::{sort_rows, KeyPart, SortColumn, SortKey, SortSpec};
use bibcorpus_domain::AuthorId;
use bibcorpus_stats::Reducer;
use std::collections::HashSet;

const COUNTS_HEADER: [&str; 6] = [
    "Author",
    "Number of conference papers",
    "Number of journals",
    "Number of books",
    "Number of book chapters",
    "Total",
];

/// Publication counts per author, bucketed by kind.
pub fn publications_by_author(corpus: &Corpus, sort: Option<SortSpec>) -> Result<Table, QueryError> {
    let per_author = per_author_kind_counts(corpus);
    let mut rows: Vec<(String, [u32; 5])> = per_author
        .into_iter()
        .enumerate()
        .map(|(i, counts)| {
            let total: u32 = counts.iter().sum();
            let name = corpus.name_of(AuthorId(i)).to_string();
            (name, [counts[0], counts[1], counts[2], counts[3], total])
        })
        .collect();

    if let Some(spec) = sort {
        let value_index = match spec.column {
            SortColumn::Author => None,
            SortColumn::ConferencePapers => Some(0),
            SortColumn::Journals => Some(1),
            SortColumn::Books => Some(2),
            SortColumn::BookChapters => Some(3),
            SortColumn::Total => Some(4),
            column => return Err(QueryError::InvalidSortColumn { column }),
        };
        sort_rows(&mut rows, spec.descending, |(name, values)| match value_index {
            Some(i) => SortKey::by_value_then_author(KeyPart::Int(i64::from(values[i])), name),
            None => SortKey::by_author_name(name),
        });
    }

    let rows = rows
        .into_iter()
        .map(|(name, values)| {
            let mut cells = vec![Cell::Text(name)];
            cells.extend(values.iter().map(|&v| Cell::Count(v)));
            cells
        })
        .collect();
    Ok(Table::new(&COUNTS_HEADER, rows))
}

const AVERAGE_HEADER: [&str; 6] = [
    "Author",
    "Number of conference papers",
    "Number of journals",
    "Number of books",
    "Number of book chapters",
    "All publications",
];

/// Author-list lengths of each author's publications, reduced per kind.
///
/// An author with no books gets `Missing` in the book column rather
/// than a zero; the "All publications" column pools the author's
/// measurements across kinds.
pub fn average_authors_per_publication_by_author(corpus: &Corpus, reducer: Reducer) -> Table {
    let mut buckets: Vec<[Vec<u32>; 4]> =
        (0..corpus.author_count()).map(|_| Default::default()).collect();
    for p in corpus.publications() {
        for &a in &p.authors {
            buckets[a.index()][p.kind.index()].push(p.author_count() as u32);
        }
    }

    let rows = buckets
        .into_iter()
        .enumerate()
        .map(|(i, kinds)| {
            let pooled: Vec<u32> = kinds.iter().flatten().copied().collect();
            let mut cells = vec![Cell::Text(corpus.name_of(AuthorId(i)).to_string())];
            cells.extend(kinds.iter().map(|b| stat_cell(reducer, b)));
            cells.push(stat_cell(reducer, &pooled));
            cells
        })
        .collect();
    Table::new(&AVERAGE_HEADER, rows)
}

const STATS_HEADER: [&str; 10] = [
    "Author",
    "Publications",
    "Conference Papers",
    "Journal Articles",
    "Books",
    "Book Chapters",
    "Co-Authors",
    "First Author",
    "Last Author",
    "Sole Author",
];

struct AuthorStats {
    name: String,
    publications: u32,
    conference_papers: u32,
    journals: u32,
    books: u32,
    book_chapters: u32,
    coauthors: u32,
    first: u32,
    last: u32,
    sole: u32,
}

/// Full per-author profile table, restricted to authors whose name
/// contains `filter` (case-insensitive; empty matches everyone).
///
/// Authorship-position counts are mutually exclusive per publication:
/// sole authorship wins, then first, then last.
pub fn stats_for_author(
    corpus: &Corpus,
    filter: &str,
    sort: Option<SortSpec>,
) -> Result<Table, QueryError> {
    let matched = corpus.find_authors(filter);
    let mut rows: Vec<AuthorStats> = matched
        .into_iter()
        .map(|id| {
            let mut s = AuthorStats {
                name: corpus.name_of(id).to_string(),
                publications: 0,
                conference_papers: 0,
                journals: 0,
                books: 0,
                book_chapters: 0,
                coauthors: 0,
                first: 0,
                last: 0,
                sole: 0,
            };
            let mut collaborators: HashSet<AuthorId> = HashSet::new();
            for p in corpus.publications() {
                if !p.has_author(id) {
                    continue;
                }
                s.publications += 1;
                match p.kind.index() {
                    0 => s.conference_papers += 1,
                    1 => s.journals += 1,
                    2 => s.books += 1,
                    _ => s.book_chapters += 1,
                }
                collaborators.extend(p.authors.iter().copied());
                if p.is_sole_author(id) {
                    s.sole += 1;
                } else if p.is_first_author(id) {
                    s.first += 1;
                } else if p.is_last_author(id) {
                    s.last += 1;
                }
            }
            // the set includes the author themselves
            s.coauthors = (collaborators.len() as u32).saturating_sub(1);
            s
        })
        .collect();

    if let Some(spec) = sort {
        // The books and book-chapters columns deliberately sort by each
        // other's values; downstream consumers rely on this pairing.
        let value = |s: &AuthorStats| -> Option<u32> {
            match spec.column {
                SortColumn::Author => None,
                SortColumn::ConferencePapers => Some(s.conference_papers),
                SortColumn::Journals => Some(s.journals),
                SortColumn::Books => Some(s.book_chapters),
                SortColumn::BookChapters => Some(s.books),
                SortColumn::Total => Some(s.publications),
                SortColumn::CoAuthors => Some(s.coauthors),
                SortColumn::FirstAuthor => Some(s.first),
                SortColumn::LastAuthor => Some(s.last),
                SortColumn::SoleAuthor => Some(s.sole),
                _ => None,
            }
        };
        match spec.column {
            SortColumn::Year | SortColumn::Details => {
                return Err(QueryError::InvalidSortColumn {
                    column: spec.column,
                })
            }
            _ => {}
        }
        sort_rows(&mut rows, spec.descending, |s| match value(s) {
            Some(v) => SortKey::by_value_then_author(KeyPart::Int(i64::from(v)), &s.name),
            None => SortKey::by_author_name(&s.name),
        });
    }

    let rows = rows
        .into_iter()
        .map(|s| {
            vec![
                Cell::Text(s.name),
                Cell::Count(s.publications),
                Cell::Count(s.conference_papers),
                Cell::Count(s.journals),
                Cell::Count(s.books),
                Cell::Count(s.book_chapters),
                Cell::Count(s.coauthors),
                Cell::Count(s.first),
                Cell::Count(s.last),
                Cell::Count(s.sole),
            ]
        })
        .collect();
    Ok(Table::new(&STATS_HEADER, rows))
}
