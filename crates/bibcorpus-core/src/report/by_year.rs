//! Per-year reports keyed on the years that actually occur in the
//! corpus, in ascending order. Unlike the span-based corpus averages,
//! a year with no publications simply has no row here.

use super::{stat_cell, Cell, Table};
use crate::error::QueryError;
use crate::model::Corpus;
use crate::sort::{sort_rows, KeyPart, SortColumn, SortKey, SortSpec};
use bibcorpus_domain::AuthorId;
use bibcorpus_stats::Reducer;
use std::collections::{BTreeMap, HashSet};

const COUNTS_HEADER: [&str; 6] = [
    "Year",
    "Number of conference papers",
    "Number of journals",
    "Number of books",
    "Number of book chapters",
    "Total",
];

/// Publication counts per observed year, bucketed by kind.
pub fn publications_by_year(corpus: &Corpus, sort: Option<SortSpec>) -> Result<Table, QueryError> {
    let mut per_year: BTreeMap<i32, [u32; 4]> = BTreeMap::new();
    for p in corpus.publications() {
        per_year.entry(p.year).or_default()[p.kind.index()] += 1;
    }
    let mut rows: Vec<(i32, [u32; 5])> = per_year
        .into_iter()
        .map(|(year, counts)| {
            let total: u32 = counts.iter().sum();
            (year, [counts[0], counts[1], counts[2], counts[3], total])
        })
        .collect();

    if let Some(spec) = sort {
        let value_index = match spec.column {
            SortColumn::Year => None,
            SortColumn::ConferencePapers => Some(0),
            SortColumn::Journals => Some(1),
            SortColumn::Books => Some(2),
            SortColumn::BookChapters => Some(3),
            SortColumn::Total => Some(4),
            column => return Err(QueryError::InvalidSortColumn { column }),
        };
        sort_rows(&mut rows, spec.descending, |(year, values)| {
            SortKey::by_value(KeyPart::Int(match value_index {
                Some(i) => i64::from(values[i]),
                None => i64::from(*year),
            }))
        });
    }

    let rows = rows
        .into_iter()
        .map(|(year, values)| {
            let mut cells = vec![Cell::Year(year)];
            cells.extend(values.iter().map(|&v| Cell::Count(v)));
            cells
        })
        .collect();
    Ok(Table::new(&COUNTS_HEADER, rows))
}

/// Distinct-author counts per observed year.
///
/// The total column counts the union of the per-kind author sets, not
/// their sum, so an author active in two kinds in one year counts once.
pub fn author_totals_by_year(corpus: &Corpus) -> Table {
    let mut per_year: BTreeMap<i32, [HashSet<AuthorId>; 5]> = BTreeMap::new();
    for p in corpus.publications() {
        let sets = per_year.entry(p.year).or_default();
        for &a in &p.authors {
            sets[p.kind.index()].insert(a);
            sets[4].insert(a);
        }
    }

    let rows = per_year
        .into_iter()
        .map(|(year, sets)| {
            let mut cells = vec![Cell::Year(year)];
            cells.extend(sets.iter().map(|s| Cell::Count(s.len() as u32)));
            cells
        })
        .collect();
    Table::new(&COUNTS_HEADER, rows)
}

const AVERAGE_HEADER: [&str; 6] = [
    "Year",
    "Conference papers",
    "Journals",
    "Books",
    "Book chapters",
    "All publications",
];

/// Author-list lengths reduced per kind within each observed year.
pub fn average_authors_per_publication_by_year(corpus: &Corpus, reducer: Reducer) -> Table {
    let mut per_year: BTreeMap<i32, [Vec<u32>; 4]> = BTreeMap::new();
    for p in corpus.publications() {
        per_year.entry(p.year).or_default()[p.kind.index()].push(p.author_count() as u32);
    }

    let rows = per_year
        .into_iter()
        .map(|(year, kinds)| {
            let pooled: Vec<u32> = kinds.iter().flatten().copied().collect();
            let mut cells = vec![Cell::Year(year)];
            cells.extend(kinds.iter().map(|b| stat_cell(reducer, b)));
            cells.push(stat_cell(reducer, &pooled));
            cells
        })
        .collect();
    Table::new(&AVERAGE_HEADER, rows)
}

/// Per-author publication counts within each observed year, reduced
/// per kind.
///
/// Every corpus author contributes a measurement to every year's group,
/// zero included, so the denominator is always the full author count
/// rather than only the authors active that year.
pub fn average_publications_per_author_by_year(corpus: &Corpus, reducer: Reducer) -> Table {
    let mut per_year: BTreeMap<i32, Vec<[u32; 4]>> = BTreeMap::new();
    for p in corpus.publications() {
        let matrix = per_year
            .entry(p.year)
            .or_insert_with(|| vec![[0u32; 4]; corpus.author_count()]);
        for &a in &p.authors {
            matrix[a.index()][p.kind.index()] += 1;
        }
    }

    let rows = per_year
        .into_iter()
        .map(|(year, matrix)| {
            let mut cells = vec![Cell::Year(year)];
            cells.extend((0..4).map(|k| {
                let column: Vec<u32> = matrix.iter().map(|counts| counts[k]).collect();
                stat_cell(reducer, &column)
            }));
            let totals: Vec<u32> = matrix.iter().map(|counts| counts.iter().sum()).collect();
            cells.push(stat_cell(reducer, &totals));
            cells
        })
        .collect();
    Table::new(&AVERAGE_HEADER, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{load, RecordBatch};
    use bibcorpus_domain::PublicationKind::*;
    use bibcorpus_stats::StatValue;

    fn corpus() -> Corpus {
        let mut batch = RecordBatch::new();
        batch.push(ConferencePaper, Some("p1"), Some(2000), &["A A", "B B"]);
        batch.push(ConferencePaper, Some("p2"), Some(2000), &["A A", "B B", "C C"]);
        batch.push(Journal, Some("j1"), Some(2002), &["A A"]);
        load(&mut batch).corpus
    }

    #[test]
    fn test_publications_by_year_skips_unobserved_years() {
        let table = publications_by_year(&corpus(), None).unwrap();
        let years: Vec<i32> = table
            .rows
            .iter()
            .map(|r| match r[0] {
                Cell::Year(y) => y,
                _ => panic!("year cell"),
            })
            .collect();
        assert_eq!(years, vec![2000, 2002]); // no row for 2001
        assert_eq!(table.rows[0][5].as_count(), Some(2));
        assert_eq!(table.rows[1][5].as_count(), Some(1));
    }

    #[test]
    fn test_publications_by_year_sorted_by_total_descending() {
        let table = publications_by_year(&corpus(), Some(SortSpec::descending(SortColumn::Total)))
            .unwrap();
        assert_eq!(table.rows[0][0], Cell::Year(2000));
        assert_eq!(table.rows[1][0], Cell::Year(2002));
    }

    #[test]
    fn test_publications_by_year_rejects_author_column() {
        let err = publications_by_year(&corpus(), Some(SortSpec::ascending(SortColumn::Author)))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortColumn { .. }));
    }

    #[test]
    fn test_author_totals_by_year_union() {
        let table = author_totals_by_year(&corpus());
        // 2000: conference authors {A,B,C}, union {A,B,C}
        assert_eq!(table.rows[0][1].as_count(), Some(3));
        assert_eq!(table.rows[0][5].as_count(), Some(3));
        // 2002: only the journal by A
        assert_eq!(table.rows[1][2].as_count(), Some(1));
        assert_eq!(table.rows[1][5].as_count(), Some(1));
    }

    #[test]
    fn test_average_authors_per_publication_by_year() {
        let table = average_authors_per_publication_by_year(&corpus(), Reducer::Mean);
        // 2000: conference papers with 2 and 3 authors
        assert_eq!(table.rows[0][1], Cell::Stat(StatValue::Scalar(2.5)));
        assert_eq!(table.rows[0][2], Cell::Missing);
        assert_eq!(table.rows[0][5], Cell::Stat(StatValue::Scalar(2.5)));
    }

    #[test]
    fn test_average_publications_per_author_by_year_counts_inactive_authors() {
        let table = average_publications_per_author_by_year(&corpus(), Reducer::Mean);
        // 2002 totals over all three authors are [1, 0, 0]
        assert_eq!(
            table.rows[1][5],
            Cell::Stat(StatValue::Scalar(1.0 / 3.0))
        );
    }
}
