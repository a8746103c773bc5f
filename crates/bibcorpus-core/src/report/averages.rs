//! Corpus-wide averaged reports: one row of per-kind reductions plus the
//! pooled "All Publications" column.
//!
//! The "All" column always reduces the pooled, ungrouped measurements —
//! never an average of the per-kind averages.

use super::{stat_cell, Cell, Table, KIND_LABELS};
use crate::model::Corpus;
use bibcorpus_domain::AuthorId;
use bibcorpus_stats::Reducer;
use std::collections::HashSet;

const HEADER: [&str; 5] = [
    KIND_LABELS[0],
    KIND_LABELS[1],
    KIND_LABELS[2],
    KIND_LABELS[3],
    "All Publications",
];

/// Author-list lengths grouped by publication kind.
pub fn average_authors_per_publication(corpus: &Corpus, reducer: Reducer) -> Table {
    let mut buckets: [Vec<u32>; 4] = Default::default();
    for p in corpus.publications() {
        buckets[p.kind.index()].push(p.author_count() as u32);
    }
    let pooled: Vec<u32> = buckets.iter().flatten().copied().collect();

    let mut row: Vec<Cell> = buckets.iter().map(|b| stat_cell(reducer, b)).collect();
    row.push(stat_cell(reducer, &pooled));
    Table::new(&HEADER, vec![row])
}

/// Per-author publication counts grouped by kind; the "All" column pools
/// each author's total across kinds.
pub fn average_publications_per_author(corpus: &Corpus, reducer: Reducer) -> Table {
    let per_author = per_author_kind_counts(corpus);

    let mut row: Vec<Cell> = (0..4)
        .map(|k| {
            let column: Vec<u32> = per_author.iter().map(|counts| counts[k]).collect();
            stat_cell(reducer, &column)
        })
        .collect();
    let totals: Vec<u32> = per_author
        .iter()
        .map(|counts| counts.iter().sum())
        .collect();
    row.push(stat_cell(reducer, &totals));
    Table::new(&HEADER, vec![row])
}

/// Publication counts per calendar year over the full corpus span;
/// years with no publications count as zero.
pub fn average_publications_in_a_year(corpus: &Corpus, reducer: Reducer) -> Table {
    let Some((min, max)) = corpus.min_year().zip(corpus.max_year()) else {
        return Table::new(&HEADER, vec![vec![Cell::Missing; 5]]);
    };
    let span = (max - min + 1) as usize;
    let mut per_year = vec![[0u32; 4]; span];
    for p in corpus.publications() {
        per_year[(p.year - min) as usize][p.kind.index()] += 1;
    }

    let mut row: Vec<Cell> = (0..4)
        .map(|k| {
            let column: Vec<u32> = per_year.iter().map(|counts| counts[k]).collect();
            stat_cell(reducer, &column)
        })
        .collect();
    let totals: Vec<u32> = per_year.iter().map(|counts| counts.iter().sum()).collect();
    row.push(stat_cell(reducer, &totals));
    Table::new(&HEADER, vec![row])
}

/// Distinct-author counts per calendar year over the full corpus span.
///
/// Authors are collected into per-year sets (an author on three papers
/// in one year counts once); the "All" column reduces the per-year
/// union sizes, not the sum of the per-kind counts.
pub fn average_authors_in_a_year(corpus: &Corpus, reducer: Reducer) -> Table {
    let Some((min, max)) = corpus.min_year().zip(corpus.max_year()) else {
        return Table::new(&HEADER, vec![vec![Cell::Missing; 5]]);
    };
    let span = (max - min + 1) as usize;
    let mut per_year: Vec<[HashSet<AuthorId>; 5]> =
        (0..span).map(|_| Default::default()).collect();
    for p in corpus.publications() {
        let sets = &mut per_year[(p.year - min) as usize];
        for &a in &p.authors {
            sets[p.kind.index()].insert(a);
            sets[4].insert(a);
        }
    }

    let row: Vec<Cell> = (0..5)
        .map(|k| {
            let column: Vec<u32> = per_year.iter().map(|sets| sets[k].len() as u32).collect();
            stat_cell(reducer, &column)
        })
        .collect();
    Table::new(&HEADER, vec![row])
}

/// Per-author publication-count matrix, one `[u32; 4]` per author id.
pub(crate) fn per_author_kind_counts(corpus: &Corpus) -> Vec<[u32; 4]> {
    let mut per_author = vec![[0u32; 4]; corpus.author_count()];
    for p in corpus.publications() {
        for &a in &p.authors {
            per_author[a.index()][p.kind.index()] += 1;
        }
    }
    per_author
}
