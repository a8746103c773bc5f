//! Corpus summary reports: publication counts and distinct-author counts
//! per kind, plus the averaged two-row variant.

use super::{stat_cell, Cell, Table, KIND_LABELS};
use crate::error::QueryError;
use crate::model::Corpus;
use crate::sort::{sort_rows, KeyPart, SortColumn, SortKey, SortSpec};
use bibcorpus_domain::AuthorId;
use bibcorpus_stats::Reducer;
use std::collections::HashSet;

const HEADER: [&str; 6] = [
    "Details",
    KIND_LABELS[0],
    KIND_LABELS[1],
    KIND_LABELS[2],
    KIND_LABELS[3],
    "Total",
];

/// Two rows: publication counts per kind (total = sum) and distinct
/// author counts per kind (total = size of the union of the four author
/// sets, which can be less than their sum when an author publishes in
/// several kinds).
pub fn publication_summary(corpus: &Corpus, sort: Option<SortSpec>) -> Result<Table, QueryError> {
    let mut pub_counts = [0u32; 4];
    let mut author_sets: [HashSet<AuthorId>; 4] = Default::default();
    for p in corpus.publications() {
        let k = p.kind.index();
        pub_counts[k] += 1;
        for &a in &p.authors {
            author_sets[k].insert(a);
        }
    }
    let union: HashSet<AuthorId> = author_sets.iter().flatten().copied().collect();

    let mut rows: Vec<(&'static str, [u32; 5])> = vec![
        (
            "Number of publications",
            [
                pub_counts[0],
                pub_counts[1],
                pub_counts[2],
                pub_counts[3],
                pub_counts.iter().sum(),
            ],
        ),
        (
            "Number of authors",
            [
                author_sets[0].len() as u32,
                author_sets[1].len() as u32,
                author_sets[2].len() as u32,
                author_sets[3].len() as u32,
                union.len() as u32,
            ],
        ),
    ];

    if let Some(spec) = sort {
        let value_index = match spec.column {
            SortColumn::Details => None,
            SortColumn::ConferencePapers => Some(0),
            SortColumn::Journals => Some(1),
            SortColumn::Books => Some(2),
            SortColumn::BookChapters => Some(3),
            SortColumn::Total => Some(4),
            column => return Err(QueryError::InvalidSortColumn { column }),
        };
        sort_rows(&mut rows, spec.descending, |(label, values)| match value_index {
            Some(i) => SortKey::by_value(KeyPart::Int(i64::from(values[i]))),
            None => SortKey::by_value(KeyPart::Text(label.to_string())),
        });
    }

    let rows = rows
        .into_iter()
        .map(|(label, values)| {
            let mut cells = vec![Cell::Text(label.to_string())];
            cells.extend(values.iter().map(|&v| Cell::Count(v)));
            cells
        })
        .collect();
    Ok(Table::new(&HEADER, rows))
}

const AVERAGE_HEADER: [&str; 6] = [
    "Details",
    KIND_LABELS[0],
    KIND_LABELS[1],
    KIND_LABELS[2],
    KIND_LABELS[3],
    "All Publications",
];

/// Two averaged rows: authors-per-publication and publications-per-author
/// measurements reduced per kind, with the pooled measurement set in the
/// "All Publications" column.
pub fn publication_summary_average(corpus: &Corpus, reducer: Reducer) -> Table {
    let mut auth_per_pub: [Vec<u32>; 4] = Default::default();
    for p in corpus.publications() {
        auth_per_pub[p.kind.index()].push(p.author_count() as u32);
    }
    let pooled: Vec<u32> = auth_per_pub.iter().flatten().copied().collect();

    let per_author = super::averages::per_author_kind_counts(corpus);
    let author_totals: Vec<u32> = per_author
        .iter()
        .map(|counts| counts.iter().sum())
        .collect();

    let mut first = vec![Cell::Text(format!("{} authors per publication", reducer.label()))];
    first.extend(auth_per_pub.iter().map(|b| stat_cell(reducer, b)));
    first.push(stat_cell(reducer, &pooled));

    let mut second = vec![Cell::Text(format!("{} publications per author", reducer.label()))];
    second.extend((0..4).map(|k| {
        let column: Vec<u32> = per_author.iter().map(|counts| counts[k]).collect();
        stat_cell(reducer, &column)
    }));
    second.push(stat_cell(reducer, &author_totals));

    Table::new(&AVERAGE_HEADER, vec![first, second])
}
