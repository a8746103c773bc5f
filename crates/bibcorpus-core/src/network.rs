//! Co-authorship graph queries.
//!
//! Two authors are linked when they share at least one publication.
//! The graph is rebuilt per query from the publication list; corpora
//! are small enough that materialising an adjacency structure up front
//! buys nothing.

use crate::error::QueryError;
use crate::model::{AuthorRef, Corpus};
use crate::report::{Cell, Table};
use crate::sort::{sort_rows, KeyPart, SortColumn, SortKey, SortSpec};
use bibcorpus_domain::{AuthorId, PublicationKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Restricts a graph query to one publication kind, or none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(PublicationKind),
}

impl KindFilter {
    pub fn admits(&self, kind: PublicationKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

/// Co-publication tallies for one author: every author sharing a
/// publication with them, keyed by id, counting shared publications.
/// The author appears in their own tally with their publication count.
pub fn coauthor_details(corpus: &Corpus, name: &str) -> Result<Vec<(String, u32)>, QueryError> {
    let id = corpus
        .author_id(name)
        .ok_or_else(|| QueryError::UnknownAuthor(name.to_string()))?;
    let mut tallies: BTreeMap<AuthorId, u32> = BTreeMap::new();
    for p in corpus.publications() {
        if !p.has_author(id) {
            continue;
        }
        for &a in &p.authors {
            *tallies.entry(a).or_default() += 1;
        }
    }
    Ok(tallies
        .into_iter()
        .map(|(a, n)| (corpus.name_of(a).to_string(), n))
        .collect())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkNode {
    pub name: String,
    /// Number of distinct co-authors.
    pub degree: u32,
}

/// The full co-authorship graph in node-and-link form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkData {
    /// One node per corpus author, in id order.
    pub nodes: Vec<NetworkNode>,
    /// Undirected edges as `(lower id, higher id)` pairs.
    pub links: BTreeSet<(AuthorId, AuthorId)>,
}

pub fn network_data(corpus: &Corpus) -> NetworkData {
    let mut neighbours: Vec<HashSet<AuthorId>> = vec![HashSet::new(); corpus.author_count()];
    let mut links = BTreeSet::new();
    for p in corpus.publications() {
        for (i, &a) in p.authors.iter().enumerate() {
            for &b in &p.authors[i + 1..] {
                if a == b {
                    continue;
                }
                neighbours[a.index()].insert(b);
                neighbours[b.index()].insert(a);
                links.insert((a.min(b), a.max(b)));
            }
        }
    }
    let nodes = neighbours
        .into_iter()
        .enumerate()
        .map(|(i, set)| NetworkNode {
            name: corpus.name_of(AuthorId(i)).to_string(),
            degree: set.len() as u32,
        })
        .collect();
    NetworkData { nodes, links }
}

/// Co-author listing restricted to a year range and publication kind.
///
/// Each row shows the author as `Name (n)` where `n` is their distinct
/// co-author count within the restriction, followed by their
/// co-authors in the same display form, joined with `", "`.
pub fn coauthor_data(
    corpus: &Corpus,
    start_year: i32,
    end_year: i32,
    kind: KindFilter,
    sort: Option<SortSpec>,
) -> Result<Table, QueryError> {
    let mut neighbours: BTreeMap<AuthorId, BTreeSet<AuthorId>> = BTreeMap::new();
    for p in corpus.publications() {
        if p.year < start_year || p.year > end_year || !kind.admits(p.kind) {
            continue;
        }
        for (i, &a) in p.authors.iter().enumerate() {
            for &b in &p.authors[i + 1..] {
                if a == b {
                    continue;
                }
                neighbours.entry(a).or_default().insert(b);
                neighbours.entry(b).or_default().insert(a);
            }
        }
    }

    let display = |id: AuthorId, neighbours: &BTreeMap<AuthorId, BTreeSet<AuthorId>>| {
        let degree = neighbours.get(&id).map_or(0, |s| s.len());
        format!("{} ({})", corpus.name_of(id), degree)
    };

    let mut rows: Vec<(AuthorId, String)> = neighbours
        .iter()
        .map(|(&id, set)| {
            let partners: Vec<String> = set.iter().map(|&b| display(b, &neighbours)).collect();
            (id, partners.join(", "))
        })
        .collect();

    if let Some(spec) = sort {
        match spec.column {
            SortColumn::Author => {
                sort_rows(&mut rows, spec.descending, |(id, _)| {
                    SortKey::by_author_name(corpus.name_of(*id))
                });
            }
            SortColumn::CoAuthors => {
                sort_rows(&mut rows, spec.descending, |(id, partners)| {
                    SortKey::by_value_then_author(
                        KeyPart::Text(partners.clone()),
                        corpus.name_of(*id),
                    )
                });
            }
            column => return Err(QueryError::InvalidSortColumn { column }),
        }
    }

    let rows = rows
        .into_iter()
        .map(|(id, partners)| vec![Cell::Text(display(id, &neighbours)), Cell::Text(partners)])
        .collect();
    Ok(Table::new(&["Author", "Co-Authors"], rows))
}

/// Degrees of separation between two authors.
///
/// Direct co-authors are zero degrees apart; each intermediate author
/// on the shortest chain adds one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Separation {
    Degrees(u32),
    NoPath,
}

impl fmt::Display for Separation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separation::Degrees(n) => write!(f, "{n}"),
            Separation::NoPath => f.write_str("X"),
        }
    }
}

/// Breadth-first search over the co-authorship graph, expanding one
/// full frontier per level. An author is never on a path to
/// themselves, so a self query reports `NoPath`.
pub fn degrees_of_separation(
    corpus: &Corpus,
    from: AuthorRef<'_>,
    to: AuthorRef<'_>,
) -> Result<Separation, QueryError> {
    let from = corpus.resolve(from)?;
    let to = corpus.resolve(to)?;

    let mut neighbours: Vec<BTreeSet<AuthorId>> = vec![BTreeSet::new(); corpus.author_count()];
    for p in corpus.publications() {
        for (i, &a) in p.authors.iter().enumerate() {
            for &b in &p.authors[i + 1..] {
                if a == b {
                    continue;
                }
                neighbours[a.index()].insert(b);
                neighbours[b.index()].insert(a);
            }
        }
    }

    let mut visited: HashSet<AuthorId> = HashSet::from([from]);
    let mut frontier: BTreeSet<AuthorId> = neighbours[from.index()]
        .iter()
        .copied()
        .filter(|a| !visited.contains(a))
        .collect();
    let mut level = 0u32;
    while !frontier.is_empty() {
        if frontier.contains(&to) {
            return Ok(Separation::Degrees(level));
        }
        visited.extend(frontier.iter().copied());
        frontier = frontier
            .iter()
            .flat_map(|a| neighbours[a.index()].iter().copied())
            .filter(|a| !visited.contains(a))
            .collect();
        level += 1;
    }
    Ok(Separation::NoPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{load, RecordBatch};
    use bibcorpus_domain::PublicationKind::*;

    fn chain_corpus() -> Corpus {
        // A-B, B-C share papers; D is isolated
        let mut batch = RecordBatch::new();
        batch.push(ConferencePaper, Some("p1"), Some(2000), &["A A", "B B"]);
        batch.push(ConferencePaper, Some("p2"), Some(2001), &["B B", "C C"]);
        batch.push(Journal, Some("j1"), Some(2002), &["D D"]);
        load(&mut batch).corpus
    }

    #[test]
    fn test_coauthor_details_includes_self_with_publication_count() {
        let details = coauthor_details(&chain_corpus(), "B B").unwrap();
        assert_eq!(
            details,
            vec![
                ("A A".to_string(), 1),
                ("B B".to_string(), 2),
                ("C C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_network_data_degrees_and_links() {
        let data = network_data(&chain_corpus());
        let degrees: Vec<u32> = data.nodes.iter().map(|n| n.degree).collect();
        assert_eq!(degrees, vec![1, 2, 1, 0]);
        assert_eq!(
            data.links,
            BTreeSet::from([(AuthorId(0), AuthorId(1)), (AuthorId(1), AuthorId(2))])
        );
    }

    #[test]
    fn test_coauthor_data_year_and_kind_restriction() {
        // only 2000 admits p1, so the graph is just A-B
        let table = coauthor_data(&chain_corpus(), 2000, 2000, KindFilter::All, None).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0].as_text(), Some("A A (1)"));
        assert_eq!(table.rows[0][1].as_text(), Some("B B (1)"));

        // a journal-only view of the same corpus has no collaborations
        let table =
            coauthor_data(&chain_corpus(), 1900, 3000, KindFilter::Only(Journal), None).unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_coauthor_data_degree_counts_whole_restriction() {
        let table = coauthor_data(&chain_corpus(), 1900, 3000, KindFilter::All, None).unwrap();
        // B collaborated with both A and C across the range
        assert_eq!(table.rows[1][0].as_text(), Some("B B (2)"));
        assert_eq!(table.rows[1][1].as_text(), Some("A A (1), C C (1)"));
    }

    #[test]
    fn test_coauthor_data_rejects_value_columns() {
        let err = coauthor_data(
            &chain_corpus(),
            1900,
            3000,
            KindFilter::All,
            Some(SortSpec::ascending(SortColumn::Total)),
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortColumn { .. }));
    }

    #[test]
    fn test_direct_coauthors_are_zero_degrees_apart() {
        let sep =
            degrees_of_separation(&chain_corpus(), AuthorRef::Name("A A"), AuthorRef::Name("B B"))
                .unwrap();
        assert_eq!(sep, Separation::Degrees(0));
    }

    #[test]
    fn test_one_intermediate_author_is_one_degree() {
        let sep =
            degrees_of_separation(&chain_corpus(), AuthorRef::Name("A A"), AuthorRef::Name("C C"))
                .unwrap();
        assert_eq!(sep, Separation::Degrees(1));
    }

    #[test]
    fn test_disconnected_authors_have_no_path() {
        let sep =
            degrees_of_separation(&chain_corpus(), AuthorRef::Name("A A"), AuthorRef::Name("D D"))
                .unwrap();
        assert_eq!(sep, Separation::NoPath);
        assert_eq!(sep.to_string(), "X");
    }

    #[test]
    fn test_self_query_has_no_path() {
        let sep =
            degrees_of_separation(&chain_corpus(), AuthorRef::Name("A A"), AuthorRef::Name("A A"))
                .unwrap();
        assert_eq!(sep, Separation::NoPath);
    }

    #[test]
    fn test_unknown_endpoint_is_an_error() {
        let err =
            degrees_of_separation(&chain_corpus(), AuthorRef::Name("A A"), AuthorRef::Name("Z Z"))
                .unwrap_err();
        assert!(matches!(err, QueryError::UnknownAuthor(_)));
    }
}
