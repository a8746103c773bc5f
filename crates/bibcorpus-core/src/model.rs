//! The in-memory corpus: admitted publications, interned authors, and
//! corpus-wide year bounds.

use crate::error::QueryError;
use bibcorpus_domain::{Author, AuthorId, Publication, PublicationKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A loaded corpus.
///
/// Invariants, by construction in the loader:
/// - author ids are dense and 0-based; `authors[id.0].name` is the
///   exact source name and `name_to_id` is its inverse
/// - every id in any publication's author list is in range
/// - `min_year <= p.year <= max_year` for every publication
///
/// The corpus is populated monotonically during one ingestion pass and
/// never mutated by queries afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Corpus {
    publications: Vec<Publication>,
    authors: Vec<Author>,
    name_to_id: HashMap<String, AuthorId>,
    min_year: Option<i32>,
    max_year: Option<i32>,
}

/// An author lookup accepting either a surrogate id or an exact name.
#[derive(Clone, Copy, Debug)]
pub enum AuthorRef<'a> {
    Id(usize),
    Name(&'a str),
}

impl Corpus {
    /// Build a corpus from a record source. See [`crate::ingest::load`].
    pub fn load(source: &mut dyn crate::ingest::RecordSource) -> crate::ingest::LoadOutcome {
        crate::ingest::load(source)
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Exact-name display string for an id, failing on out-of-range ids
    /// (ids minted by a different corpus, or hand-built).
    pub fn author_name(&self, id: AuthorId) -> Result<&str, QueryError> {
        self.authors
            .get(id.index())
            .map(|a| a.name.as_str())
            .ok_or_else(|| QueryError::UnknownAuthor(format!("#{}", id.index())))
    }

    /// Infallible name lookup for ids this corpus assigned; every id
    /// stored in a publication or returned by a query is in range.
    pub(crate) fn name_of(&self, id: AuthorId) -> &str {
        &self.authors[id.index()].name
    }

    /// Exact-name lookup.
    pub fn author_id(&self, name: &str) -> Option<AuthorId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve an id-or-name reference, failing on out-of-range ids and
    /// unknown names alike.
    pub fn resolve(&self, author: AuthorRef<'_>) -> Result<AuthorId, QueryError> {
        match author {
            AuthorRef::Id(i) if i < self.authors.len() => Ok(AuthorId(i)),
            AuthorRef::Id(i) => Err(QueryError::UnknownAuthor(format!("#{i}"))),
            AuthorRef::Name(name) => self
                .author_id(name)
                .ok_or_else(|| QueryError::UnknownAuthor(name.to_string())),
        }
    }

    /// Case-insensitive substring filter over author names.
    ///
    /// An empty filter selects every author, in id order.
    pub fn find_authors(&self, filter: &str) -> Vec<AuthorId> {
        if filter.is_empty() {
            return (0..self.authors.len()).map(AuthorId).collect();
        }
        let needle = filter.to_lowercase();
        self.authors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.name.to_lowercase().contains(&needle))
            .map(|(i, _)| AuthorId(i))
            .collect()
    }

    /// Inclusive lower bound over admitted publication years; `None`
    /// when the corpus is empty.
    pub fn min_year(&self) -> Option<i32> {
        self.min_year
    }

    /// Inclusive upper bound over admitted publication years.
    pub fn max_year(&self) -> Option<i32> {
        self.max_year
    }

    /// Intern an author name, assigning the next dense id on first sight.
    pub(crate) fn intern_author(&mut self, name: &str) -> AuthorId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = AuthorId(self.authors.len());
        self.authors.push(Author::new(name));
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Append an admitted publication and widen the year bounds.
    pub(crate) fn push_publication(
        &mut self,
        kind: PublicationKind,
        title: Option<String>,
        year: i32,
        authors: Vec<AuthorId>,
    ) {
        self.publications
            .push(Publication::new(kind, title, year, authors));
        if self.min_year.map_or(true, |y| year < y) {
            self.min_year = Some(year);
        }
        if self.max_year.map_or(true, |y| year > y) {
            self.max_year = Some(year);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_corpus() -> Corpus {
        let mut c = Corpus::default();
        let a = c.intern_author("A B");
        let b = c.intern_author("C D");
        c.push_publication(PublicationKind::ConferencePaper, None, 2001, vec![a, b]);
        let e = c.intern_author("E F");
        c.push_publication(PublicationKind::Journal, Some("T".into()), 1998, vec![e]);
        c
    }

    #[test]
    fn test_interning_is_first_seen_order() {
        let mut c = Corpus::default();
        assert_eq!(c.intern_author("X"), AuthorId(0));
        assert_eq!(c.intern_author("Y"), AuthorId(1));
        assert_eq!(c.intern_author("X"), AuthorId(0));
        assert_eq!(c.author_count(), 2);
        assert_eq!(c.author_name(AuthorId(1)).unwrap(), "Y");
    }

    #[test]
    fn test_year_bounds_track_admissions() {
        let c = small_corpus();
        assert_eq!(c.min_year(), Some(1998));
        assert_eq!(c.max_year(), Some(2001));
        assert_eq!(Corpus::default().min_year(), None);
    }

    #[test]
    fn test_resolve_by_id_and_name() {
        let c = small_corpus();
        assert_eq!(c.resolve(AuthorRef::Name("C D")).unwrap(), AuthorId(1));
        assert_eq!(c.resolve(AuthorRef::Id(2)).unwrap(), AuthorId(2));
        assert!(c.resolve(AuthorRef::Id(3)).is_err());
        assert!(matches!(
            c.resolve(AuthorRef::Name("nobody")),
            Err(QueryError::UnknownAuthor(_))
        ));
    }

    #[test]
    fn test_author_name_rejects_out_of_range_id() {
        let c = small_corpus();
        assert_eq!(c.author_name(AuthorId(0)).unwrap(), "A B");
        assert!(matches!(
            c.author_name(AuthorId(99)),
            Err(QueryError::UnknownAuthor(_))
        ));
    }

    #[test]
    fn test_find_authors_substring_case_insensitive() {
        let c = small_corpus();
        assert_eq!(c.find_authors(""), vec![AuthorId(0), AuthorId(1), AuthorId(2)]);
        assert_eq!(c.find_authors("c d"), vec![AuthorId(1)]);
        assert!(c.find_authors("zz").is_empty());
    }
}
