//! Single-author profile counters, looked up by exact author name.

use crate::error::QueryError;
use crate::model::Corpus;
use bibcorpus_domain::{AuthorId, Publication};
use serde::Serialize;
use std::collections::HashSet;

/// Per-kind publication counts for one author, with the total first to
/// match the profile display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileCounts {
    pub total: u32,
    pub journal_articles: u32,
    pub conference_papers: u32,
    pub books: u32,
    pub book_chapters: u32,
}

impl ProfileCounts {
    pub fn as_row(&self) -> [u32; 5] {
        [
            self.total,
            self.journal_articles,
            self.conference_papers,
            self.books,
            self.book_chapters,
        ]
    }
}

fn counts_where(
    corpus: &Corpus,
    name: &str,
    admit: impl Fn(&Publication, AuthorId) -> bool,
) -> Result<ProfileCounts, QueryError> {
    let id = corpus
        .author_id(name)
        .ok_or_else(|| QueryError::UnknownAuthor(name.to_string()))?;
    let mut counts = ProfileCounts::default();
    for p in corpus.publications() {
        if !p.has_author(id) || !admit(p, id) {
            continue;
        }
        counts.total += 1;
        match p.kind.index() {
            0 => counts.conference_papers += 1,
            1 => counts.journal_articles += 1,
            2 => counts.books += 1,
            _ => counts.book_chapters += 1,
        }
    }
    Ok(counts)
}

/// All publications the author appears on.
pub fn publication_counts(corpus: &Corpus, name: &str) -> Result<ProfileCounts, QueryError> {
    counts_where(corpus, name, |_, _| true)
}

/// Publications where the author leads a multi-author list.
pub fn first_author_counts(corpus: &Corpus, name: &str) -> Result<ProfileCounts, QueryError> {
    counts_where(corpus, name, |p, id| p.is_first_author(id))
}

/// Publications where the author closes a multi-author list.
pub fn last_author_counts(corpus: &Corpus, name: &str) -> Result<ProfileCounts, QueryError> {
    counts_where(corpus, name, |p, id| p.is_last_author(id))
}

/// Publications the author wrote alone.
pub fn sole_author_counts(corpus: &Corpus, name: &str) -> Result<ProfileCounts, QueryError> {
    counts_where(corpus, name, |p, id| p.is_sole_author(id))
}

/// Number of distinct collaborators across the author's multi-author
/// publications.
pub fn coauthor_count(corpus: &Corpus, name: &str) -> Result<u32, QueryError> {
    let id = corpus
        .author_id(name)
        .ok_or_else(|| QueryError::UnknownAuthor(name.to_string()))?;
    let mut collaborators: HashSet<AuthorId> = HashSet::new();
    for p in corpus.publications() {
        if p.author_count() > 1 && p.has_author(id) {
            collaborators.extend(p.authors.iter().copied());
        }
    }
    // the set includes the author when any collaboration exists
    Ok((collaborators.len() as u32).saturating_sub(1))
}
