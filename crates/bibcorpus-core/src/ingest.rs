//! Ingestion: the record-source contract and the corpus loader.
//!
//! A [`RecordSource`] pushes begin/field/end events into a
//! [`RecordSink`]; the loader behind [`load`] materializes admitted
//! records into a fresh [`Corpus`]. Rejections and oddities go to the
//! diagnostics side channel (and to `tracing`), never into control flow;
//! the only control-flow signal is the boolean success in the outcome.

use crate::model::Corpus;
use bibcorpus_domain::PublicationKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One field observed inside a record, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordField {
    /// Repeatable; order is significant (first author first).
    Author(String),
    /// At most once per record.
    Title(String),
    /// At most once per record; integer text.
    Year(String),
}

/// Receives the ordered event stream for a document.
pub trait RecordSink {
    fn begin_record(&mut self, kind: PublicationKind);
    fn field(&mut self, field: RecordField);
    fn end_record(&mut self);
}

/// A document of records, e.g. an XML file or an in-memory batch.
///
/// Implementations drive the sink through every record in order and
/// return an error only for a terminal, unrecoverable parse failure.
pub trait RecordSource {
    fn stream(&mut self, sink: &mut dyn RecordSink) -> Result<(), SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed record stream: {0}")]
    Malformed(String),
    #[error("i/o error reading record stream")]
    Io(#[from] std::io::Error),
}

/// Side-channel diagnostics emitted during a load.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Diagnostic {
    /// The admission filter dropped a record (no year or no authors).
    RecordDropped {
        kind: PublicationKind,
        title: Option<String>,
        year: Option<i32>,
        authors: Vec<String>,
    },
    /// A record was admitted without a title.
    MissingTitle {
        kind: PublicationKind,
        year: i32,
        authors: Vec<String>,
    },
    /// A year field did not parse as an integer; the load fails.
    BadYear { text: String },
    /// The source reported a terminal parse failure.
    SourceFailed { message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RecordDropped {
                kind,
                title,
                year,
                authors,
            } => write!(
                f,
                "excluding {} publication (title: {:?}, year: {:?}, authors: {})",
                kind,
                title,
                year,
                authors.join(",")
            ),
            Diagnostic::MissingTitle {
                kind,
                year,
                authors,
            } => write!(
                f,
                "adding publication with missing title [ {} {} ({}) ]",
                kind,
                year,
                authors.join(",")
            ),
            Diagnostic::BadYear { text } => write!(f, "year field is not an integer: {text:?}"),
            Diagnostic::SourceFailed { message } => write!(f, "record source failed: {message}"),
        }
    }
}

/// The result of one load: the corpus built from every record admitted
/// before any failure, a success flag, and the collected diagnostics.
///
/// There is no rollback — callers wanting swap-on-success keep their
/// previous corpus when `ok` is false.
#[derive(Debug)]
pub struct LoadOutcome {
    pub corpus: Corpus,
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build a fresh corpus from a record source.
pub fn load(source: &mut dyn RecordSource) -> LoadOutcome {
    let mut loader = Loader::default();
    let streamed = source.stream(&mut loader);
    let ok = match streamed {
        Ok(()) => !loader.failed,
        Err(e) => {
            tracing::warn!("record source failed: {e}");
            loader.diagnostics.push(Diagnostic::SourceFailed {
                message: e.to_string(),
            });
            false
        }
    };
    LoadOutcome {
        corpus: loader.corpus,
        ok,
        diagnostics: loader.diagnostics,
    }
}

#[derive(Default)]
struct Loader {
    corpus: Corpus,
    diagnostics: Vec<Diagnostic>,
    pending: Option<PendingRecord>,
    failed: bool,
}

struct PendingRecord {
    kind: PublicationKind,
    title: Option<String>,
    year: Option<i32>,
    authors: Vec<String>,
}

impl Loader {
    fn commit(&mut self, record: PendingRecord) {
        let PendingRecord {
            kind,
            title,
            year,
            authors,
        } = record;

        // Admission filter: a year and at least one author, or nothing.
        let Some(year) = year else {
            self.drop_record(kind, title, None, authors);
            return;
        };
        if authors.is_empty() {
            self.drop_record(kind, title, Some(year), authors);
            return;
        }
        if title.is_none() {
            tracing::warn!(%kind, year, "admitting publication with missing title");
            self.diagnostics.push(Diagnostic::MissingTitle {
                kind,
                year,
                authors: authors.clone(),
            });
        }

        let ids = authors
            .iter()
            .map(|name| self.corpus.intern_author(name))
            .collect();
        self.corpus.push_publication(kind, title, year, ids);
    }

    fn drop_record(
        &mut self,
        kind: PublicationKind,
        title: Option<String>,
        year: Option<i32>,
        authors: Vec<String>,
    ) {
        tracing::warn!(%kind, ?title, ?year, "excluding publication due to missing information");
        self.diagnostics.push(Diagnostic::RecordDropped {
            kind,
            title,
            year,
            authors,
        });
    }
}

impl RecordSink for Loader {
    fn begin_record(&mut self, kind: PublicationKind) {
        if self.failed {
            return;
        }
        self.pending = Some(PendingRecord {
            kind,
            title: None,
            year: None,
            authors: Vec::new(),
        });
    }

    fn field(&mut self, field: RecordField) {
        if self.failed {
            return;
        }
        let Some(pending) = self.pending.as_mut() else {
            return; // field outside a record; the source contract forbids this
        };
        match field {
            RecordField::Author(name) => pending.authors.push(name),
            RecordField::Title(title) => pending.title = Some(title),
            RecordField::Year(text) => match text.trim().parse::<i32>() {
                Ok(year) => pending.year = Some(year),
                Err(_) => {
                    tracing::warn!(text = %text, "unparsable year field, aborting load");
                    self.diagnostics.push(Diagnostic::BadYear { text });
                    self.failed = true;
                }
            },
        }
    }

    fn end_record(&mut self) {
        if self.failed {
            return;
        }
        if let Some(record) = self.pending.take() {
            self.commit(record);
        }
    }
}

/// An in-memory record source, for tests and programmatic corpora.
#[derive(Default)]
pub struct RecordBatch {
    records: Vec<RawRecord>,
    fail_after: Option<usize>,
}

struct RawRecord {
    kind: PublicationKind,
    title: Option<String>,
    year: Option<String>,
    authors: Vec<String>,
}

impl RecordBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: PublicationKind,
        title: Option<&str>,
        year: Option<i32>,
        authors: &[&str],
    ) {
        self.push_raw(kind, title, year.map(|y| y.to_string()).as_deref(), authors);
    }

    /// Like `push`, but with the year as raw field text.
    pub fn push_raw(
        &mut self,
        kind: PublicationKind,
        title: Option<&str>,
        year: Option<&str>,
        authors: &[&str],
    ) {
        self.records.push(RawRecord {
            kind,
            title: title.map(str::to_string),
            year: year.map(str::to_string),
            authors: authors.iter().map(|a| a.to_string()).collect(),
        });
    }

    /// Report a terminal parse failure after streaming `n` records.
    pub fn with_failure_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

impl RecordSource for RecordBatch {
    fn stream(&mut self, sink: &mut dyn RecordSink) -> Result<(), SourceError> {
        for (i, record) in self.records.iter().enumerate() {
            if self.fail_after == Some(i) {
                return Err(SourceError::Malformed("record stream truncated".into()));
            }
            sink.begin_record(record.kind);
            for author in &record.authors {
                sink.field(RecordField::Author(author.clone()));
            }
            if let Some(title) = &record.title {
                sink.field(RecordField::Title(title.clone()));
            }
            if let Some(year) = &record.year {
                sink.field(RecordField::Year(year.clone()));
            }
            sink.end_record();
        }
        if self.fail_after == Some(self.records.len()) {
            return Err(SourceError::Malformed("record stream truncated".into()));
        }
        Ok(())
    }
}
