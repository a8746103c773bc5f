//! bibcorpus-core: the analytical engine over a bibliographic corpus.
//!
//! This crate provides:
//! - the in-memory corpus model (publications, authors, name index,
//!   year bounds), built once per load and read-only afterwards
//! - ingestion from any `RecordSource` (push-style begin/field/end
//!   events), with the admission filter and a diagnostics side channel
//! - the aggregation reports: distributional counts and reducer-averaged
//!   breakdowns by publication kind, year, and author
//! - the composite-key row sorter applied to sortable report output
//! - the derived co-authorship graph: network summaries, per-author
//!   collaborator detail, and degrees-of-separation search
//!
//! Queries never mutate the corpus; reloading builds a fresh `Corpus`
//! that callers publish on success (swap-on-success).

pub mod error;
pub mod ingest;
pub mod model;
pub mod network;
pub mod report;
pub mod sort;

pub use error::QueryError;
pub use ingest::{
    load, Diagnostic, LoadOutcome, RecordBatch, RecordField, RecordSink, RecordSource, SourceError,
};
pub use model::{AuthorRef, Corpus};
pub use network::{KindFilter, NetworkData, NetworkNode, Separation};
pub use report::{Cell, Table};
pub use sort::{SortColumn, SortSpec};
