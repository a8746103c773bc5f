//! Query-surface error types.

use crate::sort::SortColumn;
use thiserror::Error;

/// Failures surfaced by corpus queries.
///
/// Everything here is local and recoverable: an unknown author is a
/// lookup miss (callers wanting an empty result instead should go
/// through the substring-filter queries), and an inapplicable sort
/// column is a caller mistake caught before any sorting happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("no author matches {0:?}")]
    UnknownAuthor(String),

    #[error("sort column {column:?} does not apply to this report")]
    InvalidSortColumn { column: SortColumn },
}
