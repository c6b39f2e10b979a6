use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Error type covering the different failure cases that can occur while the
/// season tables are fetched, reshaped, merged, or written out.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Raised when a page cannot be obtained or the target table is absent.
    #[error("extraction failed for {location}: {reason}")]
    Extraction { location: String, reason: String },

    /// Raised when a column the role depends on is missing after flattening.
    #[error("{role} table is missing required column '{column}'")]
    Mapping { role: String, column: String },

    /// Raised when two sources contribute the same semantic column.
    #[error("column '{0}' is provided by more than one source table")]
    DuplicateColumn(String),

    /// Raised when the merge leaves no team rows at all.
    #[error("merge produced no team rows")]
    EmptyResult,

    /// Raised under the strict shape policy when the merged table drifts.
    #[error("merged table has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Raised when the merged table could not be persisted.
    #[error("failed to write {}: {reason}", .path.display())]
    SinkWrite { path: PathBuf, reason: String },

    /// Transport failures from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO failures such as reading cached pages.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a CSS selector built from a table id does not parse.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
