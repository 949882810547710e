/// Error types for the incident report pipeline
///
/// Each stage returns a `ReportError` so that `main` can tell the recognised
/// failures (missing input, unreadable input, empty result) apart from the
/// unexpected ones.

use std::path::PathBuf;

use crate::core::aggregate::ValueCounts;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No file in the directory matched any of the input patterns
    #[error("no input file matching {patterns:?} found in {dir:?}")]
    InputNotFound {
        dir: PathBuf,
        patterns: Vec<String>,
    },

    /// The input file exists but could not be parsed as a table
    #[error("{message}")]
    Load {
        path: PathBuf,
        message: String,
    },

    /// A column the pipeline reads is absent from the header
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// Filtering and year derivation left no rows
    #[error("no incidents matched the group list")]
    EmptyResult {
        /// Most frequent perpetrators of the unfiltered table, for diagnosis
        top_perpetrators: ValueCounts,
    },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Whether `main` handles this failure with its own console message
    /// instead of propagating it as a fatal error
    pub fn is_recognised(&self) -> bool {
        matches!(
            self,
            ReportError::InputNotFound { .. }
                | ReportError::Load { .. }
                | ReportError::EmptyResult { .. }
        )
    }
}
