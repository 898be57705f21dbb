//! Report error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors writing or reading report output
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem error on a results file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
