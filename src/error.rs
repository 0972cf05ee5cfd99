use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading benchmark result folders.
///
/// Cosmetic damage (a garbled runtime row, a trial-count mismatch) is
/// tolerated with a logged warning instead; these variants are the hard
/// failures that abort the run.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed index entry: {reason}")]
    MalformedIndex {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl DataError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedIndex {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
