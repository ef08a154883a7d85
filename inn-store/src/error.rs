use std::path::PathBuf;

use inn_core::errors::InnError;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while writing a collection.
///
/// Reads never fail: unreadable data is logged and dropped instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Could not replace {}: {}", .path.display(), .source)]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create an I/O error tied to a path
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a failed-rename error
    pub fn persist<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for InnError {
    fn from(err: StoreError) -> Self {
        InnError::storage(err.to_string()).with_source(err.into())
    }
}
