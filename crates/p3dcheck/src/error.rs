//! Error types for batch loading.

use thiserror::Error;

use p3dcheck_format::FormatError;

/// Why one file was dropped from a batch.
///
/// Contained at the file boundary inside the loader: a `LoadError` becomes a
/// stats counter and a debug log line, never a batch abort.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading the file from disk failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file's bytes did not decode as a model container.
    #[error("decode failed: {0}")]
    Format(#[from] FormatError),
}

/// Result type for per-file load operations.
pub type LoadResult<T> = Result<T, LoadError>;
