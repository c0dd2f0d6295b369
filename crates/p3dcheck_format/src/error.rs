//! Error types for container decoding.

use thiserror::Error;

/// Errors raised while decoding a container stream.
///
/// Validation findings are never errors; they travel as diagnostics on the
/// decoded model. Everything here aborts the current file's decode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The stream ended before a read could complete.
    #[error("truncated stream: needed {needed} byte(s) at offset {offset}")]
    Truncated {
        /// Absolute offset of the failed read.
        offset: usize,
        /// Bytes the read still required.
        needed: usize,
    },

    /// A field the format guarantees to be zero held something else.
    #[error("structural violation at offset {offset}: {what}")]
    StructuralViolation {
        /// Absolute offset of the offending field.
        offset: usize,
        /// The invariant that was violated.
        what: &'static str,
    },

    /// A recognized structure this decoder does not implement.
    #[error("unsupported feature: {what}")]
    UnsupportedFeature {
        /// The structure that was encountered.
        what: &'static str,
    },

    /// The stream did not start with a known container magic.
    #[error("unsupported format: magic {magic:?}")]
    UnsupportedFormat {
        /// The four bytes read from the start of the stream.
        magic: [u8; 4],
    },
}

/// Result type for decode operations.
pub type FormatResult<T> = Result<T, FormatError>;
