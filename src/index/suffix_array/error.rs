//! Errors raised by suffix array construction and queries.

use thiserror::Error;

/// Construction and query failures. All of them are deterministic
/// functions of the arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuffixArrayError {
    /// The input sequence had no symbols
    #[error("cannot build a suffix array over an empty sequence")]
    EmptyInput,

    /// A rank or text position outside `0..len`
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A comparison window length outside `1..=max`
    #[error("window length {len} outside 1..={max}")]
    InvalidLength { len: usize, max: usize },

    /// More positions than class ids can number
    #[error("input of {len} symbols exceeds the maximum of {max}")]
    InputTooLong { len: usize, max: usize },
}

/// Convenience alias for suffix array operations.
pub type Result<T> = std::result::Result<T, SuffixArrayError>;
