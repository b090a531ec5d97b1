//! crates/diff/src/error.rs
//! Error types for diff entry points and the delta codec.

use thiserror::Error;

/// Errors raised by [`Differ`](crate::Differ) entry points.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DiffError {
    /// One of the two input texts was absent.
    #[error("diff input text is missing")]
    MissingText,

    /// A delta could not be expanded against its source text.
    #[error(transparent)]
    Delta(#[from] DeltaError),
}

/// Errors raised while expanding a delta with [`from_delta`](crate::from_delta).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DeltaError {
    /// The delta consumed a different number of characters than the source holds.
    #[error("delta covers {actual} chars but the source text has {expected}")]
    LengthMismatch {
        /// Character length of the source text.
        expected: usize,
        /// Characters the delta tried to consume.
        actual: usize,
    },

    /// An `=` or `-` token did not carry a non-negative count.
    #[error("invalid count in delta token: {0}")]
    InvalidCount(String),

    /// A token started with something other than `=`, `-` or `+`.
    #[error("invalid operation in delta: {0:?}")]
    InvalidOperation(char),

    /// An insert token held a malformed escape or invalid UTF-8.
    #[error("illegal escape in delta: {0}")]
    InvalidEncoding(String),
}

/// Result type for diff entry points.
pub type DiffResult<T> = Result<T, DiffError>;

/// Errors raised by [`decode`](crate::encoding::decode).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// `%` was not followed by two hexadecimal digits.
    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape {
        /// Byte offset of the offending `%`.
        offset: usize,
    },

    /// The unescaped bytes do not form valid UTF-8.
    #[error("percent-decoded text is not valid UTF-8")]
    InvalidUtf8,
}
