//! crates/match/src/error.rs
//! Error types for the matcher entry points.

use thiserror::Error;

/// Errors raised by [`Matcher::find_opt`](crate::Matcher::find_opt).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MatchError {
    /// The text or the pattern was absent.
    #[error("match input text or pattern is missing")]
    MissingText,
}

/// Result type for matcher entry points.
pub type MatchResult<T> = Result<T, MatchError>;
