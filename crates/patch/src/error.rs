//! crates/patch/src/error.rs
//! Error types for patch construction and parsing.

use thiserror::Error;

/// Errors raised while building or parsing patches.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PatchError {
    /// A text or edit script required by [`Patcher::make`](crate::Patcher::make)
    /// was absent.
    #[error("patch input text or edit script is missing")]
    MissingInput,

    /// A hunk header did not have the `@@ -a,b +c,d @@` form.
    #[error("invalid patch header: {0}")]
    InvalidHeader(String),

    /// A hunk body line started with something other than ` `, `-` or `+`.
    #[error("invalid patch operation in line: {line}")]
    InvalidOperation {
        /// The offending line.
        line: String,
    },

    /// A hunk body line held a malformed escape or invalid UTF-8.
    #[error("illegal escape in patch: {0}")]
    InvalidEncoding(String),
}

/// Result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
