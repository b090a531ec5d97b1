#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Fuzzy location of a short pattern within a longer text.
//!
//! - [`Matcher`] finds the best occurrence of a pattern near an expected
//!   offset, tolerating substitutions, insertions and deletions.
//! - [`MatchConfig`] weighs accuracy against proximity.
//! - [`alphabet`] exposes the per-character bit masks the search runs on.
//!
//! # Design
//!
//! Exact hits are checked first. Patterns up to `max_bits` characters are
//! then searched with the Bitap algorithm, one `u64` bit vector per text
//! position and error level. Longer patterns fall back to exact search.
//! Every offset counts Unicode scalar values.
//!
//! # Examples
//!
//! ```
//! use matching::{MatchConfig, Matcher};
//!
//! let matcher = Matcher::new(MatchConfig::default().with_threshold(0.7));
//! let text = "I am the very model of a modern major general.";
//! assert_eq!(matcher.find(text, " that berries ", 5), Some(4));
//! ```
//!
//! # See also
//!
//! - `patch`, which uses the matcher to relocate patches in drifted text.

mod bitap;
mod config;
mod error;

pub use bitap::{Matcher, alphabet};
pub use config::{
    DEFAULT_DISTANCE, DEFAULT_MAX_BITS, DEFAULT_THRESHOLD, MAX_SUPPORTED_BITS, MatchConfig,
};
pub use error::{MatchError, MatchResult};
