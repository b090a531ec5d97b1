#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `diff` computes a human-readable difference between two texts as an
//! *edit script*: an ordered list of [`Edit`]s tagged [`Operation::Equal`],
//! [`Operation::Delete`] or [`Operation::Insert`]. Concatenating the Equal and
//! Delete spans yields the first text; Equal and Insert spans yield the
//! second.
//!
//! # Design
//!
//! [`Differ`] strips common prefixes and suffixes, short-circuits trivial
//! shapes (containment, single characters), then either splits the problem
//! around a long shared substring (half-match), diffs line tokens first for
//! large inputs (line mode), or runs Myers' O(ND) bisection. Bisection polls
//! a deadline once per edit distance step; when it expires the remaining
//! sub-problem is emitted as one deletion and one insertion, so a diff never
//! runs much past its budget.
//!
//! Scripts are post-processed by free functions in the cleanup module:
//! [`cleanup_merge`] (normalization, always applied), [`cleanup_semantic`]
//! and [`cleanup_semantic_lossless`] for human readers, and
//! [`cleanup_efficiency`] for machine consumers.
//!
//! Scripts can be serialized as a compact *delta* ([`to_delta`] /
//! [`from_delta`]) or rendered as HTML with [`pretty_html`].
//!
//! # Invariants
//!
//! - Offsets and lengths count Unicode scalar values (`char`), never bytes.
//! - Every script returned by [`Differ::diff`] reconstructs both inputs and
//!   contains no empty edits and no two adjacent edits of the same kind.
//! - Cleanup passes never change the reconstructed texts.
//!
//! # Errors
//!
//! [`Differ::diff_opt`] reports absent inputs as [`DiffError::MissingText`];
//! [`from_delta`] reports malformed deltas as [`DeltaError`]. A timeout is
//! not an error: it yields a coarser script.
//!
//! # Examples
//!
//! ```
//! use diff::{Differ, cleanup_semantic, pretty_html, source_text};
//!
//! let differ = Differ::default();
//! let mut edits = differ.diff("The quick fox", "The slow fox", false);
//! cleanup_semantic(&mut edits);
//! assert_eq!(source_text(&edits), "The quick fox");
//! assert!(pretty_html(&edits).contains("<ins"));
//! ```
//!
//! # See also
//!
//! - `matching` for fuzzy location of a pattern in a text.
//! - `patch` for packaging scripts into reapplicable patches.

mod cleanup;
mod config;
mod delta;
mod differ;
mod edit;
pub mod encoding;
mod error;
mod lines;
mod script;
mod text;

pub use cleanup::{cleanup_efficiency, cleanup_merge, cleanup_semantic, cleanup_semantic_lossless};
pub use config::{DEFAULT_EDIT_COST, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT, DiffConfig};
pub use delta::{from_delta, to_delta};
pub use differ::{Differ, HalfMatch};
pub use edit::{Edit, Operation};
pub use error::{DecodeError, DeltaError, DiffError, DiffResult};
pub use lines::{LineEncoding, MAX_LINES};
pub use script::{destination_text, levenshtein, pretty_html, source_text, x_index};
pub use text::{char_len, char_slice, common_overlap, common_prefix, common_suffix, split_at_char};
