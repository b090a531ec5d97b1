#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Context patches: localized changes that carry enough surrounding text to
//! be re-applied to a document that has drifted since they were made.
//!
//! - [`Patcher`] builds patches from texts or edit scripts, bounds their size,
//!   and applies them with fuzzy relocation.
//! - [`Patch`] is one hunk; its `Display` impl and [`to_text`]/[`from_text`]
//!   implement the GNU-unified-diff-like text format.
//! - [`PatchConfig`] bundles the context margin, the deletion threshold and
//!   the diff and match settings the patcher runs with.
//!
//! # Design
//!
//! Patch construction cuts a `diff` edit script wherever a long equality
//! separates changes and frames each hunk with context until its source side
//! is unique in the text. Application pads the text edges, splits hunks to
//! the `matching` crate's Bitap width, relocates each hunk near its expected
//! offset and maps its edits through a fresh diff when the located text is
//! not an exact copy.
//!
//! # Invariants
//!
//! - All offsets and lengths count Unicode scalar values.
//! - `length1`/`length2` equal the character lengths of a patch's source and
//!   destination sides.
//! - [`Patcher::apply`] never modifies the patches it is given.
//!
//! # Errors
//!
//! Parsing reports malformed headers, operations and escapes through
//! [`PatchError`]. Application never fails; per-hunk success is reported as a
//! `bool` flag instead.
//!
//! # Examples
//!
//! ```
//! use patch::{Patcher, from_text, to_text};
//!
//! let patcher = Patcher::default();
//! let patches = patcher.make_from_texts(
//!     "The quick brown fox jumps over the lazy dog.",
//!     "That quick brown fox jumped over a lazy dog.",
//! );
//! let wire = to_text(&patches);
//! let parsed = from_text(&wire).unwrap();
//!
//! let (text, applied) = patcher.apply(&parsed, "The quick red rabbit jumps over the tired tiger.");
//! assert_eq!(text, "That quick red rabbit jumped over a tired tiger.");
//! assert_eq!(applied, vec![true, true]);
//! ```
//!
//! # See also
//!
//! - `diff` for edit scripts and the cleanups used here.
//! - `matching` for the fuzzy locator.

mod apply;
mod config;
mod error;
mod patch;
mod patcher;
mod serialize;
mod split;

pub use config::{DEFAULT_DELETE_THRESHOLD, DEFAULT_MARGIN, PatchConfig};
pub use error::{PatchError, PatchResult};
pub use patch::Patch;
pub use patcher::{PatchInput, Patcher};
pub use serialize::{from_text, to_text};
