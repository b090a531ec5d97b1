#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `diffmatch` bundles three text engines behind one entry point:
//!
//! - [`diff`] computes edit scripts between two texts and post-processes them.
//! - [`matching`] finds the best fuzzy occurrence of a pattern near an
//!   expected offset.
//! - [`patch`] packages scripts into context patches, serializes them and
//!   reapplies them to drifted text.
//!
//! [`DiffMatchPatch`] holds one configured instance of each engine so callers
//! that need all three share a single configuration value.
//!
//! # Design
//!
//! Each engine lives in its own crate and carries its configuration by value;
//! nothing is global, so independently configured bundles can be used side by
//! side. Diagnostics go through the [`logging`] crate's subsystem macros and
//! stay silent until a subscriber is installed with
//! [`logging::init_tracing_from_env`].
//!
//! # Examples
//!
//! ```
//! use diffmatch::DiffMatchPatch;
//!
//! let dmp = DiffMatchPatch::default();
//! let patches = dmp.make_patches(
//!     "The quick brown fox jumps over the lazy dog.",
//!     "That quick brown fox jumped over a lazy dog.",
//! );
//! let (text, applied) = dmp.apply_patches(&patches, "The quick brown fox jumps over the lazy dog.");
//! assert_eq!(text, "That quick brown fox jumped over a lazy dog.");
//! assert!(applied.iter().all(|&ok| ok));
//! ```

pub use diff;
pub use logging;
pub use matching;
pub use patch;

pub use diff::{DiffConfig, Differ, Edit, Operation};
pub use matching::{MatchConfig, Matcher};
pub use patch::{Patch, PatchConfig, PatchError, PatchInput, Patcher};

/// One diff engine, matcher and patcher sharing a configuration.
#[derive(Clone, Debug, Default)]
pub struct DiffMatchPatch {
    differ: Differ,
    matcher: Matcher,
    patcher: Patcher,
}

impl DiffMatchPatch {
    /// Creates a bundle. The diff and match settings nested in `config` drive
    /// the standalone engines as well as the patcher.
    #[must_use]
    pub fn new(config: PatchConfig) -> Self {
        let patcher = Patcher::new(config);
        Self {
            differ: Differ::new(patcher.config().diff),
            matcher: Matcher::new(patcher.config().matching),
            patcher,
        }
    }

    /// The configuration shared by the engines.
    #[must_use]
    pub const fn config(&self) -> &PatchConfig {
        self.patcher.config()
    }

    /// The diff engine.
    #[must_use]
    pub const fn differ(&self) -> &Differ {
        &self.differ
    }

    /// The fuzzy matcher.
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The patch engine.
    #[must_use]
    pub const fn patcher(&self) -> &Patcher {
        &self.patcher
    }

    /// Diffs two texts, switching to line mode for large inputs.
    #[must_use]
    pub fn diff(&self, text1: &str, text2: &str) -> Vec<Edit> {
        self.differ.diff(text1, text2, true)
    }

    /// Locates `pattern` in `text` near `loc`. See [`Matcher::find`].
    #[must_use]
    pub fn find(&self, text: &str, pattern: &str, loc: usize) -> Option<usize> {
        self.matcher.find(text, pattern, loc)
    }

    /// Builds patches turning `source` into `destination`.
    #[must_use]
    pub fn make_patches(&self, source: &str, destination: &str) -> Vec<Patch> {
        self.patcher.make_from_texts(source, destination)
    }

    /// Applies patches to `text`. See [`Patcher::apply`].
    #[must_use]
    pub fn apply_patches(&self, patches: &[Patch], text: &str) -> (String, Vec<bool>) {
        self.patcher.apply(patches, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engines_share_configuration() {
        let config = PatchConfig::default()
            .with_margin(6)
            .with_diff(DiffConfig::default().with_edit_cost(7))
            .with_matching(MatchConfig::default().with_distance(50));
        let dmp = DiffMatchPatch::new(config);
        assert_eq!(dmp.config().margin, 6);
        assert_eq!(dmp.differ().config().edit_cost, 7);
        assert_eq!(dmp.matcher().config().distance, 50);
        assert_eq!(dmp.patcher().config().matching.distance, 50);
    }

    #[test]
    fn diff_reconstructs_inputs() {
        let dmp = DiffMatchPatch::default();
        let edits = dmp.diff("kitten", "sitting");
        assert_eq!(diff::source_text(&edits), "kitten");
        assert_eq!(diff::destination_text(&edits), "sitting");
    }

    #[test]
    fn find_delegates_to_matcher() {
        let dmp = DiffMatchPatch::default();
        assert_eq!(dmp.find("abcdefghijk", "fgh", 5), Some(5));
    }
}
