//! crates/patch/src/config.rs
//! Tunables for building and applying patches.

use diff::DiffConfig;
use matching::MatchConfig;

/// Default fraction of a long patch's source text that may differ from the
/// located text before the patch is rejected.
pub const DEFAULT_DELETE_THRESHOLD: f32 = 0.5;

/// Default number of context characters kept on each side of a hunk.
pub const DEFAULT_MARGIN: usize = 4;

/// Configuration for [`Patcher`](crate::Patcher).
///
/// Besides its own knobs, a patcher carries the diff configuration used to
/// compute and re-align scripts and the match configuration used to relocate
/// hunks. The match configuration's `max_bits` also caps the size of a hunk.
///
/// # Examples
///
/// ```
/// use matching::MatchConfig;
/// use patch::PatchConfig;
///
/// let config = PatchConfig::default()
///     .with_margin(8)
///     .with_matching(MatchConfig::default().with_threshold(0.3));
/// assert_eq!(config.margin, 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatchConfig {
    /// 0.0 rejects any difference in a long deletion's text, 1.0 accepts any.
    pub delete_threshold: f32,
    /// Context characters kept around each hunk.
    pub margin: usize,
    /// Diff settings.
    pub diff: DiffConfig,
    /// Fuzzy match settings.
    pub matching: MatchConfig,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            delete_threshold: DEFAULT_DELETE_THRESHOLD,
            margin: DEFAULT_MARGIN,
            diff: DiffConfig::default(),
            matching: MatchConfig::default(),
        }
    }
}

impl PatchConfig {
    /// Sets the deletion acceptance threshold.
    #[must_use]
    pub const fn with_delete_threshold(mut self, delete_threshold: f32) -> Self {
        self.delete_threshold = delete_threshold;
        self
    }

    /// Sets the context margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Replaces the diff settings.
    #[must_use]
    pub const fn with_diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }

    /// Replaces the fuzzy match settings.
    #[must_use]
    pub const fn with_matching(mut self, matching: MatchConfig) -> Self {
        self.matching = matching;
        self
    }
}
