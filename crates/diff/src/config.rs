//! crates/diff/src/config.rs
//! Tunables for the diff engine.

use std::time::Duration;

/// Default time budget for a single diff.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default cost of an empty edit, in characters, used by efficiency cleanup.
pub const DEFAULT_EDIT_COST: usize = 4;

/// Default recursion bound for half-match, bisection and line re-diffing.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Configuration for [`Differ`](crate::Differ).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use diff::DiffConfig;
///
/// let config = DiffConfig::default()
///     .with_timeout(Duration::from_millis(250))
///     .with_edit_cost(6);
/// assert_eq!(config.timeout, Some(Duration::from_millis(250)));
/// assert_eq!(config.edit_cost, 6);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffConfig {
    /// Time budget before bisection gives up and emits a coarse script.
    /// `None` diffs exactly and also disables the half-match speedup.
    pub timeout: Option<Duration>,
    /// Characters an extra edit is worth when folding short equalities.
    pub edit_cost: usize,
    /// Recursion depth beyond which sub-problems degrade to Delete+Insert.
    pub max_depth: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            edit_cost: DEFAULT_EDIT_COST,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiffConfig {
    /// Sets the time budget. A zero duration means no limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Removes the time budget so diffs are always exact.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets the edit cost used by efficiency cleanup.
    #[must_use]
    pub const fn with_edit_cost(mut self, edit_cost: usize) -> Self {
        self.edit_cost = edit_cost;
        self
    }

    /// Sets the recursion bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
