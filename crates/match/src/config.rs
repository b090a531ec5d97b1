//! crates/match/src/config.rs
//! Tunables for the Bitap matcher.

/// Default score above which a candidate is rejected.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Default distance from the expected location at which a match scores 1.0.
pub const DEFAULT_DISTANCE: usize = 1000;

/// Default longest pattern searched with Bitap.
pub const DEFAULT_MAX_BITS: usize = 32;

/// Widest bit vector the matcher supports.
pub const MAX_SUPPORTED_BITS: usize = u64::BITS as usize;

/// Configuration for [`Matcher`](crate::Matcher).
///
/// A candidate's score is its error rate (`errors / pattern length`) plus
/// its distance from the expected location divided by
/// [`distance`](Self::distance); anything scoring above
/// [`threshold`](Self::threshold) is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// 0.0 demands a perfect match at the exact location, 1.0 accepts
    /// almost anything.
    pub threshold: f32,
    /// How far a match may stray from the expected location. 0 requires the
    /// exact location.
    pub distance: usize,
    /// Longest pattern searched fuzzily; longer patterns only match exactly.
    /// Clamped to `1..=64`.
    pub max_bits: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
            max_bits: DEFAULT_MAX_BITS,
        }
    }
}

impl MatchConfig {
    /// Sets the acceptance threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the proximity distance.
    #[must_use]
    pub const fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the Bitap width, clamped to what a `u64` mask can hold.
    #[must_use]
    pub fn with_max_bits(mut self, max_bits: usize) -> Self {
        self.max_bits = max_bits.clamp(1, MAX_SUPPORTED_BITS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MatchConfig::default();
        assert!((config.threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.distance, 1000);
        assert_eq!(config.max_bits, 32);
    }

    #[test]
    fn max_bits_is_clamped() {
        assert_eq!(MatchConfig::default().with_max_bits(0).max_bits, 1);
        assert_eq!(MatchConfig::default().with_max_bits(200).max_bits, 64);
        assert_eq!(MatchConfig::default().with_max_bits(16).max_bits, 16);
    }

    #[test]
    fn builders_chain() {
        let config = MatchConfig::default().with_threshold(0.25).with_distance(10);
        assert!((config.threshold - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.distance, 10);
    }
}
