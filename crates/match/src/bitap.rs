//! crates/match/src/bitap.rs
//!
//! Bitap (shift-or with errors) search for the best fuzzy occurrence of a
//! pattern near an expected location.
//!
//! For each allowed error count `d` the search keeps one bit vector per text
//! position whose bit `k` records whether the last `k + 1` pattern characters
//! match the text ending there with at most `d` errors. A binary search on
//! the score function bounds how far from the expected location a match at
//! that error level could still be accepted, so the scan only visits that
//! window.

use logging::trace_match;
use rustc_hash::FxHashMap;

use crate::config::{MAX_SUPPORTED_BITS, MatchConfig};
use crate::error::{MatchError, MatchResult};

/// Locates the best fuzzy occurrence of a pattern near an expected offset.
///
/// # Examples
///
/// ```
/// use matching::Matcher;
///
/// let matcher = Matcher::default();
/// assert_eq!(matcher.find("abcdefghijk", "efxhi", 0), Some(4));
/// assert_eq!(matcher.find("abcdefghijk", "bxy", 1), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Creates a matcher. `max_bits` is clamped to `1..=64`.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let max_bits = config.max_bits.clamp(1, MAX_SUPPORTED_BITS);
        Self {
            config: MatchConfig { max_bits, ..config },
        }
    }

    /// The configuration this matcher runs with.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Finds the best occurrence of `pattern` in `text` near `loc`.
    ///
    /// All offsets count characters. `loc` past the end of `text` is clamped.
    /// Exact hits short-circuit: identical inputs match at 0, and a pattern
    /// already present at `loc` (including the empty pattern) matches there.
    /// Patterns longer than the configured `max_bits` only match exactly, at
    /// the occurrence nearest `loc`. Returns `None` when nothing scores within
    /// the threshold.
    #[must_use]
    pub fn find(&self, text: &str, pattern: &str, loc: usize) -> Option<usize> {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        self.find_chars(&text, &pattern, loc)
    }

    /// Like [`find`](Self::find) for callers whose inputs may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MissingText`] when the text or the pattern is
    /// `None`.
    pub fn find_opt(
        &self,
        text: Option<&str>,
        pattern: Option<&str>,
        loc: usize,
    ) -> MatchResult<Option<usize>> {
        match (text, pattern) {
            (Some(text), Some(pattern)) => Ok(self.find(text, pattern, loc)),
            _ => Err(MatchError::MissingText),
        }
    }

    /// Runs the Bitap search alone, without the exact-match shortcuts.
    ///
    /// `pattern` must be non-empty and no longer than `max_bits`; other
    /// patterns never match.
    #[must_use]
    pub fn bitap(&self, text: &str, pattern: &str, loc: usize) -> Option<usize> {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() || pattern.len() > self.config.max_bits {
            return None;
        }
        self.bitap_chars(&text, &pattern, loc.min(text.len()))
    }

    fn find_chars(&self, text: &[char], pattern: &[char], loc: usize) -> Option<usize> {
        let loc = loc.min(text.len());
        if text == pattern {
            return Some(0);
        }
        if text.is_empty() {
            return None;
        }
        if text.get(loc..loc + pattern.len()) == Some(pattern) {
            return Some(loc);
        }
        if pattern.len() > self.config.max_bits {
            trace_match!(
                pattern_len = pattern.len(),
                max_bits = self.config.max_bits,
                "pattern too long for bitap, searching exactly"
            );
            return nearest_exact(text, pattern, loc);
        }
        self.bitap_chars(text, pattern, loc)
    }

    fn bitap_chars(&self, text: &[char], pattern: &[char], loc: usize) -> Option<usize> {
        let alphabet = alphabet_of(pattern);
        let mut threshold = f64::from(self.config.threshold);

        // Exact occurrences on either side of `loc` bound the threshold.
        if let Some(found) = find_from(text, pattern, loc) {
            threshold = threshold.min(self.score(0, found, loc, pattern.len()));
            if let Some(found) = rfind_before(text, pattern, loc + pattern.len()) {
                threshold = threshold.min(self.score(0, found, loc, pattern.len()));
            }
        }

        let match_mask = 1_u64 << (pattern.len() - 1);
        let mut best = None;
        let mut bin_max = pattern.len() + text.len();
        let mut last_rd: Vec<u64> = Vec::new();

        for d in 0..pattern.len() {
            // Widest window around `loc` where `d` errors could still score
            // within the threshold.
            let mut bin_min = 0;
            let mut bin_mid = bin_max;
            while bin_min < bin_mid {
                if self.score(d, loc + bin_mid, loc, pattern.len()) <= threshold {
                    bin_min = bin_mid;
                } else {
                    bin_max = bin_mid;
                }
                bin_mid = (bin_max - bin_min) / 2 + bin_min;
            }
            bin_max = bin_mid;

            let mut start = (loc + 1).saturating_sub(bin_mid).max(1);
            let finish = (loc + bin_mid).min(text.len()) + pattern.len();
            let mut rd = vec![0_u64; finish + 2];
            rd[finish + 1] = low_bits(d);

            let mut j = finish;
            while j >= start {
                let char_match = text
                    .get(j - 1)
                    .and_then(|c| alphabet.get(c))
                    .copied()
                    .unwrap_or(0);
                let shifted = ((rd[j + 1] << 1) | 1) & char_match;
                rd[j] = if d == 0 {
                    shifted
                } else {
                    let prev_here = last_rd.get(j).copied().unwrap_or(0);
                    let prev_next = last_rd.get(j + 1).copied().unwrap_or(0);
                    shifted | (((prev_next | prev_here) << 1) | 1) | prev_next
                };
                if rd[j] & match_mask != 0 {
                    let score = self.score(d, j - 1, loc, pattern.len());
                    if score <= threshold {
                        threshold = score;
                        let hit = j - 1;
                        best = Some(hit);
                        if hit > loc {
                            // Don't scan further left than the mirror image of the hit.
                            start = (2 * loc).saturating_sub(hit).max(1);
                        } else {
                            break;
                        }
                    }
                }
                j -= 1;
            }

            if self.score(d + 1, loc, loc, pattern.len()) > threshold {
                break;
            }
            last_rd = rd;
        }
        best
    }

    /// Score of a match with `errors` mistakes at `x` when `loc` was expected.
    /// 0.0 is a perfect match; lower is better.
    fn score(&self, errors: usize, x: usize, loc: usize, pattern_len: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        let proximity = x.abs_diff(loc);
        if self.config.distance == 0 {
            return if proximity == 0 { accuracy } else { 1.0 };
        }
        accuracy + proximity as f64 / self.config.distance as f64
    }
}

/// Bit masks for each character of `pattern`.
///
/// Bit `len - 1 - i` is set in the mask of the character at index `i`, so the
/// first character owns the highest bit.
///
/// ```
/// let masks = matching::alphabet("abcaba");
/// assert_eq!(masks[&'a'], 37);
/// assert_eq!(masks[&'b'], 18);
/// assert_eq!(masks[&'c'], 8);
/// ```
#[must_use]
pub fn alphabet(pattern: &str) -> FxHashMap<char, u64> {
    let pattern: Vec<char> = pattern.chars().collect();
    alphabet_of(&pattern)
}

fn alphabet_of(pattern: &[char]) -> FxHashMap<char, u64> {
    let mut masks = FxHashMap::default();
    for (i, &c) in pattern.iter().enumerate() {
        let bit = 1_u64
            .checked_shl(u32::try_from(pattern.len() - i - 1).unwrap_or(u32::MAX))
            .unwrap_or(0);
        *masks.entry(c).or_insert(0) |= bit;
    }
    masks
}

/// `(1 << bits) - 1` without overflowing at 64.
fn low_bits(bits: usize) -> u64 {
    u32::try_from(bits)
        .ok()
        .and_then(|bits| 1_u64.checked_shl(bits))
        .map_or(u64::MAX, |bit| bit - 1)
}

/// Exact occurrence of `pattern` nearest to `loc`, preferring the later one
/// on a tie.
fn nearest_exact(text: &[char], pattern: &[char], loc: usize) -> Option<usize> {
    let after = find_from(text, pattern, loc);
    let before = rfind_before(text, pattern, loc);
    match (before, after) {
        (Some(before), Some(after)) => {
            if loc - before < after - loc {
                Some(before)
            } else {
                Some(after)
            }
        }
        (found, None) | (None, found) => found,
    }
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|at| at + from)
}

fn rfind_before(haystack: &[char], needle: &[char], before: usize) -> Option<usize> {
    let last = haystack.len().checked_sub(needle.len())?.min(before);
    (0..=last)
        .rev()
        .find(|&at| haystack[at..at + needle.len()] == *needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn alphabet_unique_characters() {
        let masks = alphabet("abc");
        assert_eq!(masks.len(), 3);
        assert_eq!(masks[&'a'], 4);
        assert_eq!(masks[&'b'], 2);
        assert_eq!(masks[&'c'], 1);
    }

    #[test]
    fn alphabet_duplicate_characters() {
        let masks = alphabet("abcaba");
        assert_eq!(masks[&'a'], 37);
        assert_eq!(masks[&'b'], 18);
        assert_eq!(masks[&'c'], 8);
    }

    #[test]
    fn alphabet_full_width() {
        let pattern: String = std::iter::once('x').chain(std::iter::repeat_n('y', 63)).collect();
        let masks = alphabet(&pattern);
        assert_eq!(masks[&'x'], 1 << 63);
        assert_eq!(masks[&'y'], (1 << 63) - 1);
    }

    #[test]
    fn low_bits_edges() {
        assert_eq!(low_bits(0), 0);
        assert_eq!(low_bits(3), 0b111);
        assert_eq!(low_bits(64), u64::MAX);
    }

    #[test]
    fn score_blends_accuracy_and_proximity() {
        let matcher = Matcher::new(MatchConfig::default().with_distance(100));
        assert!((matcher.score(0, 5, 5, 4) - 0.0).abs() < f64::EPSILON);
        assert!((matcher.score(1, 5, 5, 4) - 0.25).abs() < f64::EPSILON);
        assert!((matcher.score(0, 15, 5, 4) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_distance_only_accepts_exact_location() {
        let matcher = Matcher::new(MatchConfig::default().with_distance(0));
        assert!((matcher.score(1, 5, 5, 4) - 0.25).abs() < f64::EPSILON);
        assert!((matcher.score(0, 6, 5, 4) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nearest_exact_prefers_closer_then_later() {
        let text = chars("abcXXabcXXabc");
        let pattern = chars("abc");
        assert_eq!(nearest_exact(&text, &pattern, 4), Some(5));
        assert_eq!(nearest_exact(&text, &pattern, 1), Some(0));
        assert_eq!(nearest_exact(&text, &pattern, 12), Some(10));
        assert_eq!(nearest_exact(&text, &chars("zzz"), 3), None);
    }

    #[test]
    fn new_clamps_max_bits() {
        let config = MatchConfig {
            max_bits: 500,
            ..MatchConfig::default()
        };
        assert_eq!(Matcher::new(config).config().max_bits, 64);
    }
}
