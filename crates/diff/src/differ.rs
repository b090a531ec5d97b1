//! crates/diff/src/differ.rs
//! The diff engine: prefix/suffix trimming, half-match, line mode and
//! Myers bisection under a deadline.

use std::time::Instant;

use logging::trace_diff;

use crate::cleanup::{cleanup_efficiency, cleanup_merge, cleanup_semantic};
use crate::config::DiffConfig;
use crate::edit::{Edit, Operation};
use crate::error::{DiffError, DiffResult};
use crate::lines::LineEncoding;
use crate::text::{collect, find_from, prefix_len, suffix_len};

/// Texts shorter than this on either side are never diffed line by line.
const LINE_MODE_MIN_CHARS: usize = 100;

/// Computes edit scripts between two texts.
///
/// A `Differ` owns its [`DiffConfig`] and holds no other state, so one
/// instance can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use diff::{Differ, Edit};
///
/// let differ = Differ::default();
/// let edits = differ.diff("abc", "ab123c", false);
/// assert_eq!(
///     edits,
///     [Edit::equal("ab"), Edit::insert("123"), Edit::equal("c")]
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

/// A shared substring splitting two texts, as found by [`Differ::half_match`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HalfMatch {
    /// Text of the first input before the common part.
    pub prefix1: String,
    /// Text of the first input after the common part.
    pub suffix1: String,
    /// Text of the second input before the common part.
    pub prefix2: String,
    /// Text of the second input after the common part.
    pub suffix2: String,
    /// The shared substring.
    pub common: String,
}

struct Split<'a> {
    prefix1: &'a [char],
    suffix1: &'a [char],
    prefix2: &'a [char],
    suffix2: &'a [char],
    common: &'a [char],
}

impl Differ {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub const fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diffs `text1` against `text2`.
    ///
    /// With `line_mode` set, long inputs are first diffed line by line and the
    /// changed regions refined character by character afterwards. That is
    /// faster on large texts but may produce a less minimal script.
    ///
    /// The returned script is normalized by [`cleanup_merge`].
    #[must_use]
    pub fn diff(&self, text1: &str, text2: &str, line_mode: bool) -> Vec<Edit> {
        let deadline = self.deadline();
        self.diff_with_deadline(text1, text2, line_mode, deadline)
    }

    /// Like [`diff`](Self::diff) with an explicit deadline instead of one
    /// derived from the configured timeout.
    #[must_use]
    pub fn diff_with_deadline(
        &self,
        text1: &str,
        text2: &str,
        line_mode: bool,
        deadline: Option<Instant>,
    ) -> Vec<Edit> {
        let text1: Vec<char> = text1.chars().collect();
        let text2: Vec<char> = text2.chars().collect();
        self.diff_chars(&text1, &text2, line_mode, deadline, 0)
    }

    /// Like [`diff`](Self::diff) for callers whose inputs may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::MissingText`] when either text is `None`.
    pub fn diff_opt(
        &self,
        text1: Option<&str>,
        text2: Option<&str>,
        line_mode: bool,
    ) -> DiffResult<Vec<Edit>> {
        match (text1, text2) {
            (Some(text1), Some(text2)) => Ok(self.diff(text1, text2, line_mode)),
            _ => Err(DiffError::MissingText),
        }
    }

    /// Runs [`cleanup_efficiency`] with the configured edit cost.
    pub fn cleanup_efficiency(&self, edits: &mut Vec<Edit>) {
        cleanup_efficiency(edits, self.config.edit_cost);
    }

    /// Finds the middle snake of `text1` and `text2` and diffs both halves.
    ///
    /// When the deadline passes before the snake is found the result is a
    /// plain deletion of `text1` followed by an insertion of `text2`.
    #[must_use]
    pub fn bisect(&self, text1: &str, text2: &str, deadline: Option<Instant>) -> Vec<Edit> {
        let text1: Vec<char> = text1.chars().collect();
        let text2: Vec<char> = text2.chars().collect();
        if text1.is_empty() || text2.is_empty() {
            let mut edits = vec![
                Edit::from_chars(Operation::Delete, &text1),
                Edit::from_chars(Operation::Insert, &text2),
            ];
            edits.retain(|edit| !edit.text.is_empty());
            return edits;
        }
        self.bisect_chars(&text1, &text2, deadline, 0)
    }

    /// Looks for a substring shared by both texts that is at least half as
    /// long as the longer text.
    ///
    /// Returns `None` when there is no such substring, and always when no
    /// timeout is configured: the speedup can yield a non-minimal script, so
    /// exact diffs skip it.
    #[must_use]
    pub fn half_match(&self, text1: &str, text2: &str) -> Option<HalfMatch> {
        let text1: Vec<char> = text1.chars().collect();
        let text2: Vec<char> = text2.chars().collect();
        self.half_match_chars(&text1, &text2).map(|split| HalfMatch {
            prefix1: collect(split.prefix1),
            suffix1: collect(split.suffix1),
            prefix2: collect(split.prefix2),
            suffix2: collect(split.suffix2),
            common: collect(split.common),
        })
    }

    fn deadline(&self) -> Option<Instant> {
        self.config
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout))
    }

    fn diff_chars(
        &self,
        text1: &[char],
        text2: &[char],
        line_mode: bool,
        deadline: Option<Instant>,
        depth: usize,
    ) -> Vec<Edit> {
        if text1 == text2 {
            return if text1.is_empty() {
                Vec::new()
            } else {
                vec![Edit::from_chars(Operation::Equal, text1)]
            };
        }

        let prefix = prefix_len(text1, text2);
        let (head, text1) = text1.split_at(prefix);
        let text2 = &text2[prefix..];
        let suffix = suffix_len(text1, text2);
        let (text1, tail) = text1.split_at(text1.len() - suffix);
        let text2 = &text2[..text2.len() - suffix];

        let mut edits = self.compute(text1, text2, line_mode, deadline, depth);
        if !head.is_empty() {
            edits.insert(0, Edit::from_chars(Operation::Equal, head));
        }
        if !tail.is_empty() {
            edits.push(Edit::from_chars(Operation::Equal, tail));
        }
        cleanup_merge(&mut edits);
        edits
    }

    /// Diffs two texts that share no common prefix or suffix.
    fn compute(
        &self,
        text1: &[char],
        text2: &[char],
        line_mode: bool,
        deadline: Option<Instant>,
        depth: usize,
    ) -> Vec<Edit> {
        if text1.is_empty() {
            return vec![Edit::from_chars(Operation::Insert, text2)];
        }
        if text2.is_empty() {
            return vec![Edit::from_chars(Operation::Delete, text1)];
        }

        let (long, short, op) = if text1.len() > text2.len() {
            (text1, text2, Operation::Delete)
        } else {
            (text2, text1, Operation::Insert)
        };
        if let Some(at) = find_from(long, short, 0) {
            return vec![
                Edit::from_chars(op, &long[..at]),
                Edit::from_chars(Operation::Equal, short),
                Edit::from_chars(op, &long[at + short.len()..]),
            ];
        }
        if short.len() == 1 {
            return coarse(text1, text2);
        }
        if depth >= self.config.max_depth {
            trace_diff!(depth, "recursion limit reached, emitting coarse edits");
            return coarse(text1, text2);
        }

        if let Some(split) = self.half_match_chars(text1, text2) {
            let mut edits =
                self.diff_chars(split.prefix1, split.prefix2, line_mode, deadline, depth + 1);
            edits.push(Edit::from_chars(Operation::Equal, split.common));
            edits.extend(self.diff_chars(
                split.suffix1,
                split.suffix2,
                line_mode,
                deadline,
                depth + 1,
            ));
            return edits;
        }

        if line_mode && text1.len() > LINE_MODE_MIN_CHARS && text2.len() > LINE_MODE_MIN_CHARS {
            return self.line_mode(text1, text2, deadline, depth);
        }
        self.bisect_chars(text1, text2, deadline, depth)
    }

    /// Diffs line tokens first, then re-diffs each replaced block by character.
    fn line_mode(
        &self,
        text1: &[char],
        text2: &[char],
        deadline: Option<Instant>,
        depth: usize,
    ) -> Vec<Edit> {
        trace_diff!(
            chars1 = text1.len(),
            chars2 = text2.len(),
            "diffing by line"
        );
        let encoding = LineEncoding::lines_to_chars(&collect(text1), &collect(text2));
        let tokens1: Vec<char> = encoding.chars1.chars().collect();
        let tokens2: Vec<char> = encoding.chars2.chars().collect();
        let mut edits = self.diff_chars(&tokens1, &tokens2, false, deadline, depth + 1);
        encoding.chars_to_lines(&mut edits);
        cleanup_semantic(&mut edits);

        // Sentinel so the final replacement block is flushed.
        edits.push(Edit::equal(String::new()));
        let mut pointer = 0;
        let mut count_delete = 0;
        let mut count_insert = 0;
        let mut text_delete = String::new();
        let mut text_insert = String::new();
        while pointer < edits.len() {
            match edits[pointer].op {
                Operation::Insert => {
                    count_insert += 1;
                    text_insert.push_str(&edits[pointer].text);
                }
                Operation::Delete => {
                    count_delete += 1;
                    text_delete.push_str(&edits[pointer].text);
                }
                Operation::Equal => {
                    if count_delete >= 1 && count_insert >= 1 {
                        let start = pointer - count_delete - count_insert;
                        let deleted: Vec<char> = text_delete.chars().collect();
                        let inserted: Vec<char> = text_insert.chars().collect();
                        let refined =
                            self.diff_chars(&deleted, &inserted, false, deadline, depth + 1);
                        let refined_len = refined.len();
                        edits.splice(start..pointer, refined);
                        pointer = start + refined_len;
                    }
                    count_delete = 0;
                    count_insert = 0;
                    text_delete.clear();
                    text_insert.clear();
                }
            }
            pointer += 1;
        }
        edits.pop();
        edits
    }

    fn bisect_chars(
        &self,
        text1: &[char],
        text2: &[char],
        deadline: Option<Instant>,
        depth: usize,
    ) -> Vec<Edit> {
        let len1 = signed(text1.len());
        let len2 = signed(text2.len());
        let max_d = (len1 + len2 + 1) / 2;
        let v_offset = max_d;
        let v_len = 2 * max_d + 2;
        let mut v1 = vec![-1_isize; unsigned(v_len)];
        let mut v2 = vec![-1_isize; unsigned(v_len)];
        v1[unsigned(v_offset + 1)] = 0;
        v2[unsigned(v_offset + 1)] = 0;

        let delta = len1 - len2;
        // An odd delta means the forward path is the one that can meet the
        // reverse path first.
        let front = delta % 2 != 0;
        let (mut k1_start, mut k1_end) = (0_isize, 0_isize);
        let (mut k2_start, mut k2_end) = (0_isize, 0_isize);

        for d in 0..max_d {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                trace_diff!(
                    chars1 = text1.len(),
                    chars2 = text2.len(),
                    steps = d,
                    "bisect deadline reached"
                );
                break;
            }

            let mut k1 = -d + k1_start;
            while k1 <= d - k1_end {
                let k1_offset = unsigned(v_offset + k1);
                let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                    v1[k1_offset + 1]
                } else {
                    v1[k1_offset - 1] + 1
                };
                let mut y1 = x1 - k1;
                while x1 < len1 && y1 < len2 && text1[unsigned(x1)] == text2[unsigned(y1)] {
                    x1 += 1;
                    y1 += 1;
                }
                v1[k1_offset] = x1;
                if x1 > len1 {
                    k1_end += 2;
                } else if y1 > len2 {
                    k1_start += 2;
                } else if front {
                    let k2_offset = v_offset + delta - k1;
                    if (0..v_len).contains(&k2_offset) && v2[unsigned(k2_offset)] != -1 {
                        let x2 = len1 - v2[unsigned(k2_offset)];
                        if x1 >= x2 {
                            return self.bisect_split(
                                text1,
                                text2,
                                unsigned(x1),
                                unsigned(y1),
                                deadline,
                                depth,
                            );
                        }
                    }
                }
                k1 += 2;
            }

            let mut k2 = -d + k2_start;
            while k2 <= d - k2_end {
                let k2_offset = unsigned(v_offset + k2);
                let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                    v2[k2_offset + 1]
                } else {
                    v2[k2_offset - 1] + 1
                };
                let mut y2 = x2 - k2;
                while x2 < len1
                    && y2 < len2
                    && text1[unsigned(len1 - x2 - 1)] == text2[unsigned(len2 - y2 - 1)]
                {
                    x2 += 1;
                    y2 += 1;
                }
                v2[k2_offset] = x2;
                if x2 > len1 {
                    k2_end += 2;
                } else if y2 > len2 {
                    k2_start += 2;
                } else if !front {
                    let k1_offset = v_offset + delta - k2;
                    if (0..v_len).contains(&k1_offset) && v1[unsigned(k1_offset)] != -1 {
                        let x1 = v1[unsigned(k1_offset)];
                        let y1 = v_offset + x1 - k1_offset;
                        if x1 >= len1 - x2 {
                            return self.bisect_split(
                                text1,
                                text2,
                                unsigned(x1),
                                unsigned(y1),
                                deadline,
                                depth,
                            );
                        }
                    }
                }
                k2 += 2;
            }
        }

        coarse(text1, text2)
    }

    fn bisect_split(
        &self,
        text1: &[char],
        text2: &[char],
        x: usize,
        y: usize,
        deadline: Option<Instant>,
        depth: usize,
    ) -> Vec<Edit> {
        let (text1a, text1b) = text1.split_at(x);
        let (text2a, text2b) = text2.split_at(y);
        let mut edits = self.diff_chars(text1a, text2a, false, deadline, depth + 1);
        edits.extend(self.diff_chars(text1b, text2b, false, deadline, depth + 1));
        edits
    }

    fn half_match_chars<'a>(&self, text1: &'a [char], text2: &'a [char]) -> Option<Split<'a>> {
        if self.config.timeout.is_none() {
            return None;
        }
        let (long, short) = if text1.len() > text2.len() {
            (text1, text2)
        } else {
            (text2, text1)
        };
        if long.len() < 4 || short.len() * 2 < long.len() {
            return None;
        }

        // Seed from the second quarter and from the middle of the long text.
        let first = half_match_at(long, short, long.len().div_ceil(4));
        let second = half_match_at(long, short, long.len().div_ceil(2));
        let best = match (first, second) {
            (None, None) => return None,
            (Some(found), None) | (None, Some(found)) => found,
            (Some(first), Some(second)) => {
                if first.common.len() > second.common.len() {
                    first
                } else {
                    second
                }
            }
        };

        Some(if text1.len() > text2.len() {
            best
        } else {
            Split {
                prefix1: best.prefix2,
                suffix1: best.suffix2,
                prefix2: best.prefix1,
                suffix2: best.suffix1,
                common: best.common,
            }
        })
    }
}

/// Does a substring of `short` exist within `long` such that the substring is
/// at least half the length of `long`, seeded at `long[i..i + len / 4]`?
///
/// The returned split has `long` as its first text.
fn half_match_at<'a>(long: &'a [char], short: &'a [char], i: usize) -> Option<Split<'a>> {
    let seed = &long[i..i + long.len() / 4];
    let mut best: Option<Split<'a>> = None;
    let mut best_len = 0;
    let mut from = 0;
    while let Some(j) = find_from(short, seed, from) {
        let prefix = prefix_len(&long[i..], &short[j..]);
        let suffix = suffix_len(&long[..i], &short[..j]);
        if best_len < prefix + suffix {
            best_len = prefix + suffix;
            best = Some(Split {
                prefix1: &long[..i - suffix],
                suffix1: &long[i + prefix..],
                prefix2: &short[..j - suffix],
                suffix2: &short[j + prefix..],
                common: &short[j - suffix..j + prefix],
            });
        }
        from = j + 1;
    }
    best.filter(|_| best_len * 2 >= long.len())
}

fn coarse(text1: &[char], text2: &[char]) -> Vec<Edit> {
    vec![
        Edit::from_chars(Operation::Delete, text1),
        Edit::from_chars(Operation::Insert, text2),
    ]
}

#[inline]
fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

#[inline]
fn unsigned(value: isize) -> usize {
    usize::try_from(value).unwrap_or_default()
}
