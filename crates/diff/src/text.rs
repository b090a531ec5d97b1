//! crates/diff/src/text.rs
//! Character-indexed string helpers shared by the diff passes.
//!
//! All offsets are counted in `char`s, never bytes.

/// Number of characters in `text`.
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the character at `index`, or `text.len()` past the end.
#[must_use]
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(at, _)| at)
}

/// Splits `text` before the character at `index`.
#[must_use]
pub fn split_at_char(text: &str, index: usize) -> (&str, &str) {
    text.split_at(byte_offset(text, index))
}

/// Characters `start..end` of `text`, clamped to its length.
#[must_use]
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end.max(start));
    &text[from..to]
}

/// Length of the common prefix of two texts, in characters.
///
/// ```
/// assert_eq!(diff::common_prefix("1234abcdef", "1234xyz"), 4);
/// assert_eq!(diff::common_prefix("abc", "xyz"), 0);
/// ```
#[must_use]
pub fn common_prefix(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of two texts, in characters.
#[must_use]
pub fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is also a prefix of `b`.
///
/// ```
/// assert_eq!(diff::common_overlap("123456xxx", "xxxabcd"), 3);
/// assert_eq!(diff::common_overlap("fi", "\u{fb01}i"), 0);
/// ```
#[must_use]
pub fn common_overlap(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    overlap_len(&a, &b)
}

pub(crate) fn prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

pub(crate) fn suffix_len(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

pub(crate) fn overlap_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let len = a.len().min(b.len());
    let a = &a[a.len() - len..];
    let b = &b[..len];
    if a == b {
        return len;
    }

    // Grow a candidate suffix of `a`, jumping ahead to wherever it next
    // occurs in `b`, and keep the longest that is also a prefix of `b`.
    let mut best = 0;
    let mut width = 1;
    loop {
        let Some(found) = find_from(b, &a[len - width..], 0) else {
            return best;
        };
        width += found;
        if width > len {
            return best;
        }
        if found == 0 || a[len - width..] == b[..width] {
            best = width;
            width += 1;
            if width > len {
                return best;
            }
        }
    }
}

/// First index `>= from` where `needle` occurs in `haystack`.
pub(crate) fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
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

/// Last index `<= before` where `needle` occurs in `haystack`.
pub(crate) fn rfind_before(haystack: &[char], needle: &[char], before: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let last = before.min(haystack.len() - needle.len());
    (0..=last)
        .rev()
        .find(|&at| haystack[at..at + needle.len()] == *needle)
}

pub(crate) fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
