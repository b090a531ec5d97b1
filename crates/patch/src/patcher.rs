//! crates/patch/src/patcher.rs
//! Patch construction: cutting an edit script into hunks and framing each
//! hunk with enough context to be located again.

use diff::{Differ, Edit, Operation, cleanup_merge, source_text};
use logging::trace_patch;
use matching::Matcher;

use crate::config::PatchConfig;
use crate::error::{PatchError, PatchResult};
use crate::patch::Patch;

/// Inputs accepted by [`Patcher::make`].
///
/// Every member is optional so callers holding possibly-absent values can
/// forward them unchanged; an absent member is reported as
/// [`PatchError::MissingInput`].
#[derive(Clone, Copy, Debug)]
pub enum PatchInput<'a> {
    /// Source and destination texts; the script is computed.
    Texts {
        /// Text before the change.
        source: Option<&'a str>,
        /// Text after the change.
        destination: Option<&'a str>,
    },
    /// An edit script alone; the source text is recovered from it.
    Edits(Option<&'a [Edit]>),
    /// Source text plus the script that transforms it.
    TextAndEdits {
        /// Text before the change.
        source: Option<&'a str>,
        /// Script from `source` to the destination.
        edits: Option<&'a [Edit]>,
    },
    /// Both texts plus the script. The destination is redundant and unused.
    TextsAndEdits {
        /// Text before the change.
        source: Option<&'a str>,
        /// Text after the change.
        destination: Option<&'a str>,
        /// Script from `source` to `destination`.
        edits: Option<&'a [Edit]>,
    },
}

/// Builds, splits, pads and applies patches.
///
/// # Examples
///
/// ```
/// use patch::Patcher;
///
/// let patcher = Patcher::default();
/// let patches = patcher.make_from_texts("The cat sat.", "The dog sat.");
/// let (text, applied) = patcher.apply(&patches, "The cat sat.");
/// assert_eq!(text, "The dog sat.");
/// assert_eq!(applied, vec![true]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Patcher {
    pub(crate) config: PatchConfig,
    pub(crate) differ: Differ,
    pub(crate) matcher: Matcher,
}

impl Patcher {
    /// Creates a patcher with the given configuration.
    #[must_use]
    pub fn new(config: PatchConfig) -> Self {
        let matcher = Matcher::new(config.matching);
        Self {
            // The matcher clamps max_bits; keep the copy in sync with it.
            config: PatchConfig {
                matching: *matcher.config(),
                ..config
            },
            differ: Differ::new(config.diff),
            matcher,
        }
    }

    /// The configuration this patcher runs with.
    #[must_use]
    pub const fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Largest hunk, in characters, the matcher can relocate fuzzily.
    pub(crate) const fn max_bits(&self) -> usize {
        self.config.matching.max_bits
    }

    /// Builds patches turning `source` into `destination`.
    ///
    /// The script is computed without line mode and normalized with
    /// [`cleanup_merge`] only.
    #[must_use]
    pub fn make_from_texts(&self, source: &str, destination: &str) -> Vec<Patch> {
        let mut edits = self.differ.diff(source, destination, false);
        cleanup_merge(&mut edits);
        self.make_from_text_and_edits(source, &edits)
    }

    /// Builds patches from an edit script, recovering the source text from it.
    #[must_use]
    pub fn make_from_edits(&self, edits: &[Edit]) -> Vec<Patch> {
        let source = source_text(edits);
        self.make_from_text_and_edits(&source, edits)
    }

    /// Builds patches from the source text and the script that transforms it.
    ///
    /// The script is cut wherever an equality of at least twice the margin
    /// separates two changes. Shorter equalities stay inside the current hunk.
    /// Each hunk then gets context from the text as it stands once the earlier
    /// hunks have been applied, so offsets in `start2` are rolling.
    #[must_use]
    pub fn make_from_text_and_edits(&self, source: &str, edits: &[Edit]) -> Vec<Patch> {
        let mut patches = Vec::new();
        let Some(last) = edits.len().checked_sub(1) else {
            return patches;
        };

        let span = 2 * self.config.margin;
        let mut patch = Patch::default();
        let mut count1 = 0;
        let mut count2 = 0;
        // `prepatch` holds the text with every finished hunk applied;
        // `postpatch` also has the current hunk's edits applied.
        let mut prepatch: Vec<char> = source.chars().collect();
        let mut postpatch = prepatch.clone();

        for (index, edit) in edits.iter().enumerate() {
            let len = edit.char_len();
            if patch.edits.is_empty() && edit.op != Operation::Equal {
                patch.start1 = count1;
                patch.start2 = count2;
            }

            match edit.op {
                Operation::Insert => {
                    patch.edits.push(edit.clone());
                    patch.length2 += len;
                    let at = count2.min(postpatch.len());
                    postpatch.splice(at..at, edit.text.chars());
                }
                Operation::Delete => {
                    patch.edits.push(edit.clone());
                    patch.length1 += len;
                    let from = count2.min(postpatch.len());
                    let to = (count2 + len).min(postpatch.len());
                    postpatch.drain(from..to);
                }
                Operation::Equal => {
                    if len <= span && !patch.edits.is_empty() && index != last {
                        patch.edits.push(edit.clone());
                        patch.length1 += len;
                        patch.length2 += len;
                    }
                    if len >= span && !patch.edits.is_empty() {
                        self.frame(&mut patch, &prepatch);
                        patches.push(std::mem::take(&mut patch));
                        prepatch.clone_from(&postpatch);
                        count1 = count2;
                    }
                }
            }

            if edit.op != Operation::Insert {
                count1 += len;
            }
            if edit.op != Operation::Delete {
                count2 += len;
            }
        }

        if !patch.edits.is_empty() {
            self.frame(&mut patch, &prepatch);
            patches.push(patch);
        }

        trace_patch!("built {} patches from {} edits", patches.len(), edits.len());
        patches
    }

    /// Builds patches from whichever inputs are supplied.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::MissingInput`] when any member of `input` is
    /// `None`.
    pub fn make(&self, input: PatchInput<'_>) -> PatchResult<Vec<Patch>> {
        match input {
            PatchInput::Texts {
                source: Some(source),
                destination: Some(destination),
            } => Ok(self.make_from_texts(source, destination)),
            PatchInput::Edits(Some(edits)) => Ok(self.make_from_edits(edits)),
            PatchInput::TextAndEdits {
                source: Some(source),
                edits: Some(edits),
            }
            | PatchInput::TextsAndEdits {
                source: Some(source),
                destination: Some(_),
                edits: Some(edits),
            } => Ok(self.make_from_text_and_edits(source, edits)),
            _ => Err(PatchError::MissingInput),
        }
    }

    /// Grows the context around `patch` until its source side occurs only
    /// once in `text`, then adds one more margin.
    ///
    /// Growth stops early once the pattern reaches `max_bits - 2 * margin`
    /// characters so the framed hunk stays within what the matcher can search
    /// for. The context is added as leading and trailing equalities and the
    /// offsets and lengths are adjusted to cover it. Does nothing for an empty
    /// `text`.
    pub fn add_context(&self, patch: &mut Patch, text: &str) {
        let text: Vec<char> = text.chars().collect();
        self.frame(patch, &text);
    }

    fn frame(&self, patch: &mut Patch, text: &[char]) {
        if text.is_empty() {
            return;
        }
        let margin = self.config.margin;
        let limit = self.max_bits().saturating_sub(2 * margin);
        let start = patch.start2.min(text.len());
        let end = (patch.start2 + patch.length1).min(text.len());

        let mut padding = 0;
        let mut pattern = &text[start..end];
        while margin > 0 && pattern.len() < limit && !is_unique(text, pattern) {
            padding += margin;
            let from = start.saturating_sub(padding);
            let to = (end + padding).min(text.len());
            pattern = &text[from..to];
        }
        padding += margin;

        let prefix = &text[start.saturating_sub(padding)..start];
        let suffix = &text[end..(end + padding).min(text.len())];
        let prefix_len = prefix.len();
        let suffix_len = suffix.len();

        if !prefix.is_empty() {
            patch.edits.insert(0, Edit::equal(prefix.iter().collect::<String>()));
        }
        if !suffix.is_empty() {
            patch.edits.push(Edit::equal(suffix.iter().collect::<String>()));
        }
        patch.start1 = patch.start1.saturating_sub(prefix_len);
        patch.start2 = patch.start2.saturating_sub(prefix_len);
        patch.length1 += prefix_len + suffix_len;
        patch.length2 += prefix_len + suffix_len;
    }
}

/// True when the first and last occurrences of `pattern` coincide.
///
/// The empty pattern occurs at every offset, so it is unique only in the
/// empty text.
fn is_unique(text: &[char], pattern: &[char]) -> bool {
    if pattern.is_empty() {
        return text.is_empty();
    }
    let first = text.windows(pattern.len()).position(|w| w == pattern);
    let last = text.windows(pattern.len()).rposition(|w| w == pattern);
    first == last
}
