//! crates/patch/src/apply.rs
//! Fuzzy application of patches to text that may have drifted.

use diff::{Operation, cleanup_semantic_lossless, levenshtein, x_index};
use logging::trace_patch;

use crate::patch::Patch;
use crate::patcher::Patcher;

impl Patcher {
    /// Applies `patches` to `text`, returning the new text and one flag per
    /// applied hunk.
    ///
    /// The patches are not modified: application works on a padded, split
    /// copy, so the flags describe that copy and a patch broken up by
    /// [`split_max`](Self::split_max) reports once per piece.
    ///
    /// Each hunk is located with the fuzzy matcher near where earlier hunks
    /// left the expected offset. A hunk longer than `max_bits` is located by
    /// its head and tail. An exact hit is replaced wholesale; otherwise the
    /// hunk's source side is diffed against what was found and the edits are
    /// mapped through that alignment. A long hunk whose located text differs
    /// by more than `delete_threshold` of its length is rejected, as is a hunk
    /// that cannot be found.
    #[must_use]
    pub fn apply(&self, patches: &[Patch], text: &str) -> (String, Vec<bool>) {
        if patches.is_empty() {
            return (text.to_owned(), Vec::new());
        }

        let mut patches = patches.to_vec();
        let filler = self.add_padding(&mut patches);
        let pad = filler.chars().count();
        self.split_max(&mut patches);

        let mut text: Vec<char> = filler.chars().chain(text.chars()).chain(filler.chars()).collect();
        let max_bits = self.max_bits();
        // Offset between where hunks were expected and where they landed.
        let mut delta: isize = 0;
        let mut results = Vec::with_capacity(patches.len());

        for (index, patch) in patches.iter().enumerate() {
            let expected = signed(patch.start2).saturating_add(delta);
            let source: Vec<char> = patch.source_text().chars().collect();
            let Some((start, end)) = self.locate(&text, &source, expected) else {
                trace_patch!("patch {} not found near {}", index, expected);
                results.push(false);
                delta = delta
                    .saturating_sub(signed(patch.length2).saturating_sub(signed(patch.length1)));
                continue;
            };
            delta = signed(start).saturating_sub(expected);

            let found_end = match end {
                Some(end) => end.saturating_add(max_bits).min(text.len()),
                None => start.saturating_add(source.len()).min(text.len()),
            };
            let found = &text[start..found_end];

            if found == source.as_slice() {
                text.splice(start..found_end, patch.destination_text().chars());
                results.push(true);
                continue;
            }

            let found: String = found.iter().collect();
            let mut alignment = self.differ.diff(&collect(&source), &found, false);
            if source.len() > max_bits
                && levenshtein(&alignment) as f32 / source.len() as f32
                    > self.config.delete_threshold
            {
                trace_patch!("patch {} rejected: located text differs too much", index);
                results.push(false);
                continue;
            }

            cleanup_semantic_lossless(&mut alignment);
            let mut index1 = 0;
            for edit in &patch.edits {
                match edit.op {
                    Operation::Insert => {
                        let at = (start + x_index(&alignment, index1)).min(text.len());
                        text.splice(at..at, edit.text.chars());
                    }
                    Operation::Delete => {
                        let from = (start + x_index(&alignment, index1)).min(text.len());
                        let to = (start + x_index(&alignment, index1 + edit.char_len()))
                            .clamp(from, text.len());
                        text.drain(from..to);
                    }
                    Operation::Equal => {}
                }
                if edit.op != Operation::Delete {
                    index1 += edit.char_len();
                }
            }
            trace_patch!("patch {} applied with drift {}", index, delta);
            results.push(true);
        }

        let end = text.len().saturating_sub(pad).max(pad.min(text.len()));
        let text = collect(&text[pad.min(text.len())..end]);
        (text, results)
    }

    /// Finds where a hunk's source side sits in `text`.
    ///
    /// Returns the start, plus the start of the trailing `max_bits` window when
    /// the source is too long to match in one search.
    fn locate(
        &self,
        text: &[char],
        source: &[char],
        expected: isize,
    ) -> Option<(usize, Option<usize>)> {
        let max_bits = self.max_bits();
        let haystack = collect(text);
        let loc = usize::try_from(expected).unwrap_or(0);

        if source.len() <= max_bits {
            let start = self.matcher.find(&haystack, &collect(source), loc)?;
            return Some((start, None));
        }

        let head = collect(&source[..max_bits]);
        let start = self.matcher.find(&haystack, &head, loc)?;
        let tail = collect(&source[source.len() - max_bits..]);
        let end = self
            .matcher
            .find(&haystack, &tail, loc.saturating_add(source.len() - max_bits))?;
        (start < end).then_some((start, Some(end)))
    }
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
