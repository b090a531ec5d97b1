//! crates/patch/src/split.rs
//! Bounding hunk size and padding the text edges before application.

use std::collections::VecDeque;

use diff::{Edit, Operation};

use crate::patch::Patch;
use crate::patcher::Patcher;

impl Patcher {
    /// Breaks every patch whose source side exceeds `max_bits` characters
    /// into consecutive pieces that fit.
    ///
    /// Each piece starts with up to one margin of context taken from the end
    /// of the previous piece's destination text and ends with up to one margin
    /// taken from the source text still to come. A deletion longer than twice
    /// `max_bits` that opens a piece is kept whole; application then locates
    /// it by its head and tail. Pieces consisting only of context are dropped.
    pub fn split_max(&self, patches: &mut Vec<Patch>) {
        let patch_size = self.max_bits();
        // Pieces could not make progress past their own context.
        if patch_size <= 2 * self.config.margin {
            return;
        }
        if patches.iter().all(|patch| patch.length1 <= patch_size) {
            return;
        }

        let mut split = Vec::with_capacity(patches.len());
        for patch in patches.drain(..) {
            if patch.length1 <= patch_size {
                split.push(patch);
            } else {
                self.split_one(patch, &mut split);
            }
        }
        *patches = split;
    }

    fn split_one(&self, big: Patch, out: &mut Vec<Patch>) {
        let patch_size = self.max_bits();
        let margin = self.config.margin;
        let fill_limit = patch_size - margin;

        let mut start1 = big.start1;
        let mut start2 = big.start2;
        let mut precontext: Vec<char> = Vec::new();
        let mut pending: VecDeque<(Operation, Vec<char>)> = big
            .edits
            .into_iter()
            .map(|edit| (edit.op, edit.text.chars().collect()))
            .collect();

        while !pending.is_empty() {
            let mut patch = Patch {
                start1: start1.saturating_sub(precontext.len()),
                start2: start2.saturating_sub(precontext.len()),
                ..Patch::default()
            };
            let mut empty = true;
            if !precontext.is_empty() {
                patch.length1 = precontext.len();
                patch.length2 = precontext.len();
                patch.edits.push(Edit::equal(collect(&precontext)));
            }

            while patch.length1 < fill_limit {
                let Some((op, text)) = pending.front_mut() else {
                    break;
                };
                let op = *op;
                let len = text.len();

                if op == Operation::Insert {
                    patch.length2 += len;
                    start2 = start2.saturating_add(len);
                    patch.edits.push(Edit::insert(collect(text)));
                    pending.pop_front();
                    empty = false;
                } else if op == Operation::Delete
                    && patch.edits.len() == 1
                    && patch.edits[0].op == Operation::Equal
                    && len > 2 * patch_size
                {
                    patch.length1 += len;
                    start1 = start1.saturating_add(len);
                    patch.edits.push(Edit::delete(collect(text)));
                    pending.pop_front();
                    empty = false;
                } else {
                    let take = len.min(fill_limit - patch.length1);
                    let piece: Vec<char> = text.drain(..take).collect();
                    let exhausted = text.is_empty();
                    patch.length1 += take;
                    start1 = start1.saturating_add(take);
                    if op == Operation::Equal {
                        patch.length2 += take;
                        start2 = start2.saturating_add(take);
                    } else {
                        empty = false;
                    }
                    patch.edits.push(Edit::new(op, collect(&piece)));
                    if exhausted {
                        pending.pop_front();
                    }
                }
            }

            let destination: Vec<char> = patch.destination_text().chars().collect();
            precontext = destination[destination.len().saturating_sub(margin)..].to_vec();

            let postcontext: String = pending
                .iter()
                .filter(|(op, _)| *op != Operation::Insert)
                .flat_map(|(_, text)| text.iter())
                .take(margin)
                .collect();
            if !postcontext.is_empty() {
                let len = postcontext.chars().count();
                patch.length1 += len;
                patch.length2 += len;
                match patch.edits.last_mut() {
                    Some(last) if last.op == Operation::Equal => last.text.push_str(&postcontext),
                    _ => patch.edits.push(Edit::equal(postcontext)),
                }
            }

            if !empty {
                out.push(patch);
            }
        }
    }

    /// Frames the patches with a margin of filler characters on both edges
    /// of the text so changes at the very start or end can still be located.
    ///
    /// Returns the filler (the characters `U+0001` through the margin), which
    /// the caller adds to both ends of the text. All offsets shift by its
    /// length, and the first and last patches get their outer context topped
    /// up with filler until it spans a full margin.
    pub fn add_padding(&self, patches: &mut [Patch]) -> String {
        let filler: Vec<char> = (1..=self.config.margin)
            .filter_map(|code| u32::try_from(code).ok().and_then(char::from_u32))
            .collect();
        let pad = filler.len();

        for patch in patches.iter_mut() {
            patch.start1 = patch.start1.saturating_add(pad);
            patch.start2 = patch.start2.saturating_add(pad);
        }

        if let Some(first) = patches.first_mut() {
            match first.edits.first_mut() {
                Some(edit) if edit.op == Operation::Equal => {
                    let existing = edit.char_len();
                    if pad > existing {
                        let extra = pad - existing;
                        let mut text = collect(&filler[existing..]);
                        text.push_str(&edit.text);
                        edit.text = text;
                        first.start1 -= extra;
                        first.start2 -= extra;
                        first.length1 += extra;
                        first.length2 += extra;
                    }
                }
                _ => {
                    first.edits.insert(0, Edit::equal(collect(&filler)));
                    first.start1 -= pad;
                    first.start2 -= pad;
                    first.length1 += pad;
                    first.length2 += pad;
                }
            }
        }

        if let Some(last) = patches.last_mut() {
            match last.edits.last_mut() {
                Some(edit) if edit.op == Operation::Equal => {
                    let existing = edit.char_len();
                    if pad > existing {
                        let extra = pad - existing;
                        edit.text.extend(&filler[..extra]);
                        last.length1 += extra;
                        last.length2 += extra;
                    }
                }
                _ => {
                    last.edits.push(Edit::equal(collect(&filler)));
                    last.length1 += pad;
                    last.length2 += pad;
                }
            }
        }

        collect(&filler)
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
