//! crates/diff/src/cleanup.rs
//! Post-processing passes that simplify an edit script.
//!
//! Every pass preserves the source and destination texts the script
//! reconstructs; they differ only in what they trade away:
//!
//! - [`cleanup_merge`] normalizes without changing meaning.
//! - [`cleanup_semantic_lossless`] slides edits onto word and line boundaries.
//! - [`cleanup_semantic`] folds coincidental equalities for human readers.
//! - [`cleanup_efficiency`] folds short equalities to reduce edit count.

use std::mem;

use crate::edit::{Edit, Operation};
use crate::text::{
    char_len, collect, common_prefix, common_suffix, overlap_len, split_at_char, suffix_len,
};

/// Normalizes an edit script in place.
///
/// Drops empty edits, merges adjacent edits of the same kind, factors text
/// shared by neighbouring deletions and insertions into the surrounding
/// equalities, and slides single edits sideways when that removes an
/// equality. Repeats until nothing changes.
///
/// ```
/// use diff::{Edit, cleanup_merge};
///
/// let mut edits = vec![Edit::delete("a"), Edit::insert("abc"), Edit::delete("dc")];
/// cleanup_merge(&mut edits);
/// assert_eq!(
///     edits,
///     [Edit::equal("a"), Edit::delete("d"), Edit::insert("b"), Edit::equal("c")]
/// );
/// ```
pub fn cleanup_merge(edits: &mut Vec<Edit>) {
    loop {
        edits.retain(|edit| !edit.text.is_empty());
        merge_runs(edits);
        if !slide_single_edits(edits) {
            break;
        }
    }
}

fn merge_runs(edits: &mut Vec<Edit>) {
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
                pointer += 1;
            }
            Operation::Delete => {
                count_delete += 1;
                text_delete.push_str(&edits[pointer].text);
                pointer += 1;
            }
            Operation::Equal => {
                let run = count_delete + count_insert;
                if run > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let common = common_prefix(&text_insert, &text_delete);
                        if common != 0 {
                            let (head, rest) = split_at_char(&text_insert, common);
                            let head = head.to_owned();
                            text_insert = rest.to_owned();
                            text_delete = split_at_char(&text_delete, common).1.to_owned();
                            let run_start = pointer - run;
                            if run_start > 0 && edits[run_start - 1].op == Operation::Equal {
                                edits[run_start - 1].text.push_str(&head);
                            } else {
                                edits.insert(0, Edit::equal(head));
                                pointer += 1;
                            }
                        }
                        let common = common_suffix(&text_insert, &text_delete);
                        if common != 0 {
                            let (rest, tail) =
                                split_at_char(&text_insert, char_len(&text_insert) - common);
                            edits[pointer].text.insert_str(0, tail);
                            text_insert = rest.to_owned();
                            let keep = char_len(&text_delete) - common;
                            text_delete = split_at_char(&text_delete, keep).0.to_owned();
                        }
                    }
                    pointer -= run;
                    edits.drain(pointer..pointer + run);
                    if !text_delete.is_empty() {
                        edits.insert(pointer, Edit::delete(mem::take(&mut text_delete)));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        edits.insert(pointer, Edit::insert(mem::take(&mut text_insert)));
                        pointer += 1;
                    }
                    if pointer != 0 && edits[pointer - 1].op == Operation::Equal {
                        let text = edits.remove(pointer).text;
                        edits[pointer - 1].text.push_str(&text);
                    } else {
                        pointer += 1;
                    }
                } else if pointer != 0 && edits[pointer - 1].op == Operation::Equal {
                    let text = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&text);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if edits.last().is_some_and(|edit| edit.text.is_empty()) {
        edits.pop();
    }
}

/// Shifts single edits that sit between two equalities.
///
/// `A<ins>BA</ins>C` becomes `<ins>AB</ins>AC` and `A<ins>CB</ins>C` becomes
/// `AC<ins>BC</ins>`. Returns whether anything moved.
fn slide_single_edits(edits: &mut Vec<Edit>) -> bool {
    let mut changed = false;
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].op == Operation::Equal && edits[pointer + 1].op == Operation::Equal
        {
            let prev = edits[pointer - 1].text.clone();
            let next = edits[pointer + 1].text.clone();
            let current = &edits[pointer].text;
            if let Some(head) = current.strip_suffix(prev.as_str()) {
                edits[pointer].text = format!("{prev}{head}");
                edits[pointer + 1].text = format!("{prev}{next}");
                edits.remove(pointer - 1);
                changed = true;
            } else if let Some(tail) = current.strip_prefix(next.as_str()) {
                edits[pointer].text = format!("{tail}{next}");
                edits[pointer - 1].text.push_str(&next);
                edits.remove(pointer + 1);
                changed = true;
            }
        }
        pointer += 1;
    }
    changed
}

/// Folds equalities that are semantically trivial.
///
/// An equality no longer than the larger of the insertions and deletions on
/// each side of it is turned into a deletion plus an insertion. Afterwards
/// edits are aligned to natural boundaries and overlaps between adjacent
/// deletions and insertions are pulled out as equalities when they cover
/// at least half of either side.
///
/// ```
/// use diff::{Edit, cleanup_semantic};
///
/// let mut edits = vec![Edit::delete("a"), Edit::equal("b"), Edit::delete("c")];
/// cleanup_semantic(&mut edits);
/// assert_eq!(edits, [Edit::delete("abc"), Edit::insert("b")]);
/// ```
pub fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    let (mut insert_before, mut delete_before) = (0, 0);
    let (mut insert_after, mut delete_after) = (0, 0);

    while pointer < edits.len() {
        let edit = &edits[pointer];
        if edit.op == Operation::Equal {
            equalities.push(pointer);
            insert_before = insert_after;
            delete_before = delete_after;
            insert_after = 0;
            delete_after = 0;
            last_equality = Some(edit.char_len());
            pointer += 1;
            continue;
        }

        if edit.op == Operation::Insert {
            insert_after += edit.char_len();
        } else {
            delete_after += edit.char_len();
        }
        let foldable = last_equality.is_some_and(|len| {
            len <= insert_before.max(delete_before) && len <= insert_after.max(delete_after)
        });
        if let (true, Some(&at)) = (foldable, equalities.last()) {
            let text = edits[at].text.clone();
            edits.insert(at, Edit::delete(text));
            edits[at + 1].op = Operation::Insert;
            equalities.pop();
            equalities.pop();
            insert_before = 0;
            delete_before = 0;
            insert_after = 0;
            delete_after = 0;
            last_equality = None;
            changed = true;
            // Re-scan from just past the equality before the folded one.
            pointer = equalities.last().map_or(0, |&prior| prior + 1);
            continue;
        }
        pointer += 1;
    }

    if changed {
        cleanup_merge(edits);
    }
    cleanup_semantic_lossless(edits);
    extract_overlaps(edits);
}

/// Pulls overlaps between a deletion and the following insertion out into an
/// equality.
///
/// `<del>abcxxx</del><ins>xxxdef</ins>` becomes
/// `<del>abc</del>xxx<ins>def</ins>`, and `<del>xxxabc</del><ins>defxxx</ins>`
/// becomes `<ins>def</ins>xxx<del>abc</del>`.
fn extract_overlaps(edits: &mut Vec<Edit>) {
    let mut pointer = 1;
    while pointer < edits.len() {
        if edits[pointer - 1].op == Operation::Delete && edits[pointer].op == Operation::Insert {
            let deletion: Vec<char> = edits[pointer - 1].text.chars().collect();
            let insertion: Vec<char> = edits[pointer].text.chars().collect();
            let forward = overlap_len(&deletion, &insertion);
            let reverse = overlap_len(&insertion, &deletion);
            if forward >= reverse {
                if forward * 2 >= deletion.len() || forward * 2 >= insertion.len() {
                    edits.insert(pointer, Edit::from_chars(Operation::Equal, &insertion[..forward]));
                    edits[pointer - 1].text = collect(&deletion[..deletion.len() - forward]);
                    edits[pointer + 1].text = collect(&insertion[forward..]);
                    pointer += 1;
                }
            } else if reverse * 2 >= deletion.len() || reverse * 2 >= insertion.len() {
                edits.insert(pointer, Edit::from_chars(Operation::Equal, &deletion[..reverse]));
                edits[pointer - 1] =
                    Edit::from_chars(Operation::Insert, &insertion[..insertion.len() - reverse]);
                edits[pointer + 1] = Edit::from_chars(Operation::Delete, &deletion[reverse..]);
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

/// Slides single edits between two equalities onto the best boundary.
///
/// `The c<ins>at c</ins>ame.` becomes `The <ins>cat </ins>came.`. Boundaries
/// are ranked: text edge, blank line, line break, end of sentence,
/// whitespace, any other non-alphanumeric character. Ties resolve to the
/// rightmost candidate.
///
/// ```
/// use diff::{Edit, cleanup_semantic_lossless};
///
/// let mut edits = vec![
///     Edit::equal("The c"),
///     Edit::insert("ow and the c"),
///     Edit::equal("at."),
/// ];
/// cleanup_semantic_lossless(&mut edits);
/// assert_eq!(
///     edits,
///     [Edit::equal("The "), Edit::insert("cow and the "), Edit::equal("cat.")]
/// );
/// ```
pub fn cleanup_semantic_lossless(edits: &mut Vec<Edit>) {
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].op == Operation::Equal && edits[pointer + 1].op == Operation::Equal
        {
            let mut before: Vec<char> = edits[pointer - 1].text.chars().collect();
            let mut edit: Vec<char> = edits[pointer].text.chars().collect();
            let mut after: Vec<char> = edits[pointer + 1].text.chars().collect();

            // Shift the edit as far left as it goes first.
            let shared = suffix_len(&before, &edit);
            if shared > 0 {
                let moved = edit.split_off(edit.len() - shared);
                before.truncate(before.len() - shared);
                edit = [moved.as_slice(), edit.as_slice()].concat();
                after = [moved.as_slice(), after.as_slice()].concat();
            }

            let mut best = (before.clone(), edit.clone(), after.clone());
            let mut best_score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
            while let (Some(&first), Some(&next)) = (edit.first(), after.first()) {
                if first != next {
                    break;
                }
                before.push(first);
                edit.remove(0);
                edit.push(next);
                after.remove(0);
                let score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
                if score >= best_score {
                    best_score = score;
                    best = (before.clone(), edit.clone(), after.clone());
                }
            }

            let (best_before, best_edit, best_after) = best;
            let best_before = collect(&best_before);
            if best_before != edits[pointer - 1].text {
                if best_before.is_empty() {
                    edits.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    edits[pointer - 1].text = best_before;
                }
                edits[pointer].text = collect(&best_edit);
                if best_after.is_empty() {
                    edits.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    edits[pointer + 1].text = collect(&best_after);
                }
            }
        }
        pointer += 1;
    }
}

/// Scores how natural a split between `one` and `two` is, from 6 (text edge)
/// down to 0 (inside a word).
fn boundary_score(one: &[char], two: &[char]) -> u8 {
    let (Some(&last), Some(&first)) = (one.last(), two.first()) else {
        return 6;
    };
    let non_alnum1 = !last.is_alphanumeric();
    let non_alnum2 = !first.is_alphanumeric();
    let space1 = non_alnum1 && last.is_whitespace();
    let space2 = non_alnum2 && first.is_whitespace();
    let break1 = space1 && matches!(last, '\r' | '\n');
    let break2 = space2 && matches!(first, '\r' | '\n');
    let blank1 = break1 && ends_with_blank_line(one);
    let blank2 = break2 && starts_with_blank_line(two);

    if blank1 || blank2 {
        5
    } else if break1 || break2 {
        4
    } else if non_alnum1 && !space1 && space2 {
        3
    } else if space1 || space2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

fn starts_with_blank_line(text: &[char]) -> bool {
    let skip_cr = |rest: &[char]| -> usize { usize::from(rest.first() == Some(&'\r')) };
    let mut at = skip_cr(text);
    if text.get(at) != Some(&'\n') {
        return false;
    }
    at += 1;
    at += skip_cr(&text[at..]);
    text.get(at) == Some(&'\n')
}

/// Folds short equalities that cost more to keep than to rewrite.
///
/// An equality shorter than `edit_cost` is folded when it has both an
/// insertion and a deletion on each side, or when it is shorter than half the
/// edit cost and three of those four edits are present.
///
/// ```
/// use diff::{Edit, cleanup_efficiency};
///
/// let mut edits = vec![
///     Edit::delete("ab"),
///     Edit::insert("12"),
///     Edit::equal("xyz"),
///     Edit::delete("cd"),
///     Edit::insert("34"),
/// ];
/// cleanup_efficiency(&mut edits, 4);
/// assert_eq!(edits, [Edit::delete("abxyzcd"), Edit::insert("12xyz34")]);
/// ```
pub fn cleanup_efficiency(edits: &mut Vec<Edit>, edit_cost: usize) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    let (mut pre_insert, mut pre_delete) = (false, false);
    let (mut post_insert, mut post_delete) = (false, false);

    while pointer < edits.len() {
        let edit = &edits[pointer];
        if edit.op == Operation::Equal {
            let len = edit.char_len();
            if len < edit_cost && (post_insert || post_delete) {
                equalities.push(pointer);
                pre_insert = post_insert;
                pre_delete = post_delete;
                last_equality = Some(len);
            } else {
                equalities.clear();
                last_equality = None;
            }
            post_insert = false;
            post_delete = false;
            pointer += 1;
            continue;
        }

        if edit.op == Operation::Delete {
            post_delete = true;
        } else {
            post_insert = true;
        }
        let flags = [pre_insert, pre_delete, post_insert, post_delete]
            .into_iter()
            .filter(|&flag| flag)
            .count();
        let foldable = last_equality
            .is_some_and(|len| flags == 4 || (len < edit_cost / 2 && flags == 3));
        if let (true, Some(&at)) = (foldable, equalities.last()) {
            let text = edits[at].text.clone();
            edits.insert(at, Edit::delete(text));
            edits[at + 1].op = Operation::Insert;
            equalities.pop();
            last_equality = None;
            changed = true;
            if pre_insert && pre_delete {
                // Nothing before the fold can change; keep scanning forward.
                post_insert = true;
                post_delete = true;
                equalities.clear();
            } else {
                equalities.pop();
                pointer = equalities.last().map_or(0, |&prior| prior + 1);
                post_insert = false;
                post_delete = false;
                continue;
            }
        }
        pointer += 1;
    }

    if changed {
        cleanup_merge(edits);
    }
}
