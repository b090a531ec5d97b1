//! crates/diff/src/script.rs
//! Read-only queries over an edit script.

use crate::edit::{Edit, Operation};

/// Reconstructs the source text (Equal and Delete spans).
///
/// ```
/// use diff::{Edit, source_text};
///
/// let edits = [Edit::equal("jump"), Edit::delete("s"), Edit::insert("ed")];
/// assert_eq!(source_text(&edits), "jumps");
/// ```
#[must_use]
pub fn source_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|edit| edit.op != Operation::Insert)
        .map(|edit| edit.text.as_str())
        .collect()
}

/// Reconstructs the destination text (Equal and Insert spans).
#[must_use]
pub fn destination_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|edit| edit.op != Operation::Delete)
        .map(|edit| edit.text.as_str())
        .collect()
}

/// Maps a character offset in the source text to the destination text.
///
/// An offset inside a deleted span maps to where the deletion happened.
///
/// ```
/// use diff::{Edit, x_index};
///
/// let edits = [Edit::delete("a"), Edit::insert("1234"), Edit::equal("xyz")];
/// assert_eq!(x_index(&edits, 2), 5);
/// ```
#[must_use]
pub fn x_index(edits: &[Edit], loc: usize) -> usize {
    let mut chars1 = 0;
    let mut chars2 = 0;
    let mut last_chars1 = 0;
    let mut last_chars2 = 0;
    let mut landed = None;
    for edit in edits {
        let len = edit.char_len();
        if edit.op != Operation::Insert {
            chars1 += len;
        }
        if edit.op != Operation::Delete {
            chars2 += len;
        }
        if chars1 > loc {
            landed = Some(edit.op);
            break;
        }
        last_chars1 = chars1;
        last_chars2 = chars2;
    }
    if landed == Some(Operation::Delete) {
        return last_chars2;
    }
    last_chars2 + (loc - last_chars1)
}

/// Number of inserted, deleted or substituted characters.
///
/// A deletion and insertion that touch count as substitutions, so the
/// larger of the two is charged.
#[must_use]
pub fn levenshtein(edits: &[Edit]) -> usize {
    let mut distance = 0;
    let mut insertions = 0;
    let mut deletions = 0;
    for edit in edits {
        match edit.op {
            Operation::Insert => insertions += edit.char_len(),
            Operation::Delete => deletions += edit.char_len(),
            Operation::Equal => {
                distance += insertions.max(deletions);
                insertions = 0;
                deletions = 0;
            }
        }
    }
    distance + insertions.max(deletions)
}

/// Renders an edit script as an HTML fragment.
///
/// Deletions are wrapped in `<del>`, insertions in `<ins>`, equalities in
/// `<span>`. `&`, `<` and `>` are escaped and line feeds shown as a pilcrow
/// followed by `<br>`.
///
/// ```
/// use diff::{Edit, pretty_html};
///
/// let edits = [Edit::equal("a\n"), Edit::delete("<B>b</B>"), Edit::insert("c&d")];
/// assert_eq!(
///     pretty_html(&edits),
///     "<span>a&para;<br></span>\
///      <del style=\"background:#ffe6e6;\">&lt;B&gt;b&lt;/B&gt;</del>\
///      <ins style=\"background:#e6ffe6;\">c&amp;d</ins>"
/// );
/// ```
#[must_use]
pub fn pretty_html(edits: &[Edit]) -> String {
    let mut html = String::new();
    for edit in edits {
        let text = edit
            .text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('\n', "&para;<br>");
        match edit.op {
            Operation::Insert => {
                html.push_str("<ins style=\"background:#e6ffe6;\">");
                html.push_str(&text);
                html.push_str("</ins>");
            }
            Operation::Delete => {
                html.push_str("<del style=\"background:#ffe6e6;\">");
                html.push_str(&text);
                html.push_str("</del>");
            }
            Operation::Equal => {
                html.push_str("<span>");
                html.push_str(&text);
                html.push_str("</span>");
            }
        }
    }
    html
}
