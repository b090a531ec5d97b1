//! crates/diff/src/lines.rs
//! Line-token encoding used by line-mode diffing.
//!
//! Each distinct line (terminator included) is assigned one synthetic `char`
//! so a line-level diff can run through the ordinary character diff. Token
//! codes skip the surrogate block, which leaves room for a little over a
//! million distinct lines; once that runs out the rest of a text becomes one
//! final line.

use std::collections::HashMap;

use crate::edit::Edit;

const SURROGATE_START: usize = 0xD800;
const SURROGATE_LEN: usize = 0x800;

/// Number of distinct lines, including the reserved empty entry, that can be
/// tokenized in one encoding.
pub const MAX_LINES: usize = char::MAX as usize + 1 - SURROGATE_LEN;

/// Two texts rewritten as line tokens together with the shared line table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineEncoding {
    /// Token string for the first text.
    pub chars1: String,
    /// Token string for the second text.
    pub chars2: String,
    /// Line for each token index. Entry 0 is always the empty string.
    pub lines: Vec<String>,
}

impl LineEncoding {
    /// Tokenizes both texts against one shared line table.
    ///
    /// ```
    /// use diff::LineEncoding;
    ///
    /// let encoded = LineEncoding::lines_to_chars("a\nb\na\n", "b\na\nb\n");
    /// assert_eq!(encoded.chars1, "\u{1}\u{2}\u{1}");
    /// assert_eq!(encoded.lines, ["", "a\n", "b\n"]);
    /// ```
    #[must_use]
    pub fn lines_to_chars(text1: &str, text2: &str) -> Self {
        Self::with_capacity(text1, text2, MAX_LINES)
    }

    fn with_capacity(text1: &str, text2: &str, capacity: usize) -> Self {
        let mut table = LineTable {
            lines: vec![String::new()],
            index: HashMap::new(),
        };
        // Each text may add one folded line past its limit, so the first
        // text gets two thirds of the table and the second all but one slot.
        let chars1 = table.tokenize(text1, capacity * 2 / 3);
        let chars2 = table.tokenize(text2, capacity - 1);
        Self {
            chars1,
            chars2,
            lines: table.lines,
        }
    }

    /// Expands token edits back into the lines they stand for.
    pub fn chars_to_lines(&self, edits: &mut [Edit]) {
        for edit in edits.iter_mut() {
            edit.text = edit
                .text
                .chars()
                .filter_map(|token| self.lines.get(token_index(token)))
                .map(String::as_str)
                .collect();
        }
    }
}

struct LineTable {
    lines: Vec<String>,
    index: HashMap<String, usize>,
}

impl LineTable {
    fn tokenize(&mut self, text: &str, limit: usize) -> String {
        let mut tokens = String::new();
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if let Some(&known) = self.index.get(line) {
                tokens.extend(token_char(known));
                offset += line.len();
                continue;
            }
            let at_capacity = self.lines.len() >= limit;
            let line = if at_capacity { &text[offset..] } else { line };
            let token = self.lines.len();
            self.lines.push(line.to_owned());
            self.index.insert(line.to_owned(), token);
            tokens.extend(token_char(token));
            if at_capacity {
                break;
            }
            offset += line.len();
        }
        tokens
    }
}

fn token_char(index: usize) -> Option<char> {
    let code = if index >= SURROGATE_START {
        index + SURROGATE_LEN
    } else {
        index
    };
    u32::try_from(code).ok().and_then(char::from_u32)
}

fn token_index(token: char) -> usize {
    let code = token as usize;
    if code >= SURROGATE_START + SURROGATE_LEN {
        code - SURROGATE_LEN
    } else {
        code
    }
}
