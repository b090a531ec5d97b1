//! crates/diff/src/edit.rs
//! Edit operations and the edits that make up an edit script.

use std::fmt;

/// Kind of change an [`Edit`] records.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Text present only in the source.
    Delete,
    /// Text present only in the destination.
    Insert,
    /// Text shared by both sides.
    Equal,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Equal => "Equal",
        };
        f.write_str(name)
    }
}

/// One tagged span of an edit script.
///
/// Equality and hashing are structural: two edits are equal when both the
/// operation and the text match.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    /// What happened to `text`.
    pub op: Operation,
    /// The affected span.
    pub text: String,
}

impl Edit {
    /// Creates an edit from an operation and its text.
    #[must_use]
    pub fn new(op: Operation, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    /// Creates an [`Operation::Equal`] edit.
    #[must_use]
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }

    /// Creates an [`Operation::Delete`] edit.
    #[must_use]
    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }

    /// Creates an [`Operation::Insert`] edit.
    #[must_use]
    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    /// Length of the span in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub(crate) fn from_chars(op: Operation, chars: &[char]) -> Self {
        Self::new(op, chars.iter().collect::<String>())
    }
}

/// Renders as `Equal("text")`, with line feeds shown as pilcrows.
impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.op, self.text.replace('\n', "\u{b6}"))
    }
}
