//! crates/patch/src/patch.rs
//! A single hunk: an edit script with context and its position in both texts.

use std::fmt;

use diff::{Edit, Operation, destination_text, encoding, source_text};

/// One localized change with surrounding context.
///
/// `start1`/`length1` locate the hunk in the source text and
/// `start2`/`length2` in the destination text, all counted in characters.
/// The edits include the leading and trailing context as equalities.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    /// Edit script of the hunk, context included.
    pub edits: Vec<Edit>,
    /// Offset of the hunk in the source text.
    pub start1: usize,
    /// Offset of the hunk in the destination text.
    pub start2: usize,
    /// Characters of source text the hunk covers.
    pub length1: usize,
    /// Characters of destination text the hunk covers.
    pub length2: usize,
}

impl Patch {
    /// Source side of the hunk: context plus deleted text.
    #[must_use]
    pub fn source_text(&self) -> String {
        source_text(&self.edits)
    }

    /// Destination side of the hunk: context plus inserted text.
    #[must_use]
    pub fn destination_text(&self) -> String {
        destination_text(&self.edits)
    }
}

/// Renders the hunk in the GNU unified diff style, with percent-encoded
/// lines and 1-based offsets.
///
/// ```
/// use diff::Edit;
/// use patch::Patch;
///
/// let patch = Patch {
///     edits: vec![Edit::equal("jump"), Edit::delete("s"), Edit::insert("ed")],
///     start1: 20,
///     start2: 21,
///     length1: 5,
///     length2: 6,
/// };
/// assert_eq!(patch.to_string(), "@@ -21,5 +22,6 @@\n jump\n-s\n+ed\n");
/// ```
impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{} +{} @@",
            Coords::new(self.start1, self.length1),
            Coords::new(self.start2, self.length2)
        )?;
        for edit in &self.edits {
            let sign = match edit.op {
                Operation::Insert => '+',
                Operation::Delete => '-',
                Operation::Equal => ' ',
            };
            writeln!(f, "{sign}{}", encoding::encode(&edit.text))?;
        }
        Ok(())
    }
}

/// One side of a hunk header.
///
/// An empty range is written `start,0` with the 0-based offset; a single
/// character omits the length.
struct Coords {
    start: usize,
    length: usize,
}

impl Coords {
    const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            0 => write!(f, "{},0", self.start),
            1 => write!(f, "{}", self.start + 1),
            length => write!(f, "{},{length}", self.start + 1),
        }
    }
}
