//! crates/patch/src/serialize.rs
//! The textual patch format.
//!
//! A patch list is written as consecutive hunks, each a header line
//! `@@ -start1,length1 +start2,length2 @@` followed by one line per edit:
//! a space for an equality, `-` for a deletion or `+` for an insertion, then
//! the percent-encoded text. See [`Patch`]'s `Display` impl for the header
//! coordinate rules.

use diff::{Edit, Operation, encoding};

use crate::error::{PatchError, PatchResult};
use crate::patch::Patch;

/// Renders `patches` in the textual format.
#[must_use]
pub fn to_text(patches: &[Patch]) -> String {
    patches.iter().map(ToString::to_string).collect()
}

/// Parses the textual format back into patches.
///
/// Empty input yields no patches. Blank body lines are skipped.
///
/// # Errors
///
/// - [`PatchError::InvalidHeader`] when a hunk does not open with a well-formed
///   header.
/// - [`PatchError::InvalidOperation`] when a body line starts with anything but
///   a space, `-`, `+` or the `@` of the next header.
/// - [`PatchError::InvalidEncoding`] when a body line holds a malformed escape.
///
/// # Examples
///
/// ```
/// use patch::{from_text, to_text};
///
/// let text = "@@ -1,3 +1,3 @@\n a\n-b\n+c\n";
/// let patches = from_text(text).unwrap();
/// assert_eq!(patches[0].length1, 3);
/// assert_eq!(to_text(&patches), text);
/// ```
pub fn from_text(text: &str) -> PatchResult<Vec<Patch>> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut patches = Vec::new();
    let mut lines = lines.into_iter().peekable();
    while let Some(header) = lines.next() {
        let mut patch = parse_header(header)?;
        while let Some(line) = lines.next_if(|line| !line.starts_with('@')) {
            let mut chars = line.chars();
            let Some(sign) = chars.next() else {
                continue;
            };
            let op = match sign {
                ' ' => Operation::Equal,
                '-' => Operation::Delete,
                '+' => Operation::Insert,
                _ => {
                    return Err(PatchError::InvalidOperation {
                        line: line.to_owned(),
                    });
                }
            };
            let body = encoding::decode(chars.as_str())
                .map_err(|err| PatchError::InvalidEncoding(format!("{err}: {line}")))?;
            patch.edits.push(Edit::new(op, body));
        }
        patches.push(patch);
    }
    Ok(patches)
}

fn parse_header(line: &str) -> PatchResult<Patch> {
    let invalid = || PatchError::InvalidHeader(line.to_owned());
    let ranges = line
        .strip_prefix("@@ -")
        .and_then(|rest| rest.strip_suffix(" @@"))
        .ok_or_else(invalid)?;
    let (source, destination) = ranges.split_once(" +").ok_or_else(invalid)?;
    let (start1, length1) = parse_range(source).ok_or_else(invalid)?;
    let (start2, length2) = parse_range(destination).ok_or_else(invalid)?;
    Ok(Patch {
        edits: Vec::new(),
        start1,
        start2,
        length1,
        length2,
    })
}

/// Parses `start[,length]` into a 0-based offset and a length.
///
/// A missing length means one character. A zero length keeps the offset as
/// written, since empty ranges are recorded 0-based.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, length) = match range.split_once(',') {
        Some((start, length)) => (start, length),
        None => (range, ""),
    };
    let start = parse_number(start)?;
    match length {
        "" => Some((start.checked_sub(1)?, 1)),
        "0" => Some((start, 0)),
        length => Some((start.checked_sub(1)?, parse_number(length)?)),
    }
}

/// Parses a decimal count that also fits in an `isize`, so offsets stay
/// within reach of signed drift arithmetic.
fn parse_number(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: isize = digits.parse().ok()?;
    usize::try_from(value).ok()
}
