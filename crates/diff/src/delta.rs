//! crates/diff/src/delta.rs
//! Compact delta encoding of an edit script.
//!
//! A delta is a tab-separated list of tokens: `=N` keeps `N` characters of the
//! source, `-N` drops `N` characters, and `+text` inserts percent-encoded
//! text. Given the source text, a delta expands back into the full script.

use crate::edit::{Edit, Operation};
use crate::encoding;
use crate::error::DeltaError;

/// Encodes an edit script as a delta.
///
/// ```
/// use diff::{Edit, to_delta};
///
/// let edits = [Edit::equal("jump"), Edit::delete("s"), Edit::insert("ed")];
/// assert_eq!(to_delta(&edits), "=4\t-1\t+ed");
/// ```
#[must_use]
pub fn to_delta(edits: &[Edit]) -> String {
    edits
        .iter()
        .map(|edit| match edit.op {
            Operation::Insert => format!("+{}", encoding::encode(&edit.text)),
            Operation::Delete => format!("-{}", edit.char_len()),
            Operation::Equal => format!("={}", edit.char_len()),
        })
        .collect::<Vec<_>>()
        .join("\t")
}

/// Expands a delta against the source text it was computed from.
///
/// # Errors
///
/// - [`DeltaError::InvalidCount`] when an `=` or `-` count does not parse.
/// - [`DeltaError::InvalidOperation`] for a token with an unknown prefix.
/// - [`DeltaError::InvalidEncoding`] when an insert is not valid percent
///   encoding.
/// - [`DeltaError::LengthMismatch`] when the delta does not cover the source
///   text exactly.
pub fn from_delta(source: &str, delta: &str) -> Result<Vec<Edit>, DeltaError> {
    let source: Vec<char> = source.chars().collect();
    let mut edits = Vec::new();
    let mut pointer: usize = 0;
    for token in delta.split('\t') {
        let mut chars = token.chars();
        let Some(op) = chars.next() else {
            // Blank tokens are ignored.
            continue;
        };
        let param = chars.as_str();
        match op {
            '+' => {
                let text = encoding::decode(param)
                    .map_err(|err| DeltaError::InvalidEncoding(format!("{param}: {err}")))?;
                edits.push(Edit::insert(text));
            }
            '-' | '=' => {
                let count: usize = param
                    .parse()
                    .map_err(|_| DeltaError::InvalidCount(param.to_owned()))?;
                let end = pointer.saturating_add(count);
                let Some(span) = source.get(pointer..end) else {
                    return Err(DeltaError::LengthMismatch {
                        expected: source.len(),
                        actual: end,
                    });
                };
                let text: String = span.iter().collect();
                pointer = end;
                edits.push(if op == '=' {
                    Edit::equal(text)
                } else {
                    Edit::delete(text)
                });
            }
            other => return Err(DeltaError::InvalidOperation(other)),
        }
    }
    if pointer != source.len() {
        return Err(DeltaError::LengthMismatch {
            expected: source.len(),
            actual: pointer,
        });
    }
    Ok(edits)
}
