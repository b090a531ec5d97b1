//! crates/diff/src/encoding.rs
//! Percent encoding shared by the delta and hunk text formats.
//!
//! The unescaped set matches what URI encoders leave alone: ASCII letters and
//! digits, `- _ . ! ~ * ' ( ) ; / ? : @ & = + $ , #` and the space character.
//! Everything else is written as UTF-8 bytes in `%XX` form with uppercase hex.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::DecodeError;

const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#')
    .remove(b' ');

/// Percent-encodes `text`.
///
/// ```
/// assert_eq!(diff::encoding::encode("a\tb %"), "a%09b %25");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, ESCAPED).to_string()
}

/// Reverses [`encode`].
///
/// A literal `+` stays a `+`. Every `%` must introduce two hex digits and the
/// unescaped bytes must form valid UTF-8.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEscape`] for a truncated or non-hex escape
/// and [`DecodeError::InvalidUtf8`] when the bytes do not decode.
pub fn decode(text: &str) -> Result<String, DecodeError> {
    let bytes = text.as_bytes();
    for (offset, _) in text.match_indices('%') {
        let digits = bytes.get(offset + 1..offset + 3);
        if !digits.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
            return Err(DecodeError::MalformedEscape { offset });
        }
    }
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        let text = "AZaz09-_.!~*'();/?:@&=+$,# ";
        assert_eq!(encode(text), text);
    }

    #[test]
    fn reserved_ascii_is_escaped_uppercase() {
        assert_eq!(encode("`[]\\{}|\"<>^%"), "%60%5B%5D%5C%7B%7D%7C%22%3C%3E%5E%25");
        assert_eq!(encode("\n\t\u{2}"), "%0A%09%02");
    }

    #[test]
    fn non_ascii_is_escaped_as_utf8() {
        assert_eq!(encode("\u{682}"), "%DA%82");
        assert_eq!(decode("%DA%82").as_deref(), Ok("\u{682}"));
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(decode("a+b").as_deref(), Ok("a+b"));
    }

    #[test]
    fn lowercase_hex_decodes() {
        assert_eq!(decode("%5c%7c").as_deref(), Ok("\\|"));
    }

    #[test]
    fn malformed_escapes_are_rejected() {
        assert_eq!(decode("abc%"), Err(DecodeError::MalformedEscape { offset: 3 }));
        assert_eq!(decode("%4"), Err(DecodeError::MalformedEscape { offset: 0 }));
        assert_eq!(decode("x%zz"), Err(DecodeError::MalformedEscape { offset: 1 }));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(decode("%C3%28"), Err(DecodeError::InvalidUtf8));
        assert_eq!(decode("%FF"), Err(DecodeError::InvalidUtf8));
    }
}
