//! Magic-comment encoding detection and reencoding to UTF-8.
//!
//! A document may declare its own text encoding in a specially formatted
//! comment on its first line, or on its second line when the first is a
//! shebang:
//!
//! ```text
//! #!/usr/bin/env thing
//! # -*- coding: iso-8859-1 -*-
//! ```
//!
//! Detection inspects at most the first two lines of the raw bytes. The
//! declared name may carry an emacs compatibility suffix (`-unix`, `-dos`,
//! `-mac`), which is stripped before the name is resolved against the WHATWG
//! label registry. `utf8-mac` is accepted as an alias for UTF-8.

use std::sync::LazyLock;

use bstr::ByteSlice;
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::error::BufferError;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

// The `utf8-mac` alternative must come first so its `-mac` tail is not
// consumed as an emacs suffix.
static ENCODING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        [\s\#] (?:en)?coding \s* [:=] \s*
        (?:
            (?P<mac>utf8-mac)
          | (?P<suffixed>[a-z0-9_-]+?) - (?:unix|dos|mac)
          | (?P<bare>[a-z0-9_-]+)
        )",
    )
    .unwrap()
});

/// Splits off the first line (without its terminator) and, when present, the
/// second line. Never scans past the second line terminator.
fn first_two_lines(bytes: &[u8]) -> (&[u8], Option<&[u8]>) {
    let Some(first_end) = bytes.find_byte(b'\n') else {
        return (bytes, None);
    };
    let rest = &bytes[first_end + 1..];
    let second = match rest.find_byte(b'\n') {
        Some(second_end) => &rest[..second_end],
        None => rest,
    };
    (&bytes[..first_end], Some(second))
}

/// Recognizes the encoding a raw document declares for itself.
///
/// Returns `Ok(None)` when the input is empty or carries no declaration; the
/// caller is then expected to fall back to its own declared encoding,
/// typically UTF-8. A leading UTF-8 byte-order mark resolves to UTF-8 without
/// any comment being consulted.
///
/// # Errors
///
/// [`BufferError::UnknownEncoding`] when a declaration matched but its name
/// resolves to no known encoding.
pub fn recognize_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>, BufferError> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let (first, second) = first_two_lines(bytes);

    if first.starts_with(UTF8_BOM) {
        return Ok(Some(UTF_8));
    }

    let comment_line = if first.starts_with(b"#!") {
        second.unwrap_or(b"")
    } else {
        first
    };
    if comment_line.first() != Some(&b'#') {
        return Ok(None);
    }

    let Some(captures) = ENCODING_RE.captures(comment_line) else {
        return Ok(None);
    };
    if captures.name("mac").is_some() {
        return Ok(Some(UTF_8));
    }
    let Some(label) = captures.name("suffixed").or_else(|| captures.name("bare")) else {
        return Ok(None);
    };

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => Ok(Some(encoding)),
        None => Err(BufferError::UnknownEncoding {
            label: String::from_utf8_lossy(label.as_bytes()).into_owned(),
        }),
    }
}

/// Reinterprets raw document bytes as UTF-8 text, honoring any encoding the
/// document declares for itself.
///
/// Bytes with no declaration, or declared as UTF-8, are returned unchanged
/// after validation. Anything else is decoded under the declared encoding
/// with no replacement characters.
///
/// # Errors
///
/// [`BufferError::UnknownEncoding`] from detection, or
/// [`BufferError::InvalidByteSequence`] when the bytes do not decode under
/// the encoding that applies to them.
pub fn reencode(bytes: &[u8]) -> Result<String, BufferError> {
    match recognize_encoding(bytes)? {
        None => into_utf8(bytes),
        Some(encoding) if encoding == UTF_8 => into_utf8(bytes),
        Some(encoding) => encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
            .ok_or(BufferError::InvalidByteSequence {
                encoding: encoding.name(),
            }),
    }
}

fn into_utf8(bytes: &[u8]) -> Result<String, BufferError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| BufferError::InvalidByteSequence {
        encoding: UTF_8.name(),
    })
}

#[cfg(test)]
mod tests {
    use encoding_rs::{Encoding, SHIFT_JIS, UTF_8, WINDOWS_1252};
    use rstest::rstest;

    use super::{recognize_encoding, reencode};
    use crate::error::BufferError;

    #[rstest]
    #[case::empty("", None)]
    #[case::plain_text("plain text\nsecond line\n", None)]
    #[case::comment_without_declaration("# just a comment\n", None)]
    #[case::first_line("# coding: utf-8\nputs 1\n", Some(UTF_8))]
    #[case::equals_separator("# coding=utf-8\n", Some(UTF_8))]
    #[case::en_prefix("# encoding: utf-8\n", Some(UTF_8))]
    #[case::emacs_style("# -*- coding: shift_jis -*-\n", Some(SHIFT_JIS))]
    #[case::after_shebang("#!/usr/bin/env x\n# coding: ISO-8859-1\n", Some(WINDOWS_1252))]
    #[case::shebang_only("#!/usr/bin/env x\n", None)]
    #[case::shebang_then_plain("#!/usr/bin/env x\nplain\n", None)]
    #[case::declaration_on_third_line_ignored("# first\n# second\n# coding: utf-8\n", None)]
    #[case::utf8_mac_alias("# coding: utf8-mac\n", Some(UTF_8))]
    #[case::emacs_suffix_stripped("# coding: utf-8-unix\n", Some(UTF_8))]
    #[case::emacs_dos_suffix("# coding: windows-1252-dos\n", Some(WINDOWS_1252))]
    fn recognizes_declarations(
        #[case] input: &str,
        #[case] expected: Option<&'static Encoding>,
    ) {
        assert_eq!(recognize_encoding(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn byte_order_mark_wins_without_a_comment() {
        let input = b"\xef\xbb\xbfplain text\n";
        assert_eq!(recognize_encoding(input).unwrap(), Some(UTF_8));
    }

    #[test]
    fn declaration_not_in_a_comment_is_ignored() {
        assert_eq!(
            recognize_encoding(b"coding: utf-8\n").unwrap(),
            None
        );
    }

    #[test]
    fn unknown_name_is_an_error_not_a_fallback() {
        let err = recognize_encoding(b"# coding: qqqq\n").unwrap_err();
        assert!(matches!(err, BufferError::UnknownEncoding { label } if label == "qqqq"));
    }

    #[test]
    fn reencode_passes_undeclared_utf8_through() {
        let input = "no declaration, just text\n";
        assert_eq!(reencode(input.as_bytes()).unwrap(), input);
    }

    #[test]
    fn reencode_transcodes_declared_latin1() {
        let input = b"# coding: iso-8859-1\nv\xe9rit\xe9\n";
        assert_eq!(reencode(input).unwrap(), "# coding: iso-8859-1\nvérité\n");
    }

    #[test]
    fn reencode_keeps_declared_utf8_byte_for_byte() {
        let input = "# coding: utf-8\nvérité\n";
        assert_eq!(reencode(input.as_bytes()).unwrap(), input);
    }

    #[test]
    fn reencode_rejects_bytes_invalid_under_declared_utf8() {
        let err = reencode(b"# coding: utf-8\n\xff\xfe\n").unwrap_err();
        assert!(matches!(
            err,
            BufferError::InvalidByteSequence { encoding: "UTF-8" }
        ));
    }

    #[test]
    fn reencode_rejects_undeclared_invalid_utf8() {
        let err = reencode(b"\xff\xfe\n").unwrap_err();
        assert!(matches!(err, BufferError::InvalidByteSequence { .. }));
    }
}
