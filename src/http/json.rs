//! HTML-safe JSON encoding
//!
//! Compact output with field order preserved. Inside strings, `<`, `>`, `&`,
//! U+2028 and U+2029 are written as `\uXXXX` escapes so the output can be
//! embedded in an HTML document unchanged. U+FFFD is written as `\ufffd`.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;

        for (i, c) in fragment.char_indices() {
            let escaped: &[u8] = match c {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                // how invalid UTF-8 shows up after lossy decoding
                '\u{FFFD}' => b"\\ufffd",
                _ => continue,
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escaped)?;
            start = i + c.len_utf8();
        }

        writer.write_all(&bytes[start..])
    }
}

/// Serialize `value` to compact, HTML-safe JSON bytes
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, HtmlSafeFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}
