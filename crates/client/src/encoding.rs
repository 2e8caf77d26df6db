//! Wire encodings used by the client: URL-encoded queries and forms, JSON
//! with HTML-sensitive characters hex-escaped, and HTML entity escaping.

use std::io;

use http::Uri;
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter};

use crate::ClientError;

/// URL-encodes `data` as `application/x-www-form-urlencoded`.
pub fn url_encode<D: Serialize + ?Sized>(data: &D) -> Result<String, ClientError> {
    serde_urlencoded::to_string(data).map_err(ClientError::encode)
}

/// Appends an already encoded `query` to `target`.
///
/// The separator is `?` when `target` has no query yet and `&` otherwise. A
/// target ending with `?` or `&` gets no extra separator, an empty query leaves
/// the target as is.
pub fn append_query(target: &str, query: &str) -> String {
    if query.is_empty() {
        return target.to_owned();
    }

    if target.ends_with('?') || target.ends_with('&') {
        return format!("{target}{query}");
    }

    let has_query = match target.parse::<Uri>() {
        Ok(uri) => uri.query().is_some(),
        Err(_) => target.split('#').next().is_some_and(|target| target.contains('?')),
    };
    let separator = if has_query { '&' } else { '?' };
    format!("{target}{separator}{query}")
}

/// Compact JSON where `<`, `>`, `&`, `'` and `"` inside strings are written as
/// `\u003C`, `\u003E`, `\u0026`, `\u0027` and `\u0022`, so the output can be
/// embedded in HTML and script blocks.
#[derive(Debug, Clone, Copy, Default)]
struct HexEscapeFormatter;

impl Formatter for HexEscapeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            let escaped: &[u8] = match c {
                '<' => b"\\u003C",
                '>' => b"\\u003E",
                '&' => b"\\u0026",
                '\'' => b"\\u0027",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..index])?;
            writer.write_all(escaped)?;
            start = index + 1;
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Serializes `data` to hex-escaped compact JSON.
pub fn to_json<D: Serialize + ?Sized>(data: &D) -> Result<String, ClientError> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, HexEscapeFormatter);
    data.serialize(&mut serializer).map_err(ClientError::encode)?;
    String::from_utf8(buf).map_err(ClientError::encode)
}

/// Escapes `& < > " '` as `&amp; &lt; &gt; &quot; &#039;`.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}
