//! Byte-slice helpers shared by the lexer and the minification engine.
//!
//! [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
//!
//! All helpers operate on raw bytes. Markup is never decoded, so multi-byte
//! UTF-8 sequences pass through untouched: none of their bytes is ASCII.

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
#[must_use]
pub const fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\x0C' | b'\r')
}

/// True if every byte of `b` is whitespace (also true for an empty slice).
#[must_use]
pub fn is_all_whitespace(b: &[u8]) -> bool {
    b.iter().copied().all(is_whitespace)
}

/// Strip leading and trailing whitespace.
#[must_use]
pub fn trim_whitespace(b: &[u8]) -> &[u8] {
    let start = b.iter().position(|&c| !is_whitespace(c)).unwrap_or(b.len());
    let end = b.iter().rposition(|&c| !is_whitespace(c)).map_or(start, |i| i + 1);
    &b[start..end]
}

/// Replace every maximal run of whitespace with a single space.
#[must_use]
pub fn collapse_whitespace(b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(b.len());
    let mut in_run = false;
    for &c in b {
        if is_whitespace(c) {
            if !in_run {
                out.push(b' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Replace every non-overlapping occurrence of `from` with `to`.
#[must_use]
pub fn replace_all(b: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    if from.is_empty() {
        return b.to_vec();
    }
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        if b[i..].starts_with(from) {
            out.extend_from_slice(to);
            i += from.len();
        } else {
            out.push(b[i]);
            i += 1;
        }
    }
    out
}

/// Normalize a media type such as `Text/HTML; Charset=UTF-8`.
///
/// Whitespace outside double-quoted parameter values is removed and the result
/// is lower-cased, giving `text/html;charset=utf-8`.
#[must_use]
pub fn normalize_content_type(b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(b.len());
    let mut in_string = false;
    for &c in b {
        if c == b'"' {
            in_string = !in_string;
        } else if !in_string && is_whitespace(c) {
            continue;
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// If `b` starts with an `http:` or `https:` scheme (ASCII case-insensitive),
/// return the remainder, keeping the `//` authority prefix.
///
/// `http://example.com` becomes `//example.com`.
#[must_use]
pub fn strip_http_scheme(b: &[u8]) -> Option<&[u8]> {
    if b.len() <= 5 || !b[..4].eq_ignore_ascii_case(b"http") {
        return None;
    }
    match b[4] {
        b':' => Some(&b[5..]),
        b's' | b'S' if b[5] == b':' => Some(&b[6..]),
        _ => None,
    }
}
