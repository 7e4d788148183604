//! [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
//!
//! Attribute values can be written unquoted, single-quoted or
//! double-quoted. This module picks the shortest of the three for a value
//! and rewrites quote characters and quote character references so the
//! result still decodes to the same string.

use taut_common::bytes::is_whitespace;

const DOUBLE_QUOTE_ENTITY: &[u8] = b"&#34;";
const SINGLE_QUOTE_ENTITY: &[u8] = b"&#39;";

/// Write `val` in its cheapest valid form.
///
/// `orig` is the attribute's raw value as it appeared in the input, quotes
/// included; it is returned as is when it is exactly `val` in one pair of
/// quotes and `val` contains no quote at all. Values without quotes, quote
/// references, backticks, `<`, `=`, `>` or whitespace come back unquoted.
/// Otherwise the value is rebuilt in `buf`: single quotes when double quotes
/// strictly outnumber single ones, double quotes otherwise.
#[must_use]
pub fn escape_attr_val<'a>(buf: &'a mut Vec<u8>, orig: &'a [u8], val: &'a [u8]) -> &'a [u8] {
    let mut singles = 0usize;
    let mut doubles = 0usize;
    let mut unquoted = true;
    let mut i = 0;
    while i < val.len() {
        let c = val[i];
        if c == b'&'
            && let Some((quote, n)) = quote_entity_at(&val[i..])
        {
            unquoted = false;
            if quote == b'"' {
                doubles += 1;
            } else {
                singles += 1;
            }
            i += n;
            continue;
        }
        match c {
            b'"' => doubles += 1,
            b'\'' => singles += 1,
            _ => {}
        }
        if matches!(c, b'"' | b'\'' | b'`' | b'<' | b'=' | b'>') || is_whitespace(c) {
            unquoted = false;
        }
        i += 1;
    }

    if unquoted {
        return val;
    }
    if singles == 0
        && doubles == 0
        && orig.len() == val.len() + 2
        && matches!(orig[0], b'"' | b'\'')
        && orig[0] == orig[orig.len() - 1]
        && &orig[1..orig.len() - 1] == val
    {
        return orig;
    }

    let (quote, escaped) = if doubles > singles {
        (b'\'', SINGLE_QUOTE_ENTITY)
    } else {
        (b'"', DOUBLE_QUOTE_ENTITY)
    };
    buf.clear();
    buf.reserve(val.len() + 2);
    buf.push(quote);
    let mut i = 0;
    while i < val.len() {
        let (c, n) = match val[i] {
            b'&' => quote_entity_at(&val[i..]).unwrap_or((b'&', 1)),
            c => (c, 1),
        };
        if c == quote {
            buf.extend_from_slice(escaped);
        } else {
            buf.push(c);
        }
        i += n;
    }
    buf.push(quote);
    buf
}

/// [§ 13.1.4 Character references](https://html.spec.whatwg.org/multipage/syntax.html#character-references)
///
/// If `b` starts with a reference to `"` or `'` (`&#34;`, `&#x22;`,
/// `&quot;`, `&#39;`, `&#x27;`, `&apos;`, digits optionally zero padded,
/// names and the `x` case-insensitive), return the quote and the
/// reference's length. The terminating `;` is required.
#[must_use]
pub fn quote_entity_at(b: &[u8]) -> Option<(u8, usize)> {
    if b.len() < 5 || b[0] != b'&' {
        return None;
    }
    if b[1] != b'#' {
        if b.len() < 6 || b[5] != b';' {
            return None;
        }
        let name = &b[1..5];
        return if name.eq_ignore_ascii_case(b"quot") {
            Some((b'"', 6))
        } else if name.eq_ignore_ascii_case(b"apos") {
            Some((b'\'', 6))
        } else {
            None
        };
    }

    let (start, lead, double, single) = if matches!(b[2], b'x' | b'X') {
        (3, b'2', b'2', b'7')
    } else {
        (2, b'3', b'4', b'9')
    };
    let digits = start + b[start..].iter().take_while(|&&c| c == b'0').count();
    match b.get(digits..digits + 3)? {
        [l, d, b';'] if *l == lead && *d == double => Some((b'"', digits + 3)),
        [l, d, b';'] if *l == lead && *d == single => Some((b'\'', digits + 3)),
        _ => None,
    }
}
