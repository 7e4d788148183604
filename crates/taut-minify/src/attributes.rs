//! [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
//!
//! Attributes are handled in two passes over the run of attribute tokens
//! that follows a start tag. The rewrite pass looks at attributes that
//! depend on each other (an anchor's `id` and `name`, a meta's `http-equiv`
//! and `content`) and records its decisions on the buffered slots. The
//! emission pass then writes every surviving attribute, dropping defaults
//! and picking the cheapest quoting.

use std::borrow::Cow;
use std::io::Write;

use taut_common::bytes::{normalize_content_type, replace_all, strip_http_scheme};
use taut_html::{Atom, TokenKind, TokenSource};

use crate::buffer::Slot;
use crate::engine::HTMLMinifier;
use crate::error::MinifyError;
use crate::quote::escape_attr_val;
use crate::registry::{Registry, minify_with};

const JAVASCRIPT_SCHEME: &[u8] = b"javascript:";

impl<S: TokenSource> HTMLMinifier<'_, S> {
    /// Write the attributes of the start tag just consumed. The attribute
    /// tokens are next in the buffer.
    pub(crate) fn write_attributes(&mut self, w: &mut dyn Write, tag: Atom) -> Result<(), MinifyError> {
        match tag {
            Atom::A => self.rewrite_anchor()?,
            Atom::Meta => self.rewrite_meta()?,
            Atom::Script => self.rewrite_script()?,
            _ => {}
        }
        while self.tokens.peek(0)?.token.kind == TokenKind::Attribute {
            let slot = self.tokens.shift()?;
            if slot.is_present() {
                self.write_attribute(w, tag, &slot)?;
            }
        }
        Ok(())
    }

    /// Buffer positions of the named attributes in the upcoming attribute
    /// run. When a name repeats, the last occurrence wins.
    fn find_attributes<const N: usize>(
        &mut self,
        names: [Atom; N],
    ) -> Result<[Option<usize>; N], MinifyError> {
        let mut found = [None; N];
        let mut i = 0;
        loop {
            let token = &self.tokens.peek(i)?.token;
            if token.kind != TokenKind::Attribute {
                return Ok(found);
            }
            if let Some(k) = names.iter().position(|&name| name == token.atom) {
                found[k] = Some(i);
            }
            i += 1;
        }
    }

    // =========================================================================
    // Rewrite pass
    // =========================================================================

    /// `name` duplicating `id` is obsolete, and an `http:` or `https:`
    /// `href` can become scheme-relative unless the link is marked external.
    fn rewrite_anchor(&mut self) -> Result<(), MinifyError> {
        let [id, name, rel, href] =
            self.find_attributes([Atom::Id, Atom::Name, Atom::Rel, Atom::Href])?;

        if let (Some(id), Some(name)) = (id, name) {
            let (id_slot, name_slot) = self.tokens.peek_pair(id, name)?;
            if id_slot.value() == name_slot.value() {
                self.tokens.peek_mut(name)?.elide();
            }
        }

        let external = match rel {
            Some(rel) => self.tokens.peek(rel)?.value().eq_ignore_ascii_case(b"external"),
            None => false,
        };
        if let Some(href) = href
            && !external
        {
            let slot = self.tokens.peek_mut(href)?;
            if let Some(rest) = strip_http_scheme(slot.value()) {
                let rest = rest.to_vec();
                slot.set_value(rest);
            }
        }
        Ok(())
    }

    /// [§ 4.2.5.3 Pragma directives](https://html.spec.whatwg.org/multipage/semantics.html#pragma-directives)
    ///
    /// `<meta http-equiv=content-type content="text/html; charset=utf-8">`
    /// is the long form of `<meta charset=utf-8>`. The obsolete
    /// `content-style-type` and `content-script-type` pragmas change the
    /// document's default media types.
    fn rewrite_meta(&mut self) -> Result<(), MinifyError> {
        let [content, http_equiv, charset, name] =
            self.find_attributes([Atom::Content, Atom::HttpEquiv, Atom::Charset, Atom::Name])?;
        let Some(content) = content else {
            return Ok(());
        };

        if let Some(http_equiv) = http_equiv {
            let pragma = self.tokens.peek(http_equiv)?.value().to_ascii_lowercase();
            // Only media type pragmas: `refresh` content carries a URL whose
            // case and spaces must survive.
            if matches!(
                pragma.as_slice(),
                b"content-type" | b"content-style-type" | b"content-script-type"
            ) {
                let media_type = normalize_content_type(self.tokens.peek(content)?.value());
                match pragma.as_slice() {
                    b"content-type" if charset.is_none() && media_type == b"text/html;charset=utf-8" => {
                        self.tokens.peek_mut(http_equiv)?.elide();
                        let slot = self.tokens.peek_mut(content)?;
                        slot.token.name = b"charset".to_vec();
                        slot.token.atom = Atom::Charset;
                        slot.set_value(b"utf-8".to_vec());
                        return Ok(());
                    }
                    b"content-style-type" => {
                        self.state.set_style_type(&String::from_utf8_lossy(&media_type));
                    }
                    b"content-script-type" => {
                        self.state.set_script_type(&String::from_utf8_lossy(&media_type));
                    }
                    _ => {}
                }
                self.tokens.peek_mut(content)?.set_value(media_type);
            }
        }

        if let Some(name) = name {
            let kind = self.tokens.peek(name)?.value().to_ascii_lowercase();
            let slot = self.tokens.peek_mut(content)?;
            let rewritten = match kind.as_slice() {
                b"keywords" => replace_all(slot.value(), b", ", b","),
                b"viewport" => slot.value().iter().copied().filter(|&c| c != b' ').collect(),
                _ => return Ok(()),
            };
            slot.set_value(rewritten);
        }
        Ok(())
    }

    /// A `charset` only applies to the external script named by `src`, and
    /// such scripts are fetched with the document's encoding anyway.
    fn rewrite_script(&mut self) -> Result<(), MinifyError> {
        let [src, charset] = self.find_attributes([Atom::Src, Atom::Charset])?;
        if let (Some(_), Some(charset)) = (src, charset) {
            self.tokens.peek_mut(charset)?.elide();
        }
        Ok(())
    }

    // =========================================================================
    // Emission pass
    // =========================================================================

    fn write_attribute(&mut self, w: &mut dyn Write, tag: Atom, slot: &Slot) -> Result<(), MinifyError> {
        let attr = slot.token.atom;
        let name = slot.token.name.as_slice();
        let event_handler = is_event_handler(name);
        let mut value = Cow::Borrowed(slot.value());

        if value.is_empty()
            && (attr.omits_empty_value()
                || event_handler
                || (tag == Atom::Form && attr == Atom::Action)
                || (tag == Atom::Input && attr == Atom::Value))
        {
            return Ok(());
        }

        if attr.is_case_insensitive_attr() {
            value = Cow::Owned(value.to_ascii_lowercase());
        }
        if takes_media_type(tag, attr) {
            value = Cow::Owned(normalize_content_type(&value));
        }
        if attr == Atom::Type && self.state.raw_tag.is_some() {
            self.state.raw_media_type = value.to_vec();
        }
        if is_default_value(tag, attr, &value) {
            return Ok(());
        }

        if attr == Atom::Style {
            if minify_inline(
                self.registry,
                &mut self.attr_minify_buffer,
                &self.state.default_inline_style_type,
                &value,
            ) {
                value = Cow::Borrowed(&self.attr_minify_buffer);
            }
            if value.is_empty() {
                return Ok(());
            }
        } else if event_handler {
            if value.len() >= JAVASCRIPT_SCHEME.len()
                && value[..JAVASCRIPT_SCHEME.len()].eq_ignore_ascii_case(JAVASCRIPT_SCHEME)
            {
                value = Cow::Owned(value[JAVASCRIPT_SCHEME.len()..].to_vec());
            }
            if minify_inline(
                self.registry,
                &mut self.attr_minify_buffer,
                &self.state.default_script_type,
                &value,
            ) {
                value = Cow::Borrowed(&self.attr_minify_buffer);
            }
            if value.is_empty() {
                return Ok(());
            }
        } else if tag != Atom::A && attr.is_url_attr() {
            // Anchors were handled by the rewrite pass, which knows about `rel`.
            if let Some(rest) = strip_http_scheme(&value) {
                value = Cow::Owned(rest.to_vec());
            }
        }

        w.write_all(b" ")?;
        w.write_all(name)?;
        if value.is_empty() || attr.is_boolean_attr() {
            return Ok(());
        }
        w.write_all(b"=")?;
        let quoted = escape_attr_val(&mut self.attr_byte_buffer, &slot.token.raw_value, &value);
        w.write_all(quoted)?;
        Ok(())
    }
}

/// Run an inline `style` or event handler value through the registry into
/// `buf`. Returns false, leaving the value to be written as is, if no
/// minifier is registered or the minifier fails.
fn minify_inline(registry: &dyn Registry, buf: &mut Vec<u8>, media_type: &str, mut value: &[u8]) -> bool {
    buf.clear();
    minify_with(registry, media_type, buf, &mut value).is_ok()
}

/// `onclick`, `onload`, ...
fn is_event_handler(name: &[u8]) -> bool {
    name.len() > 2 && name[..2].eq_ignore_ascii_case(b"on")
}

/// Attributes whose value is a media type (or a list of them).
fn takes_media_type(tag: Atom, attr: Atom) -> bool {
    match attr {
        Atom::Enctype | Atom::Codetype | Atom::Accept => true,
        Atom::Type => matches!(
            tag,
            Atom::A
                | Atom::Link
                | Atom::Object
                | Atom::Param
                | Atom::Script
                | Atom::Style
                | Atom::Source
        ),
        _ => false,
    }
}

/// Attribute values that equal what the element assumes when the attribute
/// is missing. `value` is already lower-cased where case does not matter.
fn is_default_value(tag: Atom, attr: Atom, value: &[u8]) -> bool {
    match attr {
        Atom::Type => match tag {
            Atom::Script => value == b"text/javascript",
            Atom::Style | Atom::Link => value == b"text/css",
            Atom::Input => value == b"text",
            Atom::Button => value == b"submit",
            _ => false,
        },
        Atom::Language => tag == Atom::Script,
        Atom::Method => value == b"get",
        Atom::Enctype => value == b"application/x-www-form-urlencoded",
        Atom::Colspan | Atom::Rowspan | Atom::Span | Atom::Frameborder => value == b"1",
        Atom::Shape => value == b"rect",
        Atom::Clear => value == b"none",
        Atom::Scrolling => value == b"auto",
        Atom::Valuetype => value == b"data",
        Atom::Media => tag == Atom::Style && value == b"all",
        _ => false,
    }
}
