//! [§ 3.2.5.1 Whitespace in content](https://html.spec.whatwg.org/multipage/dom.html#inter-element-whitespace)
//!
//! Runs of whitespace in text render as one space, and a space next to a
//! block boundary does not render at all. Text is collapsed here, and the
//! space on either end is kept only where a neighbor could show it.

use std::io::Write;

use taut_common::bytes::{collapse_whitespace, is_whitespace};
use taut_html::{TokenKind, TokenSource};

use crate::engine::HTMLMinifier;
use crate::error::MinifyError;

impl<S: TokenSource> HTMLMinifier<'_, S> {
    /// Write a text token that is not the content of a raw-text element.
    pub(crate) fn write_text(&mut self, w: &mut dyn Write, content: &[u8]) -> Result<(), MinifyError> {
        let collapsed = collapse_whitespace(content);
        if collapsed.is_empty() {
            return Ok(());
        }
        let mut text = collapsed.as_slice();
        if self.state.preceded_by_space && text[0] == b' ' {
            text = &text[1..];
        }
        self.state.preceded_by_space = text.is_empty();

        if text.last() == Some(&b' ') {
            self.state.preceded_by_space = true;
            if self.trailing_space_is_redundant()? {
                text = &text[..text.len() - 1];
                // The next text starts with whitespace of its own (or
                // nothing follows), so it keeps its leading space instead.
                self.state.preceded_by_space = false;
            }
        }
        w.write_all(text)?;
        Ok(())
    }

    /// Scan ahead for the next token that decides whether a trailing space
    /// can render.
    ///
    /// Attributes, comments, doctypes and elements that are dropped entirely
    /// are transparent, and so are end tags of inline elements: `<b>x </b>y`
    /// still needs its space.
    fn trailing_space_is_redundant(&mut self) -> Result<bool, MinifyError> {
        let mut i = 0;
        loop {
            if let Some(n) = self.dropped_span(i)? {
                i += n;
                continue;
            }
            let next = &self.tokens.peek(i)?.token;
            match next.kind {
                TokenKind::EndOfFile => return Ok(true),
                TokenKind::Text => {
                    return Ok(next.content.first().is_some_and(|&c| is_whitespace(c)));
                }
                TokenKind::StartTag | TokenKind::EndTag if !next.atom.is_inline() => return Ok(true),
                TokenKind::StartTag => return Ok(false),
                TokenKind::EndTag
                | TokenKind::Attribute
                | TokenKind::Comment
                | TokenKind::Doctype => {}
            }
            i += 1;
        }
    }
}
