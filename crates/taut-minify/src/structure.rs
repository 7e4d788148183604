//! [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
//!
//! Tags the parser would infer anyway are not written. The tables behind
//! these decisions are the `const fn` predicates on [`Atom`].

use std::io::Write;

use taut_common::bytes::is_all_whitespace;
use taut_html::{Atom, Token, TokenKind, TokenSource};

use crate::engine::{HTMLMinifier, is_kept_comment};
use crate::error::MinifyError;

impl<S: TokenSource> HTMLMinifier<'_, S> {
    /// Write a start or end tag together with its attributes, unless it can
    /// be omitted.
    pub(crate) fn write_tag(&mut self, w: &mut dyn Write, token: &Token) -> Result<(), MinifyError> {
        self.state.raw_tag = None;
        let is_start = token.kind == TokenKind::StartTag;
        let has_attributes = is_start && self.tokens.peek(0)?.token.kind == TokenKind::Attribute;

        // "An html element's start tag may be omitted if the first thing
        // inside the html element is not a comment." Likewise for head, body
        // and colgroup, and their end tags. These leave no boundary behind,
        // so the text around them joins up.
        if !has_attributes && token.atom.is_document_structure() {
            return Ok(());
        }
        if is_start
            && !has_attributes
            && token.atom.has_embedded_content()
            && let Some(n) = self.empty_element_closer(0, token.atom)?
        {
            for _ in 0..n {
                let _ = self.tokens.shift()?;
            }
            return Ok(());
        }

        if !token.atom.is_inline() {
            // Omitted end tags are still implied where they stood.
            self.state.preceded_by_space = true;
            if !is_start && token.atom.has_inferable_end_tag() {
                return Ok(());
            }
            if !is_start && token.atom == Atom::P && self.p_end_is_redundant()? {
                return Ok(());
            }
        }

        w.write_all(b"<")?;
        if !is_start {
            w.write_all(b"/")?;
        }
        w.write_all(&token.name)?;

        if is_start && token.atom.is_raw_text() {
            self.state.raw_tag = Some(token.atom);
            self.state.raw_media_type.clear();
        }
        if has_attributes {
            self.write_attributes(w, token.atom)?;
        }
        w.write_all(b">")?;
        Ok(())
    }

    /// "A p element's end tag may be omitted if the p element is immediately
    /// followed by an address, article, aside, blockquote, ... element, or if
    /// there is no more content in the parent element and the parent element
    /// is not an a element."
    ///
    /// The parent is unknown in a token stream, so any end tag other than
    /// `</a>` counts as the parent closing. Whitespace, and anything that is
    /// about to be dropped, does not count as content.
    fn p_end_is_redundant(&mut self) -> Result<bool, MinifyError> {
        let mut i = 0;
        loop {
            if let Some(n) = self.dropped_span(i)? {
                i += n;
                continue;
            }
            let next = &self.tokens.peek(i)?.token;
            let invisible = match next.kind {
                TokenKind::Text => is_all_whitespace(&next.content),
                TokenKind::Comment => !is_kept_comment(&next.content),
                _ => false,
            };
            if invisible {
                i += 1;
                continue;
            }
            return Ok(match next.kind {
                TokenKind::EndOfFile => true,
                TokenKind::EndTag => next.atom != Atom::A,
                TokenKind::StartTag => next.atom.is_block(),
                _ => false,
            });
        }
    }

    /// Number of tokens, starting `i` positions ahead, taken up by an element
    /// that [`HTMLMinifier::write_tag`] drops without writing anything: a
    /// bare `<html>`, `<head>`, `<body>` or `<colgroup>` start tag, or an
    /// empty `<script></script>` and friends.
    pub(crate) fn dropped_span(&mut self, i: usize) -> Result<Option<usize>, MinifyError> {
        let token = &self.tokens.peek(i)?.token;
        if token.kind != TokenKind::StartTag {
            return Ok(None);
        }
        let atom = token.atom;
        if self.tokens.peek(i + 1)?.token.kind == TokenKind::Attribute {
            return Ok(None);
        }
        if atom.is_document_structure() {
            return Ok(Some(1));
        }
        if atom.has_embedded_content() {
            return Ok(self.empty_element_closer(i + 1, atom)?.map(|n| n + 1));
        }
        Ok(None)
    }

    /// If the tokens from `i` on close `tag` right away, how many there are.
    /// The lexer always emits a text token for raw-text content, so an empty
    /// one may sit in front of the end tag.
    fn empty_element_closer(&mut self, i: usize, tag: Atom) -> Result<Option<usize>, MinifyError> {
        let next = &self.tokens.peek(i)?.token;
        let gap = usize::from(next.kind == TokenKind::Text && next.content.is_empty());
        let end = &self.tokens.peek(i + gap)?.token;
        Ok((end.kind == TokenKind::EndTag && end.atom == tag).then_some(gap + 1))
    }
}
