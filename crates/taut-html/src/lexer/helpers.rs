//! Helper functions for the HTML lexer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the lexer:
//! - State transitions ("Switch to")
//! - Input lookahead ("If the next few characters are")
//! - Raw text end tag search
//! - Parse error reporting

use taut_common::bytes::is_whitespace;
use taut_common::warning::warn_once;

use super::core::{Lexer, LexerState};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Lexer {
    /// "Switch to the X state"
    pub(super) const fn switch_to(&mut self, new_state: LexerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl Lexer {
    /// True once every input byte has been consumed.
    pub(super) const fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at the byte `offset` positions past the current one.
    pub(super) fn peek(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_bytes_are(&self, target: &[u8]) -> bool {
        self.input[self.pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word..."
    pub(super) fn next_few_bytes_are_case_insensitive(&self, target: &[u8]) -> bool {
        self.input
            .get(self.pos..self.pos + target.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(target))
    }

    /// Absolute position of the next occurrence of `needle` at or after the
    /// current position.
    pub(super) fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(self.pos);
        }
        self.input[self.pos..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|i| self.pos + i)
    }

    /// Advance past every byte matching `pred`.
    pub(super) fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&pred) {
            self.pos += 1;
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// Consume a tag name, which ends at whitespace, `/` or `>`.
    pub(super) fn consume_tag_name(&mut self) -> Vec<u8> {
        let start = self.pos;
        self.skip_while(|c| !is_whitespace(c) && c != b'/' && c != b'>');
        self.input[start..self.pos].to_vec()
    }

    /// True if the `<` at `at` opens a tag, comment, doctype or bogus comment.
    pub(super) fn starts_markup(&self, at: usize) -> bool {
        if self.input.get(at) != Some(&b'<') {
            return false;
        }
        match self.input.get(at + 1).copied() {
            Some(b'!' | b'?') => true,
            Some(b'/') => self.input.get(at + 2).is_some_and(u8::is_ascii_alphabetic),
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl Lexer {
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    ///
    /// Returns the position of the `<` of the first appropriate end tag for
    /// `tag` (lower-case), matched ASCII case-insensitively and followed by
    /// whitespace, `/`, `>` or the end of input.
    pub(super) fn find_end_tag(&self, tag: &[u8]) -> Option<usize> {
        if tag.is_empty() {
            return None;
        }
        let mut at = self.pos;
        while at + 2 + tag.len() <= self.input.len() {
            let name_start = at + 2;
            let name_end = name_start + tag.len();
            if self.input[at] == b'<'
                && self.input[at + 1] == b'/'
                && self.input[name_start..name_end].eq_ignore_ascii_case(tag)
                && self
                    .input
                    .get(name_end)
                    .is_none_or(|&c| is_whitespace(c) || c == b'/' || c == b'>')
            {
                return Some(at);
            }
            at += 1;
        }
        None
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Lexer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Logs a parse error using the taut-common warning system.
    /// Parse errors are never fatal: the lexer recovers and continues.
    pub(super) fn log_parse_error(&self, code: &str) {
        let pos = self.pos;
        let state = self.state;
        warn_once(
            "HTML Lexer",
            &format!("{code} parse error in {state} state at position {pos}"),
        );
    }
}
