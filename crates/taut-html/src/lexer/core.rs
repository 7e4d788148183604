use std::collections::VecDeque;
use std::io::Read;

use strum_macros::Display;
use taut_common::bytes::is_whitespace;

use crate::atom::Atom;

use super::LexError;
use super::token::{Token, TokenSource};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// Coarse lexer states. The byte-level lexer consumes one whole construct per
/// step, so it only needs to remember which construct it is inside of (for
/// diagnostics) and whether the next bytes are raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LexerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    /// (also used for RCDATA and script data)
    RawText,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    Tag,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValue,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CdataSection,
    /// Input exhausted; only end-of-file tokens follow.
    EndOfFile,
}

/// Byte-level HTML lexer producing the flat token stream the minifier consumes.
///
/// Nothing is decoded or normalized: every token carries the exact bytes of
/// the input, so writing tokens back out reproduces the document.
pub struct Lexer {
    pub(super) input: Vec<u8>,
    pub(super) pos: usize,
    pub(super) state: LexerState,
    /// Attribute tokens of the start tag that was just emitted.
    pub(super) pending: VecDeque<Token>,
    /// Lower-cased name of the element whose raw text comes next.
    pub(super) raw_tag: Option<Vec<u8>>,
}

impl Lexer {
    /// Create a lexer over an in-memory document.
    #[must_use]
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            pos: 0,
            state: LexerState::Data,
            pending: VecDeque::new(),
            raw_tag: None,
        }
    }

    /// Read all of `r` and create a lexer over it.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::Io`] if reading fails.
    pub fn from_reader(r: &mut dyn Read) -> Result<Self, LexError> {
        let mut input = Vec::new();
        let _ = r.read_to_end(&mut input)?;
        Ok(Self::new(input))
    }

    /// Current lexer state.
    #[must_use]
    pub const fn state(&self) -> LexerState {
        self.state
    }

    /// Lex the whole input, including the final end-of-file token.
    #[must_use]
    pub fn into_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.lex_next();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return tokens;
            }
        }
    }

    /// Produce the next token. The lexer itself cannot fail once the input
    /// is in memory.
    fn lex_next(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }
        match self.state {
            LexerState::EndOfFile => Token::eof(),
            LexerState::RawText => self.lex_raw_text(),
            _ => self.lex_data(),
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn lex_data(&mut self) -> Token {
        self.switch_to(LexerState::Data);
        if self.at_end() {
            self.switch_to(LexerState::EndOfFile);
            return Token::eof();
        }

        // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
        if self.peek(0) == Some(b'<') {
            match self.peek(1) {
                // [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
                Some(b'!') => return self.lex_markup_declaration(),
                // "U+003F QUESTION MARK (?) - This is an
                // unexpected-question-mark-instead-of-tag-name parse error.
                // Create a comment token whose data is the empty string.
                // Reconsume in the bogus comment state."
                Some(b'?') => return self.lex_bogus_comment(1),
                Some(b'/') if self.peek(2).is_some_and(|c| c.is_ascii_alphabetic()) => {
                    return self.lex_end_tag();
                }
                Some(c) if c.is_ascii_alphabetic() => return self.lex_start_tag(),
                _ => {}
            }
        }
        self.lex_text()
    }

    /// Character data up to the next byte that opens markup. A `<` that does
    /// not open markup is plain text.
    fn lex_text(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;
        while !self.at_end() && !self.starts_markup(self.pos) {
            self.pos += 1;
        }
        Token::text(&self.input[start..self.pos])
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    fn lex_markup_declaration(&mut self) -> Token {
        // "If the next few characters are: Two U+002D HYPHEN-MINUS characters (-)"
        if self.next_few_bytes_are(b"<!--") {
            return self.lex_comment();
        }
        // "ASCII case-insensitive match for the word "DOCTYPE""
        if self.next_few_bytes_are_case_insensitive(b"<!doctype") {
            return self.lex_doctype();
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a
        // U+005B LEFT SQUARE BRACKET character before and after)"
        if self.next_few_bytes_are(b"<![CDATA[") {
            return self.lex_cdata();
        }
        // "Anything else - This is an incorrectly-opened-comment parse error."
        self.lex_bogus_comment(2)
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn lex_comment(&mut self) -> Token {
        self.switch_to(LexerState::Comment);
        self.pos += 4;

        // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
        // parse error. Switch to the data state. Emit the current comment token."
        if self.next_few_bytes_are(b">") {
            self.pos += 1;
            return Token::comment(Vec::new());
        }
        if self.next_few_bytes_are(b"->") {
            self.pos += 2;
            return Token::comment(Vec::new());
        }

        let start = self.pos;
        let Some(end) = self.find(b"-->") else {
            // "EOF - This is an eof-in-comment parse error. Emit the current
            // comment token. Emit an end-of-file token."
            self.log_parse_error("eof-in-comment");
            self.pos = self.input.len();
            return Token::comment(&self.input[start..]);
        };
        self.pos = end + 3;
        Token::comment(&self.input[start..end])
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// The comment data starts `prefix` bytes after the `<` (so `<?` keeps its
    /// `?`, as the bogus comment state reconsumes it) and runs to the next `>`.
    fn lex_bogus_comment(&mut self, prefix: usize) -> Token {
        self.switch_to(LexerState::BogusComment);
        let start = self.pos + prefix;
        self.pos = start;
        let Some(end) = self.find(b">") else {
            self.log_parse_error("eof-in-comment");
            self.pos = self.input.len();
            return Token::comment(&self.input[start..]);
        };
        self.pos = end + 1;
        Token::comment(&self.input[start..end])
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn lex_doctype(&mut self) -> Token {
        self.switch_to(LexerState::Doctype);
        self.pos += b"<!doctype".len();
        let start = self.pos;
        let Some(end) = self.find(b">") else {
            self.log_parse_error("eof-in-doctype");
            self.pos = self.input.len();
            return Token::doctype(&self.input[start..]);
        };
        self.pos = end + 1;
        Token::doctype(&self.input[start..end])
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// CDATA sections are kept verbatim, markers included, as text.
    fn lex_cdata(&mut self) -> Token {
        self.switch_to(LexerState::CdataSection);
        let start = self.pos;
        if let Some(end) = self.find(b"]]>") {
            self.pos = end + 3;
        } else {
            self.log_parse_error("eof-in-cdata");
            self.pos = self.input.len();
        }
        Token::text(&self.input[start..self.pos])
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    ///
    /// Emits the start tag and queues one attribute token per attribute.
    fn lex_start_tag(&mut self) -> Token {
        self.switch_to(LexerState::Tag);
        self.pos += 1;
        let name = self.consume_tag_name();
        let token = Token::start_tag(name);

        loop {
            // [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
            // Whitespace and stray solidi between attributes are ignored.
            self.skip_while(|c| is_whitespace(c) || c == b'/');
            match self.peek(0) {
                None => {
                    self.log_parse_error("eof-in-tag");
                    break;
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let attribute = self.lex_attribute();
                    self.pending.push_back(attribute);
                }
            }
        }

        if Self::lexes_as_raw_text(token.atom) {
            self.raw_tag = Some(token.name.to_ascii_lowercase());
            self.switch_to(LexerState::RawText);
        } else {
            self.switch_to(LexerState::Data);
        }
        token
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn lex_attribute(&mut self) -> Token {
        // "U+003D EQUALS SIGN (=) - This is an
        // unexpected-equals-sign-before-attribute-name parse error. Start a new
        // attribute... Set that attribute's name to the current input character"
        let start = self.pos;
        self.pos += 1;
        self.skip_while(|c| !is_whitespace(c) && !matches!(c, b'/' | b'>' | b'='));
        let name = self.input[start..self.pos].to_vec();

        // [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
        let before_value = self.pos;
        self.skip_while(is_whitespace);
        if self.peek(0) != Some(b'=') {
            // No value: leave the whitespace for the next attribute.
            self.pos = before_value;
            return Token::attribute(name, Vec::new());
        }
        self.pos += 1;

        // [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
        self.skip_while(is_whitespace);
        let start = self.pos;
        match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => {
                self.switch_to(LexerState::AttributeValue);
                self.pos += 1;
                if let Some(end) = self.find(&[quote]) {
                    self.pos = end + 1;
                } else {
                    self.log_parse_error("eof-in-attribute-value");
                    self.pos = self.input.len();
                }
                self.switch_to(LexerState::Tag);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value
            // parse error."
            Some(b'>') | None => {}
            // [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
            Some(_) => self.skip_while(|c| !is_whitespace(c) && c != b'>'),
        }
        Token::attribute(name, &self.input[start..self.pos])
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn lex_end_tag(&mut self) -> Token {
        self.switch_to(LexerState::Tag);
        self.pos += 2;
        let name = self.consume_tag_name();
        let token = Token::end_tag(name);

        let start = self.pos;
        let end = self.find(b">");
        let rest = &self.input[start..end.unwrap_or(self.input.len())];
        if rest.iter().any(|&c| !is_whitespace(c) && c != b'/') {
            // "This is an end-tag-with-attributes parse error."
            self.log_parse_error("end-tag-with-attributes");
        }
        match end {
            Some(end) => self.pos = end + 1,
            None => {
                self.log_parse_error("eof-in-tag");
                self.pos = self.input.len();
            }
        }
        self.switch_to(LexerState::Data);
        token
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Everything up to the matching end tag is one text token, empty if the
    /// end tag follows immediately.
    fn lex_raw_text(&mut self) -> Token {
        let start = self.pos;
        let tag = self.raw_tag.take().unwrap_or_default();
        let end = self.find_end_tag(&tag).unwrap_or(self.input.len());
        self.pos = end;
        self.switch_to(LexerState::Data);
        Token::text(&self.input[start..end])
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// Elements whose content the tree builder hands to the RCDATA, RAWTEXT or
    /// script data states (scripting enabled), plus inline `<svg>` and `<math>` roots
    /// whose content is kept as one foreign-markup payload.
    const fn lexes_as_raw_text(atom: Atom) -> bool {
        matches!(
            atom,
            Atom::Script
                | Atom::Style
                | Atom::Iframe
                | Atom::Noembed
                | Atom::Noframes
                | Atom::Noscript
                | Atom::Textarea
                | Atom::Title
                | Atom::Xmp
                | Atom::Svg
                | Atom::Math
        )
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Ok(self.lex_next())
    }
}
