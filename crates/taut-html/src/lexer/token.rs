use core::fmt;
use std::vec;

use crate::atom::Atom;

use super::LexError;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The kinds of token the lexer produces. Unlike the tree-construction token
/// stream, attributes are separate tokens that directly follow their start
/// tag, so the minifier can look at (and drop) them one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Clean end of input. Repeated for every request after the input is exhausted.
    EndOfFile,
    /// `<!doctype ...>`
    Doctype,
    /// `<!--...-->` or a bogus comment such as `<!...>` or `<?...>`.
    Comment,
    /// Character data, verbatim (character references are not decoded).
    Text,
    /// `<name`
    StartTag,
    /// `</name>`
    EndTag,
    /// One attribute of the preceding start tag.
    Attribute,
}

/// A lexed token.
///
/// Byte fields are copied out of the input unmodified: tag and attribute
/// names keep their original casing, attribute values keep their quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Tag or attribute name as written. Empty for other kinds.
    pub name: Vec<u8>,
    /// Classified [`Token::name`], [`Atom::Unknown`] when not in the table.
    pub atom: Atom,
    /// Text, comment or doctype content. Empty for tags and attributes.
    pub content: Vec<u8>,
    /// Attribute value including its original quote pair, if any.
    pub raw_value: Vec<u8>,
}

impl Token {
    const fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            name: Vec::new(),
            atom: Atom::Unknown,
            content: Vec::new(),
            raw_value: Vec::new(),
        }
    }

    fn named(kind: TokenKind, name: Vec<u8>) -> Self {
        Self {
            atom: Atom::from_bytes(&name),
            name,
            ..Self::new(kind)
        }
    }

    /// Create an end-of-file token.
    #[must_use]
    pub const fn eof() -> Self {
        Self::new(TokenKind::EndOfFile)
    }

    /// Create a doctype token; the content is whatever followed `<!doctype`.
    #[must_use]
    pub fn doctype(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(TokenKind::Doctype)
        }
    }

    /// Create a comment token with the bytes between the delimiters.
    #[must_use]
    pub fn comment(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(TokenKind::Comment)
        }
    }

    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            ..Self::new(TokenKind::Text)
        }
    }

    /// Create a start tag token; its attributes follow as separate tokens.
    #[must_use]
    pub fn start_tag(name: impl Into<Vec<u8>>) -> Self {
        Self::named(TokenKind::StartTag, name.into())
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(name: impl Into<Vec<u8>>) -> Self {
        Self::named(TokenKind::EndTag, name.into())
    }

    /// Create an attribute token. `raw_value` keeps its quotes, e.g. `"a b"`.
    #[must_use]
    pub fn attribute(name: impl Into<Vec<u8>>, raw_value: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_value: raw_value.into(),
            ..Self::named(TokenKind::Attribute, name.into())
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    /// Returns true for start and end tags.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, TokenKind::StartTag | TokenKind::EndTag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = String::from_utf8_lossy(&self.name);
        let content = String::from_utf8_lossy(&self.content);
        match self.kind {
            TokenKind::EndOfFile => write!(f, "EOF"),
            TokenKind::Doctype => write!(f, "Doctype({content})"),
            TokenKind::Comment => write!(f, "Comment({content})"),
            TokenKind::Text => write!(f, "Text({content:?})"),
            TokenKind::StartTag => write!(f, "StartTag({name})"),
            TokenKind::EndTag => write!(f, "EndTag({name})"),
            TokenKind::Attribute => {
                let value = String::from_utf8_lossy(&self.raw_value);
                if value.is_empty() {
                    write!(f, "Attribute({name})")
                } else {
                    write!(f, "Attribute({name}={value})")
                }
            }
        }
    }
}

/// A producer of [`Token`]s: the built-in [`crate::Lexer`] or any other tokenizer.
///
/// The end of input is reported as an [`TokenKind::EndOfFile`] token, and
/// sources must keep returning it once reached. Fatal failures are reported
/// as `Err`, which lets callers tell them apart from a clean end of stream.
pub trait TokenSource {
    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the underlying input cannot be read.
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// Pre-lexed token lists are sources too; useful for feeding hand-built
/// token streams to the minifier.
impl TokenSource for vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        Ok(self.next().unwrap_or_else(Token::eof))
    }
}
