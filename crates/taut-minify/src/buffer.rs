//! Bounded lookahead over a [`TokenSource`].
//!
//! Most minification decisions need to see what comes next: whether a
//! trailing space is followed by more text, whether `</p>` can be inferred,
//! which attributes a tag carries. [`TokenBuffer`] keeps every token fetched
//! ahead of time in a queue, wrapped in a [`Slot`] that the attribute passes
//! can annotate without touching the token itself.

use std::collections::VecDeque;
use std::ops::Range;

use taut_common::bytes::is_whitespace;
use taut_html::{LexError, Token, TokenKind, TokenSource};

/// Whether a buffered token will be written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The token is written as usual.
    Present,
    /// A rewrite pass removed the token; the emission pass skips it.
    Elided,
}

/// The logical value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A range into [`Token::raw_value`] with the quote pair and the
    /// whitespace just inside it removed.
    Raw(Range<usize>),
    /// A value produced by a rewrite pass.
    Rewritten(Vec<u8>),
}

/// A buffered token plus the annotations the minifier keeps for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// The token as produced by the source.
    pub token: Token,
    /// Whether the token survives.
    pub presence: Presence,
    /// Logical attribute value. An empty range for every other token kind.
    pub value: AttrValue,
}

impl Slot {
    /// Wrap a freshly fetched token, computing its logical value once.
    #[must_use]
    pub fn new(token: Token) -> Self {
        let value = if token.kind == TokenKind::Attribute {
            AttrValue::Raw(unquoted_range(&token.raw_value))
        } else {
            AttrValue::Raw(0..0)
        };
        Self {
            token,
            presence: Presence::Present,
            value,
        }
    }

    /// The value both attribute passes agree on.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        match &self.value {
            AttrValue::Raw(range) => &self.token.raw_value[range.clone()],
            AttrValue::Rewritten(value) => value,
        }
    }

    /// Replace the logical value. The raw bytes stay available for quoting.
    pub fn set_value(&mut self, value: Vec<u8>) {
        self.value = AttrValue::Rewritten(value);
    }

    /// Mark the token as dropped.
    pub const fn elide(&mut self) {
        self.presence = Presence::Elided;
    }

    /// Returns true unless a rewrite pass elided the token.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.presence == Presence::Present
    }
}

/// Strip one matching quote pair and the whitespace just inside it.
fn unquoted_range(raw: &[u8]) -> Range<usize> {
    let quoted = raw.len() > 1
        && matches!(raw[0], b'"' | b'\'')
        && raw[raw.len() - 1] == raw[0];
    if !quoted {
        return 0..raw.len();
    }
    let inner = 1..raw.len() - 1;
    let start = raw[inner.clone()]
        .iter()
        .position(|&c| !is_whitespace(c))
        .map_or(inner.end, |i| inner.start + i);
    let end = raw[start..inner.end]
        .iter()
        .rposition(|&c| !is_whitespace(c))
        .map_or(start, |i| start + i + 1);
    start..end
}

/// A lookahead queue in front of a [`TokenSource`].
///
/// The queue only grows as far as the deepest [`TokenBuffer::peek`] asked
/// for. After the source reports the end of input it is never called again;
/// the buffer answers every further request with a fresh end-of-file token.
#[derive(Debug)]
pub struct TokenBuffer<S> {
    source: S,
    queue: VecDeque<Slot>,
    exhausted: bool,
}

impl<S: TokenSource> TokenBuffer<S> {
    /// Put a lookahead queue in front of `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            queue: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Make sure at least `n + 1` slots are queued.
    fn fetch(&mut self, n: usize) -> Result<(), LexError> {
        while self.queue.len() <= n {
            let token = if self.exhausted {
                Token::eof()
            } else {
                let token = self.source.next_token()?;
                self.exhausted = token.is_eof();
                token
            };
            self.queue.push_back(Slot::new(token));
        }
        Ok(())
    }

    /// Consume and return the next slot.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LexError`] if it fails while fetching.
    pub fn shift(&mut self) -> Result<Slot, LexError> {
        self.fetch(0)?;
        Ok(self.queue.pop_front().unwrap_or_else(|| Slot::new(Token::eof())))
    }

    /// Look at the slot `i` positions ahead without consuming anything.
    /// `peek(0)` is what the next [`TokenBuffer::shift`] returns.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LexError`] if it fails while fetching.
    pub fn peek(&mut self, i: usize) -> Result<&Slot, LexError> {
        self.fetch(i)?;
        Ok(&self.queue[i])
    }

    /// Like [`TokenBuffer::peek`], but allows annotating the slot.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LexError`] if it fails while fetching.
    pub fn peek_mut(&mut self, i: usize) -> Result<&mut Slot, LexError> {
        self.fetch(i)?;
        Ok(&mut self.queue[i])
    }

    /// Look at two slots at once, for comparing their values.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LexError`] if it fails while fetching.
    pub fn peek_pair(&mut self, i: usize, j: usize) -> Result<(&Slot, &Slot), LexError> {
        self.fetch(i.max(j))?;
        Ok((&self.queue[i], &self.queue[j]))
    }

    /// Number of slots currently queued.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }
}
