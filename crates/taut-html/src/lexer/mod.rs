//! HTML lexer module.
//!
//! Implements a byte-level rendition of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! that keeps every token's original bytes, as a minifier needs.

use std::io;

use thiserror::Error;

/// Lexer state machine.
pub mod core;
/// Helper methods for lexer state transitions and lookahead.
pub mod helpers;
/// Token types produced by the lexer.
pub mod token;

pub use self::core::{Lexer, LexerState};
pub use self::token::{Token, TokenKind, TokenSource};

/// Fatal failure of a token source.
#[derive(Debug, Error)]
pub enum LexError {
    /// The input could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}
