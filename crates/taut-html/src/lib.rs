//! HTML lexer and name tables for the Taut minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Lexer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT/RCDATA/script data and tag states, byte for byte
//!   - DOCTYPE, comment, bogus comment and CDATA handling
//!   - One token per attribute, with raw (still quoted) values
//!
//! - **Name Tables** - the closed [`Atom`] identifier for known tags and
//!   attributes, and the classification sets the minifier relies on
//!
//! # Not Implemented
//!
//! - Character reference decoding (the minifier never needs decoded text)
//! - Tree construction

/// Known tag and attribute names and their classification tables.
pub mod atom;
/// Byte-level HTML lexer.
pub mod lexer;

pub use atom::Atom;
pub use lexer::{LexError, Lexer, LexerState, Token, TokenKind, TokenSource};
