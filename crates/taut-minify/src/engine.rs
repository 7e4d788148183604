//! The token loop.
//!
//! [`HTMLMinifier`] pulls tokens through a [`TokenBuffer`] and writes each
//! one back in its shortest form. The per-kind rules live next to it:
//! whitespace handling in `whitespace.rs`, tag elision in `structure.rs`,
//! attributes in `attributes.rs` and embedded content in `raw.rs`. Each adds
//! its own `impl` block.

use std::io::Write;

use taut_html::{TokenKind, TokenSource};

use crate::buffer::{Slot, TokenBuffer};
use crate::error::MinifyError;
use crate::registry::Registry;
use crate::state::MinifyState;

/// Every doctype is written as the HTML5 one.
const DOCTYPE: &[u8] = b"<!doctype html>";

/// Minifies one HTML document.
///
/// The minifier owns the lookahead buffer, the document's [`MinifyState`]
/// and the scratch buffers used while rebuilding attribute values. It is
/// used for exactly one document.
pub struct HTMLMinifier<'r, S> {
    pub(crate) registry: &'r dyn Registry,
    pub(crate) tokens: TokenBuffer<S>,
    pub(crate) state: MinifyState,
    /// Output of inline `style` and event handler minification.
    pub(crate) attr_minify_buffer: Vec<u8>,
    /// Requoted attribute values.
    pub(crate) attr_byte_buffer: Vec<u8>,
}

impl<'r, S: TokenSource> HTMLMinifier<'r, S> {
    /// Create a minifier reading from `source` and delegating embedded
    /// content to `registry`.
    #[must_use]
    pub fn new(registry: &'r dyn Registry, source: S) -> Self {
        Self {
            registry,
            tokens: TokenBuffer::new(source),
            state: MinifyState::default(),
            attr_minify_buffer: Vec::new(),
            attr_byte_buffer: Vec::new(),
        }
    }

    /// The document state as it stands.
    #[must_use]
    pub const fn state(&self) -> &MinifyState {
        &self.state
    }

    /// Minify the whole token stream into `w`.
    ///
    /// # Errors
    ///
    /// Stops at the first source, sink or embedded minifier error. Output
    /// written up to that point is not retracted.
    pub fn run(&mut self, w: &mut dyn Write) -> Result<(), MinifyError> {
        loop {
            let Slot { token, .. } = self.tokens.shift()?;
            match token.kind {
                TokenKind::EndOfFile => return Ok(()),
                TokenKind::Doctype => w.write_all(DOCTYPE)?,
                TokenKind::Comment => write_comment(w, &token.content)?,
                TokenKind::Text => {
                    if self.state.raw_tag.is_some() {
                        self.write_raw_text(w, &token.content)?;
                    } else {
                        self.write_text(w, &token.content)?;
                    }
                }
                TokenKind::StartTag | TokenKind::EndTag => self.write_tag(w, &token)?,
                // Attributes are consumed together with their tag; one showing
                // up here has no tag to belong to.
                TokenKind::Attribute => {}
            }
        }
    }
}

/// [§ 13.1.6 Comments](https://html.spec.whatwg.org/multipage/syntax.html#comments)
///
/// Comments are dropped, except the two halves of conditional comments:
/// `<!--[if IE]>...` keeps its comment form, and the `<![endif]-->` closer
/// (which lexes as a bogus comment ending in `--`) keeps its bogus form.
fn write_comment(w: &mut dyn Write, content: &[u8]) -> Result<(), MinifyError> {
    if !is_kept_comment(content) {
        return Ok(());
    }
    if content.starts_with(b"[if") {
        w.write_all(b"<!--")?;
        w.write_all(content)?;
        w.write_all(b"-->")?;
    } else {
        w.write_all(b"<!")?;
        w.write_all(content)?;
        w.write_all(b">")?;
    }
    Ok(())
}

/// True for comment content that survives minification.
pub(crate) fn is_kept_comment(content: &[u8]) -> bool {
    content.starts_with(b"[if") || content.ends_with(b"--")
}
