//! Taut HTML minification engine
//!
//! Rewrites a stream of HTML tokens into the shortest markup that parses to
//! the same document. Whitespace is collapsed, inferable tags and default
//! attributes are dropped, attribute values are requoted, and embedded
//! scripts, style sheets and documents are passed to per-media-type
//! minifiers through a [`Registry`].
//!
//! ```
//! use taut_minify::Minifier;
//!
//! let m = Minifier::new();
//! let out = m.bytes("text/html", b"<html><head></head><body>Hi</body></html>");
//! assert!(out.is_err()); // nothing registered for text/html yet
//!
//! let mut out = Vec::new();
//! taut_minify::minify(&m, &mut out, &mut &b"<html><body>Hi</body></html>"[..]).unwrap();
//! assert_eq!(out, b"Hi");
//! ```

use std::io::{BufWriter, Read, Write};

use taut_html::{Lexer, TokenSource};

mod attributes;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod quote;
mod raw;
pub mod registry;
pub mod state;
mod structure;
mod whitespace;

pub use engine::HTMLMinifier;
pub use error::MinifyError;
pub use registry::{Minifier, MinifyFn, Registry, minify_with};
pub use state::MinifyState;

/// Minify the HTML document read from `r` into `w`.
///
/// # Errors
///
/// Returns [`MinifyError::Source`] if `r` cannot be read,
/// [`MinifyError::Sink`] if `w` fails, and any error a registered minifier
/// reports for embedded content other than a missing registration.
pub fn minify(registry: &dyn Registry, w: &mut dyn Write, r: &mut dyn Read) -> Result<(), MinifyError> {
    let lexer = Lexer::from_reader(r)?;
    minify_tokens(registry, w, lexer)
}

/// Minify a document given as a token stream from any [`TokenSource`].
///
/// # Errors
///
/// Same as [`minify`], with [`MinifyError::Source`] carrying the source's
/// own errors.
pub fn minify_tokens<S: TokenSource>(
    registry: &dyn Registry,
    w: &mut dyn Write,
    source: S,
) -> Result<(), MinifyError> {
    let mut out = BufWriter::new(w);
    HTMLMinifier::new(registry, source).run(&mut out)?;
    out.flush()?;
    Ok(())
}
