//! Error type for minification.

use std::error::Error;
use std::io;

use taut_html::LexError;
use thiserror::Error;

/// Everything that can stop a minification.
///
/// Only [`MinifyError::UnregisteredMediaType`] is recoverable: the engine
/// answers it by copying the embedded content verbatim. Every other variant
/// aborts the run; bytes already written to the sink stay written.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The token source failed.
    #[error("tokenizer failed: {0}")]
    Source(#[from] LexError),

    /// The output sink failed.
    #[error("failed to write output: {0}")]
    Sink(#[from] io::Error),

    /// No minifier is registered for the media type.
    #[error("no minifier registered for media type `{0}`")]
    UnregisteredMediaType(String),

    /// A registered minifier reported its own failure.
    #[error("minifier for `{media_type}` failed: {source}")]
    Embedded {
        /// Media type the failing minifier was selected for.
        media_type: String,
        /// The minifier's error.
        source: Box<dyn Error + Send + Sync>,
    },
}

impl MinifyError {
    /// True for [`MinifyError::UnregisteredMediaType`].
    #[must_use]
    pub const fn is_unregistered(&self) -> bool {
        matches!(self, Self::UnregisteredMediaType(_))
    }
}
