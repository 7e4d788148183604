//! Per-media-type minifier lookup.
//!
//! Embedded content (a `<style>` sheet, a `<script>`, an `onclick`
//! handler, an `<iframe>` document) is handed to whichever minifier is
//! registered for its media type. The engine only sees the [`Registry`]
//! trait; [`Minifier`] is the map-backed implementation shipped with the
//! crate.

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};

use crate::error::MinifyError;

/// Media type of HTML documents, under which [`Minifier::with_html`]
/// registers the engine itself.
pub const HTML_MEDIA_TYPE: &str = "text/html";

/// A minifier for one media type.
///
/// Arguments: the registry (for recursing into further embedded content),
/// the media type it was selected for including any parameters, the sink
/// and the source.
pub type MinifyFn = dyn Fn(&dyn Registry, &str, &mut dyn Write, &mut dyn Read) -> Result<(), MinifyError>
    + Send
    + Sync;

/// Looks up the minifier for a media type.
pub trait Registry {
    /// Return the minifier registered for exactly `media_type`, if any.
    fn lookup(&self, media_type: &str) -> Option<&MinifyFn>;
}

/// Minify `r` into `w` with the minifier registered for `media_type`.
///
/// The full media type (`text/css;inline=1`) is tried first, then the bare
/// type without parameters (`text/css`).
///
/// # Errors
///
/// Returns [`MinifyError::UnregisteredMediaType`] when neither lookup
/// succeeds, without touching `w` or `r`. Otherwise returns whatever the
/// minifier returns.
pub fn minify_with(
    registry: &dyn Registry,
    media_type: &str,
    w: &mut dyn Write,
    r: &mut dyn Read,
) -> Result<(), MinifyError> {
    let minifier = registry
        .lookup(media_type)
        .or_else(|| {
            let (essence, _) = media_type.split_once(';')?;
            registry.lookup(essence.trim())
        })
        .ok_or_else(|| MinifyError::UnregisteredMediaType(media_type.to_owned()))?;
    minifier(registry, media_type, w, r)
}

/// A [`Registry`] backed by a map from media type to minifier.
///
/// # Example
/// ```
/// use taut_minify::Minifier;
///
/// let m = Minifier::new().with_html();
/// let out = m.string("text/html", "<b>Hello   world</b>").unwrap();
/// assert_eq!(out, "<b>Hello world</b>");
/// ```
#[derive(Default)]
pub struct Minifier {
    funcs: HashMap<String, Box<MinifyFn>>,
}

impl fmt::Debug for Minifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut media_types: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        media_types.sort_unstable();
        f.debug_struct("Minifier")
            .field("media_types", &media_types)
            .finish()
    }
}

impl Minifier {
    /// Create an empty registry. Every embedded payload is copied verbatim
    /// until minifiers are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` for `media_type`, replacing any earlier registration.
    ///
    /// Media types are matched exactly, so register `text/css` to cover
    /// `text/css;inline=1` as well, or the parameterized type to target it
    /// alone.
    pub fn add_func<F>(&mut self, media_type: impl Into<String>, f: F)
    where
        F: Fn(&dyn Registry, &str, &mut dyn Write, &mut dyn Read) -> Result<(), MinifyError>
            + Send
            + Sync
            + 'static,
    {
        let _ = self.funcs.insert(media_type.into(), Box::new(f));
    }

    /// Register the HTML minifier itself for `text/html`, so `<iframe>`
    /// payloads are minified recursively.
    #[must_use]
    pub fn with_html(mut self) -> Self {
        self.add_func(HTML_MEDIA_TYPE, |registry, _, w, r| crate::minify(registry, w, r));
        self
    }

    /// Minify `input` as `media_type` into a new buffer.
    ///
    /// # Errors
    ///
    /// Same as [`minify_with`].
    pub fn bytes(&self, media_type: &str, mut input: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let mut out = Vec::with_capacity(input.len());
        minify_with(self, media_type, &mut out, &mut input)?;
        Ok(out)
    }

    /// Minify `input` as `media_type` into a new string. Invalid UTF-8
    /// produced by a minifier is replaced lossily.
    ///
    /// # Errors
    ///
    /// Same as [`minify_with`].
    pub fn string(&self, media_type: &str, input: &str) -> Result<String, MinifyError> {
        let out = self.bytes(media_type, input.as_bytes())?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Registry for Minifier {
    fn lookup(&self, media_type: &str) -> Option<&MinifyFn> {
        self.funcs.get(media_type).map(AsRef::as_ref)
    }
}
