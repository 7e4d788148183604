//! Content of raw-text elements.
//!
//! Scripts, style sheets, `<iframe>` documents and inline `<svg>` or `<math>` are
//! handed to the minifier registered for their media type. Everything else
//! that lexes as raw text (`<pre>`, `<textarea>`, ...) is copied as is.

use std::io::{self, Write};

use taut_common::bytes::{is_whitespace, trim_whitespace};
use taut_common::warning::warn_once;
use taut_html::{Atom, TokenSource};

use crate::engine::HTMLMinifier;
use crate::error::MinifyError;
use crate::registry::{HTML_MEDIA_TYPE, minify_with};

const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &[u8] = b"]]>";

impl<S: TokenSource> HTMLMinifier<'_, S> {
    /// Write a text token found inside the open raw-text element.
    ///
    /// Raw content renders like any other text, so whether the next text
    /// may drop its leading space depends on the last byte written here.
    pub(crate) fn write_raw_text(&mut self, w: &mut dyn Write, content: &[u8]) -> Result<(), MinifyError> {
        let mut out = LastByte { inner: w, last: None };
        self.dispatch_raw_text(&mut out, content)?;
        if let Some(last) = out.last {
            self.state.preceded_by_space = is_whitespace(last);
        }
        Ok(())
    }

    fn dispatch_raw_text(&self, w: &mut dyn Write, content: &[u8]) -> Result<(), MinifyError> {
        let Some(tag) = self.state.raw_tag.filter(|tag| tag.has_embedded_content()) else {
            w.write_all(content)?;
            return Ok(());
        };
        let media_type = self.raw_media_type(tag);

        let mut payload = content;
        if media_type == HTML_MEDIA_TYPE {
            let trimmed = trim_whitespace(content);
            if trimmed.len() > 12 && trimmed.starts_with(CDATA_START) && trimmed.ends_with(CDATA_END) {
                w.write_all(CDATA_START)?;
                payload = &trimmed[CDATA_START.len()..];
            }
        }

        let mut reader = payload;
        match minify_with(self.registry, &media_type, w, &mut reader) {
            Err(MinifyError::UnregisteredMediaType(_)) => {
                warn_once(
                    "Minify",
                    &format!("no minifier for {media_type}, <{}> content copied as is", tag.as_str()),
                );
                w.write_all(payload)?;
                Ok(())
            }
            result => result,
        }
    }

    /// Media type of the open element's content: its `type` attribute if it
    /// had one, otherwise what the element implies.
    fn raw_media_type(&self, tag: Atom) -> String {
        if !self.state.raw_media_type.is_empty() {
            return String::from_utf8_lossy(&self.state.raw_media_type).into_owned();
        }
        match tag {
            Atom::Iframe => HTML_MEDIA_TYPE.to_owned(),
            Atom::Script => self.state.default_script_type.clone(),
            Atom::Style => self.state.default_style_type.clone(),
            Atom::Svg => "image/svg+xml".to_owned(),
            Atom::Math => "application/mathml+xml".to_owned(),
            _ => String::new(),
        }
    }
}

/// Forwards to a sink and remembers the last byte that went through.
struct LastByte<'w> {
    inner: &'w mut dyn Write,
    last: Option<u8>,
}

impl Write for LastByte<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if n > 0 {
            self.last = Some(buf[n - 1]);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
