//! Per-document minification state.

use taut_html::Atom;

/// Media type for `<script>` content and event handler attributes.
pub const DEFAULT_SCRIPT_TYPE: &str = "text/javascript";
/// Media type for `<style>` content.
pub const DEFAULT_STYLE_TYPE: &str = "text/css";
/// Parameter appended to the style type for `style` attribute values.
pub const INLINE_STYLE_PARAM: &str = ";inline=1";

/// State threaded through every decision for one document.
///
/// It is created when a document's minification starts and dropped when it
/// ends. Embedded documents (an `<iframe>` payload minified through the
/// registry) get a fresh one, so a `<meta http-equiv>` in one document never
/// changes how another is minified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyState {
    /// A following text token must not start with a space.
    pub preceded_by_space: bool,
    /// The raw-text element whose content comes next, if any.
    pub raw_tag: Option<Atom>,
    /// Media type set by a `type` attribute on [`MinifyState::raw_tag`].
    pub raw_media_type: Vec<u8>,
    /// Media type for scripts, overridable by `<meta http-equiv=content-script-type>`.
    pub default_script_type: String,
    /// Media type for style sheets, overridable by `<meta http-equiv=content-style-type>`.
    pub default_style_type: String,
    /// Media type for `style` attributes: the style type plus `;inline=1`.
    pub default_inline_style_type: String,
}

impl Default for MinifyState {
    fn default() -> Self {
        Self {
            preceded_by_space: true,
            raw_tag: None,
            raw_media_type: Vec::new(),
            default_script_type: DEFAULT_SCRIPT_TYPE.to_owned(),
            default_style_type: DEFAULT_STYLE_TYPE.to_owned(),
            default_inline_style_type: format!("{DEFAULT_STYLE_TYPE}{INLINE_STYLE_PARAM}"),
        }
    }
}

impl MinifyState {
    /// Switch the document's style type, keeping the inline variant in step.
    pub fn set_style_type(&mut self, media_type: &str) {
        self.default_style_type = media_type.to_owned();
        self.default_inline_style_type = format!("{media_type}{INLINE_STYLE_PARAM}");
    }

    /// Switch the document's script type.
    pub fn set_script_type(&mut self, media_type: &str) {
        self.default_script_type = media_type.to_owned();
    }
}
