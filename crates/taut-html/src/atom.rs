//! Closed identifiers for the tag and attribute names the minifier knows about.
//!
//! [§ 4 The elements of HTML](https://html.spec.whatwg.org/multipage/#toc-semantics)
//! [§ Index: Attributes](https://html.spec.whatwg.org/multipage/indices.html#attributes-3)
//!
//! Tags and attributes share one namespace (`style`, `span`, `title`, `form`,
//! `label`, `cite` and `data` are both), so a single enum covers them. Names
//! outside the table map to [`Atom::Unknown`]. Every classification table is a
//! `const fn` predicate, so lookups compile down to a jump table.

use std::str::FromStr;

use strum_macros::{EnumString, IntoStaticStr};

/// Longest known name (`formnovalidate`, `accept-charset`) plus slack.
const MAX_ATOM_LEN: usize = 16;

/// A known tag or attribute name.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Atom {
    /// Any name not in the table.
    #[strum(disabled)]
    Unknown,

    // Elements
    A,
    Abbr,
    Acronym,
    Address,
    Article,
    Aside,
    Audio,
    B,
    Bdi,
    Bdo,
    Big,
    Blockquote,
    Body,
    Br,
    Button,
    Canvas,
    Caption,
    Cite,
    Code,
    Col,
    Colgroup,
    Data,
    Dd,
    Details,
    Dfn,
    Div,
    Dl,
    Dt,
    Em,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Font,
    Footer,
    Form,
    #[strum(serialize = "h1")]
    H1,
    #[strum(serialize = "h2")]
    H2,
    #[strum(serialize = "h3")]
    H3,
    #[strum(serialize = "h4")]
    H4,
    #[strum(serialize = "h5")]
    H5,
    #[strum(serialize = "h6")]
    H6,
    Head,
    Header,
    Hgroup,
    Hr,
    Html,
    I,
    Iframe,
    Img,
    Input,
    Kbd,
    Label,
    Li,
    Link,
    Main,
    Map,
    Mark,
    Math,
    Menu,
    Meta,
    Nav,
    Noembed,
    Noframes,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    P,
    Param,
    Pre,
    Q,
    Rb,
    Rp,
    Rt,
    Rtc,
    Ruby,
    S,
    Samp,
    Script,
    Section,
    Select,
    Small,
    Source,
    Span,
    Strike,
    Strong,
    Style,
    Sub,
    Sup,
    Svg,
    Table,
    Tbody,
    Td,
    Template,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Time,
    Title,
    Tr,
    Tt,
    U,
    Ul,
    Var,
    Video,
    Xmp,

    // Attributes
    Accept,
    AcceptCharset,
    Action,
    Align,
    Alink,
    Allowfullscreen,
    Async,
    Autofocus,
    Autoplay,
    Axis,
    Background,
    Bgcolor,
    Charset,
    Checked,
    Class,
    Classid,
    Clear,
    Codebase,
    Codetype,
    Color,
    Colspan,
    Compact,
    Content,
    Controls,
    Declare,
    Default,
    Defer,
    Dir,
    Disabled,
    Enctype,
    Face,
    Formaction,
    Formnovalidate,
    Frame,
    Frameborder,
    Hidden,
    Href,
    Hreflang,
    HttpEquiv,
    Icon,
    Id,
    Inert,
    Ismap,
    Itemscope,
    Lang,
    Language,
    Longdesc,
    Loop,
    Manifest,
    Media,
    Method,
    Multiple,
    Muted,
    Name,
    Nohref,
    Noresize,
    Noshade,
    Novalidate,
    Nowrap,
    Open,
    Poster,
    Profile,
    Readonly,
    Rel,
    Required,
    Rev,
    Reversed,
    Rowspan,
    Rules,
    Scope,
    Scoped,
    Scrolling,
    Seamless,
    Selected,
    Shape,
    Sortable,
    Src,
    Target,
    Text,
    Truespeed,
    Type,
    Typemustmatch,
    Usemap,
    Valign,
    Value,
    Valuetype,
    Visible,
    Vlink,
}

impl Atom {
    /// Classify a raw tag or attribute name, ASCII case-insensitively.
    #[must_use]
    pub fn from_bytes(name: &[u8]) -> Self {
        if name.is_empty() || name.len() > MAX_ATOM_LEN {
            return Self::Unknown;
        }
        let mut lower = [0u8; MAX_ATOM_LEN];
        for (dst, src) in lower.iter_mut().zip(name) {
            *dst = src.to_ascii_lowercase();
        }
        std::str::from_utf8(&lower[..name.len()])
            .ok()
            .and_then(|s| Self::from_str(s).ok())
            .unwrap_or(Self::Unknown)
    }

    /// Lower-case canonical name, or `""` for [`Atom::Unknown`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        if self == Self::Unknown {
            return "";
        }
        self.into()
    }

    // =========================================================================
    // Element tables
    // =========================================================================

    /// [§ 3.2.5.2.5 Phrasing content](https://html.spec.whatwg.org/multipage/dom.html#phrasing-content)
    ///
    /// Elements that continue the current line. Whitespace next to them is
    /// significant and must survive trimming.
    #[must_use]
    pub const fn is_inline(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::Abbr
                | Self::Acronym
                | Self::B
                | Self::Bdi
                | Self::Bdo
                | Self::Big
                | Self::Button
                | Self::Cite
                | Self::Code
                | Self::Data
                | Self::Dfn
                | Self::Em
                | Self::Font
                | Self::I
                | Self::Img
                | Self::Input
                | Self::Kbd
                | Self::Label
                | Self::Mark
                | Self::Math
                | Self::Object
                | Self::Q
                | Self::S
                | Self::Samp
                | Self::Select
                | Self::Small
                | Self::Span
                | Self::Strike
                | Self::Strong
                | Self::Sub
                | Self::Sup
                | Self::Svg
                | Self::Textarea
                | Self::Time
                | Self::Tt
                | Self::U
                | Self::Var
        )
    }

    /// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
    ///
    /// "A p element's end tag may be omitted if the p element is immediately
    /// followed by an address, article, aside, blockquote, details, div, dl,
    /// fieldset, figcaption, figure, footer, form, h1, h2, h3, h4, h5, h6,
    /// header, hgroup, hr, main, menu, nav, ol, p, pre, section, table, or ul
    /// element"
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            Self::Address
                | Self::Article
                | Self::Aside
                | Self::Blockquote
                | Self::Details
                | Self::Div
                | Self::Dl
                | Self::Fieldset
                | Self::Figcaption
                | Self::Figure
                | Self::Footer
                | Self::Form
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Header
                | Self::Hgroup
                | Self::Hr
                | Self::Main
                | Self::Menu
                | Self::Nav
                | Self::Ol
                | Self::P
                | Self::Pre
                | Self::Section
                | Self::Table
                | Self::Ul
        )
    }

    /// Elements whose text content is never whitespace-collapsed: it is either
    /// copied verbatim or dispatched to an embedded minifier.
    #[must_use]
    pub const fn is_raw_text(self) -> bool {
        matches!(
            self,
            Self::Code
                | Self::Iframe
                | Self::Math
                | Self::Noscript
                | Self::Pre
                | Self::Script
                | Self::Style
                | Self::Svg
                | Self::Textarea
                | Self::Xmp
        )
    }

    /// Raw-text elements whose content is foreign code selected by media type.
    #[must_use]
    pub const fn has_embedded_content(self) -> bool {
        matches!(
            self,
            Self::Iframe | Self::Math | Self::Script | Self::Style | Self::Svg
        )
    }

    /// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
    ///
    /// Elements whose start and end tags may both be omitted when they carry
    /// no attributes.
    #[must_use]
    pub const fn is_document_structure(self) -> bool {
        matches!(self, Self::Html | Self::Head | Self::Body | Self::Colgroup)
    }

    /// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
    ///
    /// Elements whose end tag the parser always infers from what follows.
    #[must_use]
    pub const fn has_inferable_end_tag(self) -> bool {
        matches!(
            self,
            Self::Thead
                | Self::Tbody
                | Self::Tfoot
                | Self::Tr
                | Self::Th
                | Self::Td
                | Self::Optgroup
                | Self::Option
                | Self::Dd
                | Self::Dt
                | Self::Li
                | Self::Rb
                | Self::Rt
                | Self::Rtc
                | Self::Rp
        )
    }

    // =========================================================================
    // Attribute tables
    // =========================================================================

    /// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
    ///
    /// "The presence of a boolean attribute on an element represents the true
    /// value, and the absence of the attribute represents the false value."
    #[must_use]
    pub const fn is_boolean_attr(self) -> bool {
        matches!(
            self,
            Self::Allowfullscreen
                | Self::Async
                | Self::Autofocus
                | Self::Autoplay
                | Self::Checked
                | Self::Compact
                | Self::Controls
                | Self::Declare
                | Self::Default
                | Self::Defer
                | Self::Disabled
                | Self::Formnovalidate
                | Self::Hidden
                | Self::Inert
                | Self::Ismap
                | Self::Itemscope
                | Self::Loop
                | Self::Multiple
                | Self::Muted
                | Self::Nohref
                | Self::Noresize
                | Self::Noshade
                | Self::Novalidate
                | Self::Nowrap
                | Self::Open
                | Self::Readonly
                | Self::Required
                | Self::Reversed
                | Self::Scoped
                | Self::Seamless
                | Self::Selected
                | Self::Sortable
                | Self::Truespeed
                | Self::Typemustmatch
                | Self::Visible
        )
    }

    /// Attributes whose values are matched ASCII case-insensitively, so they
    /// can be lower-cased.
    #[must_use]
    pub const fn is_case_insensitive_attr(self) -> bool {
        matches!(
            self,
            Self::Accept
                | Self::AcceptCharset
                | Self::Align
                | Self::Alink
                | Self::Axis
                | Self::Bgcolor
                | Self::Charset
                | Self::Clear
                | Self::Codetype
                | Self::Color
                | Self::Dir
                | Self::Enctype
                | Self::Face
                | Self::Frame
                | Self::Hreflang
                | Self::HttpEquiv
                | Self::Lang
                | Self::Language
                | Self::Link
                | Self::Media
                | Self::Method
                | Self::Rel
                | Self::Rev
                | Self::Rules
                | Self::Scope
                | Self::Scrolling
                | Self::Shape
                | Self::Target
                | Self::Text
                | Self::Type
                | Self::Valign
                | Self::Valuetype
                | Self::Vlink
        )
    }

    /// Attributes holding a URL.
    #[must_use]
    pub const fn is_url_attr(self) -> bool {
        matches!(
            self,
            Self::Action
                | Self::Background
                | Self::Cite
                | Self::Classid
                | Self::Codebase
                | Self::Data
                | Self::Formaction
                | Self::Href
                | Self::Icon
                | Self::Longdesc
                | Self::Manifest
                | Self::Poster
                | Self::Profile
                | Self::Src
                | Self::Usemap
        )
    }

    /// Attributes for which an empty value means the same as no attribute.
    #[must_use]
    pub const fn omits_empty_value(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Dir | Self::Id | Self::Lang | Self::Name | Self::Style | Self::Title
        )
    }
}
