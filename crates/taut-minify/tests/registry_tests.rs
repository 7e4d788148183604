//! Integration tests for media type dispatch through the registry.

use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use taut_minify::{Minifier, MinifyError, Registry};

type Log = Arc<Mutex<Vec<String>>>;

/// Helper to register a minifier that copies its input and records the
/// media type it was called with
fn record(m: &mut Minifier, media_type: &str) -> Log {
    let log = Log::default();
    let seen = Arc::clone(&log);
    m.add_func(media_type, move |_: &dyn Registry, media_type: &str, w: &mut dyn Write, r: &mut dyn Read| {
        seen.lock().unwrap().push(media_type.to_owned());
        let _ = io::copy(r, w)?;
        Ok(())
    });
    log
}

/// Helper to register a minifier that drops every space
fn squeeze(m: &mut Minifier, media_type: &str) {
    m.add_func(media_type, |_: &dyn Registry, _: &str, w: &mut dyn Write, r: &mut dyn Read| {
        let mut input = Vec::new();
        let _ = r.read_to_end(&mut input)?;
        input.retain(|&c| c != b' ');
        w.write_all(&input)?;
        Ok(())
    });
}

/// Helper to register a minifier that always fails
fn failing(m: &mut Minifier, media_type: &str) {
    m.add_func(media_type, |_: &dyn Registry, media_type: &str, _: &mut dyn Write, _: &mut dyn Read| {
        Err(MinifyError::Embedded {
            media_type: media_type.to_owned(),
            source: "unexpected token".into(),
        })
    });
}

/// Helper to minify a document
fn minify(m: &Minifier, input: &str) -> String {
    let mut out = Vec::new();
    taut_minify::minify(m, &mut out, &mut input.as_bytes()).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_parameters_fall_back_to_the_bare_type() {
    let mut m = Minifier::new();
    let log = record(&mut m, "text/css");
    assert_eq!(m.bytes("text/css;inline=1", b"a{}").unwrap(), b"a{}");
    assert_eq!(m.bytes("text/css ; charset=utf-8", b"").unwrap(), b"");
    assert_eq!(
        *log.lock().unwrap(),
        ["text/css;inline=1", "text/css ; charset=utf-8"]
    );
}

#[test]
fn test_exact_registration_wins() {
    let mut m = Minifier::new();
    let bare = record(&mut m, "text/css");
    let inline = record(&mut m, "text/css;inline=1");
    let _ = m.bytes("text/css;inline=1", b"").unwrap();
    assert!(bare.lock().unwrap().is_empty());
    assert_eq!(inline.lock().unwrap().len(), 1);
}

#[test]
fn test_unregistered_media_type() {
    let err = Minifier::new().bytes("text/x-unknown", b"abc").unwrap_err();
    assert!(err.is_unregistered());
    assert!(matches!(&err, MinifyError::UnregisteredMediaType(t) if t == "text/x-unknown"));
    assert_eq!(
        err.to_string(),
        "no minifier registered for media type `text/x-unknown`"
    );
}

#[test]
fn test_later_registration_replaces_earlier() {
    let mut m = Minifier::new();
    let first = record(&mut m, "text/plain");
    squeeze(&mut m, "text/plain");
    assert_eq!(m.string("text/plain", "a b c").unwrap(), "abc");
    assert!(first.lock().unwrap().is_empty());
}

#[test]
fn test_debug_lists_media_types() {
    let mut m = Minifier::new().with_html();
    squeeze(&mut m, "text/css");
    assert_eq!(
        format!("{m:?}"),
        r#"Minifier { media_types: ["text/css", "text/html"] }"#
    );
}

// =============================================================================
// Inline attributes
// =============================================================================

#[test]
fn test_style_attribute_is_minified() {
    let mut m = Minifier::new();
    squeeze(&mut m, "text/css");
    assert_eq!(minify(&m, r#"<div style="color : red">"#), "<div style=color:red>");
}

#[test]
fn test_style_attribute_minified_to_nothing_is_dropped() {
    let mut m = Minifier::new();
    m.add_func("text/css", |_: &dyn Registry, _: &str, _: &mut dyn Write, _: &mut dyn Read| Ok(()));
    assert_eq!(minify(&m, r#"<div style="color: red" id=x>"#), "<div id=x>");
}

#[test]
fn test_failing_style_minifier_keeps_the_value() {
    let mut m = Minifier::new();
    failing(&mut m, "text/css");
    assert_eq!(
        minify(&m, r#"<div style="color : red">"#),
        r#"<div style="color : red">"#
    );
}

#[test]
fn test_minified_style_replaces_unquoted_value() {
    let mut m = Minifier::new();
    m.add_func("text/css", |_: &dyn Registry, _: &str, w: &mut dyn Write, r: &mut dyn Read| {
        let mut input = Vec::new();
        let _ = r.read_to_end(&mut input)?;
        let body = input.strip_prefix(b";").unwrap_or(&input);
        w.write_all(body.strip_suffix(b";").unwrap_or(body))?;
        Ok(())
    });
    assert_eq!(minify(&m, "<div style=;a=b;>"), r#"<div style="a=b">"#);
}

#[test]
fn test_event_handler_is_minified() {
    let mut m = Minifier::new();
    squeeze(&mut m, "text/javascript");
    assert_eq!(
        minify(&m, r#"<button onclick="javascript: go ( 1 )">x</button>"#),
        "<button onclick=go(1)>x</button>"
    );
}

// =============================================================================
// Raw text elements
// =============================================================================

#[test]
fn test_script_content_is_dispatched() {
    let mut m = Minifier::new();
    squeeze(&mut m, "text/javascript");
    assert_eq!(
        minify(&m, "<script>var a = 1;</script>"),
        "<script>vara=1;</script>"
    );
}

#[test]
fn test_embedded_failure_aborts() {
    let mut m = Minifier::new();
    failing(&mut m, "text/javascript");
    let mut out = Vec::new();
    let err = taut_minify::minify(&m, &mut out, &mut &b"<script>a(</script>"[..]).unwrap_err();
    assert!(matches!(&err, MinifyError::Embedded { media_type, .. } if media_type == "text/javascript"));
    assert_eq!(
        err.to_string(),
        "minifier for `text/javascript` failed: unexpected token"
    );
}

#[test]
fn test_type_attribute_overrides_dispatch() {
    let mut m = Minifier::new();
    let log = record(&mut m, "text/template");
    assert_eq!(
        minify(&m, r#"<script type="Text/Template">{{x}}</script>"#),
        "<script type=text/template>{{x}}</script>"
    );
    assert_eq!(*log.lock().unwrap(), ["text/template"]);
}

#[test]
fn test_svg_and_math_are_dispatched() {
    let mut m = Minifier::new();
    let svg = record(&mut m, "image/svg+xml");
    let math = record(&mut m, "application/mathml+xml");
    let out = minify(&m, "<svg><circle r=1/></svg><math><mi>x</mi></math>");
    assert_eq!(out, "<svg><circle r=1/></svg><math><mi>x</mi></math>");
    assert_eq!(*svg.lock().unwrap(), ["image/svg+xml"]);
    assert_eq!(*math.lock().unwrap(), ["application/mathml+xml"]);
}

// =============================================================================
// Document state
// =============================================================================

#[test]
fn test_meta_changes_style_type() {
    let mut m = Minifier::new();
    let log = record(&mut m, "text/less");
    let _ = minify(
        &m,
        r#"<meta http-equiv="Content-Style-Type" content="text/less"><style>a{}</style><div style="b:c">"#,
    );
    assert_eq!(*log.lock().unwrap(), ["text/less", "text/less;inline=1"]);
}

#[test]
fn test_meta_changes_script_type() {
    let mut m = Minifier::new();
    let log = record(&mut m, "text/x-js");
    let _ = minify(
        &m,
        r#"<meta http-equiv=content-script-type content=text/x-js><script>a()</script><b onclick="b()">x</b>"#,
    );
    assert_eq!(*log.lock().unwrap(), ["text/x-js", "text/x-js"]);
}

#[test]
fn test_nested_documents_have_their_own_state() {
    let mut m = Minifier::new().with_html();
    let log = record(&mut m, "text/x");
    let js = record(&mut m, "text/javascript");
    let _ = minify(
        &m,
        "<iframe><meta http-equiv=content-script-type content=text/x><script>a()</script></iframe><script>b()</script>",
    );
    assert_eq!(*log.lock().unwrap(), ["text/x"]);
    assert_eq!(*js.lock().unwrap(), ["text/javascript"]);
}
