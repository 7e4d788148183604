//! Integration tests for the minification engine.
//!
//! Every test runs against an empty registry unless it says otherwise, so
//! embedded content is copied verbatim.

use taut_html::Lexer;
use taut_minify::{HTMLMinifier, Minifier};

/// Helper to minify a document with an empty registry
fn minify(input: &str) -> String {
    minify_with(&Minifier::new(), input)
}

/// Helper to minify a document with the given registry
fn minify_with(registry: &Minifier, input: &str) -> String {
    let mut out = Vec::new();
    taut_minify::minify(registry, &mut out, &mut input.as_bytes()).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Documented scenarios
// =============================================================================

#[test]
fn test_paragraph_whitespace_collapses() {
    assert_eq!(minify("<p>Hello   world</p>x"), "<p>Hello world</p>x");
}

#[test]
fn test_paragraph_end_at_end_of_input_is_dropped() {
    assert_eq!(minify("<p>Hello   world</p>"), "<p>Hello world");
}

#[test]
fn test_document_structure_is_dropped() {
    assert_eq!(minify("<html><head></head><body>Hi</body></html>"), "Hi");
}

#[test]
fn test_input_defaults_are_dropped() {
    assert_eq!(minify(r#"<input type="text" value="">"#), "<input>");
}

#[test]
fn test_meta_content_type_becomes_charset() {
    assert_eq!(
        minify(r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8">"#),
        "<meta charset=utf-8>"
    );
}

#[test]
fn test_anchor_scheme_is_stripped() {
    assert_eq!(
        minify(r#"<a href="http://example.com">x</a>"#),
        "<a href=//example.com>x</a>"
    );
}

#[test]
fn test_empty_script_is_dropped() {
    assert_eq!(minify("<script></script>"), "");
}

// =============================================================================
// Doctype and comments
// =============================================================================

#[test]
fn test_doctype_is_html5() {
    assert_eq!(
        minify(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">x"#),
        "<!doctype html>x"
    );
}

#[test]
fn test_comments_are_stripped() {
    assert_eq!(minify("a<!-- note -->b"), "ab");
    assert_eq!(minify("<?xml version=\"1.0\"?>x"), "x");
}

#[test]
fn test_conditional_comments_are_kept() {
    let input = "<!--[if IE]><b>old</b><![endif]-->";
    assert_eq!(minify(input), input);
}

#[test]
fn test_downlevel_revealed_closer_is_kept() {
    assert_eq!(minify("<![endif]-->"), "<![endif]-->");
}

// =============================================================================
// Whitespace
// =============================================================================

#[test]
fn test_leading_whitespace_is_dropped() {
    assert_eq!(minify("  \n  text"), "text");
}

#[test]
fn test_trailing_whitespace_at_end_is_dropped() {
    assert_eq!(minify("text \n "), "text");
}

#[test]
fn test_whitespace_around_blocks() {
    assert_eq!(
        minify("<div> a </div>\n  <div> b </div>"),
        "<div>a</div><div>b</div>"
    );
}

#[test]
fn test_whitespace_between_inline_elements_is_kept() {
    assert_eq!(minify("<b>a</b>   <i>b</i>"), "<b>a</b> <i>b</i>");
}

#[test]
fn test_space_inside_inline_end_tag_is_kept() {
    assert_eq!(minify("<span>a </span>b"), "<span>a </span>b");
}

#[test]
fn test_space_moves_across_inline_end_tag() {
    // Only one of the two spaces survives, on the far side of </b>
    assert_eq!(minify("<b>a </b> c"), "<b>a</b> c");
}

#[test]
fn test_space_survives_a_stripped_comment() {
    assert_eq!(minify("a <!-- c --> b"), "a b");
}

#[test]
fn test_whitespace_only_text_between_blocks() {
    assert_eq!(minify("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"), "<ul><li>a<li>b</ul>");
}

// =============================================================================
// Tag elision
// =============================================================================

#[test]
fn test_structure_tags_with_attributes_are_kept() {
    assert_eq!(minify(r#"<html lang="en"><body>x"#), "<html lang=en>x");
}

#[test]
fn test_inferable_end_tags_are_dropped() {
    assert_eq!(
        minify("<table><tr><td>1</td><td>2</td></tr></table>"),
        "<table><tr><td>1<td>2</table>"
    );
    assert_eq!(
        minify("<select><option>a</option><option>b</option></select>"),
        "<select><option>a<option>b</select>"
    );
}

#[test]
fn test_paragraph_end_before_block_is_dropped() {
    assert_eq!(minify("<p>a</p><div>b</div>"), "<p>a<div>b</div>");
    assert_eq!(minify("<p>a</p>\n\n<p>b</p>"), "<p>a<p>b");
}

#[test]
fn test_paragraph_end_before_parent_end_is_dropped() {
    assert_eq!(minify("<div><p>a</p></div>"), "<div><p>a</div>");
}

#[test]
fn test_paragraph_end_inside_anchor_is_kept() {
    assert_eq!(minify("<a><p>a</p></a>"), "<a><p>a</p></a>");
}

#[test]
fn test_paragraph_end_before_inline_is_kept() {
    assert_eq!(minify("<p>a</p> <span>b</span>"), "<p>a</p><span>b</span>");
}

#[test]
fn test_paragraph_end_looks_past_stripped_comments() {
    assert_eq!(minify("<p>a</p><!-- c --><div>b</div>"), "<p>a<div>b</div>");
    assert_eq!(
        minify("<p>a</p><!--[if IE]>x<![endif]--><div>b</div>"),
        "<p>a</p><!--[if IE]>x<![endif]--><div>b</div>"
    );
}

#[test]
fn test_empty_embedded_elements_are_dropped() {
    assert_eq!(minify("a<style></style>b"), "ab");
    assert_eq!(minify("<iframe></iframe>"), "");
    assert_eq!(minify("<svg></svg>x"), "x");
    assert_eq!(minify("<math></math>x"), "x");
}

#[test]
fn test_dropped_elements_keep_one_space() {
    assert_eq!(minify("a <script></script> b"), "a b");
    assert_eq!(
        minify("<b>a</b> <style></style> <b>b</b>"),
        "<b>a</b> <b>b</b>"
    );
    assert_eq!(minify("x <body> y"), "x y");
    assert_eq!(minify("x <html> <body> y"), "x y");
}

#[test]
fn test_embedded_elements_with_attributes_are_kept() {
    assert_eq!(
        minify(r#"<script src="a.js"></script>"#),
        "<script src=a.js></script>"
    );
}

#[test]
fn test_tag_case_is_preserved() {
    assert_eq!(minify("<DIV CLASS=x>a</DIV>"), "<DIV CLASS=x>a</DIV>");
}

#[test]
fn test_stray_attribute_tokens_are_ignored() {
    use taut_html::Token;

    let tokens = vec![
        Token::text("a"),
        Token::attribute("id", "x"),
        Token::start_tag("b"),
        Token::text("c"),
    ];
    let mut out = Vec::new();
    taut_minify::minify_tokens(&Minifier::new(), &mut out, tokens.into_iter()).unwrap();
    assert_eq!(out, b"a<b>c");
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_empty_values_are_dropped() {
    assert_eq!(
        minify(r#"<div class="" id="" title="" style="" dir="" lang="">x</div>"#),
        "<div>x</div>"
    );
    assert_eq!(minify(r#"<form action="">"#), "<form>");
    assert_eq!(minify(r#"<div onclick="">x</div>"#), "<div>x</div>");
}

#[test]
fn test_empty_value_kept_where_meaningful() {
    assert_eq!(minify(r#"<img alt="">"#), "<img alt>");
    assert_eq!(minify(r#"<option value="">"#), "<option value>");
}

#[test]
fn test_default_values_are_dropped() {
    assert_eq!(minify(r#"<form method="GET" enctype="application/x-www-form-urlencoded">"#), "<form>");
    assert_eq!(minify(r#"<td colspan="1" rowspan="2">"#), "<td rowspan=2>");
    assert_eq!(minify(r#"<button type="submit">x</button>"#), "<button>x</button>");
    assert_eq!(minify(r#"<area shape="rect">"#), "<area>");
    assert_eq!(
        minify(r#"<link rel="stylesheet" type="text/css" href="a.css">"#),
        "<link rel=stylesheet href=a.css>"
    );
    assert_eq!(
        minify(r#"<script type="text/javascript" language="JavaScript">x</script>"#),
        "<script>x</script>"
    );
    assert_eq!(minify(r#"<style media="all" type="text/css">a{}</style>"#), "<style>a{}</style>");
}

#[test]
fn test_non_default_values_are_kept() {
    assert_eq!(minify(r#"<form method="post">"#), "<form method=post>");
    assert_eq!(minify(r#"<link media="all">"#), "<link media=all>");
}

#[test]
fn test_boolean_attributes_lose_their_value() {
    assert_eq!(
        minify(r#"<input type="checkbox" checked="checked" disabled>"#),
        "<input type=checkbox checked disabled>"
    );
}

#[test]
fn test_case_insensitive_values_are_lowercased() {
    assert_eq!(minify(r#"<form method="POST">"#), "<form method=post>");
    assert_eq!(minify(r#"<div title="ABC">x</div>"#), "<div title=ABC>x</div>");
}

#[test]
fn test_media_types_are_normalized() {
    assert_eq!(
        minify(r#"<object type="Application/X-Thing ; v=1">"#),
        r#"<object type="application/x-thing;v=1">"#
    );
}

#[test]
fn test_anchor_id_and_name() {
    assert_eq!(minify(r#"<a id="top" name="top">x</a>"#), "<a id=top>x</a>");
    assert_eq!(
        minify(r#"<a id="top" name="bottom">x</a>"#),
        "<a id=top name=bottom>x</a>"
    );
}

#[test]
fn test_anchor_external_keeps_scheme() {
    assert_eq!(
        minify(r#"<a href="https://example.com" rel="external">x</a>"#),
        "<a href=https://example.com rel=external>x</a>"
    );
    assert_eq!(
        minify(r#"<a rel="nofollow" href="https://example.com">x</a>"#),
        "<a rel=nofollow href=//example.com>x</a>"
    );
}

#[test]
fn test_last_duplicate_attribute_decides() {
    // Only the second rel is looked at, so the href is rewritten
    assert_eq!(
        minify(r#"<a rel="external" rel="me" href="http://x.org">x</a>"#),
        "<a rel=external rel=me href=//x.org>x</a>"
    );
}

#[test]
fn test_url_attributes_lose_scheme() {
    assert_eq!(
        minify(r#"<img src="https://cdn.example.com/a.png">"#),
        "<img src=//cdn.example.com/a.png>"
    );
    assert_eq!(
        minify(r#"<form action="http://example.com/go">"#),
        "<form action=//example.com/go>"
    );
}

#[test]
fn test_script_charset_with_src_is_dropped() {
    assert_eq!(
        minify(r#"<script src="a.js" charset="utf-8"></script>"#),
        "<script src=a.js></script>"
    );
    assert_eq!(
        minify(r#"<script charset="utf-8">x</script>"#),
        "<script charset=utf-8>x</script>"
    );
}

#[test]
fn test_meta_keywords_and_viewport() {
    assert_eq!(
        minify(r#"<meta name="keywords" content="a, b, c">"#),
        "<meta name=keywords content=a,b,c>"
    );
    assert_eq!(
        minify(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#),
        r#"<meta name=viewport content="width=device-width,initial-scale=1">"#
    );
}

#[test]
fn test_meta_with_existing_charset_is_not_rewritten() {
    assert_eq!(
        minify(r#"<meta charset="utf-8" http-equiv="content-type" content="text/html; charset=utf-8">"#),
        r#"<meta charset=utf-8 http-equiv=content-type content="text/html;charset=utf-8">"#
    );
}

#[test]
fn test_meta_pragmas_update_document_state() {
    let registry = Minifier::new();
    let input = r#"<meta http-equiv=Content-Style-Type content="Text/Less"><meta http-equiv=content-script-type content=text/x-js><p>x"#;
    let mut minifier = HTMLMinifier::new(&registry, Lexer::new(input));
    let mut out = Vec::new();
    minifier.run(&mut out).unwrap();

    let state = minifier.state();
    assert_eq!(state.default_style_type, "text/less");
    assert_eq!(state.default_inline_style_type, "text/less;inline=1");
    assert_eq!(state.default_script_type, "text/x-js");
    assert_eq!(state.raw_tag, None);
    assert!(!state.preceded_by_space);
}

#[test]
fn test_meta_refresh_content_is_untouched() {
    assert_eq!(
        minify(r#"<meta http-equiv="refresh" content="5; URL=/Next">"#),
        r#"<meta http-equiv=refresh content="5; URL=/Next">"#
    );
}

#[test]
fn test_event_handler_scheme_is_stripped() {
    assert_eq!(
        minify(r#"<div onclick="javascript:go()">x</div>"#),
        "<div onclick=go()>x</div>"
    );
    assert_eq!(minify(r#"<div onclick="JavaScript:">x</div>"#), "<div>x</div>");
}

// =============================================================================
// Quoting
// =============================================================================

#[test]
fn test_values_are_unquoted_when_possible() {
    assert_eq!(minify(r#"<div class="a-b_c">x</div>"#), "<div class=a-b_c>x</div>");
    assert_eq!(minify(r#"<div class=" pad ">x</div>"#), "<div class=pad>x</div>");
}

#[test]
fn test_original_quotes_are_reused() {
    assert_eq!(minify(r#"<div class="a b">x</div>"#), r#"<div class="a b">x</div>"#);
    assert_eq!(minify("<div class='a b'>x</div>"), "<div class='a b'>x</div>");
}

#[test]
fn test_quote_choice_follows_counts() {
    assert_eq!(
        minify(r#"<div title='say "hi"'>x</div>"#),
        r#"<div title='say "hi"'>x</div>"#
    );
    assert_eq!(minify(r#"<div title="it's">x</div>"#), r#"<div title="it's">x</div>"#);
}

#[test]
fn test_quote_entities_are_rewritten() {
    assert_eq!(
        minify(r#"<div title="a&quot;b'c">x</div>"#),
        r#"<div title="a&#34;b'c">x</div>"#
    );
    assert_eq!(
        minify(r#"<div title="&#39;&#x27;&quot;">x</div>"#),
        r#"<div title="''&#34;">x</div>"#
    );
}

// =============================================================================
// Raw text
// =============================================================================

#[test]
fn test_raw_text_is_verbatim() {
    assert_eq!(minify("<pre>  a\n  b  </pre>"), "<pre>  a\n  b  </pre>");
    assert_eq!(minify("<textarea>  x  </textarea>"), "<textarea>  x  </textarea>");
}

#[test]
fn test_space_after_inline_raw_text_is_kept() {
    assert_eq!(minify("<div><code>x</code> y</div>"), "<div><code>x</code> y</div>");
    assert_eq!(
        minify("<div><textarea>t</textarea> y</div>"),
        "<div><textarea>t</textarea> y</div>"
    );
}

#[test]
fn test_space_after_raw_text_ending_in_whitespace_is_dropped() {
    assert_eq!(minify("<div><code>x </code> y</div>"), "<div><code>x </code>y</div>");
}

#[test]
fn test_unregistered_script_is_copied() {
    assert_eq!(
        minify("<script>  var a = 1;  </script>"),
        "<script>  var a = 1;  </script>"
    );
}

#[test]
fn test_script_type_override_is_kept() {
    assert_eq!(
        minify(r#"<script type="text/template"><b>  x</b></script>"#),
        "<script type=text/template><b>  x</b></script>"
    );
}

#[test]
fn test_iframe_is_minified_recursively() {
    let registry = Minifier::new().with_html();
    assert_eq!(
        minify_with(&registry, "<iframe><p>a</p>  <p>b</p></iframe>"),
        "<iframe><p>a<p>b</iframe>"
    );
}

#[test]
fn test_iframe_cdata_wrapper() {
    let registry = Minifier::new().with_html();
    assert_eq!(
        minify_with(&registry, "<iframe> <![CDATA[<b>x</b>]]> </iframe>"),
        "<iframe><![CDATA[<b>x</b>]]></iframe>"
    );
}
