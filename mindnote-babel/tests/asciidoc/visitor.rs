//! Inline markup visitor tests (rich-text markup → AsciiDoc)

use mindnote_babel::asciidoc::{cleanup_whitespace, InlineVisitor};
use proptest::prelude::*;

fn render(markup: &str) -> String {
    InlineVisitor::new().render_markup(markup)
}

#[test]
fn test_plain_text_and_empty_input() {
    assert_eq!(render("Just text"), "Just text");
    assert_eq!(render(""), "");
    assert_eq!(render("   "), "");
}

#[test]
fn test_whitespace_only_emphasis_emits_no_markers() {
    assert_eq!(render("a<b> </b>c"), "ac");
    assert_eq!(render("a<i>\n</i>c"), "ac");
}

#[test]
fn test_emphasis_keeps_outer_whitespace() {
    assert_eq!(render("x<b> bold </b>y"), "x **bold** y");
    assert_eq!(render("<em>lean</em>"), "__lean__");
    assert_eq!(
        render(r#"<span style="font-weight: bold">loud</span> quiet"#),
        "**loud** quiet"
    );
    assert_eq!(render(r#"<span style="color: red">red</span>"#), "red");
}

#[test]
fn test_link_around_image_collapses_to_image() {
    assert_eq!(
        render(r#"<a href="https://x"><img src="y.png"></a>"#),
        "image:y.png[]"
    );
}

#[test]
fn test_links() {
    assert_eq!(
        render(r#"See <a href="https://example.com/a">this</a>"#),
        "See link:https://example.com/a[this]"
    );
    assert_eq!(render(r#"<a href="/local">local</a>"#), "local");
    assert_eq!(render(r#"<a href="http:foo">t</a>"#), "t");
    assert_eq!(
        render(r#"<a href="HTTPS://example.com">loud</a>"#),
        "link:HTTPS://example.com[loud]"
    );
    assert_eq!(render(r##"<a href="#top">top</a>"##), "top");
    assert_eq!(render(r#"<a href="https://example.com"></a>"#), "");
}

#[test]
fn test_images() {
    assert_eq!(render(r#"<img src="a.png" alt="Alt">"#), "image:a.png[Alt]");
    assert_eq!(render(r#"<img alt="no source">"#), "");
}

#[test]
fn test_code_block_uses_language_class() {
    assert_eq!(
        render("<code class=\"language-go\">a\nb</code>"),
        "[source, go]\n----\na\nb\n----"
    );
    assert_eq!(
        render("<code class=\"rust\">a\nb</code>"),
        "[source, rust]\n----\na\nb\n----"
    );
    assert_eq!(render("<code>a\nb</code>"), "[source, text]\n----\na\nb\n----");
}

#[test]
fn test_inline_code() {
    assert_eq!(render("run <code>make</code> now"), "run `make` now");
    assert_eq!(render("<code></code>"), "");
}

#[test]
fn test_preformatted_line_breaks() {
    assert_eq!(render("<pre>a<br>b</pre>"), "[listing]\n....\na\nb\n....");
    assert_eq!(render("a<br>b"), "a\n\nb");
}

#[test]
fn test_three_level_unordered_list() {
    let output = render("<ul><li>one<ul><li>two<ul><li>three</li></ul></li></ul></li></ul>");
    assert_eq!(output, "* one\n** two\n*** three");
    assert!(output.lines().any(|line| line == "** two"));
    assert!(output.lines().any(|line| line == "*** three"));
}

#[test]
fn test_sublist_ends_before_next_sibling() {
    assert_eq!(
        render("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"),
        "* a\n** b\n* c"
    );
}

#[test]
fn test_list_marker_follows_innermost_kind() {
    assert_eq!(render("<ol><li>a</li><li>b</li></ol>"), ". a\n. b");
    let mixed = render("<ul><li>outer<ol><li>inner</li></ol></li></ul>");
    assert_eq!(mixed, "* outer\n.. inner");
    assert!(mixed.lines().any(|line| line == ".. inner"));
    assert!(!mixed.contains("** inner"));
}

#[test]
fn test_empty_and_orphan_list_items_are_dropped() {
    assert_eq!(render("<ul><li></li><li>kept</li></ul>"), "* kept");
    assert_eq!(render("<li>orphan</li>"), "");
}

#[test]
fn test_blockquote_with_citation() {
    assert_eq!(
        render("<blockquote>Wise words<cite>Someone</cite></blockquote>"),
        "[quote, Someone]\n____\nWise words\n____"
    );
    assert_eq!(
        render("<blockquote>Plain</blockquote>"),
        "[quote]\n____\nPlain\n____"
    );
}

#[test]
fn test_headings() {
    assert_eq!(render("<h1>Top</h1>"), "=== Top");
    assert_eq!(render("<h2>Second</h2>"), "=== Second");
    assert_eq!(render("<h3>Third</h3>"), "==== Third");
    assert_eq!(render("<h4>Fourth</h4>"), "===== Fourth");
    assert_eq!(render("<h5>Small</h5>"), "**Small**");
    assert_eq!(render("<h2> </h2>"), "");
}

#[test]
fn test_rule_and_table() {
    assert_eq!(render("a<hr>b"), "a\n'''\n\nb");

    let table = render("<table><tr><td>cell</td></tr></table>");
    assert!(table.starts_with("++++\n<table>"));
    assert!(table.ends_with("</table>\n++++"));
}

#[test]
fn test_figure_caption_becomes_image_title() {
    assert_eq!(
        render(r#"<figure><img src="p.png" alt="P"><figcaption>A caption</figcaption></figure>"#),
        r#"image:p.png[P,title="A caption"]"#
    );
}

#[test]
fn test_figure_caption_quotes_are_escaped() {
    assert_eq!(
        render(r#"<figure><img src="a.png"><figcaption>say "hi"</figcaption></figure>"#),
        r#"image:a.png[,title="say \"hi\""]"#
    );
}

#[test]
fn test_titles_collapse_inner_whitespace() {
    assert_eq!(cleanup_whitespace("Hello   \t  world"), "Hello world");
    assert_eq!(cleanup_whitespace(" a\n\n  b "), "a b");
}

#[test]
fn test_placeholder_figure_uses_noscript_fallback() {
    assert_eq!(
        render(
            r#"<figure class="paragraph-image"><img src="lazy.png"><noscript><img src="real.png"></noscript></figure>"#
        ),
        "image:real.png[]"
    );
}

#[test]
fn test_ignored_elements() {
    assert_eq!(render("x<script>y</script><!-- z -->"), "x");
    assert_eq!(render("<section><u>kept</u></section>"), "kept");
}

proptest! {
    #[test]
    fn cleanup_output_has_no_line_breaks(text in "[a-z \n\t]{0,40}") {
        let cleaned = cleanup_whitespace(&text);
        prop_assert!(!cleaned.contains('\n'));
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn render_never_panics(markup in "[<>/a-z =\"&;]{0,60}") {
        let _ = render(&markup);
    }
}
