use devfeed_core::ArticleDetail;
use devfeed_engine::{extract_body_html, render_article, Converter, Html2MdConverter};
use serde_json::json;

fn detail(body_html: &str, body_markdown: Option<&str>) -> ArticleDetail {
    serde_json::from_value(json!({
        "id": 7,
        "title": "Pinning explained",
        "tag_list": "rust, async",
        "body_html": body_html,
        "body_markdown": body_markdown,
    }))
    .expect("detail json")
}

#[test]
fn prefers_author_markdown() {
    let rendered = render_article(
        detail("<p>ignored</p>", Some("  ## Pin\n\nBody  ")),
        &Html2MdConverter,
    );
    assert_eq!(rendered.markdown, "## Pin\n\nBody");
    assert_eq!(rendered.post.title, "Pinning explained");
}

#[test]
fn falls_back_to_converted_html() {
    let rendered = render_article(
        detail("<h2>Pin</h2><p>Some <strong>bold</strong> text.</p>", Some("   ")),
        &Html2MdConverter,
    );
    assert!(rendered.markdown.contains("Pin"));
    assert!(rendered.markdown.contains("**bold**"));
    assert!(!rendered.markdown.contains("<p>"));
}

#[test]
fn empty_body_renders_empty_markdown() {
    let rendered = render_article(detail("", None), &Html2MdConverter);
    assert_eq!(rendered.markdown, "");
}

#[test]
fn extraction_prefers_article_over_body() {
    let html = "<html><body><nav>menu</nav><article><p>kept</p></article></body></html>";
    let inner = extract_body_html(html);
    assert!(inner.contains("kept"));
    assert!(!inner.contains("menu"));
}

#[test]
fn extraction_falls_back_to_body() {
    let inner = extract_body_html("<html><body><p>only body</p></body></html>");
    assert_eq!(inner, "<p>only body</p>");
}

struct Shouting;

impl Converter for Shouting {
    fn to_markdown(&self, html: &str) -> String {
        html.to_uppercase()
    }
}

#[test]
fn converter_sees_extracted_content_only() {
    let rendered = render_article(
        detail("<article>quiet</article><footer>x</footer>", None),
        &Shouting,
    );
    assert_eq!(rendered.markdown, "QUIET");
}
