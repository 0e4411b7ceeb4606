use devfeed_core::{ArticleDetail, RenderedArticle};
use scraper::{Html, Selector};

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Returns the inner HTML of the first `<article>`, else of `<body>`, else
/// the whole fragment.
pub fn extract_body_html(html: &str) -> String {
    let doc = Html::parse_document(html);
    ["article", "body"]
        .iter()
        .filter_map(|name| Selector::parse(name).ok())
        .find_map(|sel| doc.select(&sel).next().map(|node| node.inner_html()))
        .unwrap_or_else(|| doc.root_element().html())
}

/// Reduces an article to Markdown, preferring the author's own source.
pub fn render_article(detail: ArticleDetail, converter: &dyn Converter) -> RenderedArticle {
    let markdown = match detail.body_markdown.as_deref().map(str::trim) {
        Some(source) if !source.is_empty() => source.to_string(),
        _ if detail.body_html.trim().is_empty() => String::new(),
        _ => converter
            .to_markdown(&extract_body_html(&detail.body_html))
            .trim()
            .to_string(),
    };
    RenderedArticle {
        post: detail.post,
        markdown,
    }
}
