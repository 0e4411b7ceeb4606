use std::fmt::Write;

use devfeed_core::{
    AppViewModel, ArticleView, ArticleViewStatus, FeedView, ListStatus, PostCard, TagListView,
};

const RULE: &str = "----------------------------------------------------------------";

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "devfeed  [{}]  {}", view.theme_name, view.theme_attribute);
    let _ = writeln!(out, "{RULE}");

    if let Some(feed) = &view.feed {
        render_feed(&mut out, feed);
    } else if let Some(tags) = &view.tags {
        render_tags(&mut out, tags);
    } else if let Some(article) = &view.article {
        render_article(&mut out, article);
    }
    out
}

fn render_feed(out: &mut String, feed: &FeedView) {
    let sort = feed.sort.map(|key| key.as_str()).unwrap_or("source order");
    let _ = writeln!(out, "{}  (sort: {})", feed.title, sort);
    if !feed.search_text.is_empty() {
        let _ = writeln!(out, "search: {}", feed.search_text);
    }
    let _ = writeln!(out);

    if feed.posts.is_empty() && !feed.status.is_loading() && feed.error.is_none() {
        let _ = writeln!(out, "  No posts found.");
    }
    for card in &feed.posts {
        render_card(out, card);
    }

    let _ = writeln!(out);
    let status = match feed.status {
        ListStatus::Idle => String::new(),
        ListStatus::LoadingInitial => "Loading posts...".to_string(),
        ListStatus::LoadingMore => "Loading more...".to_string(),
        ListStatus::Error => format!(
            "Error: {} (type retry)",
            feed.error.as_deref().unwrap_or("request failed")
        ),
    };
    if !status.is_empty() {
        let _ = writeln!(out, "{status}");
    }
    let footer = if feed.can_load_more {
        "  [more] load more"
    } else if !feed.has_more && feed.loaded_count > 0 {
        "  end of list"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "showing {} of {} loaded{}",
        feed.posts.len(),
        feed.loaded_count,
        footer
    );
}

fn render_card(out: &mut String, card: &PostCard) {
    let _ = writeln!(out, "#{:<9} {}", card.id, card.title);
    let mut meta = format!(
        "           {} | {} | {} min | {} reactions | {} comments",
        card.author, card.date, card.reading_time_minutes, card.reactions, card.comments
    );
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|tag| format!("#{tag}")).collect();
        let _ = write!(meta, " | {}", tags.join(" "));
        if card.extra_tags > 0 {
            let _ = write!(meta, " +{}", card.extra_tags);
        }
    }
    let _ = writeln!(out, "{meta}");
}

fn render_tags(out: &mut String, tags: &TagListView) {
    let _ = writeln!(out, "Tags");
    if !tags.filter.is_empty() {
        let _ = writeln!(out, "filter: {}", tags.filter);
    }
    let _ = writeln!(out);
    if tags.loading {
        let _ = writeln!(out, "Loading tags...");
        return;
    }
    if let Some(error) = &tags.error {
        let _ = writeln!(out, "Error: {error} (type retry)");
        return;
    }
    if tags.tags.is_empty() {
        let _ = writeln!(out, "  No tags found.");
    }
    for row in &tags.tags {
        if row.summary.is_empty() {
            let _ = writeln!(out, "  #{}", row.name);
        } else {
            let _ = writeln!(out, "  #{:<20} {}", row.name, first_line(&row.summary));
        }
    }
}

fn render_article(out: &mut String, article: &ArticleView) {
    match &article.status {
        ArticleViewStatus::Loading => {
            let _ = writeln!(out, "Loading article {}...", article.id);
        }
        ArticleViewStatus::Failed(message) => {
            let _ = writeln!(out, "Could not load article {}: {message} (type retry)", article.id);
        }
        ArticleViewStatus::Ready => {
            let _ = writeln!(out, "{}", article.title);
            let _ = writeln!(
                out,
                "{} | {} | {} min read | {} reactions | {} comments",
                article.author,
                article.date,
                article.reading_time_minutes,
                article.reactions,
                article.comments
            );
            if !article.tags.is_empty() {
                let tags: Vec<String> = article.tags.iter().map(|tag| format!("#{tag}")).collect();
                let _ = writeln!(out, "{}", tags.join(" "));
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", article.markdown);
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}
