//! Display formatting shared by the card and article views.

use chrono::{DateTime, Utc};

/// Tags shown on a card before collapsing the rest into a `+N` badge.
pub const CARD_TAG_LIMIT: usize = 3;

/// "March 5, 2024"; "Unknown date" for an empty value, "Invalid date" when
/// it does not parse.
pub fn format_long_date(raw: &str) -> String {
    format_date(raw, "%B %-d, %Y")
}

/// "Mar 5, 2024".
pub fn format_short_date(raw: &str) -> String {
    format_date(raw, "%b %-d, %Y")
}

fn format_date(raw: &str, pattern: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Unknown date".to_string();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc).format(pattern).to_string(),
        Err(_) => "Invalid date".to_string(),
    }
}

/// "web-dev" becomes "Web dev".
pub fn format_tag_name(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.as_str().replace('-', " ");
            format!("{}{}", first.to_uppercase(), rest)
        }
        None => String::new(),
    }
}

/// Visible tags and the overflow count.
pub fn card_tags(tags: &[String]) -> (Vec<String>, usize) {
    let shown = tags.iter().take(CARD_TAG_LIMIT).cloned().collect();
    (shown, tags.len().saturating_sub(CARD_TAG_LIMIT))
}
