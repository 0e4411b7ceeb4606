use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortKey {
    /// Publication time, newest first.
    #[default]
    Latest,
    /// Reaction count, highest first.
    Popular,
    /// Comment count, highest first.
    Relevant,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Latest, SortKey::Popular, SortKey::Relevant];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::Popular => "popular",
            SortKey::Relevant => "relevant",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?}, expected latest, popular or relevant")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Case-insensitive substring match on title, description or any tag.
/// A blank query matches everything.
pub fn matches_query(post: &Post, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    contains_folded(&post.title, &needle)
        || contains_folded(&post.description, &needle)
        || post.tag_list.iter().any(|tag| contains_folded(tag, &needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Derives the displayed list from the accumulated posts.
///
/// `query` is the client-side filter (only the home feed passes one); `sort`
/// of `None` keeps source order. Sorting is stable, so ties keep the order
/// produced by filtering.
pub fn derive_view(posts: &[Post], query: Option<&str>, sort: Option<SortKey>) -> Vec<Post> {
    let mut view: Vec<Post> = match query {
        Some(query) => posts
            .iter()
            .filter(|post| matches_query(post, query))
            .cloned()
            .collect(),
        None => posts.to_vec(),
    };
    if let Some(sort) = sort {
        sort_posts(&mut view, sort);
    }
    view
}

pub fn sort_posts(posts: &mut [Post], sort: SortKey) {
    match sort {
        SortKey::Latest => {
            // Parse once per post; unparseable timestamps sort last.
            let mut keyed: Vec<(Option<DateTime<FixedOffset>>, usize)> = posts
                .iter()
                .enumerate()
                .map(|(idx, post)| (post.published_timestamp(), idx))
                .collect();
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            let order: Vec<usize> = keyed.into_iter().map(|(_, idx)| idx).collect();
            apply_order(posts, &order);
        }
        SortKey::Popular => posts.sort_by_key(|post| Reverse(post.public_reactions_count)),
        SortKey::Relevant => posts.sort_by_key(|post| Reverse(post.comments_count)),
    }
}

fn apply_order(posts: &mut [Post], order: &[usize]) {
    let reordered: Vec<Post> = order.iter().map(|&idx| posts[idx].clone()).collect();
    for (slot, post) in posts.iter_mut().zip(reordered) {
        *slot = post;
    }
}
