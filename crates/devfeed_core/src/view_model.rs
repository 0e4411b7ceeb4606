use crate::{ListStatus, PostId, Route, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    /// `data-theme=<id>`, mirrored to the document.
    pub theme_attribute: String,
    pub theme_name: String,
    pub feed: Option<FeedView>,
    pub tags: Option<TagListView>,
    pub article: Option<ArticleView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedView {
    pub title: String,
    pub search_text: String,
    pub sort: Option<SortKey>,
    pub posts: Vec<PostCard>,
    /// Accumulated posts before client-side filtering.
    pub loaded_count: usize,
    pub status: ListStatus,
    pub has_more: bool,
    pub can_load_more: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
    pub extra_tags: usize,
    pub reading_time_minutes: u32,
    pub reactions: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagListView {
    pub filter: String,
    pub tags: Vec<TagRow>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleViewStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleView {
    pub id: PostId,
    pub status: ArticleViewStatus,
    pub title: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
    pub reactions: u64,
    pub comments: u64,
    pub reading_time_minutes: u32,
    pub markdown: String,
}
