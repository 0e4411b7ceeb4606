use crate::{FeedError, FeedId, Generation, Post, PostId, RenderedArticle, Route, SortKey, Tag, ThemeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User opened a view; the previous one unmounts.
    Navigate(Route),
    /// User edited the search box. Debounced on the home feed, applied
    /// immediately on the tag directory.
    SearchInput { text: String, now_ms: u64 },
    /// Clock tick used to settle debounced input.
    Tick { now_ms: u64 },
    /// User picked a sort order for the active feed.
    SortSelected(SortKey),
    /// User asked for the next page.
    LoadMoreClicked,
    /// User asked to retry whatever failed on the current view.
    RetryClicked,
    /// Page source answered a fetch.
    PageLoaded {
        feed: FeedId,
        generation: Generation,
        page: u32,
        result: Result<Vec<Post>, FeedError>,
    },
    TagsLoaded(Result<Vec<Tag>, FeedError>),
    ArticleLoaded {
        id: PostId,
        result: Result<RenderedArticle, FeedError>,
    },
    /// User picked a theme.
    ThemeSelected(ThemeId),
    /// Persisted preference read at startup.
    ThemeRestored(Option<String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
