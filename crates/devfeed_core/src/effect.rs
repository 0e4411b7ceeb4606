use crate::{FeedId, FetchTicket, PostId, ThemeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { feed: FeedId, ticket: FetchTicket },
    /// Abort whatever is still in flight for `feed`.
    CancelFetches { feed: FeedId },
    FetchTags,
    FetchArticle { id: PostId },
    PersistTheme { theme: ThemeId },
}
