//! Devfeed core: pure state machine, paged list loading and view-model helpers.
mod contact;
mod debounce;
mod effect;
mod error;
pub mod format;
mod list;
mod msg;
mod pipeline;
mod post;
mod state;
mod theme;
mod update;
mod view_model;

pub use contact::{
    is_valid_email, ContactField, ContactForm, ContactMessage, MESSAGE_MAX, NAME_MAX, SUBJECT_MAX,
};
pub use debounce::{DebounceGate, QUIET_PERIOD_MS};
pub use effect::Effect;
pub use error::{ErrorKind, FeedError};
pub use list::{
    FetchTicket, Generation, ListController, ListStatus, PageOutcome, PageRequest, QueryRouting,
    Scope, PAGE_SIZE,
};
pub use msg::Msg;
pub use pipeline::{derive_view, matches_query, sort_posts, ParseSortKeyError, SortKey};
pub use post::{ArticleDetail, Author, Post, PostId, RenderedArticle, Tag};
pub use state::{
    AppState, ArticleState, ArticleStatus, FeedId, FeedState, Route, TagDirectory,
};
pub use theme::{
    theme_by_id, Theme, ThemeContext, ThemeId, UnknownTheme, DEFAULT_THEME, THEMES,
    THEME_ATTRIBUTE,
};
pub use update::update;
pub use view_model::{
    AppViewModel, ArticleView, ArticleViewStatus, FeedView, PostCard, TagListView, TagRow,
};
