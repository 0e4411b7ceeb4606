use crate::format::{card_tags, format_long_date, format_short_date, format_tag_name};
use crate::view_model::{
    AppViewModel, ArticleView, ArticleViewStatus, FeedView, PostCard, TagListView, TagRow,
};
use crate::{
    derive_view, DebounceGate, FetchTicket, ListController, Post, PostId, QueryRouting,
    RenderedArticle, Scope, SortKey, Tag, ThemeContext,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Tags,
    Tag(String),
    Article(PostId),
}

/// Which paged list a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedId {
    Home,
    Tag,
}

/// One paged feed: its list controller plus the inputs that derive the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    pub(crate) list: ListController,
    pub(crate) search_text: String,
    pub(crate) gate: DebounceGate<String>,
    pub(crate) settled_query: String,
    pub(crate) sort: Option<SortKey>,
    default_sort: Option<SortKey>,
}

impl FeedState {
    /// Home feed: free text filters loaded posts locally, sorted newest first.
    pub fn home() -> Self {
        Self::with(QueryRouting::Client, Some(SortKey::Latest))
    }

    /// Tag feed: the tag goes to the source, posts keep source order.
    pub fn tag() -> Self {
        Self::with(QueryRouting::Server, None)
    }

    fn with(routing: QueryRouting, default_sort: Option<SortKey>) -> Self {
        Self {
            list: ListController::new(routing),
            search_text: String::new(),
            gate: DebounceGate::default(),
            settled_query: String::new(),
            sort: default_sort,
            default_sort,
        }
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn settled_query(&self) -> &str {
        &self.settled_query
    }

    pub(crate) fn mount(&mut self, scope: Scope) -> Option<FetchTicket> {
        self.list.ensure_scope(scope)
    }

    pub(crate) fn unmount(&mut self) {
        self.gate.cancel();
        self.search_text.clear();
        self.settled_query.clear();
        self.sort = self.default_sort;
        self.list.teardown();
    }

    /// Filtered and sorted posts, recomputed from scratch.
    pub fn visible_posts(&self) -> Vec<Post> {
        let query = match self.list.routing() {
            QueryRouting::Client => Some(self.settled_query.as_str()),
            QueryRouting::Server => None,
        };
        derive_view(self.list.posts(), query, self.sort)
    }

    fn view(&self, title: String) -> FeedView {
        let status = self.list.status();
        FeedView {
            title,
            search_text: self.search_text.clone(),
            sort: self.sort,
            posts: self.visible_posts().iter().map(post_card).collect(),
            loaded_count: self.list.posts().len(),
            status,
            has_more: self.list.has_more(),
            can_load_more: self.list.has_more() && !status.is_loading(),
            error: self.list.last_error().map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagDirectory {
    pub(crate) tags: Vec<Tag>,
    pub(crate) filter: String,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl TagDirectory {
    pub fn visible_tags(&self) -> Vec<&Tag> {
        let needle = self.filter.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleStatus {
    Loading,
    Ready(Box<RenderedArticle>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleState {
    pub id: PostId,
    pub status: ArticleStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) route: Route,
    pub(crate) mounted: bool,
    pub(crate) home: FeedState,
    pub(crate) tag_feed: FeedState,
    pub(crate) tags: TagDirectory,
    pub(crate) article: Option<ArticleState>,
    pub(crate) theme: ThemeContext,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Home,
            mounted: false,
            home: FeedState::home(),
            tag_feed: FeedState::tag(),
            tags: TagDirectory::default(),
            article: None,
            theme: ThemeContext::default(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn home(&self) -> &FeedState {
        &self.home
    }

    pub fn tag_feed(&self) -> &FeedState {
        &self.tag_feed
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub(crate) fn feed_mut(&mut self, feed: FeedId) -> &mut FeedState {
        match feed {
            FeedId::Home => &mut self.home,
            FeedId::Tag => &mut self.tag_feed,
        }
    }

    /// The feed behind the current route, once that route has been mounted.
    pub(crate) fn active_feed(&self) -> Option<FeedId> {
        if !self.mounted {
            return None;
        }
        match self.route {
            Route::Home => Some(FeedId::Home),
            Route::Tag(_) => Some(FeedId::Tag),
            Route::Tags | Route::Article(_) => None,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let (theme_attribute, theme_id) = self.theme.document_attribute();
        let mut view = AppViewModel {
            route: self.route.clone(),
            theme_attribute: format!("{theme_attribute}={theme_id}"),
            theme_name: self.theme.current().name.to_string(),
            feed: None,
            tags: None,
            article: None,
            dirty: self.dirty,
        };

        match &self.route {
            Route::Home => {
                view.feed = Some(self.home.view("Explore Posts".to_string()));
            }
            Route::Tag(slug) => {
                view.feed = Some(self.tag_feed.view(format!("{} Posts", format_tag_name(slug))));
            }
            Route::Tags => {
                view.tags = Some(TagListView {
                    filter: self.tags.filter.clone(),
                    tags: self
                        .tags
                        .visible_tags()
                        .into_iter()
                        .map(|tag| TagRow {
                            name: tag.name.clone(),
                            summary: tag.short_summary.clone().unwrap_or_default(),
                        })
                        .collect(),
                    loading: self.tags.loading,
                    error: self.tags.error.clone(),
                });
            }
            Route::Article(_) => {
                view.article = self.article.as_ref().map(article_view);
            }
        }
        view
    }
}

fn post_card(post: &Post) -> PostCard {
    let (tags, extra_tags) = card_tags(&post.tag_list);
    PostCard {
        id: post.id,
        title: post.title.clone(),
        description: post.description.clone(),
        author: post.user.name.clone(),
        date: format_short_date(&post.published_at),
        tags,
        extra_tags,
        reading_time_minutes: post.reading_time_minutes,
        reactions: post.public_reactions_count,
        comments: post.comments_count,
    }
}

fn article_view(article: &ArticleState) -> ArticleView {
    let mut view = ArticleView {
        id: article.id,
        ..ArticleView::default()
    };
    match &article.status {
        ArticleStatus::Loading => {}
        ArticleStatus::Failed(message) => {
            view.status = ArticleViewStatus::Failed(message.clone());
        }
        ArticleStatus::Ready(rendered) => {
            let post = &rendered.post;
            view.status = ArticleViewStatus::Ready;
            view.title = post.title.clone();
            view.author = post.user.name.clone();
            view.date = format_long_date(&post.published_at);
            view.tags = post.tag_list.clone();
            view.reactions = post.public_reactions_count;
            view.comments = post.comments_count;
            view.reading_time_minutes = post.reading_time_minutes;
            view.markdown = rendered.markdown.clone();
        }
    }
    view
}
