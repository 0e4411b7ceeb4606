//! Paged list loading shared by the home feed and the tag feed.
//!
//! A [`ListController`] owns the cursor, the accumulated posts and the load
//! status for one scope. Every reset bumps a generation counter; results are
//! applied only when they carry the current generation and the page that is
//! actually in flight, so a slow response from an abandoned scope can never
//! append to a newer list.

use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::{FeedError, Post};

/// Maximum posts per page. A full page is also the only hint that more exist.
pub const PAGE_SIZE: usize = 12;

pub type Generation = u64;

/// The identity of one list session: tag filter plus settled query text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Scope {
    pub tag: Option<String>,
    pub query: Option<String>,
}

impl Scope {
    pub fn new(tag: Option<String>, query: Option<String>) -> Self {
        Self {
            tag: tag.filter(|t| !t.is_empty()),
            query: query.filter(|q| !q.is_empty()),
        }
    }

    pub fn for_tag(tag: impl Into<String>) -> Self {
        Self::new(Some(tag.into()), None)
    }

    pub fn for_query(query: impl Into<String>) -> Self {
        Self::new(None, Some(query.into()))
    }
}

/// Where the free-text part of the scope is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRouting {
    /// Filter loaded posts locally; the source never sees the query.
    Client,
    /// Forward the query to the source.
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub page: u32,
    pub tag: Option<String>,
    pub query: Option<String>,
}

/// A page request stamped with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: Generation,
    pub request: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
    Error,
}

impl ListStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, ListStatus::LoadingInitial | ListStatus::LoadingMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListController {
    routing: QueryRouting,
    scope: Scope,
    started: bool,
    generation: Generation,
    in_flight: Option<u32>,
    posts: Vec<Post>,
    cursor: u32,
    more: bool,
    status: ListStatus,
    last_error: Option<String>,
}

impl ListController {
    pub fn new(routing: QueryRouting) -> Self {
        Self {
            routing,
            scope: Scope::default(),
            started: false,
            generation: 0,
            in_flight: None,
            posts: Vec::new(),
            cursor: 0,
            more: true,
            status: ListStatus::Idle,
            last_error: None,
        }
    }

    pub fn routing(&self) -> QueryRouting {
        self.routing
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Last successfully fetched page, 0 before the first success.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.more
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Starts a fresh session for `scope` and requests its first page.
    pub fn reset(&mut self, scope: Scope) -> FetchTicket {
        self.generation += 1;
        self.scope = scope;
        self.started = true;
        self.posts.clear();
        self.cursor = 0;
        self.more = true;
        self.last_error = None;
        self.status = ListStatus::LoadingInitial;
        feed_info!(
            "list reset generation={} tag={:?} query={:?}",
            self.generation,
            self.scope.tag,
            self.scope.query
        );
        self.fetch_page(1)
    }

    /// Resets only when `scope` differs from the current one (or nothing
    /// was loaded yet).
    pub fn ensure_scope(&mut self, scope: Scope) -> Option<FetchTicket> {
        if self.started && self.scope == scope {
            return None;
        }
        Some(self.reset(scope))
    }

    /// Requests the next page unless a fetch is in flight or the last page
    /// was short. After an error this doubles as the retry action.
    /// Does nothing until the first `reset`.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.started || self.status.is_loading() || !self.more {
            return None;
        }
        self.status = if self.cursor == 0 {
            ListStatus::LoadingInitial
        } else {
            ListStatus::LoadingMore
        };
        Some(self.fetch_page(self.cursor + 1))
    }

    fn fetch_page(&mut self, page: u32) -> FetchTicket {
        self.in_flight = Some(page);
        let query = match self.routing {
            QueryRouting::Client => None,
            QueryRouting::Server => self.scope.query.clone(),
        };
        FetchTicket {
            generation: self.generation,
            request: PageRequest {
                page,
                tag: self.scope.tag.clone(),
                query,
            },
        }
    }

    /// Applies a page result. Results from another generation, or for a
    /// page that is not in flight, are dropped without touching state.
    pub fn apply(
        &mut self,
        generation: Generation,
        page: u32,
        result: Result<Vec<Post>, FeedError>,
    ) -> PageOutcome {
        if generation != self.generation || self.in_flight != Some(page) {
            feed_debug!(
                "dropping stale page={} generation={} (current generation={} in_flight={:?})",
                page,
                generation,
                self.generation,
                self.in_flight
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(posts) => {
                let received = posts.len();
                if page == 1 {
                    self.posts = posts;
                } else {
                    self.posts.extend(posts);
                }
                self.cursor = page;
                self.more = received == PAGE_SIZE;
                self.status = ListStatus::Idle;
                self.last_error = None;
                feed_info!(
                    "page applied generation={} page={} received={} total={} more={}",
                    generation,
                    page,
                    received,
                    self.posts.len(),
                    self.more
                );
                PageOutcome::Applied
            }
            Err(err) => {
                feed_warn!(
                    "page failed generation={} page={}: {}",
                    generation,
                    page,
                    err
                );
                self.status = ListStatus::Error;
                self.last_error = Some(err.to_string());
                PageOutcome::Failed
            }
        }
    }

    /// Drops the session when the owning view goes away. The generation keeps
    /// counting so results still in flight are recognised as stale.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.scope = Scope::default();
        self.started = false;
        self.in_flight = None;
        self.posts.clear();
        self.cursor = 0;
        self.more = true;
        self.status = ListStatus::Idle;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            description: String::new(),
            tag_list: Vec::new(),
            published_at: String::new(),
            public_reactions_count: 0,
            comments_count: 0,
            reading_time_minutes: 0,
            url: String::new(),
            cover_image: None,
            user: Default::default(),
        }
    }

    fn page(start: u64, len: usize) -> Vec<Post> {
        (start..start + len as u64).map(post).collect()
    }

    #[test]
    fn server_routing_forwards_query() {
        let mut list = ListController::new(QueryRouting::Server);
        let ticket = list.reset(Scope::new(Some("rust".into()), Some("async".into())));
        assert_eq!(ticket.request.tag.as_deref(), Some("rust"));
        assert_eq!(ticket.request.query.as_deref(), Some("async"));
    }

    #[test]
    fn client_routing_keeps_query_local() {
        let mut list = ListController::new(QueryRouting::Client);
        let ticket = list.reset(Scope::for_query("async"));
        assert_eq!(ticket.request.page, 1);
        assert_eq!(ticket.request.query, None);
    }

    #[test]
    fn empty_strings_do_not_form_a_scope() {
        assert_eq!(Scope::new(Some(String::new()), Some(String::new())), Scope::default());
    }

    #[test]
    fn wrong_page_for_current_generation_is_stale() {
        let mut list = ListController::new(QueryRouting::Client);
        let ticket = list.reset(Scope::default());
        assert_eq!(
            list.apply(ticket.generation, 2, Ok(page(1, 12))),
            PageOutcome::Stale
        );
        assert_eq!(list.status(), ListStatus::LoadingInitial);
    }

    #[test]
    fn teardown_makes_in_flight_results_stale() {
        let mut list = ListController::new(QueryRouting::Server);
        let ticket = list.reset(Scope::for_tag("rust"));
        list.teardown();
        assert_eq!(
            list.apply(ticket.generation, 1, Ok(page(1, 3))),
            PageOutcome::Stale
        );
        assert!(list.posts().is_empty());
        assert!(!list.is_started());
    }

    #[test]
    fn load_more_before_reset_requests_nothing() {
        let mut list = ListController::new(QueryRouting::Client);
        assert_eq!(list.load_more(), None);
        assert!(!list.is_started());
        assert_eq!(list.status(), ListStatus::Idle);

        let ticket = list.reset(Scope::default());
        assert_eq!(ticket.request.page, 1);
    }
}
