use feed_logging::{feed_debug, feed_warn};

use crate::{
    AppState, ArticleState, ArticleStatus, Effect, FeedId, ListStatus, Msg, PageOutcome, Route,
    Scope, TagDirectory, ThemeContext,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(route) => navigate(&mut state, route),
        Msg::SearchInput { text, now_ms } => {
            match state.route {
                Route::Home if state.mounted => {
                    state.home.search_text = text.clone();
                    state.home.gate.push(text, now_ms);
                    state.mark_dirty();
                }
                Route::Tags if state.mounted => {
                    state.tags.filter = text;
                    state.mark_dirty();
                }
                _ => {}
            }
            Vec::new()
        }
        Msg::Tick { now_ms } => settle_query(&mut state, now_ms),
        Msg::SortSelected(key) => {
            if let Some(feed) = state.active_feed() {
                let feed = state.feed_mut(feed);
                if feed.sort != Some(key) {
                    feed.sort = Some(key);
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::LoadMoreClicked => load_more(&mut state),
        Msg::RetryClicked => retry(&mut state),
        Msg::PageLoaded {
            feed,
            generation,
            page,
            result,
        } => {
            let outcome = state.feed_mut(feed).list.apply(generation, page, result);
            if outcome != PageOutcome::Stale {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TagsLoaded(result) => {
            if state.route == Route::Tags && state.tags.loading {
                state.tags.loading = false;
                match result {
                    Ok(tags) => {
                        state.tags.tags = tags;
                        state.tags.error = None;
                    }
                    Err(err) => {
                        feed_warn!("tag list failed: {}", err);
                        state.tags.tags.clear();
                        state.tags.error = Some(err.to_string());
                    }
                }
                state.mark_dirty();
            } else {
                feed_debug!("dropping tag list for an inactive view");
            }
            Vec::new()
        }
        Msg::ArticleLoaded { id, result } => {
            match state.article.as_mut() {
                Some(article) if article.id == id && article.status == ArticleStatus::Loading => {
                    article.status = match result {
                        Ok(rendered) => ArticleStatus::Ready(Box::new(rendered)),
                        Err(err) => {
                            feed_warn!("article {} failed: {}", id, err);
                            ArticleStatus::Failed(err.to_string())
                        }
                    };
                    state.mark_dirty();
                }
                _ => feed_debug!("dropping article {} for an inactive view", id),
            }
            Vec::new()
        }
        Msg::ThemeSelected(theme) => {
            if state.theme.current_id() == theme {
                Vec::new()
            } else {
                state.theme.set_theme(theme);
                state.mark_dirty();
                vec![Effect::PersistTheme { theme }]
            }
        }
        Msg::ThemeRestored(persisted) => {
            state.theme = ThemeContext::init(persisted.as_deref());
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, route: Route) -> Vec<Effect> {
    if state.mounted && state.route == route {
        return Vec::new();
    }

    let mut effects = Vec::new();
    if state.mounted {
        unmount_current(state, &mut effects);
    }
    feed_debug!("navigate {:?} -> {:?}", state.route, route);
    state.route = route.clone();
    state.mounted = true;
    state.mark_dirty();

    match route {
        Route::Home => {
            if let Some(ticket) = state.home.mount(Scope::default()) {
                effects.push(Effect::FetchPage {
                    feed: FeedId::Home,
                    ticket,
                });
            }
        }
        Route::Tag(slug) => {
            if let Some(ticket) = state.tag_feed.mount(Scope::for_tag(slug)) {
                effects.push(Effect::FetchPage {
                    feed: FeedId::Tag,
                    ticket,
                });
            }
        }
        Route::Tags => {
            state.tags.loading = true;
            effects.push(Effect::FetchTags);
        }
        Route::Article(id) => {
            state.article = Some(ArticleState {
                id,
                status: ArticleStatus::Loading,
            });
            effects.push(Effect::FetchArticle { id });
        }
    }
    effects
}

fn unmount_current(state: &mut AppState, effects: &mut Vec<Effect>) {
    match state.route {
        Route::Home | Route::Tag(_) => {
            let feed = if state.route == Route::Home {
                FeedId::Home
            } else {
                FeedId::Tag
            };
            let feed_state = state.feed_mut(feed);
            if feed_state.list.status().is_loading() {
                effects.push(Effect::CancelFetches { feed });
            }
            feed_state.unmount();
        }
        Route::Tags => state.tags = TagDirectory::default(),
        Route::Article(_) => state.article = None,
    }
}

fn settle_query(state: &mut AppState, now_ms: u64) -> Vec<Effect> {
    if !(state.mounted && state.route == Route::Home) {
        return Vec::new();
    }
    let Some(query) = state.home.gate.poll(now_ms) else {
        return Vec::new();
    };

    state.home.settled_query = query.clone();
    state.mark_dirty();

    let was_loading = state.home.list.status().is_loading();
    match state.home.mount(Scope::for_query(query)) {
        Some(ticket) => {
            let mut effects = Vec::with_capacity(2);
            if was_loading {
                effects.push(Effect::CancelFetches { feed: FeedId::Home });
            }
            effects.push(Effect::FetchPage {
                feed: FeedId::Home,
                ticket,
            });
            effects
        }
        None => Vec::new(),
    }
}

fn load_more(state: &mut AppState) -> Vec<Effect> {
    let Some(feed) = state.active_feed() else {
        return Vec::new();
    };
    match state.feed_mut(feed).list.load_more() {
        Some(ticket) => {
            state.mark_dirty();
            vec![Effect::FetchPage { feed, ticket }]
        }
        None => Vec::new(),
    }
}

fn retry(state: &mut AppState) -> Vec<Effect> {
    match state.route {
        Route::Home | Route::Tag(_) => {
            let failed = state
                .active_feed()
                .map(|feed| state.feed_mut(feed).list.status() == ListStatus::Error)
                .unwrap_or(false);
            if failed {
                load_more(state)
            } else {
                Vec::new()
            }
        }
        Route::Tags => {
            if state.tags.loading || state.tags.error.is_none() {
                return Vec::new();
            }
            state.tags.loading = true;
            state.tags.error = None;
            state.mark_dirty();
            vec![Effect::FetchTags]
        }
        Route::Article(id) => match state.article.as_mut() {
            Some(article) if matches!(article.status, ArticleStatus::Failed(_)) => {
                article.status = ArticleStatus::Loading;
                state.mark_dirty();
                vec![Effect::FetchArticle { id }]
            }
            _ => Vec::new(),
        },
    }
}
