use std::sync::Once;

use devfeed_core::{
    FeedError, ListController, ListStatus, PageOutcome, Post, QueryRouting, Scope, PAGE_SIZE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn post(id: u64) -> Post {
    serde_json::from_value(serde_json::json!({ "id": id, "title": format!("post {id}") }))
        .expect("post json")
}

fn page(first_id: u64, len: usize) -> Vec<Post> {
    (first_id..first_id + len as u64).map(post).collect()
}

fn ids(list: &ListController) -> Vec<u64> {
    list.posts().iter().map(|p| p.id).collect()
}

#[test]
fn reset_starts_loading_first_page() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let ticket = list.reset(Scope::default());

    assert_eq!(ticket.request.page, 1);
    assert_eq!(ticket.generation, list.generation());
    assert_eq!(list.status(), ListStatus::LoadingInitial);
    assert_eq!(list.cursor(), 0);
    assert!(list.has_more());
    assert!(list.posts().is_empty());
}

#[test]
fn pages_accumulate_in_fetch_order() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let first = list.reset(Scope::default());
    assert_eq!(
        list.apply(first.generation, 1, Ok(page(1, PAGE_SIZE))),
        PageOutcome::Applied
    );

    let second = list.load_more().expect("second page");
    assert_eq!(second.request.page, 2);
    assert_eq!(list.status(), ListStatus::LoadingMore);
    list.apply(second.generation, 2, Ok(page(100, PAGE_SIZE)));

    let third = list.load_more().expect("third page");
    list.apply(third.generation, 3, Ok(page(200, 5)));

    assert_eq!(list.posts().len(), PAGE_SIZE * 2 + 5);
    let expected: Vec<u64> = (1..13).chain(100..112).chain(200..205).collect();
    assert_eq!(ids(&list), expected);
    assert_eq!(list.cursor(), 3);
    assert_eq!(list.status(), ListStatus::Idle);
}

#[test]
fn more_tracks_whether_last_page_was_full() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let ticket = list.reset(Scope::default());
    list.apply(ticket.generation, 1, Ok(page(1, PAGE_SIZE)));
    assert!(list.has_more());

    let ticket = list.load_more().expect("page 2");
    list.apply(ticket.generation, 2, Ok(page(50, 11)));
    assert!(!list.has_more());
    assert_eq!(list.load_more(), None);
}

#[test]
fn full_final_page_costs_one_empty_fetch() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let ticket = list.reset(Scope::default());
    list.apply(ticket.generation, 1, Ok(page(1, PAGE_SIZE)));

    let ticket = list.load_more().expect("empty trailing page");
    assert_eq!(
        list.apply(ticket.generation, 2, Ok(Vec::new())),
        PageOutcome::Applied
    );
    assert!(!list.has_more());
    assert_eq!(list.status(), ListStatus::Idle);
    assert_eq!(list.cursor(), 2);
    assert_eq!(list.posts().len(), PAGE_SIZE);
}

#[test]
fn load_more_while_loading_is_a_noop() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    list.reset(Scope::default());
    let before = list.clone();
    assert_eq!(list.load_more(), None);
    assert_eq!(list, before);

    let generation = before.generation();
    list.apply(generation, 1, Ok(page(1, PAGE_SIZE)));
    list.load_more().expect("page 2");
    let before = list.clone();
    assert_eq!(list.load_more(), None);
    assert_eq!(list, before);
}

#[test]
fn failed_load_more_keeps_list_cursor_and_more() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let ticket = list.reset(Scope::default());
    list.apply(ticket.generation, 1, Ok(page(1, PAGE_SIZE)));

    let ticket = list.load_more().expect("page 2");
    let outcome = list.apply(
        ticket.generation,
        2,
        Err(FeedError::transport("connection reset")),
    );

    assert_eq!(outcome, PageOutcome::Failed);
    assert_eq!(list.status(), ListStatus::Error);
    assert_eq!(list.posts().len(), PAGE_SIZE);
    assert_eq!(list.cursor(), 1);
    assert!(list.has_more());
    assert!(list.last_error().unwrap().contains("connection reset"));

    // User retry asks for the same page again.
    let retry = list.load_more().expect("retry");
    assert_eq!(retry.request.page, 2);
}

#[test]
fn failed_first_page_retries_page_one() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Server);
    let ticket = list.reset(Scope::for_tag("rust"));
    list.apply(ticket.generation, 1, Err(FeedError::transport("503")));

    let retry = list.load_more().expect("retry");
    assert_eq!(retry.request.page, 1);
    assert_eq!(retry.request.tag.as_deref(), Some("rust"));
    assert_eq!(list.status(), ListStatus::LoadingInitial);
}

#[test]
fn stale_generation_is_ignored_after_reset() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let old = list.reset(Scope::for_query("rust"));
    let new = list.reset(Scope::for_query("go"));
    assert!(new.generation > old.generation);

    assert_eq!(
        list.apply(old.generation, 1, Ok(page(1, PAGE_SIZE))),
        PageOutcome::Stale
    );
    assert!(list.posts().is_empty());
    assert_eq!(list.status(), ListStatus::LoadingInitial);

    list.apply(new.generation, 1, Ok(page(40, 3)));
    assert_eq!(ids(&list), vec![40, 41, 42]);
}

#[test]
fn ensure_scope_only_resets_on_identity_change() {
    init_logging();
    let mut list = ListController::new(QueryRouting::Client);
    let ticket = list.ensure_scope(Scope::default()).expect("first mount");
    list.apply(ticket.generation, 1, Ok(page(1, 4)));

    assert_eq!(list.ensure_scope(Scope::default()), None);
    assert_eq!(list.posts().len(), 4);

    let ticket = list.ensure_scope(Scope::for_query("zig")).expect("new scope");
    assert_eq!(ticket.request.page, 1);
    assert!(list.posts().is_empty());
}
