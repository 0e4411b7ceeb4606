use devfeed_core::{derive_view, matches_query, Post, SortKey};
use pretty_assertions::assert_eq;

fn post(id: u64, reactions: u64, comments: u64, published_at: &str) -> Post {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Post {id}"),
        "description": "",
        "tag_list": [],
        "published_at": published_at,
        "public_reactions_count": reactions,
        "comments_count": comments,
    }))
    .expect("post json")
}

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}

#[test]
fn popular_orders_by_reactions_and_keeps_ties_stable() {
    let reactions = [5, 2, 9, 2, 7, 5, 0, 9, 1, 3, 5, 4];
    let posts: Vec<Post> = reactions
        .iter()
        .enumerate()
        .map(|(idx, &r)| post(idx as u64 + 1, r, 0, "2024-01-01T00:00:00Z"))
        .collect();

    let view = derive_view(&posts, None, Some(SortKey::Popular));
    assert_eq!(ids(&view), vec![3, 8, 5, 1, 6, 11, 12, 10, 2, 4, 9, 7]);
}

#[test]
fn relevant_orders_by_comments() {
    let posts = vec![
        post(1, 0, 1, ""),
        post(2, 0, 10, ""),
        post(3, 0, 4, ""),
    ];
    let view = derive_view(&posts, None, Some(SortKey::Relevant));
    assert_eq!(ids(&view), vec![2, 3, 1]);
}

#[test]
fn latest_orders_newest_first_with_unparseable_last() {
    let posts = vec![
        post(1, 0, 0, "2023-05-01T00:00:00Z"),
        post(2, 0, 0, "not a date"),
        post(3, 0, 0, "2024-02-10T08:00:00+02:00"),
        post(4, 0, 0, "2024-02-10T06:00:00Z"),
    ];
    let view = derive_view(&posts, None, Some(SortKey::Latest));
    // 3 and 4 are the same instant; stable order keeps 3 first.
    assert_eq!(ids(&view), vec![3, 4, 1, 2]);
}

#[test]
fn no_sort_keeps_source_order() {
    let posts = vec![post(9, 1, 0, ""), post(3, 50, 0, ""), post(5, 7, 0, "")];
    let view = derive_view(&posts, None, None);
    assert_eq!(ids(&view), vec![9, 3, 5]);
}

#[test]
fn query_matches_title_description_or_tag_case_insensitively() {
    let mut by_title = post(1, 0, 0, "");
    by_title.title = "Learning RUST the hard way".into();
    let mut by_description = post(2, 0, 0, "");
    by_description.description = "A rusty old bike".into();
    let mut by_tag = post(3, 0, 0, "");
    by_tag.tag_list = vec!["Rustlang".into()];
    let unrelated = post(4, 0, 0, "");

    let posts = vec![by_title, by_description, by_tag, unrelated];
    let view = derive_view(&posts, Some("rust"), None);
    assert_eq!(ids(&view), vec![1, 2, 3]);
}

#[test]
fn blank_query_matches_everything() {
    let p = post(1, 0, 0, "");
    assert!(matches_query(&p, ""));
    assert!(matches_query(&p, "   "));
}

#[test]
fn filter_runs_before_sort() {
    let mut a = post(1, 3, 0, "");
    a.title = "tokio internals".into();
    let mut b = post(2, 8, 0, "");
    b.title = "async rust".into();
    let mut c = post(3, 5, 0, "");
    c.title = "tokio tracing".into();

    let view = derive_view(&[a, b, c], Some("TOKIO"), Some(SortKey::Popular));
    assert_eq!(ids(&view), vec![3, 1]);
}
