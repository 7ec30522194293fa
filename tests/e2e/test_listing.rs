use crate::e2e::helpers;

use helpers::fixtures::{date, draft, published, scheduled, slugs, BLOG_ID};
use helpers::TestContext;
use post_query::domain::post::PostQueryApi;
use pretty_assertions::assert_eq;
use test_context::test_context;
use tokio_util::sync::CancellationToken;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_load_every_post_unfiltered(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("live", date(2024, 1, 1)),
            draft("draft", date(2024, 1, 2)),
            scheduled("scheduled"),
        ])
        .await
        .unwrap();

    let posts = ctx
        .service()
        .load_all(BLOG_ID, &CancellationToken::new())
        .await
        .unwrap();

    let mut loaded = slugs(&posts);
    loaded.sort();
    assert_eq!(loaded, vec!["draft", "live", "scheduled"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_for_an_unknown_blog(ctx: &TestContext) {
    let service = ctx.service();
    let cancel = CancellationToken::new();

    assert!(service.load_all("nobody", &cancel).await.unwrap().is_empty());
    assert!(service.list("nobody", true, &cancel).await.unwrap().is_empty());
    assert_eq!(service.count("nobody", None, true, &cancel).await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_everything_newest_first_when_including_unpublished(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("middle", date(2024, 2, 1)),
            draft("oldest", date(2024, 1, 1)),
            scheduled("future"),
            published("newest", date(2024, 3, 1)),
        ])
        .await
        .unwrap();

    let posts = ctx
        .service()
        .list(BLOG_ID, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(slugs(&posts), vec!["future", "newest", "middle", "oldest"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_hide_drafts_and_scheduled_posts(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("live-1", date(2024, 1, 1)),
            published("live-2", date(2024, 5, 1)),
            draft("draft", date(2024, 2, 1)),
            scheduled("scheduled"),
        ])
        .await
        .unwrap();

    let posts = ctx
        .service()
        .list(BLOG_ID, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(slugs(&posts), vec!["live-2", "live-1"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_visible_posts_with_optional_category(ctx: &TestContext) {
    use helpers::fixtures::in_categories;

    ctx.fixtures
        .save_all(&[
            in_categories(published("a", date(2024, 1, 1)), &["Rust"]),
            in_categories(published("b", date(2024, 1, 2)), &["rust ", "Web"]),
            in_categories(draft("c", date(2024, 1, 3)), &["Rust"]),
            published("d", date(2024, 1, 4)),
        ])
        .await
        .unwrap();

    let service = ctx.service();
    let cancel = CancellationToken::new();

    assert_eq!(service.count(BLOG_ID, None, false, &cancel).await.unwrap(), 3);
    assert_eq!(service.count(BLOG_ID, None, true, &cancel).await.unwrap(), 4);
    assert_eq!(service.count(BLOG_ID, Some("RUST"), false, &cancel).await.unwrap(), 2);
    assert_eq!(service.count(BLOG_ID, Some("rust"), true, &cancel).await.unwrap(), 3);
    assert_eq!(service.count(BLOG_ID, Some(""), false, &cancel).await.unwrap(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_most_recent_live_posts(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("jan", date(2024, 1, 1)),
            published("feb", date(2024, 2, 1)),
            published("mar", date(2024, 3, 1)),
            draft("apr-draft", date(2024, 4, 1)),
            scheduled("next-year"),
        ])
        .await
        .unwrap();

    let service = ctx.service();
    let cancel = CancellationToken::new();

    let recent = service.recent(BLOG_ID, 2, &cancel).await.unwrap();
    assert_eq!(slugs(&recent), vec!["mar", "feb"]);

    let all = service.recent(BLOG_ID, 50, &cancel).await.unwrap();
    assert_eq!(slugs(&all), vec!["mar", "feb", "jan"]);

    assert!(service.recent(BLOG_ID, 0, &cancel).await.unwrap().is_empty());
    assert!(service.recent(BLOG_ID, -1, &cancel).await.unwrap().is_empty());
}
