use crate::e2e::helpers;

use helpers::fixtures::{date, draft, in_categories, published, scheduled, slugs, BLOG_ID};
use helpers::TestContext;
use post_query::domain::post::{FilterPolicy, PageRequest, PostQueryApi};
use pretty_assertions::assert_eq;
use test_context::test_context;
use tokio_util::sync::CancellationToken;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_second_page_of_five(ctx: &TestContext) {
    ctx.fixtures.create_daily_posts().await.unwrap();

    let page = ctx
        .service()
        .list_page(BLOG_ID, None, false, PageRequest::new(2, 5), &CancellationToken::new())
        .await
        .unwrap();

    // newest first: post-12 .. post-01, so ranks 6-10 are post-07 .. post-03
    assert_eq!(
        slugs(&page.data),
        vec!["post-07", "post-06", "post-05", "post-04", "post-03"]
    );
    assert_eq!(page.total_items, 12);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_everything_when_page_size_is_not_positive(ctx: &TestContext) {
    ctx.fixtures.create_daily_posts().await.unwrap();
    let service = ctx.service();
    let cancel = CancellationToken::new();

    for page_size in [0, -1] {
        let page = service
            .list_page(BLOG_ID, None, false, PageRequest::new(3, page_size), &cancel)
            .await
            .unwrap();
        assert_eq!(page.data.len(), 12);
        assert_eq!(page.total_items, page.data.len());
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_an_empty_page_past_the_end(ctx: &TestContext) {
    ctx.fixtures.create_daily_posts().await.unwrap();

    let page = ctx
        .service()
        .list_page(BLOG_ID, None, false, PageRequest::new(4, 5), &CancellationToken::new())
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.total_items, 12);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_page_numbers_below_one_as_the_first_page(ctx: &TestContext) {
    ctx.fixtures.create_daily_posts().await.unwrap();

    let page = ctx
        .service()
        .list_page(BLOG_ID, None, false, PageRequest::new(0, 3), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(slugs(&page.data), vec!["post-12", "post-11", "post-10"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_a_page_by_category_ignoring_case(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            in_categories(published("rust-1", date(2024, 1, 1)), &["Rust"]),
            in_categories(published("rust-2", date(2024, 1, 2)), &[" RUST "]),
            in_categories(published("web", date(2024, 1, 3)), &["Web"]),
            in_categories(draft("rust-draft", date(2024, 1, 4)), &["rust"]),
        ])
        .await
        .unwrap();

    let service = ctx.service();
    let cancel = CancellationToken::new();

    let page = service
        .list_page(BLOG_ID, Some("rust"), false, PageRequest::new(1, 10), &cancel)
        .await
        .unwrap();
    assert_eq!(slugs(&page.data), vec!["rust-2", "rust-1"]);
    assert_eq!(page.total_items, 2);

    let with_drafts = service
        .list_page(BLOG_ID, Some("Rust"), true, PageRequest::new(1, 1), &cancel)
        .await
        .unwrap();
    assert_eq!(slugs(&with_drafts.data), vec!["rust-draft"]);
    assert_eq!(with_drafts.total_items, 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_visibility_without_category_under_uniform_policy(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("live", date(2024, 1, 1)),
            draft("draft", date(2024, 1, 2)),
            scheduled("scheduled"),
        ])
        .await
        .unwrap();

    let page = ctx
        .service_with(FilterPolicy::Uniform)
        .list_page(BLOG_ID, None, false, PageRequest::new(1, 10), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(slugs(&page.data), vec!["live"]);
    assert_eq!(page.total_items, 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_visibility_without_category_under_legacy_policy(ctx: &TestContext) {
    ctx.fixtures
        .save_all(&[
            published("live", date(2024, 1, 1)),
            draft("draft", date(2024, 1, 2)),
            scheduled("scheduled"),
        ])
        .await
        .unwrap();

    let service = ctx.service_with(FilterPolicy::Legacy);
    let cancel = CancellationToken::new();

    let page = service
        .list_page(BLOG_ID, None, false, PageRequest::new(1, 10), &cancel)
        .await
        .unwrap();
    assert_eq!(slugs(&page.data), vec!["scheduled", "draft", "live"]);
    assert_eq!(page.total_items, 3);

    // count keeps applying visibility under both policies
    assert_eq!(service.count(BLOG_ID, None, false, &cancel).await.unwrap(), 1);
}
