use post_query::domain::post::{PostQueryApi, PostQueryService};
use post_query::infrastructure::config::{Config, LogFormat};
use post_query::infrastructure::repositories::{
    CachedPostRepository, FilePostRepository, PostRepository,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        posts_root = %config.posts_root.display(),
        blog_id = %config.blog_id,
        filter_policy = ?config.filter_policy,
        "Starting post query report"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Storage collaborator, optionally behind the cache
    let file_repo: Arc<dyn PostRepository> =
        Arc::new(FilePostRepository::new(config.posts_root.clone()));
    let post_repo: Arc<dyn PostRepository> = if config.post_cache_enabled {
        tracing::info!(
            ttl_secs = config.post_cache_ttl_secs,
            max_blogs = config.post_cache_max_blogs,
            "Post cache enabled"
        );
        Arc::new(CachedPostRepository::new(
            file_repo,
            config.post_cache_ttl(),
            config.post_cache_max_blogs,
        ))
    } else {
        file_repo
    };

    // 2. Query service
    let service = PostQueryService::new(post_repo, config.filter_policy);

    // Ctrl-C cancels whatever query is in flight
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling queries");
            ctrl_c_cancel.cancel();
        }
    });

    let blog_id = config.blog_id.as_str();
    let include_unpublished = config.is_development();

    let total = service.count(blog_id, None, include_unpublished, &cancel).await?;
    tracing::info!(total, include_unpublished, "Visible posts");

    for post in service
        .recent(blog_id, config.recent_posts, &cancel)
        .await?
    {
        tracing::info!(
            slug = %post.slug,
            title = %post.title,
            pub_date = %post.pub_date,
            "Recent post"
        );
    }

    for (category, count) in service
        .category_frequency(blog_id, include_unpublished, &cancel)
        .await?
    {
        tracing::info!(category = %category, count, "Category");
    }

    for (month, count) in service
        .archive_frequency(blog_id, include_unpublished, &cancel)
        .await?
    {
        tracing::info!(month = %month, count, "Archive");
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "post_query=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "post_query=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
