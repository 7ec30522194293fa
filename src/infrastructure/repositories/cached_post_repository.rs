use super::PostRepository;
use crate::domain::post::Post;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Caches whole-blog loads of another repository.
///
/// Entries expire after `ttl`; writers must call [`invalidate`](Self::invalidate)
/// after changing a blog's posts. Lookups by id always go to the inner repository.
pub struct CachedPostRepository {
    inner: Arc<dyn PostRepository>,
    cache: Cache<String, Arc<Vec<Post>>>,
}

impl CachedPostRepository {
    pub fn new(inner: Arc<dyn PostRepository>, ttl: Duration, max_blogs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_blogs)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    pub async fn invalidate(&self, blog_id: &str) {
        tracing::info!(blog_id = %blog_id, "Invalidating cached posts");
        self.cache.invalidate(blog_id).await;
    }
}

#[async_trait]
impl PostRepository for CachedPostRepository {
    async fn find_all(&self, blog_id: &str, cancel: &CancellationToken) -> AppResult<Vec<Post>> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        if let Some(cached) = self.cache.get(blog_id).await {
            tracing::info!(
                blog_id = %blog_id,
                cached_post_count = cached.len(),
                "Post cache hit"
            );
            return Ok(cached.as_ref().clone());
        }

        let posts = self.inner.find_all(blog_id, cancel).await?;
        tracing::info!(
            blog_id = %blog_id,
            post_count = posts.len(),
            "Post cache miss - loaded from storage"
        );

        self.cache
            .insert(blog_id.to_string(), Arc::new(posts.clone()))
            .await;

        Ok(posts)
    }

    async fn find_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Post>> {
        self.inner.find_by_id(blog_id, post_id, cancel).await
    }
}
