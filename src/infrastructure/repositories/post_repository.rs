use crate::domain::post::Post;
use crate::error::AppResult;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Storage collaborator for blog posts.
/// Abstracts where posts live (files on disk, memory, a database, ...)
///
/// Implementations are responsible for:
/// - Returning an empty collection for an unknown or empty blog
/// - Failing with `AppError::Cancelled` once `cancel` fires, without partial results
/// - Any retry or timeout policy; callers never retry
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Load every post of a blog, unfiltered and in no particular order
    async fn find_all(&self, blog_id: &str, cancel: &CancellationToken) -> AppResult<Vec<Post>>;

    /// Fetch a single post by id, or `None` when the blog has no such post
    async fn find_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Post>>;
}
