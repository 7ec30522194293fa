use super::PostRepository;
use crate::domain::post::Post;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Keeps posts in memory, grouped by blog. Insertion order is preserved.
#[derive(Default)]
pub struct InMemoryPostRepository {
    blogs: RwLock<HashMap<String, Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut blogs: HashMap<String, Vec<Post>> = HashMap::new();
        for post in posts {
            blogs.entry(post.blog_id.clone()).or_default().push(post);
        }
        Self {
            blogs: RwLock::new(blogs),
        }
    }

    /// Adds the post, replacing any existing post with the same id in its blog
    pub async fn upsert(&self, post: Post) {
        let mut blogs = self.blogs.write().await;
        let posts = blogs.entry(post.blog_id.clone()).or_default();
        match posts.iter().position(|p| p.id == post.id) {
            Some(index) => posts[index] = post,
            None => posts.push(post),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self, blog_id: &str, cancel: &CancellationToken) -> AppResult<Vec<Post>> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        let blogs = self.blogs.read().await;
        Ok(blogs.get(blog_id).cloned().unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Post>> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        let blogs = self.blogs.read().await;
        Ok(blogs
            .get(blog_id)
            .and_then(|posts| posts.iter().find(|p| p.id == post_id))
            .cloned())
    }
}
