use super::error::PostQueryError;
use super::model::{DateWindow, FilterPolicy, PageRequest, PagedResult, Post, PostResult};
use super::query;
use crate::infrastructure::repositories::PostRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct PostQueryService {
    post_repo: Arc<dyn PostRepository>,
    policy: FilterPolicy,
}

impl PostQueryService {
    pub fn new(post_repo: Arc<dyn PostRepository>, policy: FilterPolicy) -> Self {
        Self { post_repo, policy }
    }
}

/// Read-only queries over every post of a blog.
///
/// Each call loads the blog's full post collection from the repository and
/// filters, sorts and pages it in memory. Nothing is kept between calls.
#[async_trait]
pub trait PostQueryApi: Send + Sync {
    /// Every post of the blog, unfiltered and in storage order
    async fn load_all(
        &self,
        blog_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError>;

    /// Visible posts, newest first
    async fn list(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError>;

    /// One page of posts, optionally restricted to a category
    async fn list_page(
        &self,
        blog_id: &str,
        category: Option<&str>,
        include_unpublished: bool,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<PagedResult, PostQueryError>;

    async fn count(
        &self,
        blog_id: &str,
        category: Option<&str>,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<usize, PostQueryError>;

    /// The newest live posts. Drafts and scheduled posts are never included.
    async fn recent(
        &self,
        blog_id: &str,
        number_to_get: i32,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError>;

    async fn list_by_date(
        &self,
        blog_id: &str,
        window: DateWindow,
        include_unpublished: bool,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<PagedResult, PostQueryError>;

    async fn count_by_date(
        &self,
        blog_id: &str,
        window: DateWindow,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<usize, PostQueryError>;

    /// Direct lookup through the repository, without loading the whole blog
    async fn get_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Post>, PostQueryError>;

    /// Exact (case-sensitive) slug match plus its published neighbours
    async fn get_by_slug(
        &self,
        blog_id: &str,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<PostResult, PostQueryError>;

    /// True when no post uses the slug, compared case-insensitively
    async fn slug_is_available(
        &self,
        blog_id: &str,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, PostQueryError>;

    async fn category_frequency(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, usize>, PostQueryError>;

    /// Post counts keyed by `YYYY/MM`
    async fn archive_frequency(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, usize>, PostQueryError>;
}

#[async_trait]
impl PostQueryApi for PostQueryService {
    async fn load_all(
        &self,
        blog_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError> {
        if cancel.is_cancelled() {
            return Err(PostQueryError::Cancelled);
        }

        let posts = self
            .post_repo
            .find_all(blog_id, cancel)
            .await
            .map_err(|e| {
                if !e.is_cancelled() {
                    tracing::error!(blog_id = %blog_id, error = %e, "Failed to load posts");
                }
                PostQueryError::from(e)
            })?;

        tracing::debug!(blog_id = %blog_id, post_count = posts.len(), "Posts loaded");
        Ok(posts)
    }

    async fn list(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;

        let mut visible = query::filter_visible(posts, include_unpublished, now);
        query::sort_recent_first(&mut visible);
        Ok(visible)
    }

    async fn list_page(
        &self,
        blog_id: &str,
        category: Option<&str>,
        include_unpublished: bool,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<PagedResult, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;

        let mut matching: Vec<Post> = match non_blank(category) {
            Some(category) => posts
                .into_iter()
                .filter(|p| p.is_visible(include_unpublished, now) && p.has_category(category))
                .collect(),
            None if self.policy == FilterPolicy::Legacy => posts,
            None => query::filter_visible(posts, include_unpublished, now),
        };
        query::sort_recent_first(&mut matching);

        let total_items = matching.len();
        let data = query::paginate(matching, page);

        tracing::debug!(
            blog_id = %blog_id,
            category = ?category,
            page_number = page.page_number,
            page_size = page.page_size,
            total_items,
            returned = data.len(),
            "Listed post page"
        );

        Ok(PagedResult { data, total_items })
    }

    async fn count(
        &self,
        blog_id: &str,
        category: Option<&str>,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<usize, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;
        let category = non_blank(category);

        Ok(posts
            .iter()
            .filter(|p| p.is_visible(include_unpublished, now))
            .filter(|p| category.map_or(true, |c| p.has_category(c)))
            .count())
    }

    async fn recent(
        &self,
        blog_id: &str,
        number_to_get: i32,
        cancel: &CancellationToken,
    ) -> Result<Vec<Post>, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;
        if number_to_get <= 0 {
            return Ok(Vec::new());
        }

        let mut live = query::filter_visible(posts, false, now);
        query::sort_recent_first(&mut live);
        live.truncate(number_to_get as usize);
        Ok(live)
    }

    async fn list_by_date(
        &self,
        blog_id: &str,
        window: DateWindow,
        include_unpublished: bool,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<PagedResult, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;
        let blog_total = posts.len();

        let mut matching = self.window_filter(posts, window, include_unpublished, now);
        query::sort_recent_first(&mut matching);

        let total_items = match self.policy {
            FilterPolicy::Legacy => blog_total,
            FilterPolicy::Uniform => matching.len(),
        };
        let data = query::paginate(matching, page);

        tracing::debug!(
            blog_id = %blog_id,
            window = %window,
            total_items,
            returned = data.len(),
            "Listed posts by date"
        );

        Ok(PagedResult { data, total_items })
    }

    async fn count_by_date(
        &self,
        blog_id: &str,
        window: DateWindow,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<usize, PostQueryError> {
        let now = Utc::now();
        let posts = self.load_all(blog_id, cancel).await?;
        Ok(self
            .window_filter(posts, window, include_unpublished, now)
            .len())
    }

    async fn get_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Post>, PostQueryError> {
        if cancel.is_cancelled() {
            return Err(PostQueryError::Cancelled);
        }

        let post = self
            .post_repo
            .find_by_id(blog_id, post_id, cancel)
            .await
            .map_err(|e| {
                if !e.is_cancelled() {
                    tracing::error!(
                        blog_id = %blog_id,
                        post_id = %post_id,
                        error = %e,
                        "Failed to fetch post"
                    );
                }
                PostQueryError::from(e)
            })?;

        tracing::debug!(blog_id = %blog_id, post_id = %post_id, found = post.is_some(), "Post fetched");
        Ok(post)
    }

    async fn get_by_slug(
        &self,
        blog_id: &str,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<PostResult, PostQueryError> {
        let posts = self.load_all(blog_id, cancel).await?;

        let Some(target) = posts.iter().find(|p| p.slug == slug).cloned() else {
            tracing::debug!(blog_id = %blog_id, slug = %slug, "No post with slug");
            return Ok(PostResult::default());
        };

        let (previous_post, next_post) = query::neighbours(&posts, target.pub_date);

        Ok(PostResult {
            post: Some(target),
            previous_post,
            next_post,
        })
    }

    async fn slug_is_available(
        &self,
        blog_id: &str,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, PostQueryError> {
        let posts = self.load_all(blog_id, cancel).await?;
        let wanted = slug.to_lowercase();

        Ok(!posts.iter().any(|p| p.slug.to_lowercase() == wanted))
    }

    async fn category_frequency(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, usize>, PostQueryError> {
        let visible = self.list(blog_id, include_unpublished, cancel).await?;
        Ok(query::category_frequency(&visible))
    }

    async fn archive_frequency(
        &self,
        blog_id: &str,
        include_unpublished: bool,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, usize>, PostQueryError> {
        let visible = self.list(blog_id, include_unpublished, cancel).await?;
        Ok(query::archive_frequency(&visible))
    }
}

impl PostQueryService {
    fn window_filter(
        &self,
        posts: Vec<Post>,
        window: DateWindow,
        include_unpublished: bool,
        now: chrono::DateTime<Utc>,
    ) -> Vec<Post> {
        let skip_visibility = self.policy == FilterPolicy::Legacy && window.is_year_only();

        posts
            .into_iter()
            .filter(|p| window.contains(p.pub_date))
            .filter(|p| skip_visibility || p.is_visible(include_unpublished, now))
            .collect()
    }
}

fn non_blank(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.trim().is_empty())
}
