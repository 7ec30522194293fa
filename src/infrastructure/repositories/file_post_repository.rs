use super::PostRepository;
use crate::domain::post::Post;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

const POSTS_DIR: &str = "posts";
const POST_EXTENSION: &str = "json";

/// Reads posts stored as one JSON document per file:
/// `<root>/<blog_id>/posts/<post_id>.json`
pub struct FilePostRepository {
    root: PathBuf,
}

impl FilePostRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn posts_dir(&self, blog_id: &str) -> AppResult<PathBuf> {
        validate_segment("blog id", blog_id)?;
        Ok(self.root.join(blog_id).join(POSTS_DIR))
    }

    async fn read_blog(&self, blog_id: &str) -> AppResult<Vec<Post>> {
        let dir = self.posts_dir(blog_id)?;

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(blog_id = %blog_id, dir = %dir.display(), "No posts directory for blog");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut posts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(POST_EXTENSION) {
                tracing::trace!(path = %path.display(), "Skipping non-post file");
                continue;
            }
            let post = read_post(&path).await?;
            check_identity(&path, &post, blog_id)?;
            posts.push(post);
        }

        Ok(posts)
    }

    async fn read_one(&self, blog_id: &str, post_id: &str) -> AppResult<Option<Post>> {
        validate_segment("post id", post_id)?;
        let path = self
            .posts_dir(blog_id)?
            .join(format!("{}.{}", post_id, POST_EXTENSION));

        match read_post(&path).await {
            Ok(post) => {
                check_identity(&path, &post, blog_id)?;
                Ok(Some(post))
            }
            Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl PostRepository for FilePostRepository {
    async fn find_all(&self, blog_id: &str, cancel: &CancellationToken) -> AppResult<Vec<Post>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AppError::Cancelled),
            posts = self.read_blog(blog_id) => posts,
        }
    }

    async fn find_by_id(
        &self,
        blog_id: &str,
        post_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Post>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AppError::Cancelled),
            post = self.read_one(blog_id, post_id) => post,
        }
    }
}

async fn read_post(path: &Path) -> AppResult<Post> {
    let raw = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&raw).map_err(|e| AppError::MalformedPost {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A post file must be named after its id and live under its own blog, so that
/// whole-blog loads and lookups by id agree on every post's identity
fn check_identity(path: &Path, post: &Post, blog_id: &str) -> AppResult<()> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

    let mismatch = if stem != post.id {
        Some(format!("post id {:?} does not match file name {:?}", post.id, stem))
    } else if post.blog_id != blog_id {
        Some(format!(
            "post blog id {:?} does not match blog {:?}",
            post.blog_id, blog_id
        ))
    } else {
        None
    };

    match mismatch {
        Some(message) => Err(AppError::MalformedPost {
            path: path.to_path_buf(),
            message,
        }),
        None => Ok(()),
    }
}

/// Ids become path segments, so they must not escape the store root
fn validate_segment(kind: &str, value: &str) -> AppResult<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\']);

    if invalid {
        return Err(AppError::Storage(format!("invalid {}: {:?}", kind, value)));
    }
    Ok(())
}
