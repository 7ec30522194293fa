pub mod cached_post_repository;
pub mod file_post_repository;
pub mod in_memory_post_repository;
pub mod post_repository;

pub use cached_post_repository::CachedPostRepository;
pub use file_post_repository::FilePostRepository;
pub use in_memory_post_repository::InMemoryPostRepository;
pub use post_repository::PostRepository;
