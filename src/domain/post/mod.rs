pub mod error;
pub mod model;
pub mod query;
pub mod service;

pub use error::PostQueryError;
pub use model::{DateWindow, FilterPolicy, PageRequest, PagedResult, Post, PostResult};
pub use service::{PostQueryApi, PostQueryService};
