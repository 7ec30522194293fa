use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PostQueryError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("operation cancelled")]
    Cancelled,
}

impl From<AppError> for PostQueryError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Cancelled => PostQueryError::Cancelled,
            _ => PostQueryError::StorageUnavailable(err.to_string()),
        }
    }
}
