use std::path::PathBuf;

/// Infrastructure error type shared by the storage collaborators
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed post file {path}: {message}")]
    MalformedPost { path: PathBuf, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl AppError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
