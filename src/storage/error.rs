use thiserror::Error;

/// Errors surfaced by the storage gateway and its backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Read or write attempted before `initialize` succeeded.
    #[error("storage is not initialized yet")]
    NotReady,

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Conditions that mean "nothing saved yet" rather than a real failure.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, StorageError::NotReady)
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
