use thiserror::Error;

/// Errors surfaced by the recipe repository and its backing stores.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("recipe '{0}' does not exist")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("a blob store must be configured to store images")]
    StorageUnavailable,

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// True when the error means the target recipe does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
