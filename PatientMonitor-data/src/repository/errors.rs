use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Storage capacity could not be reclaimed
    #[error("Capacity error: {0}")]
    Capacity(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}
