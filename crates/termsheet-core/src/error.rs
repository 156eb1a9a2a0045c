use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Bad user input; the current step is redisplayed.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// A row vanished between load and commit.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The backing store failed or is unreachable.
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}
