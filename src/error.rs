use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("GitHub API call error: {0}")]
    ApiCallError(String),

    /// Anything that reaches the HTTP boundary without a dedicated mapping.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failure of the outbound HTTP seam, before any status is inspected.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
