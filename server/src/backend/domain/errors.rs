use thiserror::Error;

/// Failures surfaced by domain services
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No valid session
    #[error("Authentication required")]
    Unauthenticated,

    /// Session exists but the role does not allow the operation
    #[error("Unauthorized")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
