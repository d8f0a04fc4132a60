use thiserror::Error;

/// Domain-level failures shared by all services.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Admin access required")]
    Forbidden,
}
