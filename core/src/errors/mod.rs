//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, DirectoryError, KeyError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("User directory failure: {message}")]
    Directory { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

impl DomainError {
    /// Whether the caller caused the failure (as opposed to this service or its collaborators)
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Auth(_) => true,
            DomainError::Token(token_error) => !matches!(token_error, TokenError::SigningFailed),
            DomainError::Config { .. } | DomainError::Directory { .. } | DomainError::Key(_) => {
                false
            }
        }
    }
}

/// Directory failures are classified by kind, never by message text.
impl From<DirectoryError> for DomainError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => DomainError::Auth(AuthError::UserNotFound),
            DirectoryError::Duplicate => DomainError::Auth(AuthError::UserAlreadyExists),
            DirectoryError::Unavailable { message }
            | DirectoryError::InvalidResponse { message } => DomainError::Directory { message },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
