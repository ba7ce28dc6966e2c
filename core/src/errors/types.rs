//! Error types for identity resolution, token handling and key material

use thiserror::Error;

use crate::domain::entities::token::TokenUse;

/// Identity-related errors surfaced to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    /// Verification failed while a token was presented for a lifecycle operation
    #[error("Invalid token")]
    InvalidToken {
        #[source]
        source: Box<TokenError>,
    },

    #[error("Expected a {expected} token but got a {actual} token")]
    WrongPurpose { expected: TokenUse, actual: TokenUse },

    #[error("Token signing failed")]
    SigningFailed,
}

impl TokenError {
    /// Wraps a verification failure as [`TokenError::InvalidToken`]
    pub fn invalid(source: TokenError) -> Self {
        TokenError::InvalidToken {
            source: Box::new(source),
        }
    }

    /// The verification failure behind an `InvalidToken`
    pub fn cause(&self) -> Option<&TokenError> {
        match self {
            TokenError::InvalidToken { source } => Some(source),
            _ => None,
        }
    }
}

/// Key material errors, fatal at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// PEM block missing, of the wrong declared type, or not valid DER
    #[error("Invalid key format: {message}")]
    InvalidFormat { message: String },

    /// The public key is not an RSA key
    #[error("Unsupported key type: {message}")]
    UnsupportedKeyType { message: String },
}

/// Failures reported by a user directory implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("identity not found")]
    NotFound,

    #[error("identity already exists")]
    Duplicate,

    #[error("directory unavailable: {message}")]
    Unavailable { message: String },

    #[error("invalid directory response: {message}")]
    InvalidResponse { message: String },
}
