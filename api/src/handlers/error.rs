//! Error taxonomy of the HTTP boundary
//!
//! Every failure leaves the service as `{"error": {"code", "legacyCode", "message"}}`
//! with a stable code. Internal details are logged, never returned.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use spear_core::errors::{AuthError, DomainError, TokenError};
use spear_shared::types::{ErrorBody, ErrorEnvelope};

/// Stable, machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Inbound payload is not valid JSON
    InvalidBody,
    /// Inbound request is missing data or fails validation
    InvalidRequest,
    /// Bearer credential missing, malformed, or failing verification
    InvalidToken,
    IdentityNotRegistered,
    IdentityAlreadyRegistered,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBody | ErrorCode::InvalidRequest => "invalid-request",
            ErrorCode::InvalidToken => "invalid-token",
            ErrorCode::IdentityNotRegistered => "identity-not-registered",
            ErrorCode::IdentityAlreadyRegistered => "identity-already-registered",
            ErrorCode::InternalError => "internal-error",
        }
    }

    /// Numeric code understood by older clients
    pub fn legacy_code(&self) -> i32 {
        match self {
            ErrorCode::InvalidBody => 54000,
            ErrorCode::InvalidToken => 54001,
            ErrorCode::IdentityNotRegistered => 54002,
            ErrorCode::IdentityAlreadyRegistered => 54003,
            ErrorCode::InternalError => 54004,
            ErrorCode::InvalidRequest => 54005,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidBody | ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::IdentityNotRegistered => StatusCode::NOT_FOUND,
            ErrorCode::IdentityAlreadyRegistered => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "request payload should be valid JSON",
            ErrorCode::InvalidRequest => "invalid request",
            ErrorCode::InvalidToken => "invalid token",
            ErrorCode::IdentityNotRegistered => "user is not registered",
            ErrorCode::IdentityAlreadyRegistered => "user is already registered",
            ErrorCode::InternalError => "internal server error",
        }
    }
}

/// Error returned by route handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, message)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::InvalidToken)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError)
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code.as_str().to_string(),
            legacy_code: self.code.legacy_code(),
            message: self.message.clone(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::from(self.body()))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let code = match &error {
            DomainError::Auth(AuthError::UserNotFound) => ErrorCode::IdentityNotRegistered,
            DomainError::Auth(AuthError::UserAlreadyExists) => ErrorCode::IdentityAlreadyRegistered,
            DomainError::Token(TokenError::SigningFailed) => ErrorCode::InternalError,
            DomainError::Token(_) => ErrorCode::InvalidToken,
            DomainError::Config { .. } | DomainError::Directory { .. } | DomainError::Key(_) => {
                ErrorCode::InternalError
            }
        };

        if error.is_client_error() {
            tracing::warn!(code = code.as_str(), error = %error, "Request rejected");
        } else {
            tracing::error!(code = code.as_str(), error = %error, "Request failed");
        }

        ApiError::new(code)
    }
}
