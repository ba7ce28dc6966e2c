//! Configuration for the token service

use chrono::Duration;
use spear_shared::config::auth::{
    JwtConfig, DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_REFRESH_TOKEN_EXPIRY,
};

use crate::errors::DomainError;

/// Longest lifetime either token may be given (ten years)
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;

/// Configuration for the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Access token expiry in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_seconds: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry_seconds: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }
}

impl TokenServiceConfig {
    /// Lifetime of an access token
    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_expiry_seconds)
    }

    /// Lifetime of a refresh token
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_token_expiry_seconds)
    }

    /// Both lifetimes must be positive and at most [`MAX_TOKEN_EXPIRY`]
    pub fn validate(&self) -> Result<(), DomainError> {
        check_expiry("access_token_expiry", self.access_token_expiry_seconds)?;
        check_expiry("refresh_token_expiry", self.refresh_token_expiry_seconds)
    }
}

fn check_expiry(name: &str, seconds: i64) -> Result<(), DomainError> {
    if (1..=MAX_TOKEN_EXPIRY).contains(&seconds) {
        Ok(())
    } else {
        Err(DomainError::Config {
            message: format!(
                "{} must be between 1 and {} seconds, got {}",
                name, MAX_TOKEN_EXPIRY, seconds
            ),
        })
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
        }
    }
}
