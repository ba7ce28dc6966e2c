//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::token::{TokenPair, TokenUse};
use crate::domain::entities::user::{LoginRequest, RegisterRequest, User};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::UserDirectory;
use crate::services::token::TokenService;

/// Authentication service for the token lifecycle
///
/// Holds no per-call state. Every operation either resolves an identity
/// through the directory or verifies a token, then mints a brand new pair.
pub struct AuthService<U>
where
    U: UserDirectory,
{
    /// External system of record for identities
    directory: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
}

impl<U> Clone for AuthService<U>
where
    U: UserDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            token_service: Arc::clone(&self.token_service),
        }
    }
}

impl<U> AuthService<U>
where
    U: UserDirectory,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `directory` - User directory resolving and creating identities
    /// * `token_service` - Service minting and verifying tokens
    pub fn new(directory: Arc<U>, token_service: Arc<TokenService>) -> Self {
        Self {
            directory,
            token_service,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Log in an identity already known to the directory
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No identity with that username
    /// * `Err(DomainError)` - Directory outage or signing failure
    pub async fn login(&self, request: &LoginRequest) -> DomainResult<TokenPair> {
        tracing::debug!(
            username = %request.username,
            provider = %request.provider,
            "Login requested"
        );

        let user = self.directory.find_by_username(&request.username).await?;
        let pair = self.token_service.issue_pair(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Register a new identity and log it in
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh tokens for the created identity
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - The directory reported a conflict
    /// * `Err(DomainError)` - Directory outage or signing failure
    pub async fn register(&self, request: &RegisterRequest) -> DomainResult<TokenPair> {
        tracing::debug!(
            username = %request.username,
            provider = %request.provider,
            "Registration requested"
        );

        let user = self.directory.create(request).await?;
        let pair = self.token_service.issue_pair(&user)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(pair)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// Both tokens of the returned pair are newly minted. The presented
    /// refresh token stays valid until it expires; reuse is not tracked.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh tokens for the token's subject
    /// * `Err(DomainError::Token(TokenError::InvalidToken))` - Verification failed
    /// * `Err(DomainError::Token(TokenError::WrongPurpose))` - Not a refresh token
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - The subject no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self
            .token_service
            .verify(refresh_token)
            .map_err(TokenError::invalid)?;

        if claims.token_use != TokenUse::Refresh {
            return Err(TokenError::WrongPurpose {
                expected: TokenUse::Refresh,
                actual: claims.token_use,
            }
            .into());
        }

        let user = self.directory.find_by_id(&claims.sub).await?;
        let pair = self.token_service.issue_pair(&user)?;

        tracing::info!(user_id = %user.id, "Token pair refreshed");
        Ok(pair)
    }

    /// Look up an identity by ID
    pub async fn me(&self, user_id: &str) -> DomainResult<User> {
        tracing::debug!(user_id = %user_id, "Profile lookup");

        Ok(self.directory.find_by_id(user_id).await?)
    }
}
