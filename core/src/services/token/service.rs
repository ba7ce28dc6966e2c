//! Token codec: minting and verifying RS256 tokens

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::{Claims, TokenPair, TokenUse, JWT_AUDIENCE, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::{KeyMaterialProvider, Rs256KeyManager};

/// Service for minting and verifying signed tokens
pub struct TokenService {
    config: TokenServiceConfig,
    keys: Arc<Rs256KeyManager>,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .field("keys", &self.keys)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service around an already parsed key pair
    ///
    /// Fails when a configured token lifetime is out of range.
    pub fn new(
        config: TokenServiceConfig,
        keys: Arc<Rs256KeyManager>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            keys,
            validation,
        })
    }

    /// Creates a token service from a key provider, parsing the keys if needed
    pub fn from_provider(
        config: TokenServiceConfig,
        provider: &KeyMaterialProvider,
    ) -> Result<Self, DomainError> {
        let keys = provider.key_manager()?;
        Self::new(config, keys)
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Signs a token with the fixed issuer and audience
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity ID
    /// * `expires_at` - Absolute expiry
    /// * `token_use` - Purpose claim
    /// * `user` - Identity snapshot to embed (access tokens only)
    pub fn mint(
        &self,
        subject: &str,
        expires_at: DateTime<Utc>,
        token_use: TokenUse,
        user: Option<&User>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, expires_at, token_use, user.cloned());
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::RS256);
        encode(&header, claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(error = %e, "RS256 signing failed");
            TokenError::SigningFailed
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid, claims present, not expired
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key or tampered with
    /// * `Err(TokenError::TokenExpired)` - Expiry has elapsed
    /// * `Err(TokenError::MalformedToken)` - Anything structurally wrong
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                kind => TokenError::MalformedToken {
                    reason: format!("{:?}", kind),
                },
            })
    }

    /// Mints a fresh access/refresh pair for an identity, using now as mint time
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        self.issue_pair_at(user, Utc::now())
    }

    /// Mints a fresh access/refresh pair for an identity at the given mint time
    pub fn issue_pair_at(&self, user: &User, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        let access_expires_at = expiry_after(now, self.config.access_token_ttl())?;
        let refresh_expires_at = expiry_after(now, self.config.refresh_token_ttl())?;

        let access_token = self.encode_jwt(&Claims::new_access_token(user, access_expires_at))?;
        let refresh_token =
            self.encode_jwt(&Claims::new_refresh_token(&user.id, refresh_expires_at))?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_expires_at,
            user.clone(),
        ))
    }
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TokenError> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        tracing::error!(%now, ttl_seconds = ttl.num_seconds(), "Token expiry out of range");
        TokenError::SigningFailed
    })
}
