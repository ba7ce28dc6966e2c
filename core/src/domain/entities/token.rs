//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// JWT issuer
pub const JWT_ISSUER: &str = "spear/auth";

/// JWT audience
pub const JWT_AUDIENCE: &str = "spear/app";

/// How the access token is presented by clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Purpose claim distinguishing access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenUse::Access => write!(f, "access"),
            TokenUse::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Access and refresh tokens share this shape and one verification path;
/// `token_use` tells them apart. Only access tokens embed the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Subject (identity ID)
    pub sub: String,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Token purpose, fixed at mint time
    #[serde(rename = "use")]
    pub token_use: TokenUse,

    /// Identity snapshot, access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Claims {
    /// Creates claims with the fixed issuer and audience
    ///
    /// # Arguments
    ///
    /// * `subject` - The identity ID
    /// * `expires_at` - Absolute expiry of the token
    /// * `token_use` - Purpose of the token
    /// * `user` - Identity snapshot to embed, if any
    pub fn new(
        subject: impl Into<String>,
        expires_at: DateTime<Utc>,
        token_use: TokenUse,
        user: Option<User>,
    ) -> Self {
        Self {
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            sub: subject.into(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_use,
            user,
        }
    }

    /// Creates new claims for an access token embedding the identity
    pub fn new_access_token(user: &User, expires_at: DateTime<Utc>) -> Self {
        Self::new(user.id.clone(), expires_at, TokenUse::Access, Some(user.clone()))
    }

    /// Creates new claims for a refresh token carrying only the subject
    pub fn new_refresh_token(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self::new(subject, expires_at, TokenUse::Refresh, None)
    }

    /// Whether the purpose claim is `refresh`
    pub fn is_refresh(&self) -> bool {
        self.token_use == TokenUse::Refresh
    }
}

/// Token pair returned to the client
///
/// Handed to the caller and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// JWT for authenticating other requests
    pub access_token: String,

    /// JWT for minting a new pair without re-entering credentials
    pub refresh_token: String,

    /// How the token should be presented, always `Bearer`
    pub token_type: String,

    /// When the access token expires
    pub expire_time: DateTime<Utc>,

    /// The identity the pair was minted for
    pub info: User,
}

impl TokenPair {
    /// Creates a new bearer token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        expire_time: DateTime<Utc>,
        info: User,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expire_time,
            info,
        }
    }
}
