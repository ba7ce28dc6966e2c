//! Identity entity and the requests that resolve or create one.
//!
//! Identities are owned by the external user directory. This crate never
//! mutates them; tokens carry snapshots of them.

use serde::{Deserialize, Serialize};

/// A user's canonical profile record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier assigned by the directory
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Screen name, used for login
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Display name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Optional URL of the user's display image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl User {
    /// Creates a new identity without a picture
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: name.into(),
            picture: None,
        }
    }

    /// Sets the display image URL
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}

/// Login request for a user already validated by an OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Screen name, used for login
    #[serde(default)]
    pub username: String,

    /// Role requested for RBAC operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// OAuth2 provider that validated this user
    #[serde(default)]
    pub provider: String,

    /// Identifier connecting this user with the OAuth provider
    #[serde(default, rename = "tokenID")]
    pub token_id: String,
}

impl LoginRequest {
    pub fn new(
        username: impl Into<String>,
        provider: impl Into<String>,
        token_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            role: None,
            provider: provider.into(),
            token_id: token_id.into(),
        }
    }
}

/// Registration request for a user validated by an OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Screen name, used for login
    #[serde(default)]
    pub username: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Optional URL of the user's display image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    /// Role for RBAC operations
    #[serde(default)]
    pub role: String,

    /// OAuth2 provider that validated this user
    #[serde(default)]
    pub provider: String,

    /// Identifier connecting this user with the OAuth provider
    #[serde(default, rename = "tokenID")]
    pub token_id: String,
}

/// The login view of a registration payload, used when one payload serves both
impl From<&RegisterRequest> for LoginRequest {
    fn from(request: &RegisterRequest) -> Self {
        Self {
            username: request.username.clone(),
            role: (!request.role.is_empty()).then(|| request.role.clone()),
            provider: request.provider.clone(),
            token_id: request.token_id.clone(),
        }
    }
}
