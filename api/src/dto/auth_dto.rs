//! Identity payloads carried in the `X-USER-INFO` header

use serde::{Deserialize, Serialize};
use spear_core::domain::{LoginRequest, RegisterRequest};
use validator::Validate;

/// Login payload, already validated by the OAuth provider upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInfo {
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default, rename = "tokenID")]
    pub token_id: String,
}

impl From<LoginInfo> for LoginRequest {
    fn from(info: LoginInfo) -> Self {
        LoginRequest {
            username: info.username,
            role: info.role,
            provider: info.provider,
            token_id: info.token_id,
        }
    }
}

/// Registration payload; also the payload of `/authenticate`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInfo {
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, rename = "tokenID")]
    pub token_id: String,
}

impl From<RegisterInfo> for RegisterRequest {
    fn from(info: RegisterInfo) -> Self {
        RegisterRequest {
            username: info.username,
            name: info.name,
            picture: info.picture.filter(|p| !p.is_empty()),
            role: info.role,
            provider: info.provider,
            token_id: info.token_id,
        }
    }
}
