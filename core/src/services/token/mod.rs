//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - RS256 key material parsing and parse-once caching
//! - Minting access and refresh tokens
//! - Verifying incoming tokens and extracting their claims

mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use config::{TokenServiceConfig, MAX_TOKEN_EXPIRY};
pub use key_manager::{KeyMaterialProvider, Rs256KeyManager, PUBLIC_KEY_TAG, RSA_PRIVATE_KEY_TAG};
pub use service::TokenService;
