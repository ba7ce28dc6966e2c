//! Fixed key material and helpers for tests
//!
//! Compiled for this crate's own tests and, through the `testing` feature,
//! for the tests of downstream crates.

use std::sync::Arc;

use spear_shared::config::auth::JwtConfig;

use crate::services::token::{Rs256KeyManager, TokenService, TokenServiceConfig};

pub use crate::repositories::MockUserDirectory;

/// 2048-bit RSA private key (PKCS#1)
pub const PRIMARY_PRIVATE_KEY: &str = include_str!("../keys/test/primary.pem");

/// Public half of [`PRIMARY_PRIVATE_KEY`] (SubjectPublicKeyInfo)
pub const PRIMARY_PUBLIC_KEY: &str = include_str!("../keys/test/primary.pub.pem");

/// An unrelated 2048-bit RSA private key
pub const SECONDARY_PRIVATE_KEY: &str = include_str!("../keys/test/secondary.pem");

pub const SECONDARY_PUBLIC_KEY: &str = include_str!("../keys/test/secondary.pub.pem");

/// A P-256 public key, valid SPKI but not RSA
pub const EC_PUBLIC_KEY: &str = include_str!("../keys/test/ec.pub.pem");

/// JWT configuration carrying the primary key pair and default expiries
pub fn jwt_config() -> JwtConfig {
    JwtConfig::with_keys(PRIMARY_PRIVATE_KEY, PRIMARY_PUBLIC_KEY)
}

/// Parsed primary key pair
pub fn key_manager() -> Arc<Rs256KeyManager> {
    match Rs256KeyManager::from_pem_strings(PRIMARY_PRIVATE_KEY, PRIMARY_PUBLIC_KEY) {
        Ok(keys) => Arc::new(keys),
        Err(e) => panic!("test key fixture failed to parse: {}", e),
    }
}

/// Token service signing with the primary key pair
pub fn token_service(config: TokenServiceConfig) -> Arc<TokenService> {
    match TokenService::new(config, key_manager()) {
        Ok(service) => Arc::new(service),
        Err(e) => panic!("test token service rejected its configuration: {}", e),
    }
}

/// Token service signing with the given key pair and default expiries
pub fn token_service_with_keys(private_pem: &str, public_pem: &str) -> TokenService {
    let keys = match Rs256KeyManager::from_pem_strings(private_pem, public_pem) {
        Ok(keys) => Arc::new(keys),
        Err(e) => panic!("test key fixture failed to parse: {}", e),
    };
    match TokenService::new(TokenServiceConfig::default(), keys) {
        Ok(service) => service,
        Err(e) => panic!("test token service rejected its configuration: {}", e),
    }
}
