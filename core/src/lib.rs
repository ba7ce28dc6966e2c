//! # Spear Core
//!
//! Core token lifecycle logic for the Spear auth backend.
//! This crate contains the identity and token entities, the error taxonomy,
//! the user directory port, RS256 key handling, and the services that mint,
//! verify and refresh token pairs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, LoginRequest, RegisterRequest, TokenPair, TokenUse, User, JWT_AUDIENCE, JWT_ISSUER,
    TOKEN_TYPE_BEARER,
};
pub use errors::{AuthError, DirectoryError, DomainError, DomainResult, KeyError, TokenError};
pub use repositories::UserDirectory;
pub use services::{
    AuthService, KeyMaterialProvider, Rs256KeyManager, TokenService, TokenServiceConfig,
};
