//! Authentication service module
//!
//! This module orchestrates the token lifecycle:
//! - Login of an identity already known to the user directory
//! - Registration of a new identity
//! - Refresh of a token pair from a refresh token
//! - Profile lookup by identity ID

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
