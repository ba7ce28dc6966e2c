//! Business services containing the token lifecycle.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use token::{KeyMaterialProvider, Rs256KeyManager, TokenService, TokenServiceConfig};
