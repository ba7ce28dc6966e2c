//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, TokenPair, TokenUse, JWT_AUDIENCE, JWT_ISSUER, TOKEN_TYPE_BEARER};
pub use user::{LoginRequest, RegisterRequest, User};
