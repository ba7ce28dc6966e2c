//! Shared configuration and common types for the Spear auth server
//!
//! This crate provides the pieces used across all server modules:
//! - Configuration types (loaded by the infra crate)
//! - Response envelopes shared by the HTTP layer and its clients

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
    UserDirectoryConfig,
};
pub use types::{ApiResponse, ErrorBody, ErrorEnvelope};
