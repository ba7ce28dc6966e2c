//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core depends on:
//!
//! - **Directory**: GraphQL client implementing the `UserDirectory` port
//! - **Config**: application configuration from a file, a config server,
//!   and `SPEAR__` environment overrides

pub mod config;
pub mod directory;

pub use config::{ConfigError, ConfigLoader};
pub use directory::GraphQlUserDirectory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client could not be built or a request failed
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}
