//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token lifetimes and RS256 key material
//! - `directory` - remote user directory connection
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! Every struct deserializes with defaults for missing fields so that a
//! partial configuration document is merged over [`AppConfig::default`].

pub mod auth;
pub mod directory;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use directory::UserDirectoryConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// User directory configuration
    pub user_directory: UserDirectoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            user_directory: UserDirectoryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Default configuration for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        }
    }
}
