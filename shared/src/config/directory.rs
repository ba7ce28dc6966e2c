//! Remote user directory configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the GraphQL user directory
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserDirectoryConfig {
    /// GraphQL endpoint URL
    pub url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for UserDirectoryConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:4000/graphql"),
            timeout: 10,
        }
    }
}

impl UserDirectoryConfig {
    /// Create a configuration pointing at the given endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
