//! Application configuration loading
//!
//! Precedence:
//! 1. `.env` is loaded into the process environment if present
//! 2. `CONFIG_SERVER` set: the document at `<CONFIG_SERVER>/spear-auth` is used
//! 3. otherwise `CONFIG_FILE` (default `./config.json`) overlaid with
//!    `SPEAR__` environment variables
//!
//! Any field missing from the loaded document keeps its default. Defaults
//! follow the deployment environment named by `ENVIRONMENT` (or `ENV`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use spear_shared::config::{AppConfig, Environment as DeployEnvironment};
use tracing::{info, warn};

/// Environment variable naming the config server base URL
pub const CONFIG_SERVER_VAR: &str = "CONFIG_SERVER";

/// Environment variable naming the configuration file
pub const CONFIG_FILE_VAR: &str = "CONFIG_FILE";

/// Configuration file used when `CONFIG_FILE` is unset
pub const DEFAULT_CONFIG_FILE: &str = "./config.json";

/// Document name requested from the config server
pub const CONFIG_SERVER_DOCUMENT: &str = "spear-auth";

/// Prefix of environment variables overriding file values
pub const ENV_PREFIX: &str = "SPEAR";

const CONFIG_SERVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration loading errors, all fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from {url}: {message}")]
    Remote { url: String, message: String },

    #[error("Failed to read configuration file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Resolves where configuration comes from and loads it
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_server: Option<String>,
    config_file: PathBuf,
    environment: DeployEnvironment,
    env_overrides: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config_server: None,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            environment: DeployEnvironment::from_env(),
            env_overrides: None,
        }
    }
}

impl ConfigLoader {
    /// Loader driven by `CONFIG_SERVER` and `CONFIG_FILE`, after loading `.env`
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            info!(path = %path.display(), "Loaded environment file");
        }

        let config_server = std::env::var(CONFIG_SERVER_VAR)
            .ok()
            .filter(|s| !s.is_empty());
        let config_file = std::env::var(CONFIG_FILE_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self {
            config_server,
            config_file,
            environment: DeployEnvironment::from_env(),
            env_overrides: None,
        }
    }

    pub fn with_config_server(mut self, url: impl Into<String>) -> Self {
        self.config_server = Some(url.into());
        self
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    /// Deployment environment whose defaults the loaded document is merged over
    pub fn with_environment(mut self, environment: DeployEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the process environment as the source of `SPEAR__` overrides
    pub fn with_env_overrides(mut self, vars: HashMap<String, String>) -> Self {
        self.env_overrides = Some(vars);
        self
    }

    /// Loads the configuration from the resolved source
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        match &self.config_server {
            Some(server) => self.load_remote(server).await,
            None => self.load_file(),
        }
    }

    async fn load_remote(&self, server: &str) -> Result<AppConfig, ConfigError> {
        let url = config_server_url(server);
        info!(url = %url, "Loading configuration from config server");

        let remote_error = |message: String| ConfigError::Remote {
            url: url.clone(),
            message,
        };

        let client = reqwest::Client::builder()
            .timeout(CONFIG_SERVER_TIMEOUT)
            .build()
            .map_err(|e| remote_error(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| remote_error(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| remote_error(e.to_string()))?;

        let config = Config::builder()
            .add_source(self.defaults()?)
            .add_source(File::from_str(&body, FileFormat::Json))
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .map_err(|e| remote_error(e.to_string()))?;

        info!("Configuration loaded");
        Ok(config)
    }

    fn load_file(&self) -> Result<AppConfig, ConfigError> {
        let path = self.config_file.as_path();
        info!(
            path = %path.display(),
            environment = %self.environment,
            "Loading configuration file"
        );

        let mut builder = Config::builder().add_source(self.defaults()?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        } else {
            warn!(path = %path.display(), "Configuration file not found, using defaults");
        }

        let config = builder
            .add_source(self.env_source())
            .build()
            .map_err(|source| file_error(path, source))?
            .try_deserialize::<AppConfig>()?;

        info!("Configuration loaded");
        Ok(config)
    }

    fn defaults(&self) -> Result<Config, ConfigError> {
        Ok(Config::try_from(&AppConfig::for_environment(self.environment))?)
    }

    fn env_source(&self) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(self.env_overrides.clone())
    }
}

/// `<server>/spear-auth`, adding the `/` when missing
pub fn config_server_url(server: &str) -> String {
    if server.ends_with('/') {
        format!("{}{}", server, CONFIG_SERVER_DOCUMENT)
    } else {
        format!("{}/{}", server, CONFIG_SERVER_DOCUMENT)
    }
}

fn file_error(path: &Path, source: config::ConfigError) -> ConfigError {
    ConfigError::File {
        path: path.display().to_string(),
        source,
    }
}
