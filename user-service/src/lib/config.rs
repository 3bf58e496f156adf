use std::env;

use auth::DEFAULT_TOKEN_LIFETIME_MINUTES;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Without one the service runs on the in-memory store.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Token settings. The signing key is deliberately absent: it is generated
/// at startup and lives only as long as the process.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_token_lifetime_minutes")]
    pub token_lifetime_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_lifetime_minutes: default_token_lifetime_minutes(),
        }
    }
}

fn default_token_lifetime_minutes() -> i64 {
    DEFAULT_TOKEN_LIFETIME_MINUTES
}

impl Config {
    /// Upper bound for `auth.token_lifetime_minutes`: one year.
    pub const MAX_TOKEN_LIFETIME_MINUTES: i64 = 60 * 24 * 365;

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse or a value is out of range
    pub fn load() -> Result<Self, ConfigError> {
        // Example: DATABASE__URL=postgres://... overrides database.url
        Self::load_with(Environment::default().separator("__"))
    }

    /// Load configuration using `environment` as the override layer.
    ///
    /// # Arguments
    /// * `environment` - Environment source, usually the process environment
    ///
    /// # Returns
    /// Validated configuration
    pub fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make the service misbehave at runtime.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Token lifetime is not positive or exceeds
    ///   `MAX_TOKEN_LIFETIME_MINUTES`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lifetime = self.auth.token_lifetime_minutes;
        if !(1..=Self::MAX_TOKEN_LIFETIME_MINUTES).contains(&lifetime) {
            return Err(ConfigError::Message(format!(
                "auth.token_lifetime_minutes must be between 1 and {}, got {}",
                Self::MAX_TOKEN_LIFETIME_MINUTES,
                lifetime
            )));
        }

        Ok(())
    }
}
