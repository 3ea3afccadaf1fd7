use std::fmt;

use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://cocktails.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_RATE_LIMIT: &str = "200 per day;50 per hour";
const DEFAULT_RATE_LIMIT_STORAGE: &str = "memory://";

/// Infrastructure settings read once at startup
///
/// Rate limit values are carried for operators but not enforced.
#[derive(Clone)]
pub struct ServerSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    cors_origins: Vec<String>,
    debug: bool,
    rate_limit_default: String,
    rate_limit_storage_url: String,
}

impl ServerSettings {
    /// Load settings from the given environment provider
    ///
    /// # Returns
    /// * `Ok(ServerSettings)` - All values present or defaulted and valid
    /// * `Err(ConfigError::InvalidSetting)` - A value was set but unusable
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = Self::string_or(env, "DATABASE_URL", DEFAULT_DATABASE_URL);
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid_setting("DATABASE_URL", "cannot be empty"));
        }

        let server_host = Self::string_or(env, "HOST", DEFAULT_HOST);
        if server_host.trim().is_empty() {
            return Err(ConfigError::invalid_setting("HOST", "cannot be empty"));
        }

        let server_port = match env.get_var("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        let cors_origins = Self::parse_origins(&Self::string_or(env, "CORS_ORIGINS", DEFAULT_CORS_ORIGINS));

        let debug = env
            .get_var("DEBUG")
            .map(|value| Self::parse_flag(&value))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            server_host,
            server_port,
            cors_origins,
            debug,
            rate_limit_default: Self::string_or(env, "RATELIMIT_DEFAULT", DEFAULT_RATE_LIMIT),
            rate_limit_storage_url: Self::string_or(env, "RATELIMIT_STORAGE_URL", DEFAULT_RATE_LIMIT_STORAGE),
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    fn string_or(env: &dyn EnvironmentProvider, key: &str, default: &str) -> String {
        env.get_var(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        match value.trim().parse::<u16>() {
            Ok(0) => Err(ConfigError::invalid_setting("PORT", "0 is outside valid range 1-65535")),
            Ok(port) => Ok(port),
            Err(_) => Err(ConfigError::invalid_setting(
                "PORT",
                format!("expected port number between 1 and 65535, got '{}'", value),
            )),
        }
    }

    fn parse_origins(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_flag(value: &str) -> bool {
        matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "t")
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn rate_limit_default(&self) -> &str {
        &self.rate_limit_default
    }

    pub fn rate_limit_storage_url(&self) -> &str {
        &self.rate_limit_storage_url
    }
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .field("debug", &self.debug)
            .field("rate_limit_default", &self.rate_limit_default)
            .finish()
    }
}
