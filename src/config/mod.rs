mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;
mod settings;

pub use database::DatabaseConnections;
pub use env_provider::{EnvironmentProvider, SystemEnvironment, load_dotenv, load_env_file};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ConfigError;
pub use logging::{LoggingError, init_logging};
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::SecretManager;
pub use settings::ServerSettings;
