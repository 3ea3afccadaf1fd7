use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::env_provider::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Configuration for application logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_level: String,
    /// Daily-rotated file output in addition to the console
    pub app_log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Self {
        let log_level = env
            .get_non_empty("LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let app_log_file = env.get_non_empty("APP_LOG_FILE").map(PathBuf::from);

        Self {
            log_level,
            app_log_file,
        }
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", self.log_level, e)))
    }

    /// Directory and file name for the rolling appender
    fn log_file_parts(&self) -> Result<Option<(PathBuf, PathBuf)>, LoggingError> {
        let Some(path) = &self.app_log_file else {
            return Ok(None);
        };

        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| LoggingError::InitializationError("Invalid log file path".to_string()))?;

        Ok(Some((directory.to_path_buf(), PathBuf::from(file_name))))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
///
/// Reads `LOG_LEVEL` and `APP_LOG_FILE` from the environment.
pub fn init_logging() -> Result<(), LoggingError> {
    let config = LoggingConfig::from_env();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(config.filter()?);

    let subscriber = tracing_subscriber::registry().with(console_layer);

    match config.log_file_parts()? {
        Some((directory, file_name)) => {
            std::fs::create_dir_all(&directory)?;
            let file_appender = tracing_appender::rolling::daily(directory, file_name);

            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(config.filter()?);

            subscriber
                .with(file_layer)
                .try_init()
                .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
        }
        None => {
            subscriber
                .try_init()
                .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_defaults_to_info_without_file() {
        let config = LoggingConfig::from_env_provider(&MockEnvironment::empty());

        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.app_log_file, None);
        assert!(config.log_file_parts().unwrap().is_none());
    }

    #[test]
    fn test_bare_file_name_logs_to_current_directory() {
        let env = MockEnvironment::empty().with_var("APP_LOG_FILE", "app.log");

        let config = LoggingConfig::from_env_provider(&env);
        let (directory, file_name) = config.log_file_parts().unwrap().unwrap();

        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file_name, PathBuf::from("app.log"));
    }

    #[test]
    fn test_nested_log_file_path() {
        let env = MockEnvironment::empty().with_var("APP_LOG_FILE", "logs/cocktails/app.log");

        let (directory, file_name) = LoggingConfig::from_env_provider(&env)
            .log_file_parts()
            .unwrap()
            .unwrap();

        assert_eq!(directory, PathBuf::from("logs/cocktails"));
        assert_eq!(file_name, PathBuf::from("app.log"));
    }

    #[test]
    fn test_directives_are_accepted() {
        let env = MockEnvironment::empty().with_var("LOG_LEVEL", "cocktail_backend=debug,sea_orm=warn");

        assert!(LoggingConfig::from_env_provider(&env).filter().is_ok());
    }

    #[test]
    fn test_malformed_level_is_rejected() {
        let env = MockEnvironment::empty().with_var("LOG_LEVEL", "cocktail_backend=loud");

        let err = LoggingConfig::from_env_provider(&env).filter().unwrap_err();

        assert!(matches!(err, LoggingError::InvalidLogLevel(_)));
    }
}
