use thiserror::Error;

/// Startup configuration failures; the process refuses to start on any of these
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Setting '{setting_name}' is invalid: {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Required secret '{secret_name}' is missing")]
    MissingSecret { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    SecretTooShort {
        secret_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Env file '{path}' could not be loaded: {reason}")]
    EnvFile { path: String, reason: String },
}

impl ConfigError {
    pub fn invalid_setting(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn env_file(path: &str, reason: impl Into<String>) -> Self {
        Self::EnvFile {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_secret(secret_name: &str) -> Self {
        Self::MissingSecret {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn secret_too_short(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::SecretTooShort {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}
