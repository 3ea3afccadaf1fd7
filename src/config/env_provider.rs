#[cfg(test)]
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// Source of configuration variables
///
/// Settings, secrets and logging read through this trait so tests can hand
/// them a fixed map instead of the process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Trimmed value of `key`, or `None` when unset or blank
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Layer a `.env` file from the working directory (or a parent) under the
/// process environment
///
/// Variables already set in the process win over the file. A missing file is
/// not an error.
///
/// # Returns
/// * `Ok(Some(path))` - The file that was loaded
/// * `Ok(None)` - No `.env` file was found
/// * `Err(ConfigError::EnvFile)` - A file was found but could not be read or parsed
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenv::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::env_file(".env", e.to_string())),
    }
}

/// Layer a specific env file under the process environment
///
/// Same precedence as [`load_dotenv`]; used for `ENV_FILE` overrides.
pub fn load_env_file(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::env_file(&path.display().to_string(), e.to_string())),
    }
}

/// Test environment provider with configurable variables
#[cfg(test)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_provider_missing_var() {
        let provider = SystemEnvironment;

        assert_eq!(provider.get_var("COCKTAIL_NON_EXISTENT_VAR_98765"), None);
    }

    #[test]
    fn test_get_non_empty_trims_and_skips_blank_values() {
        let provider = MockEnvironment::empty().with_vars(&[("LOG_LEVEL", "  debug \n"), ("APP_LOG_FILE", "   ")]);

        assert_eq!(provider.get_non_empty("LOG_LEVEL"), Some("debug".to_string()));
        assert_eq!(provider.get_non_empty("APP_LOG_FILE"), None);
        assert_eq!(provider.get_non_empty("PORT"), None);
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let path = std::env::temp_dir().join("cocktail-backend-no-such-file.env");

        assert_eq!(load_env_file(&path).unwrap(), None);
    }

    #[test]
    fn test_env_file_fills_unset_vars_only() {
        let path = std::env::temp_dir().join(format!("cocktail-backend-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "COCKTAIL_ENV_FILE_ONLY=from-file\nCOCKTAIL_ENV_FILE_PATH=from-file\n",
        )
        .unwrap();
        unsafe { std::env::set_var("COCKTAIL_ENV_FILE_PATH", "from-process") };

        let loaded = load_env_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, Some(path));
        assert_eq!(SystemEnvironment.get_var("COCKTAIL_ENV_FILE_ONLY"), Some("from-file".to_string()));
        assert_eq!(SystemEnvironment.get_var("COCKTAIL_ENV_FILE_PATH"), Some("from-process".to_string()));
    }

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_vars(&[("HOST", "127.0.0.1"), ("PORT", "8080")]);

        assert_eq!(provider.get_var("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(provider.get_var("HOST"), Some("127.0.0.1".to_string()));
        assert_eq!(provider.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(provider.get_var("DEBUG"), None);
    }
}
