use crate::config::errors::ConfigError;
use crate::config::EnvironmentProvider;

/// Where a secret is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretType {
    EnvVar { name: String },
}

impl SecretType {
    pub fn name(&self) -> &str {
        match self {
            SecretType::EnvVar { name } => name,
        }
    }
}

/// A required secret and the minimum length its value must have
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub secret_type: SecretType,
    pub min_length: usize,
}

impl SecretConfig {
    /// Required environment variable of at least `min_length` bytes
    pub fn env_var(name: &str, min_length: usize) -> Self {
        Self {
            secret_type: SecretType::EnvVar {
                name: name.to_string(),
            },
            min_length,
        }
    }

    /// Read the secret and check its length
    ///
    /// An empty value counts as missing.
    pub fn load(&self, env: &dyn EnvironmentProvider) -> Result<String, ConfigError> {
        let name = self.secret_type.name();

        let value = match &self.secret_type {
            SecretType::EnvVar { name } => env
                .get_var(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::missing_secret(name))?,
        };

        if value.len() < self.min_length {
            return Err(ConfigError::secret_too_short(name, self.min_length, value.len()));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_load_returns_value_at_minimum_length() {
        let env = MockEnvironment::empty().with_var("TOKEN", "abcd");

        let value = SecretConfig::env_var("TOKEN", 4).load(&env).unwrap();

        assert_eq!(value, "abcd");
    }

    #[test]
    fn test_empty_value_is_missing() {
        let env = MockEnvironment::empty().with_var("TOKEN", "");

        let err = SecretConfig::env_var("TOKEN", 0).load(&env).unwrap_err();

        assert!(matches!(err, ConfigError::MissingSecret { .. }));
    }

    #[test]
    fn test_short_value_reports_lengths() {
        let env = MockEnvironment::empty().with_var("TOKEN", "abc");

        let err = SecretConfig::env_var("TOKEN", 8).load(&env).unwrap_err();

        match err {
            ConfigError::SecretTooShort { secret_name, expected, actual } => {
                assert_eq!(secret_name, "TOKEN");
                assert_eq!(expected, 8);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
