use std::fmt;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version};

use crate::errors::InternalError;

const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// One-way, salted password hashing with Argon2id
///
/// The pepper is fed to Argon2 as its secret parameter, so stored hashes
/// cannot be verified without it.
pub struct PasswordHasher {
    password_pepper: String,
    params: Params,
    /// Hash verified against when the username is unknown, so that lookups
    /// for missing users cost the same as a wrong password. Built at
    /// construction so the first unknown-user login pays no extra hash.
    dummy_hash: Option<String>,
}

impl PasswordHasher {
    /// Create a hasher with Argon2's default cost parameters
    pub fn new(password_pepper: String) -> Self {
        Self::with_params(password_pepper, Params::default())
    }

    /// Create a hasher with explicit cost parameters
    pub fn with_params(password_pepper: String, params: Params) -> Self {
        let mut hasher = Self {
            password_pepper,
            params,
            dummy_hash: None,
        };

        match hasher.hash(DUMMY_PASSWORD) {
            Ok(hash) => hasher.dummy_hash = Some(hash),
            Err(e) => tracing::error!("Failed to build dummy password hash: {}", e),
        }

        hasher
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Returns
    /// * `Ok(String)` - PHC-formatted hash (`$argon2id$...`)
    /// * `Err(InternalError::Crypto)` - Argon2 could not be initialised or failed
    pub fn hash(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash
    ///
    /// A mismatch, or a stored value that is not a valid PHC string,
    /// yields `Ok(false)`; only a broken hasher configuration is an error.
    pub fn verify(&self, password: &str, password_hash: &str) -> Result<bool, InternalError> {
        let parsed_hash = match PasswordHash::new(password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Burn one verification's worth of work against a throwaway hash
    pub fn verify_dummy(&self, password: &str) -> Result<(), InternalError> {
        match &self.dummy_hash {
            Some(dummy_hash) => {
                self.verify(password, dummy_hash)?;
            }
            None => {
                self.hash(password)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("password_pepper", &"<redacted>")
            .field("params", &self.params)
            .finish()
    }
}
