use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::Claims;

/// Access tokens are valid for 24 hours
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Declared refresh horizon; no operation issues refresh tokens
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// Issues and validates self-contained, HS256-signed access tokens
///
/// Validation is pure computation: no store lookup and no revocation list.
/// A token for a user deleted after issuance stays valid until it expires,
/// so callers that need the user must re-check existence.
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_hours: i64,
    refresh_expiration_days: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_hours: ACCESS_TOKEN_TTL_HOURS,
            refresh_expiration_days: REFRESH_TOKEN_TTL_DAYS,
        }
    }

    /// Lifetime of an access token in seconds
    pub fn expires_in(&self) -> i64 {
        self.jwt_expiration_hours * 60 * 60
    }

    /// Generate a JWT for the given user id, issued now
    pub fn generate_jwt(&self, user_id: i32) -> Result<String, InternalError> {
        self.generate_jwt_at(user_id, Utc::now().timestamp())
    }

    /// Generate a JWT for the given user id as if issued at `issued_at`
    ///
    /// # Arguments
    /// * `user_id` - The id of the user the token identifies
    /// * `issued_at` - Unix timestamp used for `iat`; `exp` follows from it
    pub fn generate_jwt_at(&self, user_id: i32, issued_at: i64) -> Result<String, InternalError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: issued_at + self.expires_in(),
            iat: issued_at,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))
    }

    /// Validate a JWT against the current time and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        self.validate_jwt_at(token, Utc::now().timestamp())
    }

    /// Validate a JWT against the given time and return the claims
    ///
    /// The signature is checked by `jsonwebtoken`; expiry is checked here
    /// with no leeway so the 24 hour window is exact.
    ///
    /// # Returns
    /// * `Ok(Claims)` - Signature valid and `now` is before `exp`
    /// * `Err(CredentialError::InvalidToken)` - Malformed or wrongly signed
    /// * `Err(CredentialError::ExpiredToken)` - `now` is at or past `exp`
    pub fn validate_jwt_at(&self, token: &str, now: i64) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| CredentialError::invalid_token(e.to_string()))?;

        if token_data.claims.exp <= now {
            return Err(CredentialError::ExpiredToken.into());
        }

        Ok(token_data.claims)
    }

    /// Validate a bearer token and return the user id it carries
    pub fn authenticate(&self, token: &str) -> Result<i32, InternalError> {
        let claims = self.validate_jwt(token)?;
        Self::user_id_from_claims(&claims)
    }

    fn user_id_from_claims(claims: &Claims) -> Result<i32, InternalError> {
        claims
            .sub
            .parse::<i32>()
            .map_err(|_| CredentialError::invalid_token("subject is not a user id").into())
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ jwt_expiration: {}h, refresh_expiration: {}days }}",
            self.jwt_expiration_hours, self.refresh_expiration_days
        )
    }
}
