use crate::errors::internal::{CredentialError, InternalError, UserError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// A required field is missing or empty
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Email already exists
    #[oai(status = 400)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    /// Create a ValidationFailed error
    pub fn validation_failed(message: String) -> Self {
        AuthError::ValidationFailed(Json(ErrorResponse::new("validation_failed", message, 400)))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(Json(ErrorResponse::new(
            "duplicate_username",
            "Username already exists",
            400,
        )))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(ErrorResponse::new(
            "duplicate_email",
            "Email already exists",
            400,
        )))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid username or password",
            401,
        )))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse::new(
            "invalid_token",
            "Invalid or malformed JWT",
            401,
        )))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse::new("expired_token", "JWT has expired", 401)))
    }

    /// Create a generic InternalError that leaks no detail
    pub fn internal_server_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert an InternalError into the API-facing auth error
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Validation { message, .. } => {
                tracing::debug!("Validation failed: {}", message);
                Self::validation_failed(message.clone())
            }
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::InvalidToken { reason }) => {
                tracing::debug!("Invalid token: {}", reason);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired token presented");
                Self::expired_token()
            }
            InternalError::User(UserError::DuplicateUsername { username }) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            InternalError::User(UserError::DuplicateEmail { .. }) => {
                tracing::warn!("Duplicate email attempt");
                Self::duplicate_email()
            }
            // A valid token whose user has since been deleted
            InternalError::User(UserError::UserIdNotFound { user_id }) => {
                tracing::debug!("Token references missing user {}", user_id);
                Self::invalid_token()
            }
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            AuthError::ValidationFailed(json)
            | AuthError::DuplicateUsername(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::InvalidCredentials(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
