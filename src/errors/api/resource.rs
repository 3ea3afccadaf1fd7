use crate::errors::internal::{CocktailError, CredentialError, InternalError, ReviewError, UserError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors returned by profile, cocktail, ingredient and review endpoints
#[derive(ApiResponse, Debug)]
pub enum ResourceError {
    /// A required field is missing or malformed
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// A unique value (username, email, ingredient) is already taken
    #[oai(status = 400)]
    Duplicate(Json<ErrorResponse>),

    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated user does not own the resource
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ResourceError {
    pub fn bad_request(message: String) -> Self {
        ResourceError::BadRequest(Json(ErrorResponse::new("validation_failed", message, 400)))
    }

    pub fn duplicate(error: &str, message: &str) -> Self {
        ResourceError::Duplicate(Json(ErrorResponse::new(error, message, 400)))
    }

    pub fn unauthorized(message: &str) -> Self {
        ResourceError::Unauthorized(Json(ErrorResponse::new("unauthorized", message, 401)))
    }

    pub fn forbidden() -> Self {
        ResourceError::Forbidden(Json(ErrorResponse::new(
            "forbidden",
            "You are not allowed to modify this resource",
            403,
        )))
    }

    pub fn not_found(what: &str) -> Self {
        ResourceError::NotFound(Json(ErrorResponse::new(
            "not_found",
            format!("{} not found", what),
            404,
        )))
    }

    pub fn internal_server_error() -> Self {
        ResourceError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert an InternalError into the API-facing resource error
    ///
    /// Infrastructure failures are logged here and surfaced generically.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Validation { message, .. } => {
                tracing::debug!("Validation failed: {}", message);
                Self::bad_request(message.clone())
            }

            InternalError::Credential(CredentialError::ExpiredToken) => {
                Self::unauthorized("JWT has expired")
            }
            InternalError::Credential(_) => Self::unauthorized("Invalid or malformed JWT"),

            InternalError::User(UserError::DuplicateUsername { .. }) => {
                Self::duplicate("duplicate_username", "Username already exists")
            }
            InternalError::User(UserError::DuplicateEmail { .. }) => {
                Self::duplicate("duplicate_email", "Email already exists")
            }
            InternalError::User(UserError::UserIdNotFound { .. }) => Self::not_found("User"),

            InternalError::Cocktail(CocktailError::CocktailNotFound { .. }) => {
                Self::not_found("Cocktail")
            }
            InternalError::Cocktail(CocktailError::DuplicateIngredient { name }) => {
                tracing::warn!("Ingredient insert collided: {}", name);
                Self::duplicate("duplicate_ingredient", "Ingredient already exists")
            }

            InternalError::Review(ReviewError::ReviewNotFound { .. }) => Self::not_found("Review"),
            InternalError::Review(ReviewError::NotOwner { review_id, requester_id }) => {
                tracing::warn!("User {} attempted to modify review {}", requester_id, review_id);
                Self::forbidden()
            }

            InternalError::Database(_) | InternalError::Crypto { .. } => {
                tracing::error!("Internal failure: {}", err);
                Self::internal_server_error()
            }
        }
    }

    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ResourceError::BadRequest(json)
            | ResourceError::Duplicate(json)
            | ResourceError::Unauthorized(json)
            | ResourceError::Forbidden(json)
            | ResourceError::NotFound(json)
            | ResourceError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for ResourceError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
