use thiserror::Error;

pub mod cocktail;
pub mod credential;
pub mod database;
pub mod review;
pub mod user;

pub use cocktail::CocktailError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use review::ReviewError;
pub use user::UserError;

/// Internal error type for store, service and coordinator operations
///
/// Infrastructure errors (database, crypto) are shared; domain errors
/// are grouped per aggregate. Not exposed via API - endpoints convert to
/// AuthError or ResourceError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// A required field is missing or malformed; nothing was written
    #[error("Validation failed for {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Cocktail(#[from] CocktailError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for the common "`field` is required" validation failure
    pub fn required(field: &str) -> Self {
        Self::validation(field, format!("{} is required", field))
    }
}
