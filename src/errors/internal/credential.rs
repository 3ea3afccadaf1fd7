use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown username and wrong password both collapse to this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
