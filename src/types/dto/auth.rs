use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::types::db::user;

/// Request model for account registration
#[derive(Object, Debug)]
pub struct RegisterRequest {
    pub username: Option<String>,
    /// Stored lowercase
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response model for a created account
#[derive(Object, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

/// API response for the register endpoint
#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Account created
    #[oai(status = 201)]
    Created(Json<RegisterResponse>),
}

/// Request model for user login
#[derive(Object, Debug)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: Option<String>,

    /// Password for authentication
    pub password: Option<String>,
}

/// Public view of an account
#[derive(Object, Debug)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Response model containing the access token
#[derive(Object, Debug)]
pub struct LoginResponse {
    /// JWT access token for API authentication
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,

    pub user: UserSummary,
}

/// Response model for the verify-token endpoint
#[derive(Object, Debug)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub user_id: i32,
    pub username: String,
}
