use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, SecurityScheme, Tags, auth::Bearer, payload::Json};

use crate::api::helpers::required_field;
use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::AuthError;
use crate::types::dto::auth::{
    LoginRequest, LoginResponse, RegisterApiResponse, RegisterRequest, RegisterResponse, VerifyTokenResponse,
};
use crate::types::internal::context::RequestContext;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct BearerAuth(pub Bearer);

/// Authentication API endpoints
pub struct AuthApi {
    coordinator: AuthCoordinator,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: AuthCoordinator::new(app_data),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Create an account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, req: &Request, body: Json<RegisterRequest>) -> Result<RegisterApiResponse, AuthError> {
        let ctx = RequestContext::from_request(req);
        let body = body.0;

        let username = required_field(body.username, "username")?;
        let email = required_field(body.email, "email")?;
        let password = required_field(body.password, "password")?;

        let user = self
            .coordinator
            .register(&ctx, &username, &email, &password)
            .await?;

        Ok(RegisterApiResponse::Created(Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        })))
    }

    /// Login with username and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let body = body.0;

        let username = required_field(body.username, "username")?;
        let password = required_field(body.password, "password")?;

        let (token, user) = self.coordinator.login(&ctx, &username, &password).await?;

        Ok(Json(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.coordinator.expires_in(),
            user: user.into(),
        }))
    }

    /// Check that a token is valid and its user still exists
    #[oai(path = "/verify-token", method = "post", tag = "AuthTags::Authentication")]
    async fn verify_token(&self, req: &Request, auth: BearerAuth) -> Result<Json<VerifyTokenResponse>, AuthError> {
        let user_id = self.coordinator.authenticate(&auth.0.token)?;
        let ctx = RequestContext::from_request(req).authenticated(user_id);

        let user = self.coordinator.verify_token(&ctx).await?;

        Ok(Json(VerifyTokenResponse {
            valid: true,
            user_id: user.id,
            username: user.username,
        }))
    }
}
