use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::BearerAuth;
use crate::api::helpers::authenticated_context;
use crate::app_data::AppData;
use crate::coordinators::UserCoordinator;
use crate::errors::ResourceError;
use crate::services::TokenService;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::{ProfileResponse, UpdateProfileRequest};

/// Profile endpoints for the authenticated user
pub struct UserApi {
    coordinator: UserCoordinator,
    token_service: Arc<TokenService>,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_service: app_data.token_service.clone(),
            coordinator: UserCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// Account profile endpoints
    User,
}

#[OpenApi]
impl UserApi {
    /// Get the caller's profile and reviews
    #[oai(path = "/user/profile", method = "get", tag = "UserTags::User")]
    async fn get_profile(&self, req: &Request, auth: BearerAuth) -> Result<Json<ProfileResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        let profile = self.coordinator.get_profile(&ctx).await?;

        Ok(Json(profile.into()))
    }

    /// Update the caller's username, email or password
    #[oai(path = "/user/profile", method = "put", tag = "UserTags::User")]
    async fn update_profile(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<MessageResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        self.coordinator.update_profile(&ctx, body.0.into()).await?;

        Ok(Json(MessageResponse::new("Profile updated successfully")))
    }

    /// Delete the caller's account and all of their reviews
    #[oai(path = "/user/profile", method = "delete", tag = "UserTags::User")]
    async fn delete_profile(&self, req: &Request, auth: BearerAuth) -> Result<Json<MessageResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        self.coordinator.delete_account(&ctx).await?;

        Ok(Json(MessageResponse::new("Account deleted successfully")))
    }
}
