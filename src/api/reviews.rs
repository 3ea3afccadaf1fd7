use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::api::BearerAuth;
use crate::api::helpers::{authenticated_context, present, required_field};
use crate::app_data::AppData;
use crate::coordinators::ReviewCoordinator;
use crate::errors::ResourceError;
use crate::services::TokenService;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::review::{CreateReviewApiResponse, CreateReviewRequest, ReviewResponse, UpdateReviewRequest};

/// Review endpoints; only a review's author may change or delete it
pub struct ReviewApi {
    coordinator: ReviewCoordinator,
    token_service: Arc<TokenService>,
}

impl ReviewApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_service: app_data.token_service.clone(),
            coordinator: ReviewCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ReviewTags {
    /// Cocktail reviews
    Reviews,
}

#[OpenApi]
impl ReviewApi {
    /// Review a cocktail as the authenticated user
    #[oai(path = "/cocktails/:id/reviews", method = "post", tag = "ReviewTags::Reviews")]
    async fn create_review(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<CreateReviewRequest>,
    ) -> Result<CreateReviewApiResponse, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;
        let body = body.0;

        let content = required_field(body.content, "content")?;
        let rating = present(body.rating, "rating")?;

        let review = self
            .coordinator
            .create_review(&ctx, id.0, &content, Some(rating))
            .await?;

        Ok(CreateReviewApiResponse::Created(Json(review.into())))
    }

    /// Edit one's own review
    #[oai(path = "/reviews/:id", method = "put", tag = "ReviewTags::Reviews")]
    async fn update_review(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateReviewRequest>,
    ) -> Result<Json<ReviewResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        let review = self.coordinator.update_review(&ctx, id.0, body.0.into()).await?;

        Ok(Json(review.into()))
    }

    /// Delete one's own review
    #[oai(path = "/reviews/:id", method = "delete", tag = "ReviewTags::Reviews")]
    async fn delete_review(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        self.coordinator.delete_review(&ctx, id.0).await?;

        Ok(Json(MessageResponse::new("Review deleted successfully")))
    }
}
