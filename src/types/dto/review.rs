use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::types::dto::common::format_timestamp;
use crate::types::internal::catalog::{ReviewPatch, ReviewWithAuthor};

#[derive(Object, Debug)]
pub struct CreateReviewRequest {
    pub content: Option<String>,
    /// 1 to 5 inclusive
    pub rating: Option<i32>,
}

/// Absent fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateReviewRequest {
    pub content: Option<String>,
    pub rating: Option<i32>,
}

impl From<UpdateReviewRequest> for ReviewPatch {
    fn from(request: UpdateReviewRequest) -> Self {
        Self {
            content: request.content,
            rating: request.rating,
        }
    }
}

/// Review with the reviewer's username in place of the user id
#[derive(Object, Debug)]
pub struct ReviewResponse {
    pub id: i32,
    pub content: String,
    pub rating: i32,
    /// Username of the reviewer
    pub user: String,
    pub created_at: String,
}

impl From<ReviewWithAuthor> for ReviewResponse {
    fn from(entry: ReviewWithAuthor) -> Self {
        Self {
            id: entry.review.id,
            content: entry.review.content,
            rating: entry.review.rating,
            user: entry.username,
            created_at: format_timestamp(entry.review.created_at),
        }
    }
}

/// API response for the create review endpoint
#[derive(ApiResponse)]
pub enum CreateReviewApiResponse {
    /// Review created
    #[oai(status = 201)]
    Created(Json<ReviewResponse>),
}
