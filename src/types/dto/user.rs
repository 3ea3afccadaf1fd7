use poem_openapi::Object;

use crate::types::dto::common::format_timestamp;
use crate::types::internal::catalog::{ProfileReview, UserPatch, UserProfile};

/// A review as listed on its author's profile
#[derive(Object, Debug)]
pub struct ProfileReviewResponse {
    pub id: i32,
    pub cocktail_name: String,
    pub content: String,
    pub rating: i32,
    pub created_at: String,
}

impl From<ProfileReview> for ProfileReviewResponse {
    fn from(entry: ProfileReview) -> Self {
        Self {
            id: entry.review.id,
            cocktail_name: entry.cocktail_name,
            content: entry.review.content,
            rating: entry.review.rating,
            created_at: format_timestamp(entry.review.created_at),
        }
    }
}

/// Response model for the profile endpoint
#[derive(Object, Debug)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub reviews: Vec<ProfileReviewResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            username: profile.user.username,
            email: profile.user.email,
            reviews: profile.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request model for profile updates; absent fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for UserPatch {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}
