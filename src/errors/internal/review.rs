use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Review not found: {review_id}")]
    ReviewNotFound { review_id: i32 },

    #[error("User {requester_id} does not own review {review_id}")]
    NotOwner { review_id: i32, requester_id: i32 },
}
