use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::errors::internal::{CocktailError, ReviewError, UserError};
use crate::types::db::{cocktail, review, user};
use crate::types::internal::catalog::{ProfileReview, ReviewPatch, ReviewWithAuthor};

/// Lowest and highest accepted star rating
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// ReviewStore manages reviews and enforces that only their author may change them
pub struct ReviewStore;

impl ReviewStore {
    pub fn new() -> Self {
        Self
    }

    /// Create a review of `cocktail_id` written by `user_id`
    ///
    /// # Returns
    /// * `Ok(ReviewWithAuthor)` - The stored review
    /// * `Err(InternalError::Validation)` - Empty content, missing or out-of-range rating
    /// * `Err(CocktailError::CocktailNotFound)` - No such cocktail
    /// * `Err(UserError::UserIdNotFound)` - The author no longer exists
    pub async fn create_review<C>(
        &self,
        conn: &C,
        cocktail_id: i32,
        user_id: i32,
        content: &str,
        rating: Option<i32>,
    ) -> Result<ReviewWithAuthor, InternalError>
    where
        C: ConnectionTrait,
    {
        Self::validate_content(content)?;
        let rating = rating.ok_or_else(|| InternalError::required("rating"))?;
        Self::validate_rating(rating)?;

        cocktail::Entity::find_by_id(cocktail_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_cocktail", e))?
            .ok_or(CocktailError::CocktailNotFound { cocktail_id })?;

        let author = user::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user", e))?
            .ok_or(UserError::UserIdNotFound { user_id })?;

        let review = review::ActiveModel {
            content: Set(content.to_string()),
            rating: Set(rating),
            user_id: Set(user_id),
            cocktail_id: Set(cocktail_id),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("create_review", e))?;

        Ok(ReviewWithAuthor {
            review,
            username: author.username,
        })
    }

    /// Get a review together with its author's username
    pub async fn get_review<C>(&self, conn: &C, review_id: i32) -> Result<ReviewWithAuthor, InternalError>
    where
        C: ConnectionTrait,
    {
        let found = review::Entity::find_by_id(review_id)
            .find_also_related(user::Entity)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_review", e))?;

        match found {
            Some((review, author)) => Ok(Self::with_author(review, author)),
            None => Err(ReviewError::ReviewNotFound { review_id }.into()),
        }
    }

    /// Apply a partial update to a review owned by `requester_id`
    ///
    /// # Returns
    /// * `Err(ReviewError::ReviewNotFound)` - No such review
    /// * `Err(ReviewError::NotOwner)` - The requester did not write it; nothing changes
    pub async fn update_review<C>(
        &self,
        conn: &C,
        review_id: i32,
        requester_id: i32,
        patch: ReviewPatch,
    ) -> Result<ReviewWithAuthor, InternalError>
    where
        C: ConnectionTrait,
    {
        let existing = self.get_owned(conn, review_id, requester_id).await?;
        let mut active: review::ActiveModel = existing.into();

        if let Some(content) = patch.content {
            Self::validate_content(&content)?;
            active.content = Set(content);
        }
        if let Some(rating) = patch.rating {
            Self::validate_rating(rating)?;
            active.rating = Set(rating);
        }

        if active.is_changed() {
            active
                .update(conn)
                .await
                .map_err(|e| InternalError::database("update_review", e))?;
        }

        self.get_review(conn, review_id).await
    }

    /// Delete a review owned by `requester_id`
    pub async fn delete_review<C>(&self, conn: &C, review_id: i32, requester_id: i32) -> Result<(), InternalError>
    where
        C: ConnectionTrait,
    {
        self.get_owned(conn, review_id, requester_id).await?;

        review::Entity::delete_by_id(review_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_review", e))?;

        Ok(())
    }

    /// Reviews of one cocktail, oldest first
    pub async fn list_for_cocktail<C>(&self, conn: &C, cocktail_id: i32) -> Result<Vec<ReviewWithAuthor>, InternalError>
    where
        C: ConnectionTrait,
    {
        let rows = review::Entity::find()
            .filter(review::Column::CocktailId.eq(cocktail_id))
            .find_also_related(user::Entity)
            .order_by_asc(review::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_cocktail_reviews", e))?;

        Ok(rows
            .into_iter()
            .map(|(review, author)| Self::with_author(review, author))
            .collect())
    }

    /// Reviews written by one user, each with the reviewed cocktail's name
    pub async fn list_for_user<C>(&self, conn: &C, user_id: i32) -> Result<Vec<ProfileReview>, InternalError>
    where
        C: ConnectionTrait,
    {
        let rows = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .find_also_related(cocktail::Entity)
            .order_by_asc(review::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_user_reviews", e))?;

        Ok(rows
            .into_iter()
            .map(|(review, cocktail)| ProfileReview {
                review,
                cocktail_name: cocktail.map(|c| c.name).unwrap_or_default(),
            })
            .collect())
    }

    async fn get_owned<C>(&self, conn: &C, review_id: i32, requester_id: i32) -> Result<review::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        let review = review::Entity::find_by_id(review_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_review", e))?
            .ok_or(ReviewError::ReviewNotFound { review_id })?;

        if review.user_id != requester_id {
            return Err(ReviewError::NotOwner {
                review_id,
                requester_id,
            }
            .into());
        }

        Ok(review)
    }

    fn with_author(review: review::Model, author: Option<user::Model>) -> ReviewWithAuthor {
        ReviewWithAuthor {
            review,
            username: author.map(|u| u.username).unwrap_or_default(),
        }
    }

    fn validate_content(content: &str) -> Result<(), InternalError> {
        if content.trim().is_empty() {
            return Err(InternalError::required("content"));
        }
        Ok(())
    }

    fn validate_rating(rating: i32) -> Result<(), InternalError> {
        if !RATING_RANGE.contains(&rating) {
            return Err(InternalError::validation(
                "rating",
                format!(
                    "rating must be between {} and {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end()
                ),
            ));
        }
        Ok(())
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}
