use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::errors::InternalError;
use crate::stores::ReviewStore;
use crate::types::internal::catalog::{ReviewPatch, ReviewWithAuthor};
use crate::types::internal::context::RequestContext;

/// Orchestrates review writes; the author is always the token's user
pub struct ReviewCoordinator {
    connections: DatabaseConnections,
    review_store: Arc<ReviewStore>,
}

impl ReviewCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            connections: app_data.connections.clone(),
            review_store: app_data.review_store.clone(),
        }
    }

    pub async fn create_review(
        &self,
        ctx: &RequestContext,
        cocktail_id: i32,
        content: &str,
        rating: Option<i32>,
    ) -> Result<ReviewWithAuthor, InternalError> {
        let user_id = ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        let created = self
            .review_store
            .create_review(&txn, cocktail_id, user_id, content, rating)
            .await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id,
            cocktail_id,
            review_id = created.review.id,
            "Review created"
        );
        Ok(created)
    }

    pub async fn update_review(
        &self,
        ctx: &RequestContext,
        review_id: i32,
        patch: ReviewPatch,
    ) -> Result<ReviewWithAuthor, InternalError> {
        let user_id = ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        let updated = self.review_store.update_review(&txn, review_id, user_id, patch).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, review_id, "Review updated");
        Ok(updated)
    }

    pub async fn delete_review(&self, ctx: &RequestContext, review_id: i32) -> Result<(), InternalError> {
        let user_id = ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        self.review_store.delete_review(&txn, review_id, user_id).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, review_id, "Review deleted");
        Ok(())
    }
}
