use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::errors::InternalError;
use crate::stores::{ReviewStore, UserStore};
use crate::types::db::user;
use crate::types::internal::catalog::{UserPatch, UserProfile};
use crate::types::internal::context::RequestContext;

/// Handles profile reads and account lifecycle for the authenticated user
pub struct UserCoordinator {
    connections: DatabaseConnections,
    user_store: Arc<UserStore>,
    review_store: Arc<ReviewStore>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            connections: app_data.connections.clone(),
            user_store: app_data.user_store.clone(),
            review_store: app_data.review_store.clone(),
        }
    }

    /// The authenticated user and every review they wrote
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<UserProfile, InternalError> {
        let user_id = ctx.require_user_id()?;
        let conn = &self.connections.catalog;

        let user = self.user_store.get_user(conn, user_id).await?;
        let reviews = self.review_store.list_for_user(conn, user_id).await?;

        Ok(UserProfile { user, reviews })
    }

    pub async fn update_profile(&self, ctx: &RequestContext, patch: UserPatch) -> Result<user::Model, InternalError> {
        let user_id = ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        let user = self.user_store.update_user(&txn, user_id, patch).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, "Profile updated");
        Ok(user)
    }

    /// Delete the authenticated user's account together with their reviews
    pub async fn delete_account(&self, ctx: &RequestContext) -> Result<(), InternalError> {
        let user_id = ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        self.user_store.delete_user(&txn, user_id).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, "Account deleted");
        Ok(())
    }
}
