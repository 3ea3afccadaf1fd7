use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::context::RequestContext;

/// Orchestrates registration, login and token verification
pub struct AuthCoordinator {
    connections: DatabaseConnections,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            connections: app_data.connections.clone(),
            user_store: app_data.user_store.clone(),
            token_service: app_data.token_service.clone(),
        }
    }

    /// Register a new account in one transaction
    pub async fn register(
        &self,
        ctx: &RequestContext,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let txn = self.connections.begin_transaction().await?;

        let user = match self.user_store.create_user(&txn, username, email, password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(request_id = %ctx.request_id, "Registration rejected: {}", e);
                return Err(e);
            }
        };

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token
    ///
    /// # Returns
    /// * `Ok((token, user))` - Signed access token and the authenticated user
    /// * `Err(CredentialError::InvalidCredentials)` - Unknown user or wrong password
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<(String, user::Model), InternalError> {
        let user = match self
            .user_store
            .authenticate(&self.connections.catalog, username, password)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(request_id = %ctx.request_id, ip = ?ctx.ip_address, "Login failed: {}", e);
                return Err(e);
            }
        };

        let token = self.token_service.generate_jwt(user.id)?;

        tracing::info!(request_id = %ctx.request_id, user_id = user.id, "User logged in");
        Ok((token, user))
    }

    /// Validate a bearer token and return the user id it names
    ///
    /// Pure computation; the user may since have been deleted.
    pub fn authenticate(&self, token: &str) -> Result<i32, InternalError> {
        self.token_service.authenticate(token)
    }

    /// Resolve the authenticated user, re-checking that they still exist
    pub async fn verify_token(&self, ctx: &RequestContext) -> Result<user::Model, InternalError> {
        let user_id = ctx.require_user_id()?;
        self.user_store.get_user(&self.connections.catalog, user_id).await
    }

    /// Access token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.token_service.expires_in()
    }
}
