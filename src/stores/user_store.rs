use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, UserError, database::unique_violation};
use crate::services::PasswordHasher;
use crate::types::db::{review, user};
use crate::types::internal::catalog::UserPatch;

/// UserStore manages accounts and their credentials
pub struct UserStore {
    password_hasher: Arc<PasswordHasher>,
}

impl UserStore {
    pub fn new(password_hasher: Arc<PasswordHasher>) -> Self {
        Self { password_hasher }
    }

    /// Create a new account
    ///
    /// The email is lowercased before the uniqueness check and before storage.
    ///
    /// # Arguments
    /// * `conn` - Connection or transaction to write through
    /// * `username` - Case-sensitive, unique username
    /// * `email` - Email address, unique after lowercasing
    /// * `password` - Plaintext password; only its hash is stored
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user
    /// * `Err(UserError::DuplicateUsername | DuplicateEmail)` - Collision, nothing written
    pub async fn create_user<C>(
        &self,
        conn: &C,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        let email = email.to_lowercase();

        if self.find_by_username(conn, username).await?.is_some() {
            return Err(UserError::DuplicateUsername {
                username: username.to_string(),
            }
            .into());
        }
        if self.find_by_email(conn, &email).await?.is_some() {
            return Err(UserError::DuplicateEmail { email }.into());
        }

        let password_hash = self.password_hasher.hash(password)?;

        let new_user = user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        new_user
            .insert(conn)
            .await
            .map_err(|e| Self::map_write_error("create_user", e, username, &email))
    }

    /// Verify a username/password pair
    ///
    /// Unknown username and wrong password both yield
    /// `CredentialError::InvalidCredentials`, after the same amount of hashing work.
    pub async fn authenticate<C>(&self, conn: &C, username: &str, password: &str) -> Result<user::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        let Some(user) = self.find_by_username(conn, username).await? else {
            self.password_hasher.verify_dummy(password)?;
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Get a user by id
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The user
    /// * `Err(UserError::UserIdNotFound)` - No such user
    pub async fn get_user<C>(&self, conn: &C, user_id: i32) -> Result<user::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        user::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_user", e))?
            .ok_or_else(|| UserError::UserIdNotFound { user_id }.into())
    }

    /// Apply a partial update to a user
    ///
    /// Uniqueness is only re-checked for fields whose value actually changes.
    /// A supplied password is re-hashed.
    pub async fn update_user<C>(&self, conn: &C, user_id: i32, patch: UserPatch) -> Result<user::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        let existing = self.get_user(conn, user_id).await?;
        let mut active: user::ActiveModel = existing.clone().into();

        if let Some(username) = patch.username {
            if username.is_empty() {
                return Err(InternalError::validation("username", "username cannot be empty"));
            }
            if username != existing.username {
                if self.find_by_username(conn, &username).await?.is_some() {
                    return Err(UserError::DuplicateUsername { username }.into());
                }
                active.username = Set(username);
            }
        }

        if let Some(email) = patch.email {
            let email = email.to_lowercase();
            if email.is_empty() {
                return Err(InternalError::validation("email", "email cannot be empty"));
            }
            if email != existing.email {
                if self.find_by_email(conn, &email).await?.is_some() {
                    return Err(UserError::DuplicateEmail { email }.into());
                }
                active.email = Set(email);
            }
        }

        if let Some(password) = patch.password {
            if password.is_empty() {
                return Err(InternalError::validation("password", "password cannot be empty"));
            }
            active.password_hash = Set(self.password_hasher.hash(&password)?);
        }

        if !active.is_changed() {
            return Ok(existing);
        }

        active
            .update(conn)
            .await
            .map_err(|e| Self::map_write_error("update_user", e, &existing.username, &existing.email))
    }

    /// Delete a user and, first, every review they wrote
    pub async fn delete_user<C>(&self, conn: &C, user_id: i32) -> Result<(), InternalError>
    where
        C: ConnectionTrait,
    {
        self.get_user(conn, user_id).await?;

        review::Entity::delete_many()
            .filter(review::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user_reviews", e))?;

        user::Entity::delete_by_id(user_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        Ok(())
    }

    async fn find_by_username<C>(&self, conn: &C, username: &str) -> Result<Option<user::Model>, InternalError>
    where
        C: ConnectionTrait,
    {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    async fn find_by_email<C>(&self, conn: &C, email: &str) -> Result<Option<user::Model>, InternalError>
    where
        C: ConnectionTrait,
    {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Translate a unique-constraint failure into the matching duplicate error
    fn map_write_error(operation: &str, err: DbErr, username: &str, email: &str) -> InternalError {
        match unique_violation(&err) {
            Some(message) if message.contains("email") => UserError::DuplicateEmail {
                email: email.to_string(),
            }
            .into(),
            Some(_) => UserError::DuplicateUsername {
                username: username.to_string(),
            }
            .into(),
            None => InternalError::database(operation, err),
        }
    }
}
