use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::errors::InternalError;
use crate::stores::{CocktailStore, IngredientStore};
use crate::types::db::ingredient;
use crate::types::internal::catalog::{CocktailDetails, CocktailPatch, NewCocktail};
use crate::types::internal::context::RequestContext;

/// Orchestrates catalog reads and authenticated catalog edits
pub struct CocktailCoordinator {
    connections: DatabaseConnections,
    cocktail_store: Arc<CocktailStore>,
    ingredient_store: Arc<IngredientStore>,
}

impl CocktailCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            connections: app_data.connections.clone(),
            cocktail_store: app_data.cocktail_store.clone(),
            ingredient_store: app_data.ingredient_store.clone(),
        }
    }

    pub async fn list_cocktails(&self) -> Result<Vec<CocktailDetails>, InternalError> {
        self.cocktail_store.list_cocktails(&self.connections.catalog).await
    }

    pub async fn get_cocktail(&self, cocktail_id: i32) -> Result<CocktailDetails, InternalError> {
        self.cocktail_store
            .get_cocktail(&self.connections.catalog, cocktail_id)
            .await
    }

    /// Search by name and/or ingredient; blank terms are ignored
    pub async fn search_cocktails(
        &self,
        name: Option<&str>,
        ingredient_name: Option<&str>,
    ) -> Result<Vec<CocktailDetails>, InternalError> {
        let name = name.filter(|term| !term.is_empty());
        let ingredient_name = ingredient_name.filter(|term| !term.is_empty());

        self.cocktail_store
            .search_cocktails(&self.connections.catalog, name, ingredient_name)
            .await
    }

    pub async fn list_ingredients(&self) -> Result<Vec<ingredient::Model>, InternalError> {
        self.ingredient_store
            .list_ingredients(&self.connections.catalog)
            .await
    }

    /// Create a cocktail and its ingredient lines atomically
    pub async fn create_cocktail(
        &self,
        ctx: &RequestContext,
        new_cocktail: NewCocktail,
    ) -> Result<CocktailDetails, InternalError> {
        ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        let created = self.cocktail_store.create_cocktail(&txn, new_cocktail).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor(),
            cocktail_id = created.cocktail.id,
            "Cocktail created"
        );
        Ok(created)
    }

    pub async fn update_cocktail(
        &self,
        ctx: &RequestContext,
        cocktail_id: i32,
        patch: CocktailPatch,
    ) -> Result<CocktailDetails, InternalError> {
        ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        let updated = self.cocktail_store.update_cocktail(&txn, cocktail_id, patch).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor(), cocktail_id, "Cocktail updated");
        Ok(updated)
    }

    /// Delete a cocktail with its reviews and ingredient lines atomically
    pub async fn delete_cocktail(&self, ctx: &RequestContext, cocktail_id: i32) -> Result<(), InternalError> {
        ctx.require_user_id()?;
        let txn = self.connections.begin_transaction().await?;

        self.cocktail_store.delete_cocktail(&txn, cocktail_id).await?;

        DatabaseConnections::commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor(), cocktail_id, "Cocktail deleted");
        Ok(())
    }
}
