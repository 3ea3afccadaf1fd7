use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::errors::internal::{CocktailError, database::unique_violation};
use crate::types::db::ingredient;

/// IngredientStore owns the shared, name-unique ingredient rows
pub struct IngredientStore;

impl IngredientStore {
    pub fn new() -> Self {
        Self
    }

    /// Return the ingredient with exactly this name, creating it if absent
    ///
    /// # Returns
    /// * `Ok(ingredient::Model)` - Existing or newly created row
    /// * `Err(CocktailError::DuplicateIngredient)` - A concurrent writer inserted the same name first
    pub async fn find_or_create<C>(&self, conn: &C, name: &str) -> Result<ingredient::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        let existing = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq(name))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_ingredient", e))?;

        if let Some(ingredient) = existing {
            return Ok(ingredient);
        }

        ingredient::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(_) => CocktailError::DuplicateIngredient { name: name.to_string() }.into(),
            None => InternalError::database("create_ingredient", e),
        })
    }

    /// All ingredients ordered by name
    pub async fn list_ingredients<C>(&self, conn: &C) -> Result<Vec<ingredient::Model>, InternalError>
    where
        C: ConnectionTrait,
    {
        ingredient::Entity::find()
            .order_by_asc(ingredient::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_ingredients", e))
    }
}

impl Default for IngredientStore {
    fn default() -> Self {
        Self::new()
    }
}
