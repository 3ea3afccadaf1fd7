use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::coordinators::CocktailCoordinator;
use crate::errors::ResourceError;
use crate::types::dto::cocktail::IngredientResponse;

pub struct IngredientApi {
    coordinator: CocktailCoordinator,
}

impl IngredientApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            coordinator: CocktailCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum IngredientTags {
    /// Shared ingredient list
    Ingredients,
}

#[OpenApi]
impl IngredientApi {
    /// List every known ingredient, ordered by name
    #[oai(path = "/ingredients", method = "get", tag = "IngredientTags::Ingredients")]
    async fn list_ingredients(&self) -> Result<Json<Vec<IngredientResponse>>, ResourceError> {
        let ingredients = self.coordinator.list_ingredients().await?;

        Ok(Json(ingredients.into_iter().map(Into::into).collect()))
    }
}
