use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::types::db::ingredient;
use crate::types::dto::review::ReviewResponse;
use crate::types::internal::catalog::{CocktailDetails, IngredientAmount, IngredientEntry};

/// An ingredient line as supplied by the client
#[derive(Object, Debug, Clone)]
pub struct IngredientInput {
    /// Required; matched exactly against existing ingredients
    pub name: Option<String>,

    /// Free-form quantity such as "2 oz"
    pub amount: Option<String>,
}

impl From<IngredientInput> for IngredientEntry {
    fn from(input: IngredientInput) -> Self {
        Self {
            name: input.name.unwrap_or_default(),
            amount: input.amount.unwrap_or_default(),
        }
    }
}

/// Request model for creating a cocktail
#[derive(Object, Debug)]
pub struct CreateCocktailRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Option<String>,
    pub glass_type: Option<String>,
    pub ingredients: Option<Vec<IngredientInput>>,
}

/// Request model for updating a cocktail
///
/// Scalar fields are patched individually. A present `ingredients` list
/// replaces every existing ingredient line.
#[derive(Object, Debug)]
pub struct UpdateCocktailRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Option<String>,
    pub glass_type: Option<String>,
    pub ingredients: Option<Vec<IngredientInput>>,
}

/// Response model for a created cocktail
#[derive(Object, Debug)]
pub struct CocktailCreatedResponse {
    pub message: String,
    pub id: i32,
}

/// API response for the create cocktail endpoint
#[derive(ApiResponse)]
pub enum CreateCocktailApiResponse {
    /// Cocktail created
    #[oai(status = 201)]
    Created(Json<CocktailCreatedResponse>),
}

#[derive(Object, Debug)]
pub struct IngredientAmountResponse {
    pub name: String,
    pub amount: String,
}

impl From<IngredientAmount> for IngredientAmountResponse {
    fn from(line: IngredientAmount) -> Self {
        Self {
            name: line.name,
            amount: line.amount,
        }
    }
}

/// Cocktail as returned by listing and search
#[derive(Object, Debug)]
pub struct CocktailSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub instructions: String,
    pub glass_type: String,
    pub ingredients: Vec<IngredientAmountResponse>,
}

impl From<CocktailDetails> for CocktailSummaryResponse {
    fn from(details: CocktailDetails) -> Self {
        Self {
            id: details.cocktail.id,
            name: details.cocktail.name,
            image_url: details.cocktail.image_url,
            instructions: details.cocktail.instructions,
            glass_type: details.cocktail.glass_type,
            ingredients: details.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cocktail with its reviews
#[derive(Object, Debug)]
pub struct CocktailDetailResponse {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub instructions: String,
    pub glass_type: String,
    pub ingredients: Vec<IngredientAmountResponse>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<CocktailDetails> for CocktailDetailResponse {
    fn from(details: CocktailDetails) -> Self {
        Self {
            id: details.cocktail.id,
            name: details.cocktail.name,
            image_url: details.cocktail.image_url,
            instructions: details.cocktail.instructions,
            glass_type: details.cocktail.glass_type,
            ingredients: details.ingredients.into_iter().map(Into::into).collect(),
            reviews: details.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Object, Debug)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
}

impl From<ingredient::Model> for IngredientResponse {
    fn from(model: ingredient::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
