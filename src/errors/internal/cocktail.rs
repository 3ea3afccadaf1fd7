use thiserror::Error;

#[derive(Error, Debug)]
pub enum CocktailError {
    #[error("Cocktail not found: {cocktail_id}")]
    CocktailNotFound { cocktail_id: i32 },

    /// Lost an ingredient insert race against a concurrent writer
    #[error("Ingredient already exists: {name}")]
    DuplicateIngredient { name: String },
}
