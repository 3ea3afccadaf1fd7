// Stores layer - Data access; every method takes the connection or transaction to use
pub mod cocktail_store;
pub mod ingredient_store;
pub mod review_store;
pub mod user_store;

pub use cocktail_store::CocktailStore;
pub use ingredient_store::IngredientStore;
pub use review_store::ReviewStore;
pub use user_store::UserStore;
