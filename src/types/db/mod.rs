// Database entities - SeaORM models
pub mod cocktail;
pub mod cocktail_ingredient;
pub mod ingredient;
pub mod review;
pub mod user;
