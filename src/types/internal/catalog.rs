use crate::types::db::{cocktail, review, user};

/// One ingredient line of a cocktail, by ingredient name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientEntry {
    pub name: String,
    pub amount: String,
}

impl IngredientEntry {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCocktail {
    pub name: String,
    pub image_url: String,
    pub instructions: String,
    pub glass_type: String,
    pub ingredients: Vec<IngredientEntry>,
}

/// Partial cocktail update
///
/// `None` keeps the stored value. `Some(ingredients)` replaces every
/// ingredient line of the cocktail.
#[derive(Debug, Clone, Default)]
pub struct CocktailPatch {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Option<String>,
    pub glass_type: Option<String>,
    pub ingredients: Option<Vec<IngredientEntry>>,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub content: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithAuthor {
    pub review: review::Model,
    pub username: String,
}

/// Cocktail with its ingredient lines resolved to names
///
/// `reviews` is only populated for single-cocktail reads.
#[derive(Debug, Clone, PartialEq)]
pub struct CocktailDetails {
    pub cocktail: cocktail::Model,
    pub ingredients: Vec<IngredientAmount>,
    pub reviews: Vec<ReviewWithAuthor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReview {
    pub review: review::Model,
    pub cocktail_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: user::Model,
    pub reviews: Vec<ProfileReview>,
}
