use std::sync::Arc;

use crate::config::{DatabaseConnections, SecretManager};
use crate::services::{PasswordHasher, TokenService};
use crate::stores::{CocktailStore, IngredientStore, ReviewStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once at startup and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(connections, secrets)
///   ├─ connections (DatabaseConnections)
///   ├─ token_service (Arc<TokenService>)
///   ├─ user_store (owns the password hasher)
///   ├─ ingredient_store / review_store
///   └─ cocktail_store (shares ingredient_store and review_store)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub token_service: Arc<TokenService>,
    pub user_store: Arc<UserStore>,
    pub ingredient_store: Arc<IngredientStore>,
    pub review_store: Arc<ReviewStore>,
    pub cocktail_store: Arc<CocktailStore>,
}

impl AppData {
    /// Build application data from loaded secrets
    pub fn init(connections: DatabaseConnections, secrets: &SecretManager) -> Self {
        tracing::info!("Initializing AppData...");

        let password_hasher = Arc::new(PasswordHasher::new(secrets.password_pepper().to_string()));
        let token_service = Arc::new(TokenService::new(secrets.jwt_secret().to_string()));

        let app_data = Self::new(connections, password_hasher, token_service);
        tracing::info!("AppData initialized: {}", app_data.token_service);

        app_data
    }

    /// Build application data from ready-made services
    pub fn new(
        connections: DatabaseConnections,
        password_hasher: Arc<PasswordHasher>,
        token_service: Arc<TokenService>,
    ) -> Self {
        let ingredient_store = Arc::new(IngredientStore::new());
        let review_store = Arc::new(ReviewStore::new());
        let cocktail_store = Arc::new(CocktailStore::new(ingredient_store.clone(), review_store.clone()));
        let user_store = Arc::new(UserStore::new(password_hasher.clone()));

        Self {
            connections,
            token_service,
            user_store,
            ingredient_store,
            review_store,
            cocktail_store,
        }
    }
}
