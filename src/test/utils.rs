// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use argon2::Params;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::services::{PasswordHasher, TokenService};
use crate::stores::{CocktailStore, IngredientStore, ReviewStore, UserStore};
use crate::types::db::user;
use crate::types::internal::catalog::{CocktailDetails, IngredientEntry, NewCocktail};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD: &str = "password";

/// Creates an in-memory catalog database with migrations applied
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Argon2 hasher with minimal cost so tests stay fast
pub fn test_password_hasher() -> Arc<PasswordHasher> {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    Arc::new(PasswordHasher::with_params(
        "test-pepper-for-unit-tests".to_string(),
        params,
    ))
}

/// Creates `<name>` / `<name>@example.com` with password [`TEST_PASSWORD`]
pub async fn create_test_user(db: &DatabaseConnection, store: &UserStore, name: &str) -> user::Model {
    store
        .create_user(db, name, &format!("{}@example.com", name), TEST_PASSWORD)
        .await
        .expect("Failed to create test user")
}

pub fn test_cocktail_store() -> CocktailStore {
    CocktailStore::new(Arc::new(IngredientStore::new()), Arc::new(ReviewStore::new()))
}

/// Creates a cocktail with one "1 oz" line per ingredient name
pub async fn create_test_cocktail(
    db: &DatabaseConnection,
    name: &str,
    ingredients: &[&str],
) -> CocktailDetails {
    let new_cocktail = NewCocktail {
        name: name.to_string(),
        image_url: format!("https://example.com/{}.jpg", name.to_lowercase().replace(' ', "-")),
        instructions: format!("Mix the {} ingredients.", name),
        glass_type: "Rocks".to_string(),
        ingredients: ingredients
            .iter()
            .map(|ingredient| IngredientEntry::new(*ingredient, "1 oz"))
            .collect(),
    };

    test_cocktail_store()
        .create_cocktail(db, new_cocktail)
        .await
        .expect("Failed to create test cocktail")
}

/// Full application data over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::new(
        DatabaseConnections::from_connection(db),
        test_password_hasher(),
        Arc::new(TokenService::new(TEST_JWT_SECRET.to_string())),
    ))
}
