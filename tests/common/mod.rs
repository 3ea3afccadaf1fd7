// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use cocktail_backend::api::build_app;
use cocktail_backend::config::DatabaseConnections;
use cocktail_backend::services::{PasswordHasher, TokenService};
use cocktail_backend::AppData;
use migration::{Migrator, MigratorTrait};
use poem::test::{TestClient, TestResponse};
use poem::Route;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};

pub type Client = TestClient<Route>;

/// Creates an in-memory catalog database with migrations applied
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

/// Application data with cheap argon2 parameters
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");

    Arc::new(AppData::new(
        DatabaseConnections::from_connection(db),
        Arc::new(PasswordHasher::with_params("integration-test-pepper".to_string(), params)),
        Arc::new(TokenService::new("integration-test-secret-at-least-32-chars".to_string())),
    ))
}

/// Test client over the full route tree plus the data behind it
pub async fn setup_client() -> (Client, Arc<AppData>) {
    let app_data = setup_app_data().await;
    (TestClient::new(build_app(app_data.clone())), app_data)
}

pub async fn json_body(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json::<Value>()
        .await
        .expect("response body should be JSON")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Registers `<username>` with password "password" and logs in
///
/// Returns the access token and the new user's id.
pub async fn register_and_login(cli: &Client, username: &str) -> (String, i64) {
    let resp = cli
        .post("/api/register")
        .body_json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password",
        }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);
    let user_id = json_body(resp).await["user_id"]
        .as_i64()
        .expect("user_id in register response");

    let resp = cli
        .post("/api/login")
        .body_json(&json!({ "username": username, "password": "password" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let token = json_body(resp).await["token"]
        .as_str()
        .expect("token in login response")
        .to_string();

    (token, user_id)
}

/// Creates a cocktail with one "1 oz" line per ingredient and returns its id
pub async fn create_cocktail(cli: &Client, token: &str, name: &str, ingredients: &[&str]) -> i64 {
    let lines: Vec<Value> = ingredients
        .iter()
        .map(|ingredient| json!({ "name": ingredient, "amount": "1 oz" }))
        .collect();

    let resp = cli
        .post("/api/cocktails")
        .header("Authorization", bearer(token))
        .body_json(&json!({
            "name": name,
            "image_url": "https://example.com/cocktail.jpg",
            "instructions": "Shake with ice.",
            "glass_type": "Coupe",
            "ingredients": lines,
        }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);

    json_body(resp).await["id"].as_i64().expect("id in create response")
}

/// Posts a review and returns its id
pub async fn create_review(cli: &Client, token: &str, cocktail_id: i64, content: &str, rating: i32) -> i64 {
    let resp = cli
        .post(format!("/api/cocktails/{}/reviews", cocktail_id))
        .header("Authorization", bearer(token))
        .body_json(&json!({ "content": content, "rating": rating }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);

    json_body(resp).await["id"].as_i64().expect("id in review response")
}
