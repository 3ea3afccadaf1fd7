// API layer - HTTP endpoints
pub mod auth;
pub mod cocktails;
pub mod health;
pub mod helpers;
pub mod ingredients;
pub mod reviews;
pub mod user;

use std::sync::Arc;

use poem::{EndpointExt, IntoEndpoint, Route, get, handler, web::Json};
use poem_openapi::{OpenApiService, error::AuthorizationError};
use serde_json::{Value, json};

pub use auth::{AuthApi, BearerAuth};
pub use cocktails::CocktailApi;
pub use health::HealthApi;
pub use ingredients::IngredientApi;
pub use reviews::ReviewApi;
pub use user::UserApi;

use crate::app_data::AppData;
use crate::errors::ResourceError;

/// Compose the full route tree: API under `/api`, Swagger UI under `/swagger`
pub fn build_app(app_data: Arc<AppData>) -> Route {
    let apis = (
        HealthApi::new(app_data.clone()),
        AuthApi::new(app_data.clone()),
        UserApi::new(app_data.clone()),
        CocktailApi::new(app_data.clone()),
        ReviewApi::new(app_data.clone()),
        IngredientApi::new(app_data),
    );

    let api_service = OpenApiService::new(apis, "Cocktail API", env!("CARGO_PKG_VERSION")).server("/api");
    let ui = api_service.swagger_ui();

    Route::new()
        .at("/", get(welcome))
        .nest("/api", api_service.into_endpoint().catch_error(missing_bearer))
        .nest("/swagger", ui)
}

/// A request without a usable `Authorization: Bearer` header never reaches
/// the handler; answer it with the usual JSON error body
async fn missing_bearer(_: AuthorizationError) -> ResourceError {
    ResourceError::unauthorized("Missing or malformed bearer token")
}

#[handler]
fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Cocktail API",
        "status": "online",
    }))
}
