use std::sync::Arc;

use poem::listener::TcpListener;
use poem::middleware::{Cors, Tracing};
use poem::{EndpointExt, Server};

use crate::api::build_app;
use crate::app_data::AppData;
use crate::config::ServerSettings;

/// Serve the API until the process is stopped
pub async fn run_server(settings: &ServerSettings, app_data: AppData) -> Result<(), std::io::Error> {
    let cors = Cors::new()
        .allow_origins(settings.cors_origins().iter().map(String::as_str))
        .allow_credentials(true);

    let app = build_app(Arc::new(app_data)).with(Tracing).with(cors);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);
    tracing::debug!(
        "Rate limit '{}' via '{}' is declared but not enforced",
        settings.rate_limit_default(),
        settings.rate_limit_storage_url()
    );

    Server::new(TcpListener::bind(address)).run(app).await
}
