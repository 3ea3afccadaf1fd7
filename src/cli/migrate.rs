use crate::config::{DatabaseConnections, ServerSettings};
use crate::errors::InternalError;

/// Run database migrations without building the full application
pub async fn run_migrations(settings: &ServerSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
