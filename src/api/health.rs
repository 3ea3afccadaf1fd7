use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::types::dto::common::{HealthApiResponse, HealthResponse, UnhealthyResponse};

/// Health check API
pub struct HealthApi {
    connections: DatabaseConnections,
}

impl HealthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            connections: app_data.connections.clone(),
        }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports whether the service can reach its database
    #[oai(path = "/health-check", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> HealthApiResponse {
        match self.connections.ping().await {
            Ok(()) => HealthApiResponse::Ok(Json(HealthResponse {
                status: "healthy".to_string(),
                database: "connected".to_string(),
                timestamp: Utc::now().to_rfc3339(),
            })),
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                HealthApiResponse::Unavailable(Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: "database unavailable".to_string(),
                }))
            }
        }
    }
}
