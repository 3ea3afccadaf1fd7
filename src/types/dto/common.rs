use chrono::DateTime;
use poem_openapi::{ApiResponse, Object, payload::Json};

/// Response model for a healthy service
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Database reachability
    pub database: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Response model for an unhealthy service
#[derive(Object, Debug)]
pub struct UnhealthyResponse {
    /// Status of the service
    pub status: String,

    /// Why the check failed
    pub error: String,
}

/// API response for the health check endpoint
#[derive(ApiResponse)]
pub enum HealthApiResponse {
    /// Service and database are reachable
    #[oai(status = 200)]
    Ok(Json<HealthResponse>),

    /// Database did not answer
    #[oai(status = 503)]
    Unavailable(Json<UnhealthyResponse>),
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}

/// Plain acknowledgement for mutations that return no body
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Render a stored Unix timestamp as RFC 3339
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
