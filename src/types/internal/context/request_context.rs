use std::net::IpAddr;

use poem::Request;

use super::{request_id::RequestId, request_source::RequestSource};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

/// Request context that flows from the API layer into coordinators
///
/// Carries what log lines need to correlate an operation: a request id,
/// the client address, and the authenticated user once the bearer token
/// has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request
    pub request_id: RequestId,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// User id taken from a validated token, never from the request body
    pub user_id: Option<i32>,
}

impl RequestContext {
    /// Create an unauthenticated context for an HTTP request
    pub fn from_request(req: &Request) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            source: RequestSource::API,
            user_id: None,
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI {
                command: command_name.to_string(),
            },
            user_id: None,
        }
    }

    /// Attach the user id resolved from a validated token
    pub fn authenticated(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// The authenticated user id, or an invalid-token error for anonymous contexts
    pub fn require_user_id(&self) -> Result<i32, InternalError> {
        self.user_id
            .ok_or_else(|| CredentialError::invalid_token("request is not authenticated").into())
    }

    /// Short description of who is acting, for log lines
    pub fn actor(&self) -> String {
        match (&self.source, self.user_id) {
            (_, Some(user_id)) => format!("user:{}", user_id),
            (RequestSource::CLI { command }, None) => format!("cli:{}", command),
            (RequestSource::API, None) => "anonymous".to_string(),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
