use poem::Request;

use crate::api::BearerAuth;
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::types::internal::context::RequestContext;

/// Validate the bearer token and build an authenticated request context
///
/// The user id comes only from the token, never from the request body.
pub fn authenticated_context(
    req: &Request,
    auth: &BearerAuth,
    token_service: &TokenService,
) -> Result<RequestContext, InternalError> {
    let user_id = token_service.authenticate(&auth.0.token)?;
    Ok(RequestContext::from_request(req).authenticated(user_id))
}

/// Unwrap a required string field; absent and empty values are both rejected
pub fn required_field(value: Option<String>, field: &str) -> Result<String, InternalError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InternalError::required(field)),
    }
}

/// Unwrap a required field of any type; only absence is rejected
pub fn present<T>(value: Option<T>, field: &str) -> Result<T, InternalError> {
    value.ok_or_else(|| InternalError::required(field))
}
