//! Extraction of request inputs carried in headers

use actix_web::{http::header, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::{ApiError, ErrorCode};

/// Base64-encoded JSON identity payload set by the upstream gateway
pub const USER_INFO_HEADER: &str = "X-USER-INFO";

/// Identity ID set by the upstream gateway after validating an access token
pub const USER_ID_HEADER: &str = "X-USER-ID";

const BEARER_PREFIX: &str = "Bearer ";

/// Decodes and validates the `X-USER-INFO` payload
pub fn user_info<T>(req: &HttpRequest) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let encoded = header_value(req, USER_INFO_HEADER).ok_or_else(|| {
        tracing::warn!("User info header is not present");
        ApiError::new(ErrorCode::InvalidRequest)
    })?;

    let decoded = STANDARD.decode(encoded.trim()).map_err(|e| {
        tracing::warn!(error = %e, "User info header is not valid base64");
        ApiError::new(ErrorCode::InvalidRequest)
    })?;

    let payload: T = serde_json::from_slice(&decoded).map_err(|e| {
        tracing::warn!(error = %e, "User info header is not valid JSON");
        ApiError::new(ErrorCode::InvalidBody)
    })?;

    payload.validate().map_err(|e| {
        tracing::warn!(error = %e, "User info payload failed validation");
        ApiError::new(ErrorCode::InvalidRequest)
    })?;

    Ok(payload)
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    header_value(req, header::AUTHORIZATION.as_str())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(ApiError::invalid_token)
}

/// Extracts the `X-USER-ID` header
pub fn user_id(req: &HttpRequest) -> Result<&str, ApiError> {
    header_value(req, USER_ID_HEADER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::invalid_request(format!("{} header is required", USER_ID_HEADER)))
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
