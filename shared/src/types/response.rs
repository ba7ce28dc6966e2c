//! API response envelopes
//!
//! Successful responses wrap their payload as `{"data": ...}` and failures
//! as `{"error": {"code": ..., "legacyCode": ..., "message": ...}}`.

use serde::{Deserialize, Serialize};

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Machine-readable error description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable error code, e.g. `identity-not-registered`
    pub code: String,

    /// Numeric code kept for older clients
    pub legacy_code: i32,

    /// Human-readable message
    pub message: String,
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl From<ErrorBody> for ErrorEnvelope {
    fn from(error: ErrorBody) -> Self {
        Self { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope::from(ErrorBody {
            code: "invalid-token".to_string(),
            legacy_code: 54001,
            message: "invalid token".to_string(),
        });

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"]["code"], "invalid-token");
        assert_eq!(json["error"]["legacyCode"], 54001);
    }

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::new(42)).unwrap();
        assert_eq!(json, serde_json::json!({ "data": 42 }));
    }
}
