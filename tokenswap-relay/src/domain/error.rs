use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for the TokenSwap relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RelayError {
    // Configuration errors (missing secret/API key)
    Config(String),

    // Authorization errors (secret mismatch, bad origin)
    Unauthorized(String),

    // Request validation errors
    Validation(String),

    // Pricing provider errors
    Upstream(String),

    // Client-side fetch errors
    Fetch(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Config(msg) => write!(f, "Configuration error: {msg}"),
            RelayError::Unauthorized(msg) => write!(f, "{msg}"),
            RelayError::Validation(msg) => write!(f, "Validation error: {msg}"),
            RelayError::Upstream(msg) => write!(f, "Upstream error: {msg}"),
            RelayError::Fetch(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl ResponseError for RelayError {
    fn error_response(&self) -> HttpResponse {
        // Upstream causes are logged at the call site; the wire only ever
        // carries the generic message so provider details cannot leak.
        match self {
            RelayError::Config(_) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Server configuration error",
            })),
            RelayError::Unauthorized(msg) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": msg,
            })),
            RelayError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg,
            })),
            RelayError::Upstream(_) | RelayError::Fetch(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Failed to get asset details",
                }))
            }
        }
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(err: anyhow::Error) -> Self {
        RelayError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unauthorized_maps_to_403() {
        let err = RelayError::Unauthorized("Unauthorized: Invalid internal request token".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_maps_to_generic_500() {
        let err = RelayError::Upstream("provider returned 503".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = RelayError::Validation("Invalid symbol".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display_keeps_fetch_message_verbatim() {
        let err = RelayError::Fetch("Failed to fetch USDC token data".to_string());
        assert_eq!(err.to_string(), "Failed to fetch USDC token data");
    }
}
