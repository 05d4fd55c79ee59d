//! Error types for the consent web API client.
//!
//! # Design
//! Transports report network failures as `Transport`; non-2xx statuses are
//! returned by the transport as data and turned into `HttpError` by the
//! parse step, which keeps the raw response text for debugging.

use thiserror::Error;

/// Errors returned by `RequestBuilder`, `Transport` and `WebApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn deserialization(err: serde_json::Error) -> Self {
        ApiError::DeserializationError(err.to_string())
    }

    pub(crate) fn serialization(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }

    #[test]
    fn transport_display() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }

    #[test]
    fn from_serde_json_error_maps_to_deserialization() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::deserialization(json_error);
        assert!(matches!(err, ApiError::DeserializationError(msg) if msg.contains("expected")));
    }
}
