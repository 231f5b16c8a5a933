//! Error types for the OpenCRM client.
//!
//! This module defines `OpenCrmError`, the single error type returned by
//! every fallible operation in the crate. The taxonomy is flat: each variant
//! names one failure class and carries the context needed to diagnose it
//! remotely (HTTP status code and raw response body where one exists).
//!
//! # Security
//!
//! Credentials never appear in error messages. Login failures carry the raw
//! login response, which OpenCRM does not echo keys into.

use thiserror::Error;

/// Unified error type for all OpenCRM operations.
#[derive(Error, Debug)]
pub enum OpenCrmError {
    /// Missing or invalid construction parameters. Raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Session login failed (bad credentials, network failure, or no key returned).
    #[error("authentication failed: {message}")]
    Authentication {
        /// What went wrong during login.
        message: String,
        /// The raw login response body, when the server answered.
        response: Option<String>,
        /// The transport error, when the server could not be reached.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The API could not be reached (timeout, DNS failure, connection refused).
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// The API answered HTTP 404.
    #[error("resource not found (HTTP {status}): {body}")]
    NotFound {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The API answered HTTP 429.
    #[error("rate limit exceeded (HTTP {status}): {body}")]
    RateLimited {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The API answered any other status of 400 or above.
    #[error("API request failed (HTTP {status}): {body}")]
    Api {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body, potentially containing error details.
        body: String,
    },

    /// Caller-side input validation failed.
    ///
    /// The client does not validate record data itself; OpenCRM rejects bad
    /// data and that surfaces as [`OpenCrmError::Api`].
    #[error("validation error: {0}")]
    Validation(String),

    /// Converting between a record map and a typed model failed.
    #[error("record conversion failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OpenCrmError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        OpenCrmError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        OpenCrmError::Validation(message.into())
    }

    /// Creates an authentication error carrying the raw login response.
    pub fn authentication(message: impl Into<String>, response: Option<String>) -> Self {
        OpenCrmError::Authentication {
            message: message.into(),
            response,
            source: None,
        }
    }

    /// Maps an HTTP error status and its body to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => OpenCrmError::NotFound { status, body },
            429 => OpenCrmError::RateLimited { status, body },
            _ => OpenCrmError::Api { status, body },
        }
    }

    /// Returns the HTTP status code for errors produced by an HTTP response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenCrmError::NotFound { status, .. }
            | OpenCrmError::RateLimited { status, .. }
            | OpenCrmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body attached to this error, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            OpenCrmError::NotFound { body, .. }
            | OpenCrmError::RateLimited { body, .. }
            | OpenCrmError::Api { body, .. } => Some(body),
            OpenCrmError::Authentication { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the server rejected the call for exceeding its rate limit.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, OpenCrmError::RateLimited { .. })
    }

    /// Returns true if the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, OpenCrmError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = OpenCrmError::config("system_name is required");
        assert_eq!(
            err.to_string(),
            "configuration error: system_name is required"
        );
    }

    #[test]
    fn test_validation_error() {
        let err = OpenCrmError::validation("lastname is required");
        assert_eq!(err.to_string(), "validation error: lastname is required");
    }

    #[test]
    fn test_from_status_not_found() {
        let err = OpenCrmError::from_status(404, "no such record".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.response_body(), Some("no such record"));
    }

    #[test]
    fn test_from_status_rate_limited() {
        let err = OpenCrmError::from_status(429, String::new());
        assert!(err.is_rate_limit());
        assert_eq!(err.status_code(), Some(429));
    }

    #[test]
    fn test_from_status_generic() {
        let err = OpenCrmError::from_status(500, "boom".to_string());
        assert!(matches!(err, OpenCrmError::Api { status: 500, .. }));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_authentication_error_keeps_response() {
        let err = OpenCrmError::authentication("no access key returned", Some("  ".to_string()));
        assert_eq!(err.response_body(), Some("  "));
        assert_eq!(err.status_code(), None);
        assert!(err.to_string().starts_with("authentication failed"));
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = OpenCrmError::config("bad");
        assert_eq!(err.status_code(), None);
        assert_eq!(err.response_body(), None);
        assert!(!err.is_rate_limit());
    }
}
