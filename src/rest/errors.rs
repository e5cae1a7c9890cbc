//! Errors returned by endpoint calls.
//!
//! # Status handling
//!
//! - **2xx**: success, the (possibly unwrapped) body is returned
//! - **429**: retried through the rate limiter, never surfaced unless a
//!   retry cap is configured ([`ApiError::Throttled`])
//! - **anything else**: [`ApiError::Status`] with the code and body
//!
//! # Example
//!
//! ```rust
//! use shopify_client::rest::ApiError;
//! use serde_json::json;
//!
//! let error = ApiError::Status {
//!     code: 404,
//!     body: json!({"errors": "Not Found"}),
//! };
//! assert_eq!(error.status(), Some(404));
//! assert!(error.to_string().contains("404"));
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::error::ConfigError;

/// Error type for admin API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path parameter of the endpoint was not supplied. No request was sent.
    #[error("{endpoint}: missing required path parameter '{param}'")]
    MissingParameter {
        /// The endpoint name.
        endpoint: &'static str,
        /// The missing parameter.
        param: &'static str,
    },

    /// No endpoint with this name exists in the catalog.
    #[error("Unknown endpoint '{name}'")]
    UnknownEndpoint {
        /// The requested name.
        name: String,
    },

    /// The request could not be authenticated.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The API answered with a non-2xx, non-429 status.
    #[error("Request failed with status {code}: {body}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The response body.
        body: serde_json::Value,
    },

    /// The call was still throttled after the configured number of retries.
    #[error("Request still throttled after {attempts} attempts")]
    Throttled {
        /// Number of HTTP 429 responses received.
        attempts: u32,
    },

    /// The call was cancelled.
    #[error("Request was cancelled")]
    Cancelled,

    /// The count call of a fetch-all failed.
    #[error("count failed: {0}")]
    CountFailed(#[source] Box<ApiError>),

    /// A page of a fetch-all failed.
    #[error("fetch (page {page}) failed: {source}")]
    PageFailed {
        /// The 1-based page number.
        page: u32,
        /// The underlying failure.
        #[source]
        source: Box<ApiError>,
    },

    /// A successful response did not have the expected shape.
    #[error("Unexpected response: {reason}")]
    UnexpectedResponse {
        /// What was wrong with it.
        reason: String,
    },
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Status`], looking through
    /// fetch-all wrappers.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::CountFailed(inner) | Self::PageFailed { source: inner, .. } => inner.status(),
            _ => None,
        }
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn test_missing_parameter_message() {
        let error = ApiError::MissingParameter {
            endpoint: "getOrder",
            param: "id",
        };
        assert_eq!(
            error.to_string(),
            "getOrder: missing required path parameter 'id'"
        );
    }

    #[test]
    fn test_wrapped_errors_keep_source_and_status() {
        let inner = ApiError::Status {
            code: 500,
            body: json!("boom"),
        };
        let error = ApiError::PageFailed {
            page: 3,
            source: Box::new(inner),
        };

        assert!(error.to_string().starts_with("fetch (page 3) failed: "));
        assert!(error.source().is_some());
        assert_eq!(error.status(), Some(500));

        let error = ApiError::CountFailed(Box::new(ApiError::Cancelled));
        assert_eq!(error.to_string(), "count failed: Request was cancelled");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_auth_error_converts() {
        let error: ApiError = AuthError::NotAuthenticated.into();
        assert!(matches!(error, ApiError::Auth(AuthError::NotAuthenticated)));
    }
}
