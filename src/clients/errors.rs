//! Transport-level error types.
//!
//! A [`HttpError`] means the request never produced an HTTP response: the
//! connection failed, timed out, or a custom transport reported a failure.
//! Responses with any status code, including 4xx/5xx, are not errors at this
//! layer; classification happens in the dispatcher.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::clients::HttpError;
//!
//! let error = HttpError::Transport {
//!     message: "connection reset".to_string(),
//! };
//! assert!(error.to_string().contains("connection reset"));
//! ```

use thiserror::Error;

/// Error returned when an HTTP exchange could not be completed.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network error from the underlying reqwest client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom [`HttpTransport`](crate::clients::HttpTransport).
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
}
