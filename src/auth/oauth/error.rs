//! OAuth-specific error types.
//!
//! These errors are terminal for the authorization attempt they belong to.
//! They are delivered through that attempt's [`AuthCompletion`] or returned
//! from the call that failed; they never bring down the host process.
//!
//! [`AuthCompletion`]: crate::auth::oauth::AuthCompletion
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenExchangeFailed {
//!     status: 400,
//!     message: "bad code".to_string(),
//! };
//! assert!(error.to_string().contains("400"));
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur during the OAuth authorization code flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// No pending authorization matches the callback's correlation id.
    ///
    /// The id was unknown, already consumed, or expired.
    #[error("No pending authorization matches correlation id '{correlation_id}'")]
    NoMatchingHandler {
        /// The correlation id carried by the callback (empty if none).
        correlation_id: String,
    },

    /// The callback's HMAC signature does not match the shared secret.
    #[error("HMAC signature validation failed")]
    InvalidSignature,

    /// Token exchange request failed.
    ///
    /// The POST exchanging the authorization code for an access token
    /// returned a non-200 status, or a 200 without a usable token.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// Callback parameters are invalid or malformed.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },

    /// An authorization URL was requested without a redirect URI.
    #[error("A redirect_uri is required to build the authorization URL")]
    MissingHostConfig,

    /// The request already names its own `redirect_uri`, so the coordinator
    /// cannot correlate the callback.
    #[error("Authorization request has a caller-supplied redirect_uri; exchange the code with get_permanent_access_token")]
    CallerManagedRedirect,

    /// The pending authorization was dropped before it completed.
    #[error("Authorization attempt was abandoned before completion")]
    Abandoned,

    /// Waiting for the authorization was cancelled by the caller.
    #[error("Waiting for authorization was cancelled")]
    Cancelled,

    /// Invalid configuration or credentials.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Wrapped HTTP client error.
    #[error(transparent)]
    HttpError(#[from] HttpError),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_handler_names_the_id() {
        let error = OAuthError::NoMatchingHandler {
            correlation_id: "abc".to_string(),
        };
        assert!(error.to_string().contains("'abc'"));
    }

    #[test]
    fn test_config_error_converts() {
        let error: OAuthError = ConfigError::UnknownKeyset {
            name: "app".to_string(),
        }
        .into();
        assert!(matches!(error, OAuthError::Config(_)));
        assert!(error.to_string().contains("app"));
    }

    #[test]
    fn test_invalid_signature_message() {
        assert_eq!(
            OAuthError::InvalidSignature.to_string(),
            "HMAC signature validation failed"
        );
    }
}
