//! Configuration and validation errors.
//!
//! Every constructor that validates caller input returns
//! `Result<T, ConfigError>`. These failures are raised synchronously, are
//! never retried, and indicate a programming or deployment mistake rather
//! than a transient condition.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors raised while validating credentials, keysets, or client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify shared secret.")]
    EmptyApiSecretKey,

    /// Private app password cannot be empty.
    #[error("API password cannot be empty. Please provide the private app's API password.")]
    EmptyPassword,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Keyset names must be non-empty.
    #[error("Keyset name cannot be empty.")]
    EmptyKeysetName,

    /// The supplied credential does not match exactly one known shape.
    #[error("Invalid credential: {reason}. Provide 'access_token', 'api_key' + 'password', or 'api_key' + 'secret'.")]
    InvalidCredential {
        /// Why the credential was rejected.
        reason: String,
    },

    /// No keyset is registered under the requested name.
    #[error("Unknown keyset '{name}'.")]
    UnknownKeyset {
        /// The keyset name that was looked up.
        name: String,
    },

    /// A credential needed at startup or by an authenticator is absent.
    #[error("Missing credential: '{field}'.")]
    MissingCredential {
        /// The credential field that is missing.
        field: &'static str,
    },

    /// A credential still holds the template placeholder value.
    #[error("Credential '{field}' still holds the placeholder value. Configure your real API key and shared secret.")]
    PlaceholderCredential {
        /// The credential field holding a placeholder.
        field: &'static str,
    },

    /// The call-limit backoff threshold must be at least one.
    #[error("Invalid backoff threshold {value}. The threshold must be at least 1.")]
    InvalidBackoff {
        /// The rejected value.
        value: u32,
    },
}
