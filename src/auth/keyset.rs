//! Named credential bundles.
//!
//! A [`KeysetStore`] maps caller-chosen names to a [`Credential`]. It is an
//! explicit, process-scoped object: construct one at startup, share it by
//! reference (it is `Send + Sync`), and hand it to the components that need
//! to resolve credentials.
//!
//! Only server-side code should hold a store. Exposing it to an untrusted
//! context leaks every secret it contains.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::{Credential, KeysetInput, KeysetStore};
//!
//! let store = KeysetStore::new();
//! store
//!     .register("my-shop permanent", KeysetInput::access_token("shpat_abc"))
//!     .unwrap();
//!
//! assert!(store.exists("my-shop permanent"));
//! assert!(matches!(
//!     store.resolve("my-shop permanent").unwrap(),
//!     Credential::PublicToken { .. }
//! ));
//! ```

use crate::config::{AccessToken, ApiKey, ApiPassword, ApiSecretKey};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A resolved credential bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// A private app authenticating with its API key and password.
    PrivateApp {
        /// The app's API key, sent as the basic-auth username.
        api_key: ApiKey,
        /// The app's API password.
        password: ApiPassword,
    },
    /// A public app that has not completed OAuth yet.
    OAuthApp {
        /// The app's API key (OAuth `client_id`).
        api_key: ApiKey,
        /// The app's shared secret.
        secret: ApiSecretKey,
    },
    /// A permanent access token acquired through OAuth.
    PublicToken {
        /// The access token.
        access_token: AccessToken,
    },
}

impl Credential {
    /// Returns a short label for the credential shape, safe to log.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PrivateApp { .. } => "private",
            Self::OAuthApp { .. } => "oauth",
            Self::PublicToken { .. } => "public",
        }
    }

    /// Returns the shared secret for OAuth credentials.
    #[must_use]
    pub const fn secret(&self) -> Option<&ApiSecretKey> {
        match self {
            Self::OAuthApp { secret, .. } => Some(secret),
            _ => None,
        }
    }
}

/// Unvalidated credential fields, as a caller would supply them.
///
/// Exactly one shape must be filled in: `access_token` alone,
/// `api_key` + `password`, or `api_key` + `secret`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeysetInput {
    /// API key for private or OAuth apps.
    pub api_key: Option<String>,
    /// Private app password.
    pub password: Option<String>,
    /// OAuth shared secret.
    pub secret: Option<String>,
    /// Permanent access token.
    pub access_token: Option<String>,
}

impl KeysetInput {
    /// Input for a private app.
    #[must_use]
    pub fn private_app(api_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Input for a public app that still has to go through OAuth.
    #[must_use]
    pub fn oauth_app(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Input for a permanent access token.
    #[must_use]
    pub fn access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Validates the input into exactly one [`Credential`] shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCredential`] when the fields match no
    /// shape, match more than one, or any supplied field is empty.
    pub fn validate(self) -> Result<Credential, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidCredential {
            reason: reason.to_string(),
        };

        match (self.api_key, self.password, self.secret, self.access_token) {
            (None, None, None, Some(token)) => Ok(Credential::PublicToken {
                access_token: AccessToken::new(token)
                    .map_err(|_| invalid("'access_token' is empty"))?,
            }),
            (Some(key), Some(password), None, None) => Ok(Credential::PrivateApp {
                api_key: ApiKey::new(key).map_err(|_| invalid("'api_key' is empty"))?,
                password: ApiPassword::new(password)
                    .map_err(|_| invalid("'password' is empty"))?,
            }),
            (Some(key), None, Some(secret), None) => Ok(Credential::OAuthApp {
                api_key: ApiKey::new(key).map_err(|_| invalid("'api_key' is empty"))?,
                secret: ApiSecretKey::new(secret).map_err(|_| invalid("'secret' is empty"))?,
            }),
            (None, None, None, None) => Err(invalid("no credential fields were supplied")),
            (None, _, _, None) => Err(invalid("'password' and 'secret' require 'api_key'")),
            (Some(_), None, None, None) => Err(invalid("'api_key' needs 'password' or 'secret'")),
            _ => Err(invalid("fields from more than one credential shape were supplied")),
        }
    }
}

impl From<Credential> for KeysetInput {
    fn from(credential: Credential) -> Self {
        match credential {
            Credential::PrivateApp { api_key, password } => {
                Self::private_app(api_key.as_ref(), password.as_ref())
            }
            Credential::OAuthApp { api_key, secret } => {
                Self::oauth_app(api_key.as_ref(), secret.as_ref())
            }
            Credential::PublicToken { access_token } => Self::access_token(access_token.as_ref()),
        }
    }
}

/// A named map of credential bundles.
///
/// Entries are created or overwritten by [`register`](Self::register) and
/// removed only by [`remove`](Self::remove); they never expire.
#[derive(Debug, Default)]
pub struct KeysetStore {
    keysets: RwLock<HashMap<String, Credential>>,
}

impl KeysetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `input` under `name`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyKeysetName`] for an empty name and
    /// [`ConfigError::InvalidCredential`] if the input does not match
    /// exactly one credential shape.
    pub fn register(&self, name: &str, input: KeysetInput) -> Result<(), ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyKeysetName);
        }

        let credential = input.validate()?;
        tracing::debug!(keyset = name, kind = credential.kind(), "registered keyset");

        self.keysets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), credential);
        Ok(())
    }

    /// Removes the entry named `name`. Does nothing if it is absent.
    pub fn remove(&self, name: &str) {
        self.keysets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Returns `true` if an entry named `name` exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.keysets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Returns a copy of the credential registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKeyset`] if no such entry exists.
    pub fn resolve(&self, name: &str) -> Result<Credential, ConfigError> {
        self.keysets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKeyset {
                name: name.to_string(),
            })
    }
}

// Verify KeysetStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeysetStore>();
};
