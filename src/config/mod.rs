//! Client configuration.
//!
//! # Overview
//!
//! - [`ApiConfig`]: settings of one API client, built with [`ApiConfigBuilder`]
//! - [`AppCredentials`]: an OAuth app's key and secret, checked at startup
//! - [`ApiKey`], [`ApiSecretKey`], [`ApiPassword`], [`AccessToken`]: validated
//!   credential values
//! - [`ShopDomain`], [`HostUrl`]: validated addresses
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::{KeysetInput, KeysetStore};
//! use shopify_client::{ApiConfig, ShopDomain};
//!
//! let keysets = KeysetStore::new();
//! keysets.register("my-store token", KeysetInput::access_token("shpat_abc")).unwrap();
//!
//! let config = ApiConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .keyset(&keysets, "my-store token")
//!     .backoff(30)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.backoff(), 30);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiKey, ApiPassword, ApiSecretKey, HostUrl, ShopDomain};

use crate::auth::{Credential, KeysetInput, KeysetStore};
use crate::error::ConfigError;

/// Default rate-limit backoff threshold (out of a bucket of 40).
pub const DEFAULT_BACKOFF: u32 = 35;

/// Environment variable holding the app's API key.
pub const API_KEY_ENV: &str = "SHOPIFY_API_KEY";

/// Environment variable holding the app's shared secret.
pub const API_SECRET_ENV: &str = "SHOPIFY_API_SECRET";

const API_KEY_PLACEHOLDER: &str = "Your API Key";
const API_SECRET_PLACEHOLDER: &str = "Your Shared Secret";

/// Settings of one API client.
///
/// Immutable once built; the rate-limit counters live on the client.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::Credential;
/// use shopify_client::{AccessToken, ApiConfig, HostUrl, ShopDomain};
///
/// let config = ApiConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .credential(Credential::PublicToken {
///         access_token: AccessToken::new("shpat_abc").unwrap(),
///     })
///     .header("X-Request-Source", "reporting")
///     .host_override(HostUrl::new("http://localhost:8080").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.backoff(), 35);
/// assert_eq!(config.base_url(), "http://localhost:8080");
/// ```
#[derive(Clone, Debug)]
pub struct ApiConfig {
    shop: ShopDomain,
    credential: Credential,
    backoff: u32,
    headers: Vec<(String, String)>,
    host_override: Option<HostUrl>,
    debug: bool,
    max_throttle_retries: Option<u32>,
}

impl ApiConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the shop.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the resolved credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the usage count at which calls start being delayed.
    #[must_use]
    pub const fn backoff(&self) -> u32 {
        self.backoff
    }

    /// Returns the static headers added to every request.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the host override, if any.
    #[must_use]
    pub const fn host_override(&self) -> Option<&HostUrl> {
        self.host_override.as_ref()
    }

    /// Returns `true` if per-request logging is promoted to `info`.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the cap on consecutive HTTP 429 retries; `None` retries forever.
    #[must_use]
    pub const fn max_throttle_retries(&self) -> Option<u32> {
        self.max_throttle_retries
    }

    /// Returns the URL admin paths are appended to: the host override
    /// (including any path prefix) if set, otherwise
    /// `https://{shop}.myshopify.com`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.host_override
            .as_ref()
            .map_or_else(|| self.shop.base_url(), |host| host.as_ref().to_string())
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for [`ApiConfig`].
///
/// `shop` and one of `credential` / `keyset` are required.
///
/// # Defaults
///
/// - `backoff`: 35
/// - `headers`: none
/// - `host_override`: `None`
/// - `debug`: `false`
/// - `max_throttle_retries`: `None` (retry throttled calls forever)
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    shop: Option<ShopDomain>,
    credential: Option<Result<Credential, ConfigError>>,
    backoff: Option<u32>,
    headers: Vec<(String, String)>,
    host_override: Option<HostUrl>,
    debug: bool,
    max_throttle_retries: Option<u32>,
}

impl ApiConfigBuilder {
    /// Creates a builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the credential directly.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(Ok(credential));
        self
    }

    /// Validates raw credential fields into a credential.
    #[must_use]
    pub fn credential_input(mut self, input: KeysetInput) -> Self {
        self.credential = Some(input.validate());
        self
    }

    /// Takes the credential from a named keyset.
    ///
    /// The keyset is resolved now; an unknown name surfaces from
    /// [`build`](Self::build).
    #[must_use]
    pub fn keyset(mut self, store: &KeysetStore, name: &str) -> Self {
        self.credential = Some(store.resolve(name));
        self
    }

    /// Sets the backoff threshold.
    #[must_use]
    pub const fn backoff(mut self, backoff: u32) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Adds a static header sent with every request that does not already
    /// carry it.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sends requests to `host` instead of the shop's own domain.
    #[must_use]
    pub fn host_override(mut self, host: HostUrl) -> Self {
        self.host_override = Some(host);
        self
    }

    /// Promotes per-request logs from `debug` to `info`.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Caps consecutive HTTP 429 retries of a single call.
    #[must_use]
    pub const fn max_throttle_retries(mut self, retries: Option<u32>) -> Self {
        self.max_throttle_retries = retries;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] without a shop
    /// - [`ConfigError::MissingCredential`] without a credential
    /// - [`ConfigError::InvalidBackoff`] for a zero threshold
    /// - any error raised while resolving or validating the credential
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let credential = self.credential.ok_or(ConfigError::MissingCredential {
            field: "credential",
        })??;

        let backoff = self.backoff.unwrap_or(DEFAULT_BACKOFF);
        if backoff == 0 {
            return Err(ConfigError::InvalidBackoff { value: backoff });
        }

        Ok(ApiConfig {
            shop,
            credential,
            backoff,
            headers: self.headers,
            host_override: self.host_override,
            debug: self.debug,
            max_throttle_retries: self.max_throttle_retries,
        })
    }
}

/// A public app's API key and shared secret.
///
/// Construction performs the startup checks that must stop a server from
/// running with missing or placeholder credentials.
///
/// # Example
///
/// ```rust
/// use shopify_client::{AppCredentials, ConfigError};
///
/// let credentials = AppCredentials::new("abc123", "s3cret").unwrap();
/// assert_eq!(credentials.api_key().as_ref(), "abc123");
///
/// assert!(matches!(
///     AppCredentials::new("Your API Key", "s3cret"),
///     Err(ConfigError::PlaceholderCredential { field: "api_key" })
/// ));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppCredentials {
    api_key: ApiKey,
    secret: ApiSecretKey,
}

impl AppCredentials {
    /// Validates an API key and shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] for an empty value and
    /// [`ConfigError::PlaceholderCredential`] for a placeholder value.
    pub fn new(api_key: &str, secret: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        let secret = secret.trim();

        if api_key == API_KEY_PLACEHOLDER {
            return Err(ConfigError::PlaceholderCredential { field: "api_key" });
        }
        if secret == API_SECRET_PLACEHOLDER {
            return Err(ConfigError::PlaceholderCredential { field: "secret" });
        }

        Ok(Self {
            api_key: ApiKey::new(api_key)
                .map_err(|_| ConfigError::MissingCredential { field: "api_key" })?,
            secret: ApiSecretKey::new(secret)
                .map_err(|_| ConfigError::MissingCredential { field: "secret" })?,
        })
    }

    /// Reads `SHOPIFY_API_KEY` and `SHOPIFY_API_SECRET`.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new); an unset variable counts as empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let secret = std::env::var(API_SECRET_ENV).unwrap_or_default();
        Self::new(&api_key, &secret)
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the shared secret.
    #[must_use]
    pub const fn secret(&self) -> &ApiSecretKey {
        &self.secret
    }

    /// Registers these credentials as an OAuth keyset named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyKeysetName`] for an empty name.
    pub fn register(&self, store: &KeysetStore, name: &str) -> Result<(), ConfigError> {
        store.register(
            name,
            KeysetInput::oauth_app(self.api_key.as_ref(), self.secret.as_ref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> ShopDomain {
        ShopDomain::new("test-shop").unwrap()
    }

    fn token() -> Credential {
        Credential::PublicToken {
            access_token: AccessToken::new("token").unwrap(),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = ApiConfig::builder()
            .shop(shop())
            .credential(token())
            .build()
            .unwrap();

        assert_eq!(config.backoff(), DEFAULT_BACKOFF);
        assert!(config.headers().is_empty());
        assert!(config.host_override().is_none());
        assert!(!config.debug());
        assert_eq!(config.max_throttle_retries(), None);
        assert_eq!(config.base_url(), "https://test-shop.myshopify.com");
    }

    #[test]
    fn test_builder_requires_shop_and_credential() {
        assert!(matches!(
            ApiConfig::builder().credential(token()).build(),
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
        assert!(matches!(
            ApiConfig::builder().shop(shop()).build(),
            Err(ConfigError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_backoff() {
        let result = ApiConfig::builder()
            .shop(shop())
            .credential(token())
            .backoff(0)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::InvalidBackoff { value: 0 });
    }

    #[test]
    fn test_builder_resolves_keyset() {
        let store = KeysetStore::new();
        store
            .register("private", KeysetInput::private_app("key", "pw"))
            .unwrap();

        let config = ApiConfig::builder()
            .shop(shop())
            .keyset(&store, "private")
            .build()
            .unwrap();
        assert_eq!(config.credential().kind(), "private");

        let result = ApiConfig::builder()
            .shop(shop())
            .keyset(&store, "missing")
            .build();
        assert!(matches!(result, Err(ConfigError::UnknownKeyset { .. })));
    }

    #[test]
    fn test_builder_validates_credential_input() {
        let result = ApiConfig::builder()
            .shop(shop())
            .credential_input(KeysetInput::default())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidCredential { .. })));
    }

    #[test]
    fn test_host_override_keeps_path_prefix() {
        let config = ApiConfig::builder()
            .shop(shop())
            .credential(token())
            .host_override(HostUrl::new("http://localhost:3000/shopify/").unwrap())
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000/shopify");
    }

    #[test]
    fn test_app_credentials_startup_checks() {
        assert_eq!(
            AppCredentials::new("", "secret").unwrap_err(),
            ConfigError::MissingCredential { field: "api_key" }
        );
        assert_eq!(
            AppCredentials::new("key", "  ").unwrap_err(),
            ConfigError::MissingCredential { field: "secret" }
        );
        assert_eq!(
            AppCredentials::new("key", "Your Shared Secret").unwrap_err(),
            ConfigError::PlaceholderCredential { field: "secret" }
        );
        assert!(AppCredentials::new("key", "secret").is_ok());
    }

    #[test]
    fn test_app_credentials_register_oauth_keyset() {
        let store = KeysetStore::new();
        AppCredentials::new("key", "secret")
            .unwrap()
            .register(&store, "public app")
            .unwrap();

        assert_eq!(store.resolve("public app").unwrap().kind(), "oauth");
    }
}
