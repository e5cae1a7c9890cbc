//! Authorization requests and authorization URL generation.
//!
//! An [`AuthorizationRequest`] is the per-attempt configuration of an OAuth
//! flow: which shop, which app credentials, which scopes, and where the
//! browser should end up once the flow completes.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::oauth::{AuthorizationRequest, PostAuthTarget};
//! use shopify_client::{ApiKey, ApiSecretKey, ShopDomain};
//!
//! let request = AuthorizationRequest::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .credentials(
//!         ApiKey::new("client-id").unwrap(),
//!         ApiSecretKey::new("secret").unwrap(),
//!     )
//!     .scopes("read_products,read_customers".parse().unwrap())
//!     .redirect_uri("https://myapp.example.com/auth/callback")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.post_auth(), &PostAuthTarget::Close);
//! let url = request.authorize_url().unwrap();
//! assert!(url.starts_with("https://my-store.myshopify.com/admin/oauth/authorize?client_id=client-id"));
//! ```

use crate::auth::oauth::correlation::CorrelationId;
use crate::auth::oauth::error::OAuthError;
use crate::auth::{AuthScopes, Credential, KeysetStore};
use crate::config::{ApiKey, ApiSecretKey, ShopDomain};
use crate::error::ConfigError;

/// Sentinel `post_auth_uri` asking for the browser window to be closed.
pub const CLOSE_SENTINEL: &str = "close";

/// Where the browser goes after a successful callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostAuthTarget {
    /// Serve a page that closes the tab or window.
    Close,
    /// Send the browser to this URI.
    Navigate(String),
}

impl PostAuthTarget {
    /// Interprets a `post_auth_uri` value, treating `"close"` as the sentinel.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == CLOSE_SENTINEL {
            Self::Close
        } else {
            Self::Navigate(value.to_string())
        }
    }
}

/// Builds the Shopify authorization URL.
///
/// `scopes` are written as given; `redirect_uri` and `state` are
/// percent-encoded.
#[must_use]
pub fn build_authorize_url(
    shop: &ShopDomain,
    api_key: &ApiKey,
    scopes: &AuthScopes,
    redirect_uri: &str,
    state: Option<&CorrelationId>,
) -> String {
    let mut url = format!(
        "{}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}",
        shop.base_url(),
        urlencoding::encode(api_key.as_ref()),
        scopes,
        urlencoding::encode(redirect_uri),
    );

    if let Some(state) = state {
        url.push_str("&state=");
        url.push_str(&urlencoding::encode(state.as_ref()));
    }

    url
}

/// Configuration of a single OAuth authorization attempt.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    shop: ShopDomain,
    api_key: ApiKey,
    secret: ApiSecretKey,
    scopes: AuthScopes,
    post_auth: PostAuthTarget,
    embedded: bool,
    redirect_uri: Option<String>,
    keyset: Option<String>,
    caller_id: Option<String>,
}

// Verify AuthorizationRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationRequest>();
};

impl AuthorizationRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AuthorizationRequestBuilder {
        AuthorizationRequestBuilder::default()
    }

    /// Returns the shop.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the app's API key (OAuth `client_id`).
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the app's shared secret.
    #[must_use]
    pub const fn secret(&self) -> &ApiSecretKey {
        &self.secret
    }

    /// Returns the requested scopes.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns where the browser goes after the callback.
    #[must_use]
    pub const fn post_auth(&self) -> &PostAuthTarget {
        &self.post_auth
    }

    /// Returns `true` if the flow runs inside an embedded admin frame.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Returns the redirect URI, if one has been set or generated.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// Returns the keyset this request's credentials came from, if any.
    #[must_use]
    pub fn keyset(&self) -> Option<&str> {
        self.keyset.as_deref()
    }

    /// Returns the identity of the user who started the flow, if known.
    #[must_use]
    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    /// Builds the authorization URL for a caller-managed redirect.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingHostConfig`] if no redirect URI is set.
    pub fn authorize_url(&self) -> Result<String, OAuthError> {
        let redirect_uri = self
            .redirect_uri
            .as_deref()
            .ok_or(OAuthError::MissingHostConfig)?;
        Ok(build_authorize_url(
            &self.shop,
            &self.api_key,
            &self.scopes,
            redirect_uri,
            None,
        ))
    }

    pub(crate) fn with_redirect_uri(mut self, redirect_uri: String) -> Self {
        self.redirect_uri = Some(redirect_uri);
        self
    }
}

/// Builder for [`AuthorizationRequest`].
///
/// # Defaults
///
/// - `scopes`: [`AuthScopes::default_scopes`]
/// - `post_auth_uri`: `"close"`
/// - `embedded`: `false`
/// - `redirect_uri`: generated by the coordinator
#[derive(Debug, Default)]
pub struct AuthorizationRequestBuilder {
    shop: Option<ShopDomain>,
    credentials: Option<Result<(ApiKey, ApiSecretKey), ConfigError>>,
    keyset: Option<String>,
    scopes: Option<AuthScopes>,
    post_auth: Option<PostAuthTarget>,
    embedded: bool,
    redirect_uri: Option<String>,
    caller_id: Option<String>,
}

impl AuthorizationRequestBuilder {
    /// Sets the shop (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the app credentials directly.
    #[must_use]
    pub fn credentials(mut self, api_key: ApiKey, secret: ApiSecretKey) -> Self {
        self.credentials = Some(Ok((api_key, secret)));
        self.keyset = None;
        self
    }

    /// Takes the app credentials from an OAuth keyset.
    ///
    /// The keyset is also what callback signatures are verified against.
    /// Resolution errors surface from [`build`](Self::build).
    #[must_use]
    pub fn keyset(mut self, store: &KeysetStore, name: &str) -> Self {
        let resolved = store.resolve(name).and_then(|credential| match credential {
            Credential::OAuthApp { api_key, secret } => Ok((api_key, secret)),
            other => Err(ConfigError::InvalidCredential {
                reason: format!(
                    "keyset '{name}' holds a {} credential, not 'api_key' + 'secret'",
                    other.kind()
                ),
            }),
        });
        self.credentials = Some(resolved);
        self.keyset = Some(name.to_string());
        self
    }

    /// Sets the requested scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the post-authorization target; `"close"` closes the window.
    #[must_use]
    pub fn post_auth_uri(mut self, uri: impl AsRef<str>) -> Self {
        self.post_auth = Some(PostAuthTarget::parse(uri.as_ref()));
        self
    }

    /// Marks the flow as running inside an embedded admin frame.
    #[must_use]
    pub const fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Supplies a redirect URI managed by the caller.
    #[must_use]
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Records the identity of the user starting the flow.
    #[must_use]
    pub fn caller_id(mut self, id: impl Into<String>) -> Self {
        self.caller_id = Some(id.into());
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] without a shop,
    /// [`ConfigError::MissingCredential`] without credentials, or the error
    /// raised while resolving a keyset.
    pub fn build(self) -> Result<AuthorizationRequest, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let (api_key, secret) = self
            .credentials
            .ok_or(ConfigError::MissingCredential { field: "api_key" })??;

        Ok(AuthorizationRequest {
            shop,
            api_key,
            secret,
            scopes: self.scopes.unwrap_or_else(AuthScopes::default_scopes),
            post_auth: self.post_auth.unwrap_or(PostAuthTarget::Close),
            embedded: self.embedded,
            redirect_uri: self.redirect_uri,
            keyset: self.keyset,
            caller_id: self.caller_id,
        })
    }
}
