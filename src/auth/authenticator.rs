//! Request authenticators.
//!
//! An [`Authenticator`] decorates an outgoing [`TransportRequest`] with the
//! credentials the admin API expects:
//!
//! - [`PrivateAppAuthenticator`]: basic auth with the API key and password
//! - [`PublicAppAuthenticator`]: an `X-Shopify-Access-Token` header
//! - [`OAuthAuthenticator`]: the same header, once a token has been acquired
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::{Authenticator, PublicAppAuthenticator};
//! use shopify_client::clients::TransportRequest;
//!
//! let auth = PublicAppAuthenticator::new("shpat_abc").unwrap();
//! let mut request = TransportRequest::new();
//! auth.authenticate(&mut request).unwrap();
//!
//! assert_eq!(request.header("X-Shopify-Access-Token"), Some("shpat_abc"));
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::auth::oauth::{exchange_authorization_code, AuthorizationRequest, OAuthError};
use crate::auth::Credential;
use crate::clients::{HttpTransport, TransportRequest};
use crate::config::{AccessToken, ApiKey, ApiPassword, ShopDomain};
use crate::error::ConfigError;

/// Header carrying a public app's access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Errors raised while decorating a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The OAuth flow has not produced an access token yet.
    #[error("Not authenticated: no access token has been acquired yet")]
    NotAuthenticated,
}

/// Adds credentials to outgoing requests.
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Decorates `request` with this authenticator's credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no credentials are
    /// available yet.
    fn authenticate(&self, request: &mut TransportRequest) -> Result<(), AuthError>;

    /// Returns `true` if [`authenticate`](Self::authenticate) would succeed.
    fn is_authenticated(&self) -> bool {
        true
    }
}

/// Authenticates as a private app with HTTP basic auth.
#[derive(Clone, Debug)]
pub struct PrivateAppAuthenticator {
    api_key: ApiKey,
    password: ApiPassword,
}

impl PrivateAppAuthenticator {
    /// Creates an authenticator from raw credential strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if either value is empty.
    pub fn new(api_key: &str, password: &str) -> Result<Self, ConfigError> {
        let api_key =
            ApiKey::new(api_key).map_err(|_| ConfigError::MissingCredential { field: "api_key" })?;
        let password = ApiPassword::new(password)
            .map_err(|_| ConfigError::MissingCredential { field: "password" })?;
        Ok(Self::from_parts(api_key, password))
    }

    /// Creates an authenticator from validated credentials.
    #[must_use]
    pub const fn from_parts(api_key: ApiKey, password: ApiPassword) -> Self {
        Self { api_key, password }
    }
}

impl Authenticator for PrivateAppAuthenticator {
    fn authenticate(&self, request: &mut TransportRequest) -> Result<(), AuthError> {
        request.set_basic_auth(self.api_key.as_ref(), self.password.as_ref());
        Ok(())
    }
}

/// Authenticates with a previously issued access token.
#[derive(Clone, Debug)]
pub struct PublicAppAuthenticator {
    access_token: AccessToken,
}

impl PublicAppAuthenticator {
    /// Creates an authenticator from a raw token string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if the token is empty.
    pub fn new(access_token: &str) -> Result<Self, ConfigError> {
        AccessToken::new(access_token)
            .map(Self::from_token)
            .map_err(|_| ConfigError::MissingCredential {
                field: "access_token",
            })
    }

    /// Creates an authenticator from a validated token.
    #[must_use]
    pub const fn from_token(access_token: AccessToken) -> Self {
        Self { access_token }
    }
}

impl Authenticator for PublicAppAuthenticator {
    fn authenticate(&self, request: &mut TransportRequest) -> Result<(), AuthError> {
        request.set_header(ACCESS_TOKEN_HEADER, self.access_token.as_ref());
        Ok(())
    }
}

/// Authenticates a public app through the OAuth authorization code flow.
///
/// Requests fail with [`AuthError::NotAuthenticated`] until a token has been
/// stored, either by [`get_permanent_access_token`](Self::get_permanent_access_token)
/// or by [`set_access_token`](Self::set_access_token) with a token delivered
/// by an [`OAuthCoordinator`](crate::auth::oauth::OAuthCoordinator).
#[derive(Debug)]
pub struct OAuthAuthenticator {
    request: AuthorizationRequest,
    token: RwLock<Option<AccessToken>>,
}

impl OAuthAuthenticator {
    /// Creates an authenticator that has no token yet.
    #[must_use]
    pub const fn new(request: AuthorizationRequest) -> Self {
        Self {
            request,
            token: RwLock::new(None),
        }
    }

    /// Returns the authorization request this authenticator was built from.
    #[must_use]
    pub const fn request(&self) -> &AuthorizationRequest {
        &self.request
    }

    /// Builds the authorization URL for a caller-managed redirect.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingHostConfig`] if the request has no
    /// `redirect_uri`.
    pub fn authorize_url(&self) -> Result<String, OAuthError> {
        self.request.authorize_url()
    }

    /// Exchanges an authorization code for a permanent token and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenExchangeFailed`] for any non-200 response
    /// and [`OAuthError::HttpError`] if no response was obtained.
    pub async fn get_permanent_access_token(
        &self,
        transport: &dyn HttpTransport,
        code: &str,
    ) -> Result<AccessToken, OAuthError> {
        let token = exchange_authorization_code(
            transport,
            self.request.shop(),
            self.request.api_key(),
            self.request.secret(),
            code,
        )
        .await?;

        tracing::info!(shop = %self.request.shop(), "access token acquired");
        self.set_access_token(token.clone());
        Ok(token)
    }

    /// Stores an access token acquired elsewhere.
    pub fn set_access_token(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Returns the stored access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Authenticator for OAuthAuthenticator {
    fn authenticate(&self, request: &mut TransportRequest) -> Result<(), AuthError> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        let token = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
        request.set_header(ACCESS_TOKEN_HEADER, token.as_ref());
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Builds the authenticator matching a resolved credential.
///
/// OAuth credentials yield an [`OAuthAuthenticator`] for `shop` that has no
/// token yet.
///
/// # Errors
///
/// Propagates errors from building the OAuth authorization request.
pub fn authenticator_for(
    credential: &Credential,
    shop: &ShopDomain,
) -> Result<Arc<dyn Authenticator>, ConfigError> {
    Ok(match credential {
        Credential::PrivateApp { api_key, password } => Arc::new(
            PrivateAppAuthenticator::from_parts(api_key.clone(), password.clone()),
        ),
        Credential::PublicToken { access_token } => {
            Arc::new(PublicAppAuthenticator::from_token(access_token.clone()))
        }
        Credential::OAuthApp { api_key, secret } => {
            let request = AuthorizationRequest::builder()
                .shop(shop.clone())
                .credentials(api_key.clone(), secret.clone())
                .build()?;
            Arc::new(OAuthAuthenticator::new(request))
        }
    })
}

// Verify authenticators are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrivateAppAuthenticator>();
    assert_send_sync::<PublicAppAuthenticator>();
    assert_send_sync::<OAuthAuthenticator>();
};
