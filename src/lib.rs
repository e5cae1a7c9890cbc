//! # Shopify Keyset Client
//!
//! An async client for the Shopify admin REST API with named credential
//! keysets, an OAuth redirect coordinator and call-limit backoff.
//!
//! ## Overview
//!
//! - [`auth::KeysetStore`]: named credentials (private app, OAuth app, or
//!   access token)
//! - [`auth::Authenticator`]: adds basic auth or an access-token header to
//!   requests
//! - [`auth::oauth::OAuthCoordinator`]: correlates authorization redirects
//!   with their callbacks, verifies signatures and exchanges codes for tokens
//! - [`ShopifyApi`]: one method per admin endpoint, 429 retries, fetch-all
//!   pagination
//! - [`rest::RateLimiter`]: delays calls once the reported call-limit usage
//!   reaches the backoff threshold
//!
//! The HTTP layer is the [`clients::HttpTransport`] trait; the default
//! implementation uses `reqwest`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopify_client::auth::{KeysetInput, KeysetStore};
//! use shopify_client::rest::Params;
//! use shopify_client::{ApiConfig, ShopDomain, ShopifyApi};
//!
//! let keysets = KeysetStore::new();
//! keysets.register("my-store", KeysetInput::access_token("shpat_..."))?;
//!
//! let config = ApiConfig::builder()
//!     .shop(ShopDomain::new("my-store")?)
//!     .keyset(&keysets, "my-store")
//!     .build()?;
//! let api = ShopifyApi::from_config(config)?;
//!
//! let count = api.count_orders(Params::new().with("status", "any")).await?;
//! ```
//!
//! ## OAuth
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_client::auth::oauth::{AuthorizationRequest, CallbackRequest, CoordinatorConfig, OAuthCoordinator};
//! use shopify_client::auth::KeysetStore;
//! use shopify_client::clients::ReqwestTransport;
//! use shopify_client::{AppCredentials, HostUrl, ShopDomain};
//!
//! let keysets = Arc::new(KeysetStore::new());
//! AppCredentials::from_env()?.register(&keysets, "public app")?;
//!
//! let coordinator = OAuthCoordinator::new(
//!     CoordinatorConfig::new(HostUrl::new("https://myapp.example.com")?),
//!     Arc::clone(&keysets),
//!     Arc::new(ReqwestTransport::new()?),
//! );
//! coordinator.on_auth(|token, request, _caller| {
//!     // persist the token for request.shop()
//! });
//! coordinator.harden();
//!
//! let pending = coordinator.begin(
//!     AuthorizationRequest::builder()
//!         .shop(ShopDomain::new("my-store")?)
//!         .keyset(&keysets, "public app")
//!         .build()?,
//! )?;
//! // redirect the merchant to pending.authorize_url, then in the HTTP server:
//! let response = coordinator.handle_callback(&CallbackRequest::parse(target)?).await;
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//! Secrets are masked in `Debug` output.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use auth::{AuthScopes, Credential, KeysetInput, KeysetStore};
pub use config::{
    AccessToken, ApiConfig, ApiConfigBuilder, ApiKey, ApiPassword, ApiSecretKey, AppCredentials,
    HostUrl, ShopDomain,
};
pub use error::ConfigError;
pub use rest::{ApiError, Params, ShopifyApi};
