//! Credentials and authentication.
//!
//! # Overview
//!
//! - [`KeysetStore`]: named credential bundles, resolved to a [`Credential`]
//! - [`Authenticator`]: decorates outgoing requests with credentials
//! - [`AuthScopes`]: OAuth scopes, with the default set requested by new flows
//! - [`oauth`]: the authorization code flow and its redirect coordinator
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::{authenticator_for, KeysetInput, KeysetStore};
//! use shopify_client::clients::TransportRequest;
//! use shopify_client::ShopDomain;
//!
//! let store = KeysetStore::new();
//! store.register("private app", KeysetInput::private_app("key", "password")).unwrap();
//!
//! let credential = store.resolve("private app").unwrap();
//! let auth = authenticator_for(&credential, &ShopDomain::new("my-store").unwrap()).unwrap();
//!
//! let mut request = TransportRequest::new();
//! auth.authenticate(&mut request).unwrap();
//! assert!(request.basic_auth().is_some());
//! ```

mod authenticator;
mod keyset;
pub mod oauth;
mod scopes;

pub use authenticator::{
    authenticator_for, AuthError, Authenticator, OAuthAuthenticator, PrivateAppAuthenticator,
    PublicAppAuthenticator, ACCESS_TOKEN_HEADER,
};
pub use keyset::{Credential, KeysetInput, KeysetStore};
pub use scopes::AuthScopes;
