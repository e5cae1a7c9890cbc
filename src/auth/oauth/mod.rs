//! OAuth 2.0 authorization code flow for public apps.
//!
//! There are two ways to run the flow:
//!
//! - **Coordinated** ([`OAuthCoordinator`]): the coordinator generates the
//!   redirect URI, correlates the callback through the `state` parameter,
//!   verifies its signature, answers the browser and exchanges the code.
//! - **Caller-managed**: build an [`AuthorizationRequest`] with your own
//!   `redirect_uri`, send the merchant to
//!   [`AuthorizationRequest::authorize_url`], and exchange the code yourself
//!   with [`OAuthAuthenticator::get_permanent_access_token`].
//!
//! [`OAuthAuthenticator::get_permanent_access_token`]: crate::auth::OAuthAuthenticator::get_permanent_access_token
//!
//! # Security
//!
//! - Correlation ids come from a CSPRNG and are single use
//! - Callback HMACs are compared in constant time
//! - A hardened coordinator only hands tokens to registered observers

mod authorize;
mod coordinator;
mod correlation;
mod error;
pub mod hmac;
mod token_exchange;

pub use authorize::{
    build_authorize_url, AuthorizationRequest, AuthorizationRequestBuilder, PostAuthTarget,
    CLOSE_SENTINEL,
};
pub use coordinator::{
    AuthCompletion, AuthObserver, AuthOutcome, AuthState, BrowserResponse, CallbackRequest,
    CoordinatorConfig, OAuthCoordinator, PendingAuthorization, DEFAULT_CALLBACK_PREFIX,
};
pub use correlation::CorrelationId;
pub use error::OAuthError;
pub use token_exchange::{access_token_url, exchange_authorization_code};
