//! Server-side coordination of OAuth redirects and callbacks.
//!
//! Each authorization attempt moves through these states:
//!
//! ```text
//! Initiated -> AwaitingCallback -> Exchanging -> Completed
//!                     |                 |
//!                     +----> Failed <---+
//! ```
//!
//! [`OAuthCoordinator::begin`] registers a pending entry under a fresh
//! [`CorrelationId`] before handing out the authorization URL, so a callback
//! can never arrive ahead of its handler. [`OAuthCoordinator::handle_callback`]
//! removes the entry on lookup (at most once), verifies the signature, answers
//! the browser, and runs the token exchange on a spawned task whose result is
//! delivered to the attempt's [`AuthCompletion`].

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::auth::oauth::authorize::{build_authorize_url, AuthorizationRequest, PostAuthTarget};
use crate::auth::oauth::correlation::CorrelationId;
use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::hmac::verify_callback;
use crate::auth::oauth::token_exchange::exchange_authorization_code;
use crate::auth::KeysetStore;
use crate::clients::HttpTransport;
use crate::config::{AccessToken, HostUrl};

/// Path prefix under which callbacks are served.
pub const DEFAULT_CALLBACK_PREFIX: &str = "/__shopify-auth";

/// Lifecycle state of one authorization attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// The authorization URL is being built.
    Initiated,
    /// Waiting for the browser to come back with a callback.
    AwaitingCallback,
    /// Exchanging the authorization code for a token.
    Exchanging,
    /// A token was acquired.
    Completed,
    /// The attempt failed.
    Failed,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initiated => "initiated",
            Self::AwaitingCallback => "awaiting_callback",
            Self::Exchanging => "exchanging",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// Settings for an [`OAuthCoordinator`].
///
/// # Defaults
///
/// - `callback_prefix`: `/__shopify-auth`
/// - `allow_path_correlation`: `false`
/// - `pending_ttl`: `None` (pending entries live until matched)
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    host: HostUrl,
    callback_prefix: String,
    allow_path_correlation: bool,
    pending_ttl: Option<Duration>,
}

impl CoordinatorConfig {
    /// Creates settings for an app served at `host`.
    #[must_use]
    pub fn new(host: HostUrl) -> Self {
        Self {
            host,
            callback_prefix: DEFAULT_CALLBACK_PREFIX.to_string(),
            allow_path_correlation: false,
            pending_ttl: None,
        }
    }

    /// Serves callbacks under `prefix` instead of `/__shopify-auth`.
    #[must_use]
    pub fn callback_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.callback_prefix = format!("/{}", prefix.as_ref().trim_matches('/'));
        self
    }

    /// Also accepts the correlation id from the last path segment when a
    /// callback carries no `state` parameter.
    ///
    /// This is the legacy behaviour and is open to substitution attacks.
    #[must_use]
    pub const fn allow_path_correlation(mut self, allow: bool) -> Self {
        self.allow_path_correlation = allow;
        self
    }

    /// Drops pending entries older than `ttl`.
    #[must_use]
    pub const fn pending_ttl(mut self, ttl: Duration) -> Self {
        self.pending_ttl = Some(ttl);
        self
    }

    /// Returns the app's base URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the callback path prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.callback_prefix
    }
}

/// An inbound callback request, with its query already decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackRequest {
    path: String,
    query: Vec<(String, String)>,
}

impl CallbackRequest {
    /// Creates a callback from a path and decoded query pairs.
    #[must_use]
    pub fn new(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parses a request target such as `/__shopify-auth/abc?code=...&state=...`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidCallback`] if a query component is not
    /// valid percent-encoded UTF-8.
    pub fn parse(target: &str) -> Result<Self, OAuthError> {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        let decode = |s: &str| {
            urlencoding::decode(&s.replace('+', " "))
                .map(std::borrow::Cow::into_owned)
                .map_err(|e| OAuthError::InvalidCallback {
                    reason: format!("malformed query component: {e}"),
                })
        };

        let mut pairs = Vec::new();
        for part in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            pairs.push((decode(key)?, decode(value)?));
        }

        Ok(Self::new(path, pairs))
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the decoded query pairs.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the first value of a query parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// What the host HTTP server should send back to the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body (HTML, possibly empty).
    pub body: String,
}

impl BrowserResponse {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body,
        }
    }

    /// A page that closes its own tab or window.
    #[must_use]
    pub fn close_window() -> Self {
        Self::html(
            200,
            "<html><head><script>window.close()</script></head><body></body></html>".to_string(),
        )
    }

    /// A page that navigates the top-level browsing context to `uri`.
    ///
    /// Used when the flow runs inside an embedded frame, where a plain
    /// redirect would only move the frame.
    #[must_use]
    pub fn top_level_redirect(uri: &str) -> Self {
        let literal = serde_json::Value::String(uri.to_string())
            .to_string()
            .replace("</", "<\\/");
        Self::html(
            200,
            format!("<script type='text/javascript'>window.top.location.href = {literal};</script>"),
        )
    }

    /// An HTTP 302 redirect to `uri`.
    #[must_use]
    pub fn redirect(uri: &str) -> Self {
        Self {
            status: 302,
            headers: vec![("Location".to_string(), uri.to_string())],
            body: String::new(),
        }
    }

    /// A generic HTTP 500 error page.
    #[must_use]
    pub fn error_page(reason: &str) -> Self {
        Self::html(
            500,
            format!(
                "<html><head><title>Error</title></head><body>Shopify Auth failed because {reason}</body></html>"
            ),
        )
    }

    /// Returns the value of the `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("location"))
            .map(|(_, value)| value.as_str())
    }
}

/// Result of a completed authorization, as seen by the flow's initiator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The permanent access token.
    Token(AccessToken),
    /// A token was acquired but the coordinator is hardened, so only
    /// registered observers receive it.
    Withheld,
}

impl AuthOutcome {
    /// Returns the token, unless it was withheld.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Withheld => None,
        }
    }
}

type CompletionResult = Result<AuthOutcome, OAuthError>;

/// Resolves once the attempt it belongs to completes or fails.
#[derive(Debug)]
pub struct AuthCompletion {
    receiver: oneshot::Receiver<CompletionResult>,
}

impl AuthCompletion {
    /// Waits for the attempt to finish.
    ///
    /// # Errors
    ///
    /// Returns the attempt's failure, or [`OAuthError::Abandoned`] if the
    /// pending entry was dropped (expired or the coordinator went away).
    pub async fn wait(self) -> CompletionResult {
        self.receiver.await.unwrap_or(Err(OAuthError::Abandoned))
    }

    /// Like [`wait`](Self::wait), but gives up when `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Cancelled`] on cancellation, otherwise as
    /// [`wait`](Self::wait).
    pub async fn wait_with_cancel(self, cancel: &CancellationToken) -> CompletionResult {
        tokio::select! {
            () = cancel.cancelled() => Err(OAuthError::Cancelled),
            result = self.receiver => result.unwrap_or(Err(OAuthError::Abandoned)),
        }
    }
}

/// A started authorization attempt.
#[derive(Debug)]
pub struct PendingAuthorization {
    /// The id correlating the callback with this attempt.
    pub correlation_id: CorrelationId,
    /// Where to send the merchant.
    pub authorize_url: String,
    /// The generated redirect URI Shopify will call back.
    pub redirect_uri: String,
    /// Resolves with the outcome.
    pub completion: AuthCompletion,
}

/// Observer called with each newly acquired token, the request it belongs
/// to, and the identity of the user who started the flow.
pub type AuthObserver = Arc<dyn Fn(&AccessToken, &AuthorizationRequest, Option<&str>) + Send + Sync>;

struct PendingHandler {
    request: AuthorizationRequest,
    sender: oneshot::Sender<CompletionResult>,
    created_at: Instant,
}

struct CoordinatorInner {
    config: CoordinatorConfig,
    keysets: Arc<KeysetStore>,
    transport: Arc<dyn HttpTransport>,
    pending: Mutex<HashMap<CorrelationId, PendingHandler>>,
    observers: RwLock<Vec<AuthObserver>>,
    hardened: AtomicBool,
    ignore_hmacs: AtomicBool,
}

/// Correlates authorization redirects with their callbacks.
///
/// Cloning is cheap; clones share the pending table, observers and flags.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopify_client::auth::oauth::{AuthorizationRequest, CallbackRequest, CoordinatorConfig, OAuthCoordinator};
/// use shopify_client::auth::KeysetStore;
/// use shopify_client::clients::ReqwestTransport;
/// use shopify_client::{HostUrl, ShopDomain};
///
/// let keysets = Arc::new(KeysetStore::new());
/// let coordinator = OAuthCoordinator::new(
///     CoordinatorConfig::new(HostUrl::new("https://myapp.example.com")?),
///     Arc::clone(&keysets),
///     Arc::new(ReqwestTransport::new()?),
/// );
/// coordinator.harden();
///
/// let pending = coordinator.begin(
///     AuthorizationRequest::builder()
///         .shop(ShopDomain::new("my-store")?)
///         .keyset(&keysets, "public app")
///         .build()?,
/// )?;
/// // Send the merchant to pending.authorize_url. In the HTTP server, route
/// // requests under coordinator.config().prefix() to handle_callback.
/// let response = coordinator.handle_callback(&CallbackRequest::parse(target)?).await;
/// let outcome = pending.completion.wait().await?;
/// ```
#[derive(Clone)]
pub struct OAuthCoordinator {
    inner: Arc<CoordinatorInner>,
}

// Verify OAuthCoordinator is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthCoordinator>();
};

impl fmt::Debug for OAuthCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCoordinator")
            .field("config", &self.inner.config)
            .field("pending", &self.pending_count())
            .field("hardened", &self.is_hardened())
            .field("ignore_hmacs", &self.ignores_hmacs())
            .finish_non_exhaustive()
    }
}

impl OAuthCoordinator {
    /// Creates a coordinator.
    ///
    /// `keysets` is consulted to verify callback signatures for requests
    /// built from a keyset.
    #[must_use]
    pub fn new(
        config: CoordinatorConfig,
        keysets: Arc<KeysetStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                config,
                keysets,
                transport,
                pending: Mutex::new(HashMap::new()),
                observers: RwLock::new(Vec::new()),
                hardened: AtomicBool::new(false),
                ignore_hmacs: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the coordinator's settings.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// Stops handing raw tokens to flow initiators. Observers still receive
    /// them. There is no way to undo this.
    pub fn harden(&self) {
        self.inner.hardened.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`harden`](Self::harden) has been called.
    #[must_use]
    pub fn is_hardened(&self) -> bool {
        self.inner.hardened.load(Ordering::SeqCst)
    }

    /// Disables callback signature verification. Test environments only.
    pub fn ignore_hmacs(&self) {
        tracing::warn!("OAuth callback HMAC verification disabled");
        self.inner.ignore_hmacs.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if signature verification is disabled.
    #[must_use]
    pub fn ignores_hmacs(&self) -> bool {
        self.inner.ignore_hmacs.load(Ordering::SeqCst)
    }

    /// Registers an observer for every successful token exchange.
    ///
    /// Observers run in registration order.
    pub fn on_auth<F>(&self, observer: F)
    where
        F: Fn(&AccessToken, &AuthorizationRequest, Option<&str>) + Send + Sync + 'static,
    {
        self.inner
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    /// Returns the number of attempts awaiting their callback.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if `path` falls under the callback prefix.
    #[must_use]
    pub fn handles_path(&self, path: &str) -> bool {
        let prefix = self.inner.config.prefix();
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Starts an authorization attempt.
    ///
    /// The pending entry is registered before this returns, so the
    /// authorization URL is safe to hand out immediately.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::CallerManagedRedirect`] if the request already
    /// names a redirect URI.
    pub fn begin(&self, request: AuthorizationRequest) -> Result<PendingAuthorization, OAuthError> {
        if request.redirect_uri().is_some() {
            return Err(OAuthError::CallerManagedRedirect);
        }

        let correlation_id = CorrelationId::new();
        let config = &self.inner.config;
        let redirect_uri = config.host().join(&format!(
            "{}/{}",
            config.prefix().trim_start_matches('/'),
            correlation_id
        ));
        let request = request.with_redirect_uri(redirect_uri.clone());
        let authorize_url = build_authorize_url(
            request.shop(),
            request.api_key(),
            request.scopes(),
            &redirect_uri,
            Some(&correlation_id),
        );

        let (sender, receiver) = oneshot::channel();
        let shop = request.shop().clone();
        {
            let mut pending = self
                .inner
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(ttl) = config.pending_ttl {
                pending.retain(|_, handler| handler.created_at.elapsed() < ttl);
            }
            pending.insert(
                correlation_id.clone(),
                PendingHandler {
                    request,
                    sender,
                    created_at: Instant::now(),
                },
            );
        }

        tracing::debug!(
            shop = %shop,
            state = %AuthState::AwaitingCallback,
            "authorization started"
        );

        Ok(PendingAuthorization {
            correlation_id,
            authorize_url,
            redirect_uri,
            completion: AuthCompletion { receiver },
        })
    }

    fn correlation_id_for(&self, callback: &CallbackRequest) -> Option<CorrelationId> {
        if let Some(state) = callback.param("state") {
            return Some(CorrelationId::from_raw(state));
        }

        if !self.inner.config.allow_path_correlation {
            return None;
        }

        callback
            .path()
            .strip_prefix(self.inner.config.prefix())
            .map(|rest| rest.trim_matches('/'))
            .filter(|segment| !segment.is_empty() && !segment.contains('/'))
            .map(CorrelationId::from_raw)
    }

    fn take_pending(&self, id: &CorrelationId) -> Option<PendingHandler> {
        let handler = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)?;

        match self.inner.config.pending_ttl {
            Some(ttl) if handler.created_at.elapsed() >= ttl => None,
            _ => Some(handler),
        }
    }

    fn fail(handler: PendingHandler, error: OAuthError, reason: &str) -> BrowserResponse {
        tracing::warn!(
            shop = %handler.request.shop(),
            state = %AuthState::Failed,
            error = %error,
            "authorization callback rejected"
        );
        let _ = handler.sender.send(Err(error));
        BrowserResponse::error_page(reason)
    }

    /// Handles an inbound callback and returns the browser response.
    ///
    /// The token exchange runs on a spawned task after this returns; its
    /// result goes to the attempt's [`AuthCompletion`] and observers. Must be
    /// called from within a Tokio runtime.
    pub async fn handle_callback(&self, callback: &CallbackRequest) -> BrowserResponse {
        let correlation_id = self.correlation_id_for(callback);
        let handler = correlation_id.as_ref().and_then(|id| self.take_pending(id));

        let Some(handler) = handler else {
            let error = OAuthError::NoMatchingHandler {
                correlation_id: correlation_id.map(|id| id.to_string()).unwrap_or_default(),
            };
            tracing::warn!(
                state = %AuthState::Failed,
                pending = self.pending_count(),
                error = %error,
                "authorization callback rejected"
            );
            return BrowserResponse::error_page("no handler");
        };

        if let Err(error) = self.verify_signature(&handler.request, callback) {
            return Self::fail(handler, error, "of invalid signature/shared secret");
        }

        let code = match callback.param("code") {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                let error = OAuthError::InvalidCallback {
                    reason: "missing 'code' parameter".to_string(),
                };
                return Self::fail(handler, error, "of a malformed callback");
            }
        };

        let response = match handler.request.post_auth() {
            PostAuthTarget::Close => BrowserResponse::close_window(),
            PostAuthTarget::Navigate(uri) if handler.request.is_embedded() => {
                BrowserResponse::top_level_redirect(uri)
            }
            PostAuthTarget::Navigate(uri) => BrowserResponse::redirect(uri),
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.complete(handler, code).await;
        });

        response
    }

    fn verify_signature(
        &self,
        request: &AuthorizationRequest,
        callback: &CallbackRequest,
    ) -> Result<(), OAuthError> {
        if self.ignores_hmacs() {
            return Ok(());
        }

        let Some(keyset) = request.keyset() else {
            return Ok(());
        };

        let credential = self.inner.keysets.resolve(keyset)?;
        let Some(secret) = credential.secret() else {
            return Ok(());
        };

        if verify_callback(callback.query(), secret.as_ref()) {
            Ok(())
        } else {
            Err(OAuthError::InvalidSignature)
        }
    }
}

impl CoordinatorInner {
    async fn complete(&self, handler: PendingHandler, code: String) {
        let PendingHandler {
            request, sender, ..
        } = handler;

        tracing::debug!(shop = %request.shop(), state = %AuthState::Exchanging, "exchanging authorization code");

        let result = exchange_authorization_code(
            self.transport.as_ref(),
            request.shop(),
            request.api_key(),
            request.secret(),
            &code,
        )
        .await;

        let token = match result {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(
                    shop = %request.shop(),
                    state = %AuthState::Failed,
                    error = %error,
                    "token exchange failed"
                );
                let _ = sender.send(Err(error));
                return;
            }
        };

        tracing::info!(shop = %request.shop(), state = %AuthState::Completed, "access token acquired");

        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            observer(&token, &request, request.caller_id());
        }

        let outcome = if self.hardened.load(Ordering::SeqCst) {
            AuthOutcome::Withheld
        } else {
            AuthOutcome::Token(token)
        };
        let _ = sender.send(Ok(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::hmac::{compute_signature, signable_message};
    use crate::auth::KeysetInput;
    use crate::clients::{RecordingTransport, TransportResponse};
    use crate::config::ShopDomain;
    use serde_json::json;

    fn token_response(token: &str) -> TransportResponse {
        TransportResponse::new(200, Vec::new(), json!({ "access_token": token }))
    }

    fn setup(responses: Vec<TransportResponse>) -> (OAuthCoordinator, Arc<KeysetStore>) {
        let keysets = Arc::new(KeysetStore::new());
        keysets
            .register("public app", KeysetInput::oauth_app("client-id", "hush"))
            .unwrap();
        let coordinator = OAuthCoordinator::new(
            CoordinatorConfig::new(HostUrl::new("https://myapp.example.com").unwrap()),
            Arc::clone(&keysets),
            Arc::new(RecordingTransport::new(responses)),
        );
        (coordinator, keysets)
    }

    fn request(keysets: &KeysetStore) -> AuthorizationRequest {
        AuthorizationRequest::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .keyset(keysets, "public app")
            .caller_id("user-1")
            .build()
            .unwrap()
    }

    fn signed_callback(id: &CorrelationId, secret: &str) -> CallbackRequest {
        let mut query = vec![
            ("code".to_string(), "auth-code".to_string()),
            ("shop".to_string(), "test-shop.myshopify.com".to_string()),
            ("state".to_string(), id.to_string()),
            ("timestamp".to_string(), "1337178173".to_string()),
        ];
        let hmac = compute_signature(&signable_message(&query), secret);
        query.push(("hmac".to_string(), hmac));
        CallbackRequest::new(format!("/__shopify-auth/{id}"), query)
    }

    #[test]
    fn test_begin_registers_pending_before_returning() {
        let (coordinator, keysets) = setup(Vec::new());
        let pending = coordinator.begin(request(&keysets)).unwrap();

        assert_eq!(coordinator.pending_count(), 1);
        assert_eq!(
            pending.redirect_uri,
            format!("https://myapp.example.com/__shopify-auth/{}", pending.correlation_id)
        );
        assert!(pending
            .authorize_url
            .starts_with("https://test-shop.myshopify.com/admin/oauth/authorize?client_id=client-id"));
        assert!(pending
            .authorize_url
            .ends_with(&format!("&state={}", pending.correlation_id)));
    }

    #[test]
    fn test_begin_rejects_caller_managed_redirect() {
        let (coordinator, keysets) = setup(Vec::new());
        let request = AuthorizationRequest::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .keyset(&keysets, "public app")
            .redirect_uri("https://myapp.example.com/custom")
            .build()
            .unwrap();

        assert!(matches!(
            coordinator.begin(request),
            Err(OAuthError::CallerManagedRedirect)
        ));
        assert_eq!(coordinator.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_callback_closes_window_and_delivers_token() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;

        assert_eq!(response, BrowserResponse::close_window());
        let outcome = pending.completion.wait().await.unwrap();
        assert_eq!(outcome.token().unwrap().as_ref(), "permanent");
        assert_eq!(coordinator.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_replayed_callback_finds_no_handler() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        let pending = coordinator.begin(request(&keysets)).unwrap();
        let callback = signed_callback(&pending.correlation_id, "hush");

        let first = coordinator.handle_callback(&callback).await;
        assert_eq!(first.status, 200);

        let second = coordinator.handle_callback(&callback).await;
        assert_eq!(second.status, 500);
        assert!(second.body.contains("no handler"));
    }

    #[tokio::test]
    async fn test_unknown_correlation_id_returns_error_page() {
        let (coordinator, _) = setup(Vec::new());
        let callback = CallbackRequest::parse("/__shopify-auth/x?state=unknown&code=c").unwrap();

        let response = coordinator.handle_callback(&callback).await;
        assert_eq!(response.status, 500);
        assert!(!response.body.contains("unknown"));
    }

    #[tokio::test]
    async fn test_invalid_signature_fails_attempt_and_consumes_entry() {
        let (coordinator, keysets) = setup(Vec::new());
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "wrong"))
            .await;

        assert_eq!(response.status, 500);
        assert!(response.body.contains("invalid signature"));
        assert!(matches!(
            pending.completion.wait().await,
            Err(OAuthError::InvalidSignature)
        ));
        assert_eq!(coordinator.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_ignore_hmacs_skips_verification() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        coordinator.ignore_hmacs();
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "wrong"))
            .await;

        assert_eq!(response.status, 200);
        assert!(pending.completion.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_request_without_keyset_skips_verification() {
        let (coordinator, _) = setup(vec![token_response("permanent")]);
        let request = AuthorizationRequest::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .credentials(
                crate::config::ApiKey::new("client-id").unwrap(),
                crate::config::ApiSecretKey::new("hush").unwrap(),
            )
            .build()
            .unwrap();
        let pending = coordinator.begin(request).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "unrelated"))
            .await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_embedded_flow_navigates_top_frame() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        let request = AuthorizationRequest::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .keyset(&keysets, "public app")
            .post_auth_uri("https://myapp.example.com/done")
            .embedded(true)
            .build()
            .unwrap();
        let pending = coordinator.begin(request).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;

        assert_eq!(response.status, 200);
        assert!(response
            .body
            .contains(r#"window.top.location.href = "https://myapp.example.com/done""#));
    }

    #[tokio::test]
    async fn test_non_embedded_flow_redirects() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        let request = AuthorizationRequest::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .keyset(&keysets, "public app")
            .post_auth_uri("https://myapp.example.com/done")
            .build()
            .unwrap();
        let pending = coordinator.begin(request).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;

        assert_eq!(response.status, 302);
        assert_eq!(response.location(), Some("https://myapp.example.com/done"));
    }

    #[tokio::test]
    async fn test_observers_run_in_order_and_hardening_withholds_token() {
        let (coordinator, keysets) = setup(vec![token_response("permanent")]);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second"] {
            let seen = Arc::clone(&seen);
            coordinator.on_auth(move |token, request, caller| {
                seen.lock().unwrap().push(format!(
                    "{label}:{}:{}:{}",
                    token.as_ref(),
                    request.shop().shop_name(),
                    caller.unwrap_or("-")
                ));
            });
        }
        coordinator.harden();
        assert!(coordinator.is_hardened());

        let pending = coordinator.begin(request(&keysets)).unwrap();
        coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;

        assert_eq!(pending.completion.wait().await.unwrap(), AuthOutcome::Withheld);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "first:permanent:test-shop:user-1".to_string(),
                "second:permanent:test-shop:user-1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_exchange_is_delivered_to_completion() {
        let (coordinator, keysets) = setup(vec![TransportResponse::new(
            403,
            Vec::new(),
            json!({}),
        )]);
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;
        assert_eq!(response.status, 200);

        assert!(matches!(
            pending.completion.wait().await,
            Err(OAuthError::TokenExchangeFailed { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_path_correlation_only_when_enabled() {
        let keysets = Arc::new(KeysetStore::new());
        keysets
            .register("public app", KeysetInput::oauth_app("client-id", "hush"))
            .unwrap();
        let coordinator = OAuthCoordinator::new(
            CoordinatorConfig::new(HostUrl::new("https://myapp.example.com").unwrap())
                .allow_path_correlation(true),
            Arc::clone(&keysets),
            Arc::new(RecordingTransport::new(vec![token_response("t")])),
        );
        coordinator.ignore_hmacs();
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let callback =
            CallbackRequest::parse(&format!("/__shopify-auth/{}?code=c", pending.correlation_id))
                .unwrap();
        assert_eq!(coordinator.handle_callback(&callback).await.status, 200);

        let (strict, keysets) = setup(Vec::new());
        let pending = strict.begin(request(&keysets)).unwrap();
        let callback =
            CallbackRequest::parse(&format!("/__shopify-auth/{}?code=c", pending.correlation_id))
                .unwrap();
        assert_eq!(strict.handle_callback(&callback).await.status, 500);
        assert_eq!(strict.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_treated_as_absent() {
        let keysets = Arc::new(KeysetStore::new());
        keysets
            .register("public app", KeysetInput::oauth_app("client-id", "hush"))
            .unwrap();
        let coordinator = OAuthCoordinator::new(
            CoordinatorConfig::new(HostUrl::new("https://myapp.example.com").unwrap())
                .pending_ttl(Duration::ZERO),
            Arc::clone(&keysets),
            Arc::new(RecordingTransport::new(Vec::new())),
        );
        let pending = coordinator.begin(request(&keysets)).unwrap();

        let response = coordinator
            .handle_callback(&signed_callback(&pending.correlation_id, "hush"))
            .await;
        assert_eq!(response.status, 500);
        assert!(matches!(
            pending.completion.wait().await,
            Err(OAuthError::Abandoned)
        ));
    }

    #[tokio::test]
    async fn test_wait_with_cancel() {
        let (coordinator, keysets) = setup(Vec::new());
        let pending = coordinator.begin(request(&keysets)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(matches!(
            pending.completion.wait_with_cancel(&cancel).await,
            Err(OAuthError::Cancelled)
        ));
    }

    #[test]
    fn test_callback_parse_decodes_query() {
        let callback =
            CallbackRequest::parse("/__shopify-auth?shop=a.myshopify.com&x=1%262&y=a+b&flag")
                .unwrap();
        assert_eq!(callback.path(), "/__shopify-auth");
        assert_eq!(callback.param("shop"), Some("a.myshopify.com"));
        assert_eq!(callback.param("x"), Some("1&2"));
        assert_eq!(callback.param("y"), Some("a b"));
        assert_eq!(callback.param("flag"), Some(""));
    }

    #[test]
    fn test_handles_path() {
        let (coordinator, _) = setup(Vec::new());
        assert!(coordinator.handles_path("/__shopify-auth"));
        assert!(coordinator.handles_path("/__shopify-auth/abc"));
        assert!(!coordinator.handles_path("/__shopify-authx"));
        assert!(!coordinator.handles_path("/other"));
    }

    #[test]
    fn test_top_level_redirect_escapes_uri() {
        let response = BrowserResponse::top_level_redirect("https://x.test/'</script><b>");
        assert!(!response.body.contains("</script><b>"));
    }
}
