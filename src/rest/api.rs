//! The admin API client.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::auth::{authenticator_for, Authenticator};
use crate::clients::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::rest::catalog::{
    find_endpoint, COUNT_COLLECTS, COUNT_ORDERS, COUNT_PRODUCTS, GET_COLLECTS, GET_ORDERS,
    GET_PRODUCTS,
};
use crate::rest::{ApiError, EndpointDescriptor, Params, RateLimiter};

/// Page size used by fetch-all calls.
pub const PAGE_LIMIT: usize = 250;

/// Client for one shop's admin REST API.
///
/// Every catalog endpoint is available as a snake_case method (e.g.
/// [`get_orders`](Self::get_orders)); [`call`](Self::call) dispatches any
/// [`EndpointDescriptor`].
///
/// Calls go through a per-client [`RateLimiter`]. HTTP 429 responses are
/// retried through it until they succeed, or until
/// [`ApiConfig::max_throttle_retries`] is exceeded when one is set.
///
/// # Thread Safety
///
/// `ShopifyApi` is `Send + Sync`; share it with an `Arc` to issue calls
/// concurrently against the same call-limit state.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_client::rest::{Params, ShopifyApi};
///
/// let api = ShopifyApi::from_config(config)?;
/// let open = api.count_orders(Params::new().with("status", "open")).await?;
/// let page = api.get_orders(Params::new().with("page", 2)).await?;
/// let everything = api.get_all_orders(Params::new()).await?;
/// ```
pub struct ShopifyApi {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
    authenticator: RwLock<Arc<dyn Authenticator>>,
    limiter: RateLimiter,
}

// Verify ShopifyApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyApi>();
};

impl fmt::Debug for ShopifyApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyApi")
            .field("config", &self.config)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl ShopifyApi {
    /// Creates a client sending requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if no authenticator can be built for the
    /// configured credential.
    pub fn new(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Result<Self, ConfigError> {
        let authenticator = authenticator_for(config.credential(), config.shop())?;
        let limiter = RateLimiter::new(config.backoff());

        Ok(Self {
            config,
            transport,
            authenticator: RwLock::new(authenticator),
            limiter,
        })
    }

    /// Creates a client with the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built,
    /// or [`ApiError::Config`] as for [`new`](Self::new).
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(config, Arc::new(transport))?)
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the client's call-limit state.
    #[must_use]
    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Replaces the authenticator, e.g. with an
    /// [`OAuthAuthenticator`](crate::auth::OAuthAuthenticator) that has just
    /// acquired its token.
    pub fn set_authenticator(&self, authenticator: Arc<dyn Authenticator>) {
        *self
            .authenticator
            .write()
            .unwrap_or_else(PoisonError::into_inner) = authenticator;
    }

    /// Returns `true` if requests can currently be authenticated.
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.current_authenticator().is_authenticated()
    }

    fn current_authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(
            &self
                .authenticator
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Calls `endpoint` with `params`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingParameter`] before any request if a path
    ///   parameter is missing
    /// - [`ApiError::Auth`] if the request cannot be authenticated
    /// - [`ApiError::Transport`] if no response was obtained
    /// - [`ApiError::Status`] for non-2xx responses other than 429
    /// - [`ApiError::Throttled`] when a retry cap is set and exceeded
    pub async fn call(
        &self,
        endpoint: &EndpointDescriptor,
        params: Params,
    ) -> Result<Value, ApiError> {
        self.call_with_cancel(endpoint, params, &CancellationToken::new())
            .await
    }

    /// Calls the catalog endpoint named `name` (e.g. `"getOrders"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownEndpoint`] for an unknown name, otherwise
    /// as [`call`](Self::call).
    pub async fn call_by_name(&self, name: &str, params: Params) -> Result<Value, ApiError> {
        let endpoint = find_endpoint(name).ok_or_else(|| ApiError::UnknownEndpoint {
            name: name.to_string(),
        })?;
        self.call(endpoint, params).await
    }

    /// Like [`call`](Self::call), but stops waiting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// As [`call`](Self::call), plus [`ApiError::Cancelled`].
    pub async fn call_with_cancel(
        &self,
        endpoint: &EndpointDescriptor,
        params: Params,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        let path = endpoint.render_path(&params)?;
        let url = format!("{}{}", self.config.base_url(), path);
        let query = endpoint.query_params(&params);

        let mut throttled: u32 = 0;
        loop {
            self.limiter.acquire(cancel).await?;

            let request = self.prepare_request(&query, params.body())?;
            self.log_dispatch(endpoint, &url, throttled);

            let response = tokio::select! {
                () = cancel.cancelled() => return Err(ApiError::Cancelled),
                result = self.transport.call(endpoint.method, &url, request) => result?,
            };

            self.limiter.observe(response.call_limit_header());
            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    endpoint = endpoint.name,
                    reason,
                    "deprecated request to Shopify API"
                );
            }

            if response.status == 429 {
                throttled += 1;
                if let Some(max) = self.config.max_throttle_retries() {
                    if throttled > max {
                        return Err(ApiError::Throttled {
                            attempts: throttled,
                        });
                    }
                }
                self.limiter.note_throttled();
                tracing::debug!(
                    endpoint = endpoint.name,
                    attempts = throttled,
                    "throttled by Shopify, retrying"
                );
                continue;
            }

            return Self::classify(endpoint, response);
        }
    }

    fn prepare_request(
        &self,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<TransportRequest, ApiError> {
        let mut request = TransportRequest::new();
        for (key, value) in query {
            request.push_query(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request.set_body(body.clone());
        }

        self.current_authenticator().authenticate(&mut request)?;

        for (name, value) in self.config.headers() {
            request.set_header_if_absent(name, value);
        }

        Ok(request)
    }

    fn log_dispatch(&self, endpoint: &EndpointDescriptor, url: &str, retry: u32) {
        if self.config.debug() {
            tracing::info!(
                endpoint = endpoint.name,
                method = %endpoint.method,
                url,
                retry,
                "dispatching request"
            );
        } else {
            tracing::debug!(
                endpoint = endpoint.name,
                method = %endpoint.method,
                url,
                retry,
                "dispatching request"
            );
        }
    }

    fn classify(
        endpoint: &EndpointDescriptor,
        response: TransportResponse,
    ) -> Result<Value, ApiError> {
        if !response.is_ok() {
            return Err(ApiError::Status {
                code: response.status,
                body: response.body,
            });
        }
        endpoint.unwrap_body(response.body)
    }

    /// Fetches every item of a count + list endpoint pair.
    ///
    /// Calls `count` with `params`, then pages through `list` with
    /// `limit=250` and `page=1, 2, ...` until the count is covered. Item `i`
    /// of page `p` lands at index `(p - 1) * 250 + i`; slots a short page
    /// leaves unfilled stay `null`.
    ///
    /// # Errors
    ///
    /// [`ApiError::CountFailed`] or [`ApiError::PageFailed`] wrapping the
    /// underlying failure. Cancellation surfaces as [`ApiError::Cancelled`].
    pub async fn fetch_all(
        &self,
        count: &EndpointDescriptor,
        list: &EndpointDescriptor,
        params: Params,
    ) -> Result<Vec<Value>, ApiError> {
        self.fetch_all_with_cancel(count, list, params, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_all`](Self::fetch_all), but stops when `cancel` fires.
    ///
    /// # Errors
    ///
    /// As [`fetch_all`](Self::fetch_all).
    pub async fn fetch_all_with_cancel(
        &self,
        count: &EndpointDescriptor,
        list: &EndpointDescriptor,
        params: Params,
        cancel: &CancellationToken,
    ) -> Result<Vec<Value>, ApiError> {
        let wrap_count = |error: ApiError| match error {
            ApiError::Cancelled => error,
            other => ApiError::CountFailed(Box::new(other)),
        };

        let counted = self
            .call_with_cancel(count, params.clone(), cancel)
            .await
            .map_err(wrap_count)?;
        let total = counted
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                wrap_count(ApiError::UnexpectedResponse {
                    reason: format!("count is not a non-negative integer: {counted}"),
                })
            })?;

        let mut items: Vec<Value> = Vec::new();
        items.try_reserve_exact(total).map_err(|e| {
            wrap_count(ApiError::UnexpectedResponse {
                reason: format!("count {total} is too large to collect: {e}"),
            })
        })?;
        items.resize(total, Value::Null);
        let mut offset = 0;
        let mut page: u32 = 1;

        while offset < total {
            let wrap_page = |error: ApiError| match error {
                ApiError::Cancelled => error,
                other => ApiError::PageFailed {
                    page,
                    source: Box::new(other),
                },
            };

            let page_params = params
                .clone()
                .with("limit", PAGE_LIMIT.to_string())
                .with("page", page);
            let value = self
                .call_with_cancel(list, page_params, cancel)
                .await
                .map_err(wrap_page)?;
            let Value::Array(page_items) = value else {
                return Err(wrap_page(ApiError::UnexpectedResponse {
                    reason: format!("{} did not return a list", list.name),
                }));
            };

            for (slot, item) in items
                .iter_mut()
                .skip(offset)
                .zip(page_items.into_iter().take(PAGE_LIMIT))
            {
                *slot = item;
            }

            offset += PAGE_LIMIT;
            page += 1;
        }

        Ok(items)
    }

    /// Fetches every order matching `params`.
    ///
    /// Without a `status` (or with an empty one), only open orders are
    /// fetched, as with
    /// [`get_orders`](Self::get_orders).
    ///
    /// # Errors
    ///
    /// As [`fetch_all`](Self::fetch_all).
    pub async fn get_all_orders(&self, params: Params) -> Result<Vec<Value>, ApiError> {
        self.get_all_orders_with_cancel(params, &CancellationToken::new())
            .await
    }

    /// Cancellable form of [`get_all_orders`](Self::get_all_orders).
    ///
    /// # Errors
    ///
    /// As [`fetch_all`](Self::fetch_all).
    pub async fn get_all_orders_with_cancel(
        &self,
        mut params: Params,
        cancel: &CancellationToken,
    ) -> Result<Vec<Value>, ApiError> {
        if params.provided("status").is_none() {
            params.set("status", "open");
        }
        self.fetch_all_with_cancel(&COUNT_ORDERS, &GET_ORDERS, params, cancel)
            .await
    }

    /// Fetches every product matching `params`.
    ///
    /// # Errors
    ///
    /// As [`fetch_all`](Self::fetch_all).
    pub async fn get_all_products(&self, params: Params) -> Result<Vec<Value>, ApiError> {
        self.fetch_all(&COUNT_PRODUCTS, &GET_PRODUCTS, params).await
    }

    /// Fetches every collect matching `params`.
    ///
    /// # Errors
    ///
    /// As [`fetch_all`](Self::fetch_all).
    pub async fn get_all_collects(&self, params: Params) -> Result<Vec<Value>, ApiError> {
        self.fetch_all(&COUNT_COLLECTS, &GET_COLLECTS, params).await
    }
}
