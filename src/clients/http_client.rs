//! The HTTP-call primitive and its reqwest-backed implementation.
//!
//! Everything above this layer talks to an [`HttpTransport`] trait object, so
//! tests can substitute a spy or fake without a network.

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, TransportRequest};
use crate::clients::http_response::TransportResponse;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs one HTTP exchange.
///
/// Implementations must not retry or interpret status codes: any response,
/// whatever its status, is returned as `Ok`. Only failures to obtain a
/// response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` to `url` with the given method.
    async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        request: TransportRequest,
    ) -> Result<TransportResponse, HttpError>;

    /// POSTs `data` as a JSON body to `url`.
    async fn post(
        &self,
        url: &str,
        data: serde_json::Value,
    ) -> Result<TransportResponse, HttpError> {
        let mut request = TransportRequest::new();
        request.set_body(data);
        self.call(HttpMethod::Post, url, request).await
    }
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_client::clients::ReqwestTransport;
///
/// let transport = ReqwestTransport::new().expect("TLS backend available");
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: String,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the client cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        Self {
            client,
            user_agent: format!("Shopify Keyset Client v{SDK_VERSION} | Rust {rust_version}"),
        }
    }

    fn parse_body(text: &str) -> serde_json::Value {
        if text.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        request: TransportRequest,
    ) -> Result<TransportResponse, HttpError> {
        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        builder = builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }

        if let Some(auth) = request.basic_auth() {
            if !request.has_header("Authorization") {
                builder = builder.header("Authorization", auth.header_value());
            }
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let res = builder.send().await?;

        let status = res.status().as_u16();
        let headers: Vec<(String, String)> = res
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let text = res.text().await?;

        Ok(TransportResponse::new(status, headers, Self::parse_body(&text)))
    }
}
