//! Incoming response types.

use std::collections::HashMap;

/// Header carrying the shop's call-limit bucket usage.
pub const CALL_LIMIT_HEADER: &str = "x-shopify-shop-api-call-limit";

/// Header carrying a deprecation notice for the requested endpoint.
pub const DEPRECATION_HEADER: &str = "x-shopify-api-deprecated-reason";

/// Rate limit information parsed from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is "X/Y" where X is the current request count and Y is
/// the bucket size.
///
/// # Example
///
/// ```rust
/// use shopify_client::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("32/40").unwrap();
/// assert_eq!(limit.request_count, 32);
/// assert_eq!(limit.bucket_size, Some(40));
///
/// // Only the numerator is required.
/// assert_eq!(ApiCallLimit::parse("7").unwrap().request_count, 7);
/// assert!(ApiCallLimit::parse("abc/40").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// The current number of requests made in this bucket.
    pub request_count: u32,
    /// The bucket size, when present and numeric.
    pub bucket_size: Option<u32>,
}

impl ApiCallLimit {
    /// Parses the rate limit header value.
    ///
    /// Returns `None` when the numerator is not an unsigned integer.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.trim().splitn(2, '/');
        let request_count = parts.next()?.trim().parse().ok()?;
        let bucket_size = parts.next().and_then(|s| s.trim().parse().ok());

        Some(Self {
            request_count,
            bucket_size,
        })
    }
}

/// A response as returned by an [`HttpTransport`](crate::clients::HttpTransport).
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body, or `Null` when the body was empty or not JSON.
    pub body: serde_json::Value,
}

impl TransportResponse {
    /// Creates a response, lower-casing header names.
    #[must_use]
    pub fn new(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: serde_json::Value,
    ) -> Self {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            map.entry(name.to_lowercase()).or_default().push(value);
        }

        Self {
            status,
            headers: map,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw call-limit header value, if present.
    #[must_use]
    pub fn call_limit_header(&self) -> Option<&str> {
        self.header(CALL_LIMIT_HEADER)
    }

    /// Returns the deprecation reason, if the endpoint is deprecated.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header(DEPRECATION_HEADER)
    }
}
