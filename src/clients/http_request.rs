//! Outgoing request types.
//!
//! A [`TransportRequest`] is what an [`Authenticator`](crate::auth::Authenticator)
//! decorates and what an [`HttpTransport`](crate::clients::HttpTransport)
//! sends. It carries everything but the method and URL.

use base64::prelude::*;
use std::fmt;

/// HTTP methods used by the admin REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic-auth credentials attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// The username (a private app's API key).
    pub username: String,
    /// The password.
    pub password: String,
}

impl BasicAuth {
    /// Returns the `Authorization` header value, `Basic base64(user:password)`.
    #[must_use]
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", BASE64_STANDARD.encode(raw))
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// Headers, query parameters, body and credentials of an outgoing request.
///
/// Header names are matched case-insensitively. Query parameters keep their
/// insertion order.
///
/// # Example
///
/// ```rust
/// use shopify_client::clients::TransportRequest;
///
/// let mut request = TransportRequest::new();
/// request.set_header("X-Shopify-Access-Token", "token");
/// request.push_query("status", "open");
///
/// assert!(request.has_header("x-shopify-access-token"));
/// assert_eq!(request.query(), &[("status".to_string(), "open".to_string())]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportRequest {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    basic_auth: Option<BasicAuth>,
}

impl TransportRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any existing header with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Sets a header only if the request does not already carry one with
    /// the same name.
    pub fn set_header_if_absent(&mut self, name: &str, value: &str) {
        if !self.has_header(name) {
            self.headers.push((name.to_string(), value.to_string()));
        }
    }

    /// Returns `true` if a header with this name is present.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Returns the value of the named header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Appends a query parameter.
    pub fn push_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Sets the JSON body.
    pub fn set_body(&mut self, body: serde_json::Value) {
        self.body = Some(body);
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Sets basic-auth credentials.
    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
    }

    /// Returns the basic-auth credentials, if any.
    #[must_use]
    pub const fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }
}
