//! HTTP transport layer.
//!
//! This module provides the single HTTP-call primitive the rest of the crate
//! is built on. The dispatcher and the OAuth coordinator never touch reqwest
//! directly; they go through [`HttpTransport`].
//!
//! # Overview
//!
//! - [`HttpTransport`]: async trait performing one request/response exchange
//! - [`ReqwestTransport`]: the default implementation
//! - [`TransportRequest`]: headers, query, body and basic-auth of a request
//! - [`TransportResponse`]: status, lower-cased headers and parsed JSON body
//! - [`ApiCallLimit`]: parsed `X-Shopify-Shop-Api-Call-Limit` header
//! - [`HttpError`]: failure to obtain any response
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_client::clients::{HttpMethod, HttpTransport, ReqwestTransport, TransportRequest};
//!
//! let transport = ReqwestTransport::new()?;
//! let mut request = TransportRequest::new();
//! request.set_header("X-Shopify-Access-Token", "shpat_...");
//!
//! let response = transport
//!     .call(HttpMethod::Get, "https://my-store.myshopify.com/admin/shop.json", request)
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::HttpError;
pub use http_client::{HttpTransport, ReqwestTransport, SDK_VERSION};
pub use http_request::{BasicAuth, HttpMethod, TransportRequest};
pub use http_response::{ApiCallLimit, TransportResponse, CALL_LIMIT_HEADER, DEPRECATION_HEADER};

#[cfg(test)]
pub(crate) use http_client::testing::RecordingTransport;
