//! Admin REST API dispatch.
//!
//! - [`ShopifyApi`]: the client; one snake_case method per catalog endpoint
//! - [`EndpointDescriptor`]: method, path template and unwrap key of an endpoint
//! - [`catalog`]: every known endpoint, plus [`find_endpoint`]
//! - [`Params`]: path parameters, query parameters and body of a call
//! - [`RateLimiter`]: call-limit backoff shared by a client's calls
//! - [`ApiError`]: everything a call can fail with
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_client::rest::{Params, ShopifyApi};
//!
//! let api = ShopifyApi::from_config(config)?;
//!
//! // GET /admin/orders/450789469.json, unwrapped to the "order" object
//! let order = api.get_order(Params::new().with("id", 450789469)).await?;
//!
//! // Every open order, 250 per page
//! let orders = api.get_all_orders(Params::new()).await?;
//! ```

mod api;
pub mod catalog;
mod endpoint;
mod errors;
mod params;
mod rate_limit;

pub use api::{ShopifyApi, PAGE_LIMIT};
pub use catalog::{find_endpoint, ENDPOINTS};
pub use endpoint::EndpointDescriptor;
pub use errors::ApiError;
pub use params::{ParamValue, Params};
pub use rate_limit::{RateLimiter, QUEUE_STEP};
