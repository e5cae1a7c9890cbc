//! Endpoint descriptors and path rendering.
//!
//! A descriptor's path template names its required parameters with
//! `{param}` placeholders:
//!
//! ```rust
//! use shopify_client::clients::HttpMethod;
//! use shopify_client::rest::{EndpointDescriptor, Params};
//!
//! const GET_FULFILLMENT: EndpointDescriptor = EndpointDescriptor::new(
//!     "getFulfillment",
//!     HttpMethod::Get,
//!     "/admin/orders/{orderId}/fulfillments/{id}.json",
//!     Some("fulfillment"),
//!     "Receive a single Fulfillment",
//! );
//!
//! assert_eq!(GET_FULFILLMENT.path_params(), vec!["orderId", "id"]);
//!
//! let params = Params::new().with("orderId", 450789469).with("id", 255858046);
//! assert_eq!(
//!     GET_FULFILLMENT.render_path(&params).unwrap(),
//!     "/admin/orders/450789469/fulfillments/255858046.json"
//! );
//! ```

use crate::clients::HttpMethod;
use crate::rest::{ApiError, Params};

/// Static description of one admin API endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// The endpoint name, e.g. `getOrders`.
    pub name: &'static str,
    /// The HTTP method.
    pub method: HttpMethod,
    /// The path template.
    pub path: &'static str,
    /// Key whose value is returned instead of the whole response body.
    pub unwrap_key: Option<&'static str>,
    /// Human-readable description.
    pub description: &'static str,
}

impl EndpointDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        unwrap_key: Option<&'static str>,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            method,
            path,
            unwrap_key,
            description,
        }
    }

    /// Returns the placeholder names of the path template, in order.
    #[must_use]
    pub fn path_params(&self) -> Vec<&'static str> {
        let mut params = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            params.push(&after[..end]);
            rest = &after[end + 1..];
        }
        params
    }

    /// Substitutes path parameters into the template.
    ///
    /// Values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for the first placeholder
    /// without a value. An empty string counts as missing.
    pub fn render_path(&self, params: &Params) -> Result<String, ApiError> {
        let mut path = self.path.to_string();
        for param in self.path_params() {
            let value = params.provided(param).ok_or(ApiError::MissingParameter {
                endpoint: self.name,
                param,
            })?;
            path = path.replace(
                &format!("{{{param}}}"),
                &urlencoding::encode(&value.to_string()),
            );
        }
        Ok(path)
    }

    /// Returns the options that belong in the query string.
    #[must_use]
    pub fn query_params(&self, params: &Params) -> Vec<(String, String)> {
        let path_params = self.path_params();
        params
            .iter()
            .filter(|(key, _)| !path_params.iter().any(|p| p == key))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Extracts the result from a successful response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedResponse`] if the unwrap key is absent.
    pub fn unwrap_body(&self, mut body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
        let Some(key) = self.unwrap_key else {
            return Ok(body);
        };

        body.get_mut(key)
            .map(serde_json::Value::take)
            .ok_or_else(|| ApiError::UnexpectedResponse {
                reason: format!("{}: response has no '{key}' field", self.name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GET_ORDER: EndpointDescriptor = EndpointDescriptor::new(
        "getOrder",
        HttpMethod::Get,
        "/admin/orders/{id}.json",
        Some("order"),
        "Receive a single Order",
    );

    const REMOVE_ORDER: EndpointDescriptor = EndpointDescriptor::new(
        "removeOrder",
        HttpMethod::Delete,
        "/admin/orders/{id}.json",
        None,
        "Remove a Order from the database",
    );

    #[test]
    fn test_missing_path_param_names_endpoint_and_param() {
        let result = GET_ORDER.render_path(&Params::new().with("status", "any"));
        assert!(matches!(
            result,
            Err(ApiError::MissingParameter {
                endpoint: "getOrder",
                param: "id"
            })
        ));
    }

    #[test]
    fn test_empty_path_param_is_missing() {
        let result = GET_ORDER.render_path(&Params::new().with("id", ""));
        assert!(matches!(
            result,
            Err(ApiError::MissingParameter {
                endpoint: "getOrder",
                param: "id"
            })
        ));
    }

    #[test]
    fn test_path_values_are_encoded() {
        let path = GET_ORDER
            .render_path(&Params::new().with("id", "a/b"))
            .unwrap();
        assert_eq!(path, "/admin/orders/a%2Fb.json");
    }

    #[test]
    fn test_query_params_exclude_path_params() {
        let params = Params::new()
            .with("id", 1)
            .with("fields", "id,name")
            .with("status", "any");
        assert_eq!(
            GET_ORDER.query_params(&params),
            vec![
                ("fields".to_string(), "id,name".to_string()),
                ("status".to_string(), "any".to_string()),
            ]
        );
    }

    #[test]
    fn test_unwrap_body() {
        let body = json!({"order": {"id": 1, "name": "#1"}});
        assert_eq!(
            GET_ORDER.unwrap_body(body).unwrap(),
            json!({"id": 1, "name": "#1"})
        );
        assert!(matches!(
            GET_ORDER.unwrap_body(json!({})),
            Err(ApiError::UnexpectedResponse { .. })
        ));
        assert_eq!(REMOVE_ORDER.unwrap_body(json!({})).unwrap(), json!({}));
    }

    #[test]
    fn test_path_without_placeholders() {
        let endpoint = EndpointDescriptor::new(
            "countOrders",
            HttpMethod::Get,
            "/admin/orders/count.json",
            Some("count"),
            "Receive a count of all Orders",
        );
        assert!(endpoint.path_params().is_empty());
        assert_eq!(
            endpoint.render_path(&Params::new()).unwrap(),
            "/admin/orders/count.json"
        );
    }
}
