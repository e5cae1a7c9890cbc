//! OAuth scope handling for the authorization request.
//!
//! Scopes are kept in the order they were given so that the `scope`
//! parameter of an authorization URL reads back exactly as it was written.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scopes requested when the caller does not name any.
const DEFAULT_SCOPES: &[&str] = &[
    "read_content",
    "write_content",
    "read_themes",
    "write_themes",
    "read_products",
    "write_products",
    "read_customers",
    "write_customers",
    "read_orders",
    "write_orders",
    "read_script_tags",
    "write_script_tags",
    "read_fulfillments",
    "write_fulfillments",
    "read_shipping",
    "write_shipping",
];

/// An ordered, de-duplicated list of OAuth scopes.
///
/// # Example
///
/// ```rust
/// use shopify_client::AuthScopes;
///
/// let scopes: AuthScopes = "read_products, read_customers".parse().unwrap();
/// assert_eq!(scopes.to_string(), "read_products,read_customers");
/// assert!(scopes.contains("read_customers"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: Vec<String>,
}

impl AuthScopes {
    /// Creates an empty scope list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope set used by authorization requests that do not specify one.
    #[must_use]
    pub fn default_scopes() -> Self {
        Self {
            scopes: DEFAULT_SCOPES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns `true` if no scopes are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if `scope` is present.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Returns an iterator over the scopes in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes: Vec<String> = Vec::new();

        for scope in s.split(',') {
            let scope = scope.trim();
            if scope.is_empty() {
                continue;
            }

            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }

            if !scopes.iter().any(|s| s == scope) {
                scopes.push(scope.to_string());
            }
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scopes.join(","))
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
