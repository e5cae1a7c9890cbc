//! Correlation ids linking an authorization redirect to its callback.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// A single-use random token identifying one pending authorization.
///
/// It is sent to Shopify as the OAuth `state` parameter and as the last
/// segment of the generated redirect URI.
///
/// # Example
///
/// ```rust
/// use shopify_client::auth::oauth::CorrelationId;
///
/// let id = CorrelationId::new();
/// assert_eq!(id.as_ref().len(), 32);
/// assert_ne!(id, CorrelationId::new());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    const LENGTH: usize = 32;

    /// Generates a new id from a thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Wraps an id received from a callback.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
