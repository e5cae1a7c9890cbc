//! Call options: path parameters, query parameters and body.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

/// A single option value.
///
/// Dates are sent as `YYYY-MM-DD HH:MM` in UTC.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use shopify_client::rest::ParamValue;
///
/// let date = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
/// assert_eq!(ParamValue::from(date).to_string(), "2024-03-09 14:05");
/// assert_eq!(ParamValue::from(250).to_string(), "250");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A string.
    String(String),
    /// An integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A point in time.
    Date(DateTime<Utc>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl ParamValue {
    /// Returns `true` for an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ParamValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Date(value.with_timezone(&Utc))
    }
}

/// Options for one endpoint call.
///
/// Options named after a path placeholder fill the path; every other option
/// goes into the query string. Setting an option again replaces it.
///
/// # Example
///
/// ```rust
/// use shopify_client::rest::Params;
/// use serde_json::json;
///
/// let params = Params::new()
///     .with("id", 450789469)
///     .with("fields", "id,name")
///     .with_body(json!({"order": {"note": "rush"}}));
///
/// assert_eq!(params.get("id").unwrap().to_string(), "450789469");
/// assert!(params.body().is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: Vec<(String, ParamValue)>,
    body: Option<serde_json::Value>,
}

impl Params {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option and returns `self`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets the request body and returns `self`.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets an option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
    }

    /// Returns an option's value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns an option's value, treating an empty string as unset.
    #[must_use]
    pub fn provided(&self, key: &str) -> Option<&ParamValue> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Returns `true` if the option is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the request body.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}
