//! Data models shared by loaders and pages

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Placeholder values extracted from the matched route pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get a parameter that must be present and non-empty
    pub fn require(&self, key: &str) -> crate::FetchResult<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(crate::FetchError::MissingParam {
                name: key.to_string(),
            }),
        }
    }
}

impl From<HashMap<String, String>> for RouteParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Exchange rate record as returned by the pricing API
///
/// Nothing here is validated or typed beyond "some JSON value". Fields the
/// API left out (or sent as null) stay `None`, and whatever did arrive is
/// displayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Value>,
    #[serde(default)]
    pub asset_id_base: Option<Value>,
    #[serde(default)]
    pub asset_id_quote: Option<Value>,
    #[serde(default)]
    pub rate: Option<Value>,
    /// Error message CoinAPI puts in the body of rejected requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Text for a raw field: strings without quotes, other values as JSON
fn field_text(field: &Option<Value>) -> Option<String> {
    match field {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

impl PriceQuote {
    /// Pair label like `BTC/USD`, with `-` for missing sides
    pub fn pair(&self) -> String {
        format!(
            "{}/{}",
            field_text(&self.asset_id_base).unwrap_or_else(|| "-".to_string()),
            field_text(&self.asset_id_quote).unwrap_or_else(|| "-".to_string())
        )
    }

    pub fn rate_display(&self) -> String {
        field_text(&self.rate).unwrap_or_else(|| "-".to_string())
    }

    /// Error reported by the API in the body, if any
    pub fn error_message(&self) -> Option<String> {
        field_text(&self.error)
    }
}
