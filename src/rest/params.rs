//! Request parameter sets and their composition.
//!
//! Every request body or query string is a [`Params`] value: an
//! insertion-ordered map from field name to JSON value. [`Params::compose`]
//! merges the sources that contribute to a request, lowest priority first:
//!
//! 1. pagination scaffolding (`UsePaging`, `PageSize`, `PageNumber`)
//! 2. session defaults (`access_token`, `LocationID`, `BrandID`)
//! 3. endpoint "additional" parameters
//! 4. caller overrides
//!
//! Merging is shallow: a key present in a higher-priority source replaces the
//! lower value wholesale, nested objects included.
//!
//! # Example
//!
//! ```rust
//! use booker_api::{AccessToken, SessionContext};
//! use booker_api::rest::Params;
//! use serde_json::json;
//!
//! let session = SessionContext::new(AccessToken::new("token").unwrap());
//! let additional = Params::new().with("LocationID", 42).with("CustomerRecordType", 1);
//! let overrides = Params::new().with("CustomerRecordType", 2);
//!
//! let params = Params::compose(&session, additional, overrides, None);
//! assert_eq!(params.get("access_token"), Some(&json!("token")));
//! assert_eq!(params.get("LocationID"), Some(&json!(42)));
//! assert_eq!(params.get("CustomerRecordType"), Some(&json!(2)));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::SessionContext;
use crate::rest::PageDescriptor;

/// Session credential parameter.
pub const ACCESS_TOKEN: &str = "access_token";
/// Location identifier parameter.
pub const LOCATION_ID: &str = "LocationID";
/// Merchant (brand) identifier parameter.
pub const BRAND_ID: &str = "BrandID";
/// Flag asking the API for a paged response.
pub const USE_PAGING: &str = "UsePaging";
/// Page size parameter.
pub const PAGE_SIZE: &str = "PageSize";
/// 1-based page index parameter.
pub const PAGE_NUMBER: &str = "PageNumber";

/// An ordered parameter set sent as a query string (GET) or JSON body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the request sources into one parameter set.
    ///
    /// Priority, lowest first: `paging` scaffold, session defaults,
    /// `additional`, `overrides`.
    #[must_use]
    pub fn compose(
        session: &SessionContext,
        additional: Self,
        overrides: Self,
        paging: Option<&PageDescriptor>,
    ) -> Self {
        let mut merged = paging.map(Self::paging_scaffold).unwrap_or_default();
        merged.merge(session.default_params());
        merged.merge(additional);
        merged.merge(overrides);
        merged
    }

    /// Returns the pagination parameters for a page descriptor.
    #[must_use]
    pub fn paging_scaffold(page: &PageDescriptor) -> Self {
        Self::new()
            .with(USE_PAGING, true)
            .with(PAGE_SIZE, page.page_size())
            .with(PAGE_NUMBER, page.page_number())
    }

    /// Returns a copy of this set stamped with the given page's parameters.
    ///
    /// Unlike [`compose`](Self::compose), the page values win: the pagination
    /// engine uses this to advance through pages.
    #[must_use]
    pub fn for_page(&self, page: &PageDescriptor) -> Self {
        let mut stamped = self.clone();
        stamped.merge(Self::paging_scaffold(page));
        stamped
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Overlays `other` onto this set; keys in `other` win.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Consuming form of [`merge`](Self::merge).
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Flattens the set into query-string pairs.
    ///
    /// Nulls are skipped, arrays of scalars become comma-separated lists and
    /// objects are JSON-encoded.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
            .collect()
    }

    /// Converts the set into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if items.iter().all(is_scalar) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Params {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.0.insert(key.into(), value);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, LocationId};
    use serde_json::json;

    fn session() -> SessionContext {
        SessionContext::new(AccessToken::new("session-token").unwrap())
            .with_location(LocationId::new(1))
    }

    #[test]
    fn test_key_in_one_source_keeps_its_value() {
        let params = Params::compose(
            &session(),
            Params::new().with("FromStartDate", "2024-01-01"),
            Params::new().with("ToStartDate", "2024-01-31"),
            None,
        );

        assert_eq!(params.get("access_token"), Some(&json!("session-token")));
        assert_eq!(params.get("FromStartDate"), Some(&json!("2024-01-01")));
        assert_eq!(params.get("ToStartDate"), Some(&json!("2024-01-31")));
    }

    #[test]
    fn test_override_beats_additional_beats_session() {
        let params = Params::compose(
            &session(),
            Params::new().with("LocationID", 2).with("Status", "open"),
            Params::new().with("LocationID", 3),
            None,
        );

        assert_eq!(params.get("LocationID"), Some(&json!(3)));
        assert_eq!(params.get("Status"), Some(&json!("open")));
    }

    #[test]
    fn test_additional_beats_session() {
        let params = Params::compose(
            &session(),
            Params::new().with("LocationID", 2),
            Params::new(),
            None,
        );
        assert_eq!(params.get("LocationID"), Some(&json!(2)));
    }

    #[test]
    fn test_merge_is_shallow() {
        let params = Params::compose(
            &session(),
            Params::new().with("Price", json!({"Amount": 10, "CurrencyCode": "USD"})),
            Params::new().with("Price", json!({"Amount": 12})),
            None,
        );

        assert_eq!(params.get("Price"), Some(&json!({"Amount": 12})));
    }

    #[test]
    fn test_paging_scaffold_has_lowest_priority() {
        let page = PageDescriptor::new(1, 50);
        let params = Params::compose(
            &session(),
            Params::new(),
            Params::new().with("PageSize", 10),
            Some(&page),
        );

        assert_eq!(params.get("UsePaging"), Some(&json!(true)));
        assert_eq!(params.get("PageNumber"), Some(&json!(1)));
        assert_eq!(params.get("PageSize"), Some(&json!(10)));
    }

    #[test]
    fn test_no_paging_scaffold_without_descriptor() {
        let params = Params::compose(&session(), Params::new(), Params::new(), None);
        assert!(!params.contains_key("UsePaging"));
        assert!(!params.contains_key("PageNumber"));
    }

    #[test]
    fn test_for_page_replaces_page_values() {
        let base = Params::new()
            .with("LocationID", 42)
            .merged(Params::paging_scaffold(&PageDescriptor::new(1, 50)));

        let stamped = base.for_page(&PageDescriptor::new(3, 50));

        assert_eq!(stamped.get("PageNumber"), Some(&json!(3)));
        assert_eq!(stamped.get("LocationID"), Some(&json!(42)));
        assert_eq!(base.get("PageNumber"), Some(&json!(1)));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let params = Params::new().with("b", 1).with("a", 2).with("c", 3);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_to_query_flattens_values() {
        let params = Params::new()
            .with("access_token", "abc")
            .with("LoadUnpaidAppointments", false)
            .with("LocationID", 42)
            .with("Missing", Value::Null)
            .with("IDs", json!([1, 2, 3]))
            .with("Filter", json!({"Name": "x"}));

        let query = params.to_query();

        assert_eq!(
            query,
            vec![
                ("access_token".to_string(), "abc".to_string()),
                ("LoadUnpaidAppointments".to_string(), "false".to_string()),
                ("LocationID".to_string(), "42".to_string()),
                ("IDs".to_string(), "1,2,3".to_string()),
                ("Filter".to_string(), r#"{"Name":"x"}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_remove_and_len() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        assert_eq!(params.remove("a"), Some(json!(1)));
        assert_eq!(params.len(), 1);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_from_iterator_and_into_value() {
        let params: Params = vec![("ID", json!(7)), ("Name", json!("Cut"))]
            .into_iter()
            .collect();
        assert_eq!(params.into_value(), json!({"ID": 7, "Name": "Cut"}));
    }
}
