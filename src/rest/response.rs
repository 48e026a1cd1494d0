//! Collection envelopes returned by list endpoints.
//!
//! Booker list endpoints wrap their records in an object:
//!
//! ```json
//! { "IsSuccess": true, "Results": [ ... ], "TotalResultsCount": 117 }
//! ```
//!
//! Some endpoints use a different collection key (e.g. `Treatments`) and a
//! few return a bare JSON array. [`ResponseEnvelope`] normalizes all three
//! shapes into the records plus any total indicators the page carried.
//!
//! # Example
//!
//! ```rust
//! use booker_api::rest::ResponseEnvelope;
//! use serde_json::json;
//!
//! let body = json!({"Results": [{"ID": 1}], "TotalResultsCount": 1});
//! let envelope = ResponseEnvelope::parse(body, None).unwrap();
//! assert_eq!(envelope.len(), 1);
//! assert_eq!(envelope.total_results(), Some(1));
//! ```

use std::ops::Deref;

use serde_json::{Map, Value};

/// Key holding the record list in most paged responses.
pub const RESULTS_KEY: &str = "Results";
/// Key holding the total record count across all pages.
pub const TOTAL_RESULTS_KEY: &str = "TotalResultsCount";
/// Key holding the total page count.
pub const TOTAL_PAGES_KEY: &str = "TotalPages";

/// The records of one page and the totals it reported.
///
/// Derefs to the record slice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseEnvelope {
    records: Vec<Value>,
    total_results: Option<u64>,
    total_pages: Option<u64>,
}

impl ResponseEnvelope {
    /// Extracts the records and totals from a decoded page body.
    ///
    /// `collection_key` is checked before `Results`.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the body holds no record
    /// list or a total indicator is not a non-negative integer.
    pub fn parse(body: Value, collection_key: Option<&str>) -> Result<Self, String> {
        match body {
            Value::Array(records) => Ok(Self {
                records,
                ..Self::default()
            }),
            Value::Object(mut map) => {
                let records = take_records(&mut map, collection_key)?;
                Ok(Self {
                    records,
                    total_results: read_total(&map, TOTAL_RESULTS_KEY)?,
                    total_pages: read_total(&map, TOTAL_PAGES_KEY)?,
                })
            }
            other => Err(format!(
                "expected a collection, found {}",
                json_type(&other)
            )),
        }
    }

    /// Returns the total record count across all pages, if reported.
    #[must_use]
    pub const fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Returns the total page count, if reported.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u64> {
        self.total_pages
    }

    /// Consumes the envelope, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

impl Deref for ResponseEnvelope {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

fn take_records(
    map: &mut Map<String, Value>,
    collection_key: Option<&str>,
) -> Result<Vec<Value>, String> {
    for key in [collection_key, Some(RESULTS_KEY)].into_iter().flatten() {
        match map.remove(key) {
            Some(Value::Array(records)) => return Ok(records),
            Some(Value::Null) | None => {}
            Some(other) => {
                return Err(format!(
                    "'{key}' should be an array, found {}",
                    json_type(&other)
                ))
            }
        }
    }
    Err(format!(
        "no '{}' collection in response",
        collection_key.unwrap_or(RESULTS_KEY)
    ))
}

fn read_total(map: &Map<String, Value>, key: &str) -> Result<Option<u64>, String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| format!("'{key}' should be a non-negative integer, found {value}")),
    }
}

/// Returns a short name for a JSON value's type.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_results_envelope_with_totals() {
        let body = json!({
            "IsSuccess": true,
            "Results": [{"ID": 1}, {"ID": 2}],
            "TotalResultsCount": 117,
            "TotalPages": 3
        });
        let envelope = ResponseEnvelope::parse(body, None).unwrap();
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.total_results(), Some(117));
        assert_eq!(envelope.total_pages(), Some(3));
    }

    #[test]
    fn test_parse_bare_array_has_no_totals() {
        let envelope = ResponseEnvelope::parse(json!([{"ID": 1}]), None).unwrap();
        assert_eq!(envelope.len(), 1);
        assert!(envelope.total_results().is_none());
        assert!(envelope.total_pages().is_none());
    }

    #[test]
    fn test_parse_custom_collection_key() {
        let body = json!({"Treatments": [{"ID": 1}], "TotalResultsCount": 1});
        let envelope = ResponseEnvelope::parse(body, Some("Treatments")).unwrap();
        assert_eq!(envelope.into_records(), vec![json!({"ID": 1})]);
    }

    #[test]
    fn test_parse_falls_back_to_results_key() {
        let body = json!({"Results": []});
        let envelope = ResponseEnvelope::parse(body, Some("Employees")).unwrap();
        assert!(envelope.is_empty());
    }

    #[test]
    fn test_parse_rejects_object_without_collection() {
        let error = ResponseEnvelope::parse(json!({"IsSuccess": true}), None).unwrap_err();
        assert!(error.contains("Results"));
    }

    #[test]
    fn test_parse_rejects_non_array_results() {
        let error = ResponseEnvelope::parse(json!({"Results": {"ID": 1}}), None).unwrap_err();
        assert!(error.contains("should be an array"));
    }

    #[test]
    fn test_parse_rejects_scalar_body() {
        let error = ResponseEnvelope::parse(json!("oops"), None).unwrap_err();
        assert_eq!(error, "expected a collection, found string");
    }

    #[test]
    fn test_parse_rejects_negative_total() {
        let body = json!({"Results": [], "TotalResultsCount": -1});
        assert!(ResponseEnvelope::parse(body, None).is_err());
    }

    #[test]
    fn test_null_totals_are_ignored() {
        let body = json!({"Results": [], "TotalResultsCount": null});
        let envelope = ResponseEnvelope::parse(body, None).unwrap();
        assert!(envelope.total_results().is_none());
    }
}
