//! Shared value types embedded in several v4.1 models.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// An `{ID, Name}` pair, used for statuses, types and similar lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// The identifier.
    #[serde(rename = "ID", default)]
    pub id: Option<u64>,
    /// The display name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// First street line.
    #[serde(default)]
    pub street1: Option<String>,
    /// Second street line.
    #[serde(default)]
    pub street2: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State or province.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zip: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<NamedRef>,
}

/// A monetary amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    /// The amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Formats a timestamp in Booker's `/Date(millis±zone)/` notation.
///
/// # Example
///
/// ```rust
/// use booker_api::rest::resources::v4_1::booker_datetime;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.timestamp_millis_opt(1_453_394_400_000).unwrap();
/// assert_eq!(booker_datetime(&time), "/Date(1453394400000+0000)/");
/// ```
pub fn booker_datetime<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("/Date({}{})/", time.timestamp_millis(), time.format("%z"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn test_booker_datetime_keeps_offset() {
        let offset = FixedOffset::west_opt(6 * 3600).unwrap();
        let time = offset.timestamp_millis_opt(1_453_394_400_000).unwrap();
        assert_eq!(booker_datetime(&time), "/Date(1453394400000-0600)/");
    }

    #[test]
    fn test_booker_datetime_utc() {
        let time = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(booker_datetime(&time), "/Date(0+0000)/");
    }

    #[test]
    fn test_address_deserializes_partial_object() {
        let address: Address = serde_json::from_value(json!({
            "Street1": "1 Main St",
            "City": "Denver",
            "Country": {"ID": 1, "Name": "USA"}
        }))
        .unwrap();
        assert_eq!(address.city.as_deref(), Some("Denver"));
        assert_eq!(address.country.and_then(|c| c.name).as_deref(), Some("USA"));
        assert!(address.zip.is_none());
    }

    #[test]
    fn test_money_deserializes() {
        let money: Money =
            serde_json::from_value(json!({"Amount": 45.5, "CurrencyCode": "USD"})).unwrap();
        assert_eq!(money.amount, Some(45.5));
    }
}
