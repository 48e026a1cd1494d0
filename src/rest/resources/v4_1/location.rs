//! Location model and per-location settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::resources::v4_1::{Address, NamedRef};
use crate::rest::Model;

/// A spa or salon location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    /// The location id.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Trading name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<Address>,
    /// Time zone the location operates in.
    #[serde(default)]
    pub time_zone: Option<NamedRef>,
}

impl Model for Location {
    const NAME: &'static str = "Location";
}

macro_rules! settings_model {
    ($(#[$meta:meta])* $name:ident, $key:literal) => {
        $(#[$meta])*
        ///
        /// The API exposes a long, evolving list of flags here; they are kept
        /// as a JSON map and read with [`get`](Self::get).
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Map<String, Value>);

        impl $name {
            /// Returns a setting by its API name.
            #[must_use]
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// Returns a boolean setting by its API name.
            #[must_use]
            pub fn flag(&self, key: &str) -> Option<bool> {
                self.get(key).and_then(Value::as_bool)
            }
        }

        impl Model for $name {
            const NAME: &'static str = stringify!($name);
            const ENVELOPE_KEY: Option<&'static str> = Some($key);
        }
    };
}

settings_model!(
    /// Online booking configuration for a location.
    OnlineBookingSettings,
    "OnlineBookingSettings"
);

settings_model!(
    /// Feature switches for a location.
    FeatureSettings,
    "FeatureSettings"
);

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationDaySchedule {
    /// Day of the week, as the API encodes it.
    #[serde(default)]
    pub day_of_week: Option<Value>,
    /// Opening time.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Closing time.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Model for LocationDaySchedule {
    const NAME: &'static str = "LocationDaySchedule";
    const COLLECTION_KEY: Option<&'static str> = Some("LocationDaySchedules");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::HydrationTarget;
    use serde_json::json;

    #[test]
    fn test_location_from_plain_body() {
        let body = json!({"IsSuccess": true, "ID": 3749, "BusinessName": "Sunset Spa"});
        let location = HydrationTarget::<Location>::model()
            .hydrate(body)
            .unwrap()
            .into_one()
            .unwrap();
        assert_eq!(location.id, 3749);
        assert_eq!(location.business_name.as_deref(), Some("Sunset Spa"));
    }

    #[test]
    fn test_settings_envelope_is_unwrapped() {
        let body = json!({
            "IsSuccess": true,
            "OnlineBookingSettings": {"AllowCustomersToCancel": true, "UrlName": "sunset"}
        });
        let settings = HydrationTarget::<OnlineBookingSettings>::model()
            .hydrate(body)
            .unwrap()
            .into_one()
            .unwrap();
        assert_eq!(settings.flag("AllowCustomersToCancel"), Some(true));
        assert_eq!(settings.get("UrlName"), Some(&json!("sunset")));
        assert!(settings.get("IsSuccess").is_none());
    }

    #[test]
    fn test_day_schedules_collection_key() {
        let body = json!({
            "LocationDaySchedules": [
                {"DayOfWeek": 1, "StartTime": "09:00", "EndTime": "17:00"},
                {"DayOfWeek": 2, "StartTime": "09:00", "EndTime": "18:00"}
            ]
        });
        let schedules = HydrationTarget::<LocationDaySchedule>::model()
            .hydrate(body)
            .unwrap()
            .into_many()
            .unwrap();
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[1].end_time.as_deref(), Some("18:00"));
    }
}
