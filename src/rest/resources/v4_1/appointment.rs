//! Appointment model.

use serde::{Deserialize, Serialize};

use crate::rest::resources::v4_1::{Customer, NamedRef};
use crate::rest::Model;

/// A booked appointment.
///
/// Date-times are kept in the notation the API returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Appointment {
    /// The appointment id.
    #[serde(rename = "ID")]
    pub id: u64,
    /// The location the appointment is at.
    #[serde(rename = "LocationID", default)]
    pub location_id: Option<u64>,
    /// Human-facing confirmation number.
    #[serde(default)]
    pub booking_number: Option<String>,
    /// Start of the appointment.
    #[serde(default)]
    pub start_date_time: Option<String>,
    /// End of the appointment.
    #[serde(default)]
    pub end_date_time: Option<String>,
    /// Current status (booked, confirmed, cancelled...).
    #[serde(default)]
    pub status: Option<NamedRef>,
    /// The booking customer.
    #[serde(default)]
    pub customer: Option<Customer>,
    /// Whether the appointment can still be cancelled.
    #[serde(default)]
    pub can_cancel: Option<bool>,
}

impl Model for Appointment {
    const NAME: &'static str = "Appointment";
    const ENVELOPE_KEY: Option<&'static str> = Some("Appointment");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{HydrationError, HydrationTarget};
    use serde_json::json;

    #[test]
    fn test_appointment_with_nested_customer() {
        let body = json!({
            "ID": 77,
            "BookingNumber": "A-77",
            "Status": {"ID": 2, "Name": "Confirmed"},
            "Customer": {"ID": 9}
        });
        let appointment = HydrationTarget::<Appointment>::model()
            .hydrate(body)
            .unwrap()
            .into_one()
            .unwrap();
        assert_eq!(appointment.booking_number.as_deref(), Some("A-77"));
        assert_eq!(appointment.customer.map(|c| c.id), Some(9));
    }

    #[test]
    fn test_nested_customer_missing_id_reports_path() {
        let body = json!({"ID": 77, "Customer": {"LocationID": 1}});
        let error = HydrationTarget::<Appointment>::model()
            .hydrate(body)
            .unwrap_err();
        assert_eq!(
            error,
            HydrationError::MissingField {
                model: "Appointment",
                field: "Customer.ID".to_string(),
            }
        );
    }
}
