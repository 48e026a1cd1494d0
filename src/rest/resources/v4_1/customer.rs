//! Customer model.
//!
//! Booker nests a customer's personal fields one level down: the record
//! carries the `ID` and location, and its `Customer` field carries the name,
//! email and phone numbers.
//!
//! ```json
//! {"ID": 9, "LocationID": 3749, "Customer": {"FirstName": "Dee", "Email": "dee@example.com"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::rest::resources::v4_1::Address;
use crate::rest::Model;

/// A customer record at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer id.
    #[serde(rename = "ID")]
    pub id: u64,
    /// The location the record belongs to.
    #[serde(rename = "LocationID", default)]
    pub location_id: Option<u64>,
    /// Personal details.
    #[serde(rename = "Customer", default)]
    pub details: Option<CustomerDetails>,
}

impl Model for Customer {
    const NAME: &'static str = "Customer";
    const ENVELOPE_KEY: Option<&'static str> = Some("Customer");
}

/// The personal fields of a [`Customer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerDetails {
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Home phone number.
    #[serde(default)]
    pub home_phone: Option<String>,
    /// Work phone number.
    #[serde(default)]
    pub work_phone: Option<String>,
    /// Mobile phone number.
    #[serde(default)]
    pub cell_phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<Address>,
}

/// Fields echoed back when updating a customer.
pub const DEFAULT_CUSTOMER_FIELDS: [&str; 6] = [
    "Email",
    "FirstName",
    "LastName",
    "HomePhone",
    "WorkPhone",
    "CellPhone",
];
