//! Employee model.

use serde::{Deserialize, Serialize};

use crate::rest::Model;

/// A staff member at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    /// The employee id.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

impl Model for Employee {
    const NAME: &'static str = "Employee";
}
