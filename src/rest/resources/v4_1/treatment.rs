//! Treatment (bookable service) model.

use serde::{Deserialize, Serialize};

use crate::rest::resources::v4_1::Money;
use crate::rest::Model;

/// A bookable service offered at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Treatment {
    /// The treatment id.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Length of the service.
    #[serde(default)]
    pub treatment_duration: Option<u32>,
    /// List price.
    #[serde(default)]
    pub price: Option<Money>,
}

impl Model for Treatment {
    const NAME: &'static str = "Treatment";
    const COLLECTION_KEY: Option<&'static str> = Some("Treatments");
}
