//! Hydration error types.
//!
//! A [`HydrationError`] is raised when a JSON body decodes fine but cannot be
//! turned into the requested model: a required field is absent, a field has
//! the wrong shape, or the value is not a mapping at all. The hydrator never
//! fills in defaults for missing required fields.
//!
//! # Example
//!
//! ```rust
//! use booker_api::rest::HydrationError;
//!
//! let error = HydrationError::MissingField {
//!     model: "Customer",
//!     field: "ID".to_string(),
//! };
//! assert_eq!(error.field(), Some("ID"));
//! assert!(error.to_string().contains("Customer"));
//! ```

use thiserror::Error;

/// Error returned when a decoded value cannot be hydrated into a model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HydrationError {
    /// A required field is missing from the mapping.
    #[error("{model} is missing required field '{field}'")]
    MissingField {
        /// The model being constructed.
        model: &'static str,
        /// Dotted path of the missing field (e.g. `Customer.Email`).
        field: String,
    },

    /// A field is present but has the wrong type or shape.
    #[error("{model} field '{path}' is invalid: {message}")]
    InvalidField {
        /// The model being constructed.
        model: &'static str,
        /// Dotted path to the offending value.
        path: String,
        /// The decoder's description of the problem.
        message: String,
    },

    /// The value handed to the model is not a JSON object.
    #[error("{model} expects a JSON object, found {found}")]
    NotAnObject {
        /// The model being constructed.
        model: &'static str,
        /// The JSON type that was found instead.
        found: &'static str,
    },
}

impl HydrationError {
    /// Returns the name of the model that failed to hydrate.
    #[must_use]
    pub const fn model(&self) -> &'static str {
        match self {
            Self::MissingField { model, .. }
            | Self::InvalidField { model, .. }
            | Self::NotAnObject { model, .. } => model,
        }
    }

    /// Returns the field path involved, if the error concerns a field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            Self::InvalidField { path, .. } => Some(path),
            Self::NotAnObject { .. } => None,
        }
    }
}
