//! Turning decoded JSON into typed models.
//!
//! A request names a [`HydrationTarget`]: either [`HydrationTarget::NoModel`],
//! which hands back the decoded JSON untouched, or a [`ModelDescriptor`] that
//! knows how to construct one model instance from a JSON mapping.
//!
//! Given a model, the body shape decides the result:
//!
//! - a JSON array hydrates element-wise, in order, into [`Hydrated::Many`]
//! - an object carrying the model's envelope key (e.g. `{"Customer": {...}}`)
//!   is unwrapped and hydrated into [`Hydrated::One`]
//! - an object carrying a `Results` (or the model's collection key) array
//!   hydrates element-wise into [`Hydrated::Many`]
//! - any other object hydrates into [`Hydrated::One`]
//!
//! Construction never invents values: a missing required field is a
//! [`HydrationError`] naming that field.
//!
//! # Example
//!
//! ```rust
//! use booker_api::rest::{Hydrated, HydrationTarget, Model};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Room {
//!     #[serde(rename = "ID")]
//!     id: u64,
//! }
//!
//! impl Model for Room {
//!     const NAME: &'static str = "Room";
//! }
//!
//! let target = HydrationTarget::<Room>::model();
//! let rooms = target.hydrate(json!([{"ID": 1}, {"ID": 2}])).unwrap();
//! match rooms {
//!     Hydrated::Many(rooms) => assert_eq!(rooms[1].id, 2),
//!     _ => unreachable!(),
//! }
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

use crate::rest::response::{json_type, RESULTS_KEY};
use crate::rest::HydrationError;

/// A type that can be constructed from a Booker JSON mapping.
///
/// Implementors only need a name; construction defaults to serde
/// deserialization with field-level error reporting.
pub trait Model: DeserializeOwned + Send + 'static {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Key wrapping a single record in responses, e.g. `Customer`.
    const ENVELOPE_KEY: Option<&'static str> = None;

    /// Key holding the record list in paged responses, when not `Results`.
    const COLLECTION_KEY: Option<&'static str> = None;

    /// Constructs one instance from a JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError`] if the value is not an object, a required
    /// field is missing or a field has the wrong shape.
    fn from_mapping(value: Value) -> Result<Self, HydrationError> {
        deserialize_model(Self::NAME, value)
    }
}

impl Model for Value {
    const NAME: &'static str = "Value";

    fn from_mapping(value: Value) -> Result<Self, HydrationError> {
        Ok(value)
    }
}

/// Deserializes `value` into `T`, mapping decoder failures to
/// [`HydrationError`] with the offending field path.
///
/// # Errors
///
/// See [`Model::from_mapping`].
pub fn deserialize_model<T: DeserializeOwned>(
    model: &'static str,
    value: Value,
) -> Result<T, HydrationError> {
    if !value.is_object() {
        return Err(HydrationError::NotAnObject {
            model,
            found: json_type(&value),
        });
    }

    serde_path_to_error::deserialize(value).map_err(|error| {
        let path = error.path().to_string();
        let message = error.inner().to_string();
        match missing_field_name(&message) {
            Some(field) => HydrationError::MissingField {
                model,
                field: join_path(&path, field),
            },
            None => HydrationError::InvalidField {
                model,
                path,
                message,
            },
        }
    })
}

fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() || parent == "." {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Describes how to construct a model from JSON.
pub struct ModelDescriptor<M> {
    name: &'static str,
    envelope_key: Option<&'static str>,
    collection_key: Option<&'static str>,
    construct: fn(Value) -> Result<M, HydrationError>,
}

impl<M: Model> ModelDescriptor<M> {
    /// Returns the descriptor for a [`Model`] implementation.
    #[must_use]
    pub const fn of() -> Self {
        Self {
            name: M::NAME,
            envelope_key: M::ENVELOPE_KEY,
            collection_key: M::COLLECTION_KEY,
            construct: M::from_mapping,
        }
    }
}

impl<M> ModelDescriptor<M> {
    /// Creates a descriptor from a name and a constructor function.
    #[must_use]
    pub const fn new(
        name: &'static str,
        construct: fn(Value) -> Result<M, HydrationError>,
    ) -> Self {
        Self {
            name,
            envelope_key: None,
            collection_key: None,
            construct,
        }
    }

    /// Sets the envelope key unwrapped from single-record responses.
    #[must_use]
    pub const fn with_envelope_key(mut self, key: &'static str) -> Self {
        self.envelope_key = Some(key);
        self
    }

    /// Sets the key holding the record list in paged responses.
    #[must_use]
    pub const fn with_collection_key(mut self, key: &'static str) -> Self {
        self.collection_key = Some(key);
        self
    }

    /// Returns the model name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the envelope key, if any.
    #[must_use]
    pub const fn envelope_key(&self) -> Option<&'static str> {
        self.envelope_key
    }

    /// Returns the collection key, if any.
    #[must_use]
    pub const fn collection_key(&self) -> Option<&'static str> {
        self.collection_key
    }

    /// Constructs one instance from a mapping.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's [`HydrationError`].
    pub fn construct(&self, value: Value) -> Result<M, HydrationError> {
        (self.construct)(value)
    }

    /// Constructs one instance per element, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first element's [`HydrationError`].
    pub fn construct_all(&self, items: Vec<Value>) -> Result<Vec<M>, HydrationError> {
        items.into_iter().map(|item| self.construct(item)).collect()
    }

    /// Hydrates a decoded body according to its shape.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError`] if any record fails to construct.
    pub fn hydrate(&self, raw: Value) -> Result<Hydrated<M>, HydrationError> {
        match raw {
            Value::Array(items) => self.construct_all(items).map(Hydrated::Many),
            Value::Object(mut map) => {
                if let Some(inner) = self.envelope_key.and_then(|key| map.remove(key)) {
                    return self.construct(inner).map(Hydrated::One);
                }
                if let Some(items) = self.take_collection(&mut map) {
                    return self.construct_all(items).map(Hydrated::Many);
                }
                self.construct(Value::Object(map)).map(Hydrated::One)
            }
            other => self.construct(other).map(Hydrated::One),
        }
    }

    fn take_collection(&self, map: &mut Map<String, Value>) -> Option<Vec<Value>> {
        let key = [self.collection_key, Some(RESULTS_KEY)]
            .into_iter()
            .flatten()
            .find(|key| map.get(*key).is_some_and(Value::is_array))?;
        match map.remove(key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }
    }
}

impl<M> Clone for ModelDescriptor<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for ModelDescriptor<M> {}

impl<M> fmt::Debug for ModelDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name)
            .field("envelope_key", &self.envelope_key)
            .field("collection_key", &self.collection_key)
            .finish_non_exhaustive()
    }
}

/// What a single request should produce.
#[derive(Debug)]
pub enum HydrationTarget<M> {
    /// Return the decoded JSON as-is.
    NoModel,
    /// Construct instances of a model.
    Model(ModelDescriptor<M>),
}

impl<M: Model> HydrationTarget<M> {
    /// Targets the given [`Model`] implementation.
    #[must_use]
    pub const fn model() -> Self {
        Self::Model(ModelDescriptor::of())
    }
}

impl HydrationTarget<Value> {
    /// Targets raw JSON.
    #[must_use]
    pub const fn raw() -> Self {
        Self::NoModel
    }
}

impl<M> HydrationTarget<M> {
    /// Applies this target to a decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError`] if model construction fails.
    pub fn hydrate(&self, raw: Value) -> Result<Hydrated<M>, HydrationError> {
        match self {
            Self::NoModel => Ok(Hydrated::Raw(raw)),
            Self::Model(descriptor) => descriptor.hydrate(raw),
        }
    }
}

impl<M> Clone for HydrationTarget<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for HydrationTarget<M> {}

impl<M> From<ModelDescriptor<M>> for HydrationTarget<M> {
    fn from(descriptor: ModelDescriptor<M>) -> Self {
        Self::Model(descriptor)
    }
}

/// The result of hydrating a response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Hydrated<M> {
    /// The decoded JSON, returned for [`HydrationTarget::NoModel`].
    Raw(Value),
    /// A single model instance.
    One(M),
    /// Model instances in response order.
    Many(Vec<M>),
}

impl<M> Hydrated<M> {
    /// Returns the single instance, if this is [`Hydrated::One`].
    #[must_use]
    pub fn into_one(self) -> Option<M> {
        match self {
            Self::One(model) => Some(model),
            _ => None,
        }
    }

    /// Returns the instances, if this is [`Hydrated::Many`].
    #[must_use]
    pub fn into_many(self) -> Option<Vec<M>> {
        match self {
            Self::Many(models) => Some(models),
            _ => None,
        }
    }

    /// Returns the raw JSON, if this is [`Hydrated::Raw`].
    #[must_use]
    pub fn into_raw(self) -> Option<Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a short name for the variant, for error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw JSON",
            Self::One(_) => "a single record",
            Self::Many(_) => "a list of records",
        }
    }
}
