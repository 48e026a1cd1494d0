//! Error types for Booker API operations.
//!
//! Every request entry point returns `Result<T, BookerError>`. The variants
//! separate where a request went wrong:
//!
//! - [`BookerError::Transport`]: the request never produced a response
//! - [`BookerError::Api`]: the API answered with an error status (or a 2xx
//!   body with `IsSuccess: false`)
//! - [`BookerError::MalformedResponse`]: a 2xx body that could not be decoded
//!   or whose pagination indicators contradict each other
//! - [`BookerError::Hydration`]: the body decoded but did not fit the model
//! - [`BookerError::PaginationExceeded`]: the page cap was hit
//! - [`BookerError::InvalidPagination`]: bad `PageNumber`/`PageSize` input
//!
//! # Example
//!
//! ```rust,ignore
//! use booker_api::{BookerError, LocationId};
//!
//! match merchant.location(LocationId::new(3749)).await {
//!     Ok(location) => println!("{:?}", location.business_name),
//!     Err(BookerError::Api(e)) if e.status == 401 => println!("Token expired"),
//!     Err(BookerError::Api(e)) => println!("API error: {e}"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clients::HttpError;
use crate::rest::HydrationError;

/// Error type for Booker API operations.
#[derive(Debug, Error)]
pub enum BookerError {
    /// Network failure, timeout or an invalid request.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The API reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response whose body could not be interpreted.
    #[error("Malformed response from {path}: {reason}")]
    MalformedResponse {
        /// The request path.
        path: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// A record did not fit the requested model.
    #[error(transparent)]
    Hydration(#[from] HydrationError),

    /// Pagination stopped at the page cap while more pages remained.
    #[error("Pagination of {path} exceeded the maximum of {max_pages} pages")]
    PaginationExceeded {
        /// The request path.
        path: String,
        /// The configured page cap.
        max_pages: u32,
    },

    /// A pagination parameter is not a positive integer.
    #[error("Invalid pagination parameter '{field}': {value}")]
    InvalidPagination {
        /// The parameter name (`PageNumber` or `PageSize`).
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The request path is empty.
    #[error("Invalid Booker API path: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

impl BookerError {
    /// Returns the HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status),
            _ => None,
        }
    }
}

/// An error reported by the Booker API.
///
/// # Example
///
/// ```rust
/// use booker_api::clients::{ApiError, ApiErrorPayload};
/// use serde_json::json;
///
/// let body = json!({"IsSuccess": false, "ErrorCode": 1000, "ErrorMessage": "Invalid token"});
/// let error = ApiError {
///     status: 401,
///     path: "/v4.1/merchant/location/1".to_string(),
///     payload: ApiErrorPayload::from_body(&body),
///     request_id: None,
/// };
/// assert_eq!(error.message(), Some("Invalid token"));
/// assert!(error.to_string().contains("Invalid token"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Booker API returned {status} for {path}: {}", describe(.payload))]
pub struct ApiError {
    /// The HTTP status code (200 when a 2xx body reported `IsSuccess: false`).
    pub status: u16,
    /// The request path.
    pub path: String,
    /// The decoded error body, when it had one.
    pub payload: Option<ApiErrorPayload>,
    /// Request id from the response headers.
    pub request_id: Option<String>,
}

impl ApiError {
    /// Returns the most specific error message in the payload.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.payload.as_ref().and_then(ApiErrorPayload::message)
    }
}

fn describe(payload: &Option<ApiErrorPayload>) -> String {
    let Some(payload) = payload.as_ref() else {
        return "no error details".to_string();
    };
    let mut description = payload.message().unwrap_or("no error message").to_string();
    if let Some(code) = payload.error_code {
        description.push_str(&format!(" (code {code})"));
    }
    for argument in payload.argument_errors.iter().flatten() {
        if let (Some(name), Some(message)) = (&argument.argument_name, &argument.error_message) {
            description.push_str(&format!("; {name}: {message}"));
        }
    }
    description
}

/// The error fields a Booker response body may carry.
///
/// Booker API errors use `ErrorCode`/`ErrorMessage`/`ArgumentErrors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    /// Numeric error code.
    #[serde(rename = "ErrorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// Human-readable error message.
    #[serde(rename = "ErrorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Per-argument validation errors.
    #[serde(rename = "ArgumentErrors", default, skip_serializing_if = "Option::is_none")]
    pub argument_errors: Option<Vec<ArgumentError>>,
}

impl ApiErrorPayload {
    /// Extracts the error fields from a decoded body.
    ///
    /// Returns `None` if the body is not an object or carries none of the
    /// error fields.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        if !body.is_object() {
            return None;
        }
        let payload: Self = serde_json::from_value(body.clone()).ok()?;
        (payload != Self::default()).then_some(payload)
    }

    /// Returns `ErrorMessage`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// A validation error for one request argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentError {
    /// The argument that failed validation.
    #[serde(rename = "ArgumentName", default)]
    pub argument_name: Option<String>,
    /// Why it failed.
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<String>,
}
