//! Transport error types.
//!
//! These cover failures below the API level: a request that cannot be built,
//! a connection that fails, or a timeout. A response that arrives with a
//! non-2xx status is not a transport error; the executor turns it into an
//! [`ApiError`](crate::clients::ApiError).
//!
//! # Example
//!
//! ```rust,ignore
//! use booker_api::clients::{HttpClient, HttpError};
//!
//! match http_client.request(request).await {
//!     Ok(response) => println!("{} {}", response.code, response.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) if e.is_timeout() => println!("Timed out"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use booker_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request was given a body.
    #[error("Cannot send a body with {method}; use query parameters instead.")]
    BodyNotAllowed {
        /// The HTTP method that does not take a body.
        method: String,
    },

    /// A header name or value could not be encoded.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified transport error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A network, TLS or timeout error from the underlying HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(error) if error.is_timeout())
    }
}
