//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder. GET
//! requests carry their parameters in the query string; POST and PUT carry a
//! JSON body.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;
use crate::rest::Params;

/// HTTP methods used by the Booker API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Retrieve resources; parameters go in the query string.
    Get,
    /// Create resources or run searches; parameters go in a JSON body.
    Post,
    /// Update resources; parameters go in a JSON body.
    Put,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Returns `true` if this method sends its parameters as a JSON body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request to be sent to the Booker API.
///
/// Use [`HttpRequest::builder`] to construct requests, or
/// [`HttpRequest::with_params`] to place a parameter set where the method
/// expects it.
///
/// # Example
///
/// ```rust
/// use booker_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/v4.1/merchant/location/1")
///     .query_param("access_token", "abc")
///     .build()
///     .unwrap();
/// assert_eq!(get_request.query.len(), 1);
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "/v4.1/merchant/customers")
///     .body(json!({"FilterByExactLocationID": true}))
///     .build()
///     .unwrap();
/// assert!(post_request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path, relative to the API base URL.
    pub path: String,
    /// The JSON body, for POST and PUT.
    pub body: Option<serde_json::Value>,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Builds a request that carries `params` the way `method` expects.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn with_params(
        method: HttpMethod,
        path: impl Into<String>,
        params: &Params,
        tries: u32,
    ) -> Result<Self, InvalidHttpRequestError> {
        let builder = Self::builder(method, path).tries(tries);
        let builder = if method.has_body() {
            builder.body(params.clone())
        } else {
            builder.query(params.to_query())
        };
        builder.build()
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    /// - `http_method` is `Get` but `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (self.http_method.has_body(), self.body.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            (false, true) => Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.http_method.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
    tries: u32,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            tries: 1,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries). Higher values retry 429 and 5xx responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            tries: self.tries.max(1),
        };
        request.verify()?;
        Ok(request)
    }
}
