//! HTTP response type.
//!
//! [`HttpResponse`] holds the status, headers and the raw body text exactly
//! as received. Decoding happens in the executor so that a body which is not
//! JSON can be reported as a malformed response rather than lost.

use std::collections::HashMap;

/// Request id headers, checked in order.
const REQUEST_ID_HEADERS: [&str; 2] = ["x-request-id", "request-id"];

/// An HTTP response from the Booker API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body: body.into(),
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the status is worth retrying (429 or 5xx).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code == 429 || self.code >= 500
    }

    /// Returns the request id header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        REQUEST_ID_HEADERS.iter().find_map(|name| {
            self.headers
                .get(*name)
                .and_then(|values| values.first())
                .map(String::as_str)
        })
    }

    /// Decodes the body as JSON. An empty body decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}
