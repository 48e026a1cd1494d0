//! HTTP client types for Booker API communication.
//!
//! This module provides the transport layer (connection pool, default
//! headers, retries) and, in [`rest`], the request executor built on it.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async HTTP client
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: the status, headers and raw body of a response
//! - [`HttpMethod`]: GET, POST and PUT
//! - [`rest::BookerClient`]: the Booker request executor
//! - [`rest::BookerError`]: the error type for Booker requests
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **5xx (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION, SUBSCRIPTION_KEY_HEADER};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

// Re-export Booker client types at the clients module level
pub use rest::{ApiError, ApiErrorPayload, ArgumentError, BookerClient, BookerError};
