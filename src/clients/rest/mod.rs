//! The Booker request executor.
//!
//! This module provides the client that sits on top of the
//! [`HttpClient`](crate::clients::HttpClient) and speaks Booker's
//! conventions: session parameters on every request, query strings for GET
//! and JSON bodies for POST/PUT, `IsSuccess` checks, and page-number
//! pagination.
//!
//! # Overview
//!
//! - [`BookerClient`]: `single_request`, `paginated_request` and the
//!   `get`/`post`/`put` shorthands
//! - [`BookerError`]: the error type every request returns
//! - [`ApiError`] / [`ApiErrorPayload`]: what the API said went wrong
//!
//! # Example
//!
//! ```rust,ignore
//! use booker_api::{AccessToken, BookerClient, HttpMethod, SessionContext};
//! use booker_api::rest::{ModelDescriptor, Params};
//! use serde_json::Value;
//!
//! let session = SessionContext::new(AccessToken::new("token")?);
//! let client = BookerClient::new(session, None)?;
//!
//! let additional = Params::new().with("LocationID", 3749);
//! let params = client.build_params(additional, Params::new(), true);
//! let path = "/v4.1/merchant/employees";
//! let employees: Vec<Value> = client
//!     .paginated_request(HttpMethod::Post, path, &params, ModelDescriptor::of(), true)
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! By default, requests are attempted once (`tries=1`). Set
//! [`BookerConfigBuilder::tries`](crate::BookerConfigBuilder::tries) to retry
//! 429 (rate limited) and 5xx responses.

mod client;
mod errors;

pub use client::BookerClient;
pub use errors::{ApiError, ApiErrorPayload, ArgumentError, BookerError};
