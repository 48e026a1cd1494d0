//! # Booker API Rust Client
//!
//! A Rust client for the Booker spa and salon booking API, providing
//! type-safe configuration, request composition, paginated listing and
//! typed models.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`BookerConfig`] and [`BookerConfigBuilder`]
//! - Validated newtypes for credentials and identifiers
//! - A [`SessionContext`] whose token and default identifiers are merged into
//!   every request
//! - Parameter composition with a fixed precedence ([`rest::Params`])
//! - Response hydration into typed models ([`rest::Model`])
//! - Transparent page-number pagination ([`rest::Paginator`])
//! - Async HTTP transport with retry handling for 429 and 5xx responses
//! - Typed merchant endpoints for API v4.1 ([`rest::resources::v4_1`])
//!
//! ## Quick Start
//!
//! ```rust
//! use booker_api::{
//!     AccessToken, BookerClient, BookerConfig, Environment, LocationId, SessionContext,
//! };
//!
//! let config = BookerConfig::builder()
//!     .environment(Environment::Staging)
//!     .default_page_size(100)
//!     .build()
//!     .unwrap();
//!
//! let session = SessionContext::new(AccessToken::new("access-token").unwrap())
//!     .with_location(LocationId::new(3749));
//!
//! let client = BookerClient::new(session, Some(&config)).unwrap();
//! assert_eq!(client.config().default_page_size(), 100);
//! ```
//!
//! ## Calling Endpoints
//!
//! ```rust,ignore
//! use booker_api::rest::resources::v4_1::{ListOptions, Merchant};
//! use booker_api::LocationId;
//!
//! let merchant = Merchant::new(&client);
//!
//! // Every page of customers
//! let customers = merchant.customers(LocationId::new(3749), ListOptions::default()).await?;
//!
//! // A single location
//! let location = merchant.location(LocationId::new(3749)).await?;
//! ```
//!
//! ## Lower-Level Requests
//!
//! Endpoints without a typed method go through the client directly:
//!
//! ```rust,ignore
//! use booker_api::{HttpMethod, HydrationTarget};
//! use booker_api::rest::Params;
//!
//! let params = client.build_params(Params::new().with("LocationID", 3749), Params::new(), false);
//! let body = client
//!     .single_request(HttpMethod::Post, "/v4.1/merchant/orders", &params, &HydrationTarget::raw())
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session are instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **All or nothing**: A paginated call returns every record or an error, never a partial list

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::SessionContext;
pub use config::{
    AccessToken, ApiBaseUrl, BookerConfig, BookerConfigBuilder, Environment, LocationId,
    MerchantId, SubscriptionKey,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ApiError, BookerClient, BookerError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpResponse,
};

// Re-export hydration types
pub use rest::{Hydrated, HydrationError, HydrationTarget, Model, ModelDescriptor, Params};
