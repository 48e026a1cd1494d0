//! Request composition, hydration and pagination for the Booker API.
//!
//! This module holds the pieces the [`BookerClient`](crate::BookerClient)
//! is built from:
//!
//! - **[`Params`]**: ordered parameter sets and the precedence rules that
//!   merge session defaults, endpoint parameters and caller overrides
//! - **[`Model`] / [`ModelDescriptor`] / [`HydrationTarget`]**: how decoded
//!   JSON becomes typed records
//! - **[`Paginator`]**: the page-number walk behind every list endpoint
//! - **[`ResponseEnvelope`]**: the `Results`/`TotalResultsCount` wrapper of
//!   list responses
//! - **[`resources`]**: typed endpoint methods for API v4.1
//!
//! # Example
//!
//! ```rust,ignore
//! use booker_api::{AccessToken, BookerClient, LocationId, SessionContext};
//! use booker_api::rest::resources::v4_1::Merchant;
//!
//! let session = SessionContext::new(AccessToken::new("token")?)
//!     .with_location(LocationId::new(3749));
//! let client = BookerClient::new(session, None)?;
//! let merchant = Merchant::new(&client);
//!
//! let employees = merchant.employees(LocationId::new(3749), Default::default()).await?;
//! println!("{} employees", employees.len());
//! ```

mod errors;
mod hydrate;
mod pagination;
pub mod params;
mod response;
pub mod resources;

pub use errors::HydrationError;
pub use hydrate::{deserialize_model, Hydrated, HydrationTarget, Model, ModelDescriptor};
pub use pagination::{PageDescriptor, PaginationState, Paginator};
pub use params::Params;
pub use response::{ResponseEnvelope, RESULTS_KEY, TOTAL_PAGES_KEY, TOTAL_RESULTS_KEY};
