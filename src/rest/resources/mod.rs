//! Typed endpoint methods, organized by API version.
//!
//! ```text
//! resources/
//!   mod.rs       <- This file (re-exports the latest version)
//!   v4_1/
//!     mod.rs     <- Models and endpoint methods for v4.1
//! ```
//!
//! The latest version is re-exported at this level:
//!
//! ```rust,ignore
//! use booker_api::rest::resources::{ListOptions, Merchant};
//!
//! // Or explicitly:
//! use booker_api::rest::resources::v4_1::Merchant;
//! ```

pub mod v4_1;

pub use v4_1::*;
