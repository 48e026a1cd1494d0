//! Session types for the Booker API client.
//!
//! Token acquisition happens outside this crate; callers hand an already
//! issued access token to [`SessionContext::new`] and the client attaches it,
//! together with the default location and merchant identifiers, to every
//! request.

mod session;

pub use session::SessionContext;
