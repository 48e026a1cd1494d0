//! Session context for authenticated Booker API calls.
//!
//! This module provides the [`SessionContext`] type: the credentials and
//! default identifiers that every request made through a client carries.

use crate::config::{AccessToken, LocationId, MerchantId};
use crate::rest::{params, Params};

/// Credentials and defaults shared by every request of one client.
///
/// A session context is built once and never mutated by request logic. Its
/// values enter each parameter set at the lowest non-paging priority, so any
/// endpoint or caller parameter with the same key replaces them.
///
/// # Thread Safety
///
/// `SessionContext` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust
/// use booker_api::{AccessToken, LocationId, SessionContext};
///
/// let session = SessionContext::new(AccessToken::new("token").unwrap())
///     .with_location(LocationId::new(42));
///
/// let params = session.default_params();
/// assert_eq!(params.get("access_token"), Some(&serde_json::json!("token")));
/// assert_eq!(params.get("LocationID"), Some(&serde_json::json!(42)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    access_token: AccessToken,
    location_id: Option<LocationId>,
    merchant_id: Option<MerchantId>,
}

impl SessionContext {
    /// Creates a session context holding only an access token.
    #[must_use]
    pub const fn new(access_token: AccessToken) -> Self {
        Self {
            access_token,
            location_id: None,
            merchant_id: None,
        }
    }

    /// Sets the default location identifier.
    #[must_use]
    pub const fn with_location(mut self, location_id: LocationId) -> Self {
        self.location_id = Some(location_id);
        self
    }

    /// Sets the default merchant identifier.
    #[must_use]
    pub const fn with_merchant(mut self, merchant_id: MerchantId) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the default location identifier, if any.
    #[must_use]
    pub const fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    /// Returns the default merchant identifier, if any.
    #[must_use]
    pub const fn merchant_id(&self) -> Option<MerchantId> {
        self.merchant_id
    }

    /// Returns the parameters this session contributes to every request.
    #[must_use]
    pub fn default_params(&self) -> Params {
        let mut defaults = Params::new();
        defaults.insert(params::ACCESS_TOKEN, self.access_token.as_ref());
        if let Some(location_id) = self.location_id {
            defaults.insert(params::LOCATION_ID, location_id.get());
        }
        if let Some(merchant_id) = self.merchant_id {
            defaults.insert(params::BRAND_ID, merchant_id.get());
        }
        defaults
    }
}

// Verify SessionContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionContext>();
};
