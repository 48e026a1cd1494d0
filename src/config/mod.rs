//! Configuration types for the Booker API client.
//!
//! # Overview
//!
//! - [`BookerConfig`]: transport and pagination settings shared by every request
//! - [`BookerConfigBuilder`]: a builder for constructing [`BookerConfig`] instances
//! - [`Environment`]: which Booker deployment to talk to
//! - [`AccessToken`], [`SubscriptionKey`], [`ApiBaseUrl`], [`LocationId`],
//!   [`MerchantId`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use booker_api::{BookerConfig, Environment, SubscriptionKey};
//! use std::time::Duration;
//!
//! let config = BookerConfig::builder()
//!     .environment(Environment::Staging)
//!     .subscription_key(SubscriptionKey::new("apim-key").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .default_page_size(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.default_page_size(), 100);
//! ```

mod environment;
mod newtypes;

pub use environment::{Environment, PRODUCTION_BASE_URL, STAGING_BASE_URL};
pub use newtypes::{AccessToken, ApiBaseUrl, LocationId, MerchantId, SubscriptionKey};

use std::time::Duration;

use crate::error::ConfigError;

/// Page size used when neither the caller nor the configuration sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on pages fetched by a single fetch-all call.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Environment variable holding the environment name or a base URL.
pub const ENV_BASE_URL: &str = "BOOKER_API_BASE_URL";

/// Environment variable holding the API management subscription key.
pub const ENV_SUBSCRIPTION_KEY: &str = "BOOKER_SUBSCRIPTION_KEY";

/// Environment variable overriding the default page size.
pub const ENV_PAGE_SIZE: &str = "BOOKER_PAGE_SIZE";

/// Client configuration.
///
/// `BookerConfig` carries everything that is not per-session: where requests
/// go, how the transport behaves, and how pagination is bounded. Credentials
/// live in [`SessionContext`](crate::SessionContext).
///
/// # Thread Safety
///
/// `BookerConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct BookerConfig {
    environment: Environment,
    subscription_key: Option<SubscriptionKey>,
    timeout: Option<Duration>,
    tries: u32,
    default_page_size: u32,
    max_pages: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl BookerConfig {
    /// Creates a new builder for constructing a `BookerConfig`.
    #[must_use]
    pub fn builder() -> BookerConfigBuilder {
        BookerConfigBuilder::new()
    }

    /// Builds a configuration from `BOOKER_*` environment variables.
    ///
    /// Unset variables fall back to the builder defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses; it exists so the
    /// parsing rules can be exercised without touching the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(env) = lookup(ENV_BASE_URL) {
            builder = builder.environment(env.parse()?);
        }
        if let Some(key) = lookup(ENV_SUBSCRIPTION_KEY) {
            builder = builder.subscription_key(SubscriptionKey::new(key)?);
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            let size = size
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidSetting {
                    field: "default_page_size",
                    reason: e.to_string(),
                })?;
            builder = builder.default_page_size(size);
        }

        builder.build()
    }

    /// Returns the target environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns the subscription key, if configured.
    #[must_use]
    pub const fn subscription_key(&self) -> Option<&SubscriptionKey> {
        self.subscription_key.as_ref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns how many times the transport attempts a request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the page size used for paginated requests.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Returns the maximum number of pages a fetch-all call may request.
    ///
    /// `None` means no cap.
    #[must_use]
    pub const fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for BookerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            subscription_key: None,
            timeout: None,
            tries: 1,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_pages: Some(DEFAULT_MAX_PAGES),
            user_agent_prefix: None,
        }
    }
}

// Verify BookerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BookerConfig>();
};

/// Builder for constructing [`BookerConfig`] instances.
///
/// # Defaults
///
/// - `environment`: [`Environment::Production`]
/// - `subscription_key`: `None`
/// - `timeout`: `None` (reqwest default)
/// - `tries`: `1` (no transport retries)
/// - `default_page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `max_pages`: `Some(`[`DEFAULT_MAX_PAGES`]`)`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BookerConfigBuilder {
    environment: Option<Environment>,
    subscription_key: Option<SubscriptionKey>,
    timeout: Option<Duration>,
    tries: Option<u32>,
    default_page_size: Option<u32>,
    max_pages: Option<Option<u32>>,
    user_agent_prefix: Option<String>,
}

impl BookerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target environment.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the API management subscription key.
    #[must_use]
    pub fn subscription_key(mut self, key: SubscriptionKey) -> Self {
        self.subscription_key = Some(key);
        self
    }

    /// Sets the per-request timeout applied by the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times the transport attempts a request.
    ///
    /// Values above 1 enable retries on 429 and 5xx responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the page size for paginated requests.
    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Sets the page cap for fetch-all calls; `None` removes the cap.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BookerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if `tries`, `default_page_size`
    /// or `max_pages` is zero.
    pub fn build(self) -> Result<BookerConfig, ConfigError> {
        let defaults = BookerConfig::default();

        let tries = self.tries.unwrap_or(defaults.tries);
        if tries == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "tries",
                reason: "must be at least 1".to_string(),
            });
        }

        let default_page_size = self.default_page_size.unwrap_or(defaults.default_page_size);
        if default_page_size == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "default_page_size",
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_pages = self.max_pages.unwrap_or(defaults.max_pages);
        if max_pages == Some(0) {
            return Err(ConfigError::InvalidSetting {
                field: "max_pages",
                reason: "must be greater than zero; use None to disable the cap".to_string(),
            });
        }

        Ok(BookerConfig {
            environment: self.environment.unwrap_or(defaults.environment),
            subscription_key: self.subscription_key,
            timeout: self.timeout,
            tries,
            default_page_size,
            max_pages,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
