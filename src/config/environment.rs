//! Booker API environment definitions.
//!
//! This module provides the [`Environment`] enum selecting which Booker
//! deployment requests are sent to.

use crate::config::ApiBaseUrl;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Production API host.
pub const PRODUCTION_BASE_URL: &str = "https://api.booker.com";

/// Staging API host.
pub const STAGING_BASE_URL: &str = "https://api-staging.booker.com";

/// The Booker deployment a client talks to.
///
/// # Example
///
/// ```rust
/// use booker_api::Environment;
///
/// let env: Environment = "staging".parse().unwrap();
/// assert_eq!(env.base_url(), "https://api-staging.booker.com");
///
/// let custom: Environment = "http://localhost:9000".parse().unwrap();
/// assert_eq!(custom.base_url(), "http://localhost:9000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    /// The live API.
    #[default]
    Production,
    /// The staging sandbox.
    Staging,
    /// Any other base URL (proxies, mock servers).
    Custom(ApiBaseUrl),
}

impl Environment {
    /// Returns the base URL requests are built against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Staging => STAGING_BASE_URL,
            Self::Custom(url) => url.as_ref(),
        }
    }

    /// Returns `true` for the production deployment.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
            Self::Custom(url) => write!(f, "{url}"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            _ => ApiBaseUrl::new(s).map(Self::Custom),
        }
    }
}
