//! Configuration error types for the Booker API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid credentials or URLs are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use booker_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Booker access token.")]
    EmptyAccessToken,

    /// Subscription key cannot be empty.
    #[error("Subscription key cannot be empty. Omit it instead of passing an empty value.")]
    EmptySubscriptionKey,

    /// An identifier (location, merchant) is invalid.
    #[error("Invalid {kind} '{value}'. Expected a non-empty identifier.")]
    InvalidIdentifier {
        /// Which identifier was rejected (e.g. "location id").
        kind: &'static str,
        /// The value that was provided.
        value: String,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.booker.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A numeric setting is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidSetting {
        /// The name of the setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_identifier_error_message() {
        let error = ConfigError::InvalidIdentifier {
            kind: "location id",
            value: " ".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("location id"));
        assert!(message.contains("non-empty"));
    }

    #[test]
    fn test_invalid_setting_error_message() {
        let error = ConfigError::InvalidSetting {
            field: "default_page_size",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'default_page_size': must be greater than zero"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccessToken;
        let _: &dyn std::error::Error = &error;
    }
}
