//! HTTP client for Booker API communication.
//!
//! This module provides the [`HttpClient`] type: it owns the connection
//! pool, applies default headers, and retries rate-limited or failed
//! requests. It returns every response it receives, whatever the status;
//! interpreting the status is left to the request executor.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::BookerConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the API management subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// HTTP client for making requests to the Booker API.
///
/// The client handles:
/// - Base URL selection from the configured [`Environment`](crate::Environment)
/// - Default headers including User-Agent and the subscription key
/// - Automatic retry logic for 429 and 5xx responses
/// - Request timeouts
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use booker_api::BookerConfig;
/// use booker_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&BookerConfig::default())?;
/// let request = HttpRequest::builder(HttpMethod::Get, "/v4.1/merchant/location/3749")
///     .query_param("access_token", "...")
///     .tries(3)
///     .build()?;
///
/// let response = client.request(request).await?;
/// println!("{} {}", response.code, response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g. TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use booker_api::BookerConfig;
    /// use booker_api::clients::HttpClient;
    ///
    /// let client = HttpClient::new(&BookerConfig::default()).unwrap();
    /// assert_eq!(client.base_url(), "https://api.booker.com");
    /// ```
    pub fn new(config: &BookerConfig) -> Result<Self, HttpError> {
        let base_url = config.environment().base_url().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Booker API Rust Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(key) = config.subscription_key() {
            default_headers.insert(SUBSCRIPTION_KEY_HEADER.to_string(), key.as_ref().to_string());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends an HTTP request to the Booker API.
    ///
    /// Responses with status 429 or 5xx are retried until `request.tries`
    /// attempts have been made; the last response is returned whatever its
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error or timeout occurs (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        let header_map = Self::build_header_map(&headers)?;

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
            };
            req_builder = req_builder.headers(header_map.clone());
            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }

            tracing::debug!(
                method = %request.http_method,
                url = %url,
                attempt = tries,
                "Sending Booker API request"
            );

            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let response = HttpResponse::new(code, res_headers, body_text);

            tracing::debug!(
                method = %request.http_method,
                url = %url,
                status = code,
                request_id = response.request_id().unwrap_or("-"),
                "Received Booker API response"
            );

            if response.is_ok() || !response.is_retryable() || tries >= request.tries {
                return Ok(response);
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                attempt = tries,
                max_tries = request.tries,
                delay_secs = delay.as_secs_f64(),
                "Retrying Booker API request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn build_header_map(
        headers: &HashMap<String, String>,
    ) -> Result<reqwest::header::HeaderMap, InvalidHttpRequestError> {
        let mut map = reqwest::header::HeaderMap::new();
        for (key, value) in headers {
            let invalid = || InvalidHttpRequestError::InvalidHeader { name: key.clone() };
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| invalid())?;
            let value =
                reqwest::header::HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Uses `Retry-After` on 429, otherwise the fixed wait.
    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        if response.code == 429 {
            if let Some(retry_after) = response.retry_request_after {
                if let Ok(delay) = Duration::try_from_secs_f64(retry_after) {
                    return delay;
                }
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}
