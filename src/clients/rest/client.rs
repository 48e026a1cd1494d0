//! Booker API client implementation.
//!
//! This module provides the [`BookerClient`] type: the request executor that
//! sends one request, classifies the outcome and hydrates the body, plus the
//! paginated entry point that drives a [`Paginator`] through it.

use serde_json::Value;

use crate::auth::SessionContext;
use crate::clients::rest::{ApiError, ApiErrorPayload, BookerError};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::BookerConfig;
use crate::rest::{
    Hydrated, HydrationTarget, Model, ModelDescriptor, PageDescriptor, Paginator, Params,
};

/// Body field Booker sets to `false` on logical failures.
const IS_SUCCESS_KEY: &str = "IsSuccess";

/// Client for the Booker API.
///
/// A client pairs a [`SessionContext`] (whose credentials and identifiers are
/// merged into every request) with a [`BookerConfig`]. Requests go through
/// [`single_request`](Self::single_request) or
/// [`paginated_request`](Self::paginated_request).
///
/// # Thread Safety
///
/// `BookerClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use booker_api::{AccessToken, BookerClient, HttpMethod, LocationId, SessionContext};
/// use booker_api::rest::{HydrationTarget, Params};
///
/// let session = SessionContext::new(AccessToken::new("token")?)
///     .with_location(LocationId::new(3749));
/// let client = BookerClient::new(session, None)?;
///
/// let params = client.build_params(Params::new(), Params::new(), false);
/// let path = "/v4.1/merchant/location/3749";
/// let location = client
///     .single_request(HttpMethod::Get, path, &params, &HydrationTarget::raw())
///     .await?;
/// ```
#[derive(Debug)]
pub struct BookerClient {
    http_client: HttpClient,
    session: SessionContext,
    config: BookerConfig,
}

// Verify BookerClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BookerClient>();
};

impl BookerClient {
    /// Creates a new client for the given session.
    ///
    /// Uses [`BookerConfig::default`] when `config` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BookerError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        session: SessionContext,
        config: Option<&BookerConfig>,
    ) -> Result<Self, BookerError> {
        let config = config.cloned().unwrap_or_default();
        let http_client = HttpClient::new(&config)?;

        tracing::debug!(
            environment = %config.environment(),
            location_id = ?session.location_id(),
            merchant_id = ?session.merchant_id(),
            "Created Booker client"
        );

        Ok(Self {
            http_client,
            session,
            config,
        })
    }

    /// Returns the session this client sends requests for.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &BookerConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Composes the parameters for a request.
    ///
    /// Session defaults, `additional` and `overrides` are merged with
    /// increasing priority. With `paginated`, first-page scaffolding
    /// (`UsePaging`, `PageSize`, `PageNumber`) sits underneath all of them.
    #[must_use]
    pub fn build_params(&self, additional: Params, overrides: Params, paginated: bool) -> Params {
        let first_page = paginated.then(|| PageDescriptor::first(self.config.default_page_size()));
        Params::compose(&self.session, additional, overrides, first_page.as_ref())
    }

    /// Sends one request and hydrates its body.
    ///
    /// GET sends `params` as the query string; POST and PUT send them as a
    /// JSON body.
    ///
    /// # Errors
    ///
    /// - [`BookerError::Transport`] if no response arrived
    /// - [`BookerError::Api`] for a non-2xx status, or a 2xx body with
    ///   `IsSuccess: false`
    /// - [`BookerError::MalformedResponse`] for a 2xx body that is not JSON
    /// - [`BookerError::Hydration`] if the body does not fit the model
    /// - [`BookerError::InvalidPath`] for an empty path
    pub async fn single_request<M>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        target: &HydrationTarget<M>,
    ) -> Result<Hydrated<M>, BookerError> {
        let body = self.fetch_json(method, path, params).await?;
        Ok(target.hydrate(body)?)
    }

    /// Sends one request and hydrates a single model instance.
    ///
    /// # Errors
    ///
    /// As [`single_request`](Self::single_request), plus
    /// [`BookerError::MalformedResponse`] if the body holds a list.
    pub async fn request_one<M: Model>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<M, BookerError> {
        match self
            .single_request(method, path, params, &HydrationTarget::model())
            .await?
        {
            Hydrated::One(model) => Ok(model),
            other => Err(BookerError::MalformedResponse {
                path: path.to_string(),
                reason: format!("expected a single {}, got {}", M::NAME, other.shape()),
            }),
        }
    }

    /// Sends one (unpaged) request and hydrates a list of model instances.
    ///
    /// # Errors
    ///
    /// As [`single_request`](Self::single_request), plus
    /// [`BookerError::MalformedResponse`] if the body holds no list.
    pub async fn request_many<M: Model>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Vec<M>, BookerError> {
        match self
            .single_request(method, path, params, &HydrationTarget::model())
            .await?
        {
            Hydrated::Many(models) => Ok(models),
            other => Err(BookerError::MalformedResponse {
                path: path.to_string(),
                reason: format!("expected a list of {}, got {}", M::NAME, other.shape()),
            }),
        }
    }

    /// Sends one request and returns the decoded body untouched.
    ///
    /// # Errors
    ///
    /// As [`single_request`](Self::single_request), minus hydration.
    pub async fn request_raw(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Value, BookerError> {
        self.fetch_json(method, path, params).await
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`single_request`](Self::single_request).
    pub async fn get<M>(
        &self,
        path: &str,
        params: &Params,
        target: &HydrationTarget<M>,
    ) -> Result<Hydrated<M>, BookerError> {
        self.single_request(HttpMethod::Get, path, params, target).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`single_request`](Self::single_request).
    pub async fn post<M>(
        &self,
        path: &str,
        params: &Params,
        target: &HydrationTarget<M>,
    ) -> Result<Hydrated<M>, BookerError> {
        self.single_request(HttpMethod::Post, path, params, target).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`single_request`](Self::single_request).
    pub async fn put<M>(
        &self,
        path: &str,
        params: &Params,
        target: &HydrationTarget<M>,
    ) -> Result<Hydrated<M>, BookerError> {
        self.single_request(HttpMethod::Put, path, params, target).await
    }

    /// Collects the records of a paged listing.
    ///
    /// Starts at the `PageNumber` in `params` (page 1 if absent). With
    /// `fetch_all`, follows pages until the listing is exhausted or the
    /// configured page cap is reached; otherwise returns the one page.
    ///
    /// # Errors
    ///
    /// Any per-page error from [`single_request`](Self::single_request),
    /// plus [`BookerError::InvalidPagination`],
    /// [`BookerError::PaginationExceeded`] and contradictory-indicator
    /// [`BookerError::MalformedResponse`]. No partial results are returned.
    pub async fn paginated_request<M>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        model: ModelDescriptor<M>,
        fetch_all: bool,
    ) -> Result<Vec<M>, BookerError> {
        Paginator::new(path, model, params, self.config.default_page_size())?
            .fetch_all(fetch_all)
            .max_pages(self.config.max_pages())
            .run(move |page| async move {
                self.fetch_json(method, path, &page).await
            })
            .await
    }

    /// Sends one request and classifies the response.
    async fn fetch_json(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Value, BookerError> {
        let path = normalize_path(path)?;
        let request = HttpRequest::with_params(method, path.as_str(), params, self.config.tries())
            .map_err(HttpError::from)?;
        let response = self.http_client.request(request).await?;
        interpret_response(&path, &response)
    }
}

/// Turns a raw response into a decoded body or an error.
fn interpret_response(path: &str, response: &HttpResponse) -> Result<Value, BookerError> {
    let api_error = |body: Option<&Value>| ApiError {
        status: response.code,
        path: path.to_string(),
        payload: body.and_then(ApiErrorPayload::from_body),
        request_id: response.request_id().map(String::from),
    };

    if !response.is_ok() {
        let error = api_error(response.json().ok().as_ref());
        tracing::debug!(path, status = response.code, error = %error, "Booker API error");
        return Err(error.into());
    }

    let body = response
        .json()
        .map_err(|error| BookerError::MalformedResponse {
            path: path.to_string(),
            reason: format!("invalid JSON: {error}"),
        })?;

    if body.get(IS_SUCCESS_KEY) == Some(&Value::Bool(false)) {
        let error = api_error(Some(&body));
        tracing::warn!(path, error = %error, "Booker API reported failure");
        return Err(error.into());
    }

    Ok(body)
}

/// Ensures a single leading slash and rejects empty paths.
fn normalize_path(path: &str) -> Result<String, BookerError> {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(BookerError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(format!("/{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, LocationId};
    use serde_json::json;
    use std::collections::HashMap;

    fn create_test_session() -> SessionContext {
        SessionContext::new(AccessToken::new("test-token").unwrap())
            .with_location(LocationId::new(3749))
    }

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    // === Path Normalization Tests ===

    #[test]
    fn test_normalize_path_adds_leading_slash() {
        assert_eq!(
            normalize_path("v4.1/merchant/location/1").unwrap(),
            "/v4.1/merchant/location/1"
        );
    }

    #[test]
    fn test_normalize_path_collapses_leading_slashes() {
        assert_eq!(normalize_path("//v4.1/merchant").unwrap(), "/v4.1/merchant");
    }

    #[test]
    fn test_normalize_path_empty_path_returns_error() {
        assert!(matches!(
            normalize_path(""),
            Err(BookerError::InvalidPath { .. })
        ));
        assert!(matches!(
            normalize_path(" / "),
            Err(BookerError::InvalidPath { .. })
        ));
    }

    // === Response Interpretation Tests ===

    #[test]
    fn test_interpret_success_returns_body() {
        let body =
            interpret_response("/x", &response(200, r#"{"IsSuccess":true,"ID":1}"#)).unwrap();
        assert_eq!(body, json!({"IsSuccess": true, "ID": 1}));
    }

    #[test]
    fn test_interpret_empty_success_body_is_null() {
        let body = interpret_response("/x", &response(204, "")).unwrap();
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn test_interpret_non_2xx_is_api_error_with_payload() {
        let error = interpret_response(
            "/x",
            &response(401, r#"{"ErrorCode":1000,"ErrorMessage":"Invalid access token"}"#),
        )
        .unwrap_err();

        match error {
            BookerError::Api(error) => {
                assert_eq!(error.status, 401);
                assert_eq!(error.message(), Some("Invalid access token"));
                assert_eq!(error.path, "/x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_interpret_non_2xx_with_html_body_has_no_payload() {
        let error =
            interpret_response("/x", &response(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert!(matches!(
            error,
            BookerError::Api(ApiError { status: 502, payload: None, .. })
        ));
    }

    #[test]
    fn test_interpret_is_success_false_is_api_error() {
        let error = interpret_response(
            "/x",
            &response(200, r#"{"IsSuccess":false,"ErrorMessage":"No such customer"}"#),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BookerError::Api(ref e) if e.status == 200 && e.message() == Some("No such customer")
        ));
    }

    #[test]
    fn test_interpret_undecodable_success_is_malformed() {
        let error = interpret_response("/x", &response(200, "not json")).unwrap_err();
        assert!(matches!(error, BookerError::MalformedResponse { .. }));
    }

    // === Client Construction Tests ===

    #[test]
    fn test_client_new_uses_default_config() {
        let client = BookerClient::new(create_test_session(), None).unwrap();
        assert_eq!(client.config().default_page_size(), 50);
        assert_eq!(client.http_client().base_url(), "https://api.booker.com");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BookerClient>();
    }

    #[test]
    fn test_build_params_without_paging() {
        let client = BookerClient::new(create_test_session(), None).unwrap();
        let params = client.build_params(
            Params::new().with("FromStartDate", "2024-01-01"),
            Params::new(),
            false,
        );

        assert_eq!(params.get("access_token"), Some(&json!("test-token")));
        assert_eq!(params.get("LocationID"), Some(&json!(3749)));
        assert!(!params.contains_key("PageNumber"));
    }

    #[test]
    fn test_build_params_with_paging_uses_configured_page_size() {
        let config = BookerConfig::builder().default_page_size(20).build().unwrap();
        let client = BookerClient::new(create_test_session(), Some(&config)).unwrap();
        let params = client.build_params(Params::new(), Params::new(), true);

        assert_eq!(params.get("UsePaging"), Some(&json!(true)));
        assert_eq!(params.get("PageSize"), Some(&json!(20)));
        assert_eq!(params.get("PageNumber"), Some(&json!(1)));
    }
}
