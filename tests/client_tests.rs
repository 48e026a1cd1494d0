//! Integration tests for the request executor.
//!
//! These tests run the client against a wiremock server and verify request
//! encoding, response classification and hydration.

use booker_api::clients::SUBSCRIPTION_KEY_HEADER;
use booker_api::rest::resources::v4_1::{Employee, Location};
use booker_api::{
    AccessToken, ApiBaseUrl, BookerClient, BookerConfig, BookerError, Environment, Hydrated,
    HydrationError, HydrationTarget, HttpMethod, LocationId, Params, SessionContext,
    SubscriptionKey,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_session() -> SessionContext {
    SessionContext::new(AccessToken::new("test-token").unwrap())
        .with_location(LocationId::new(3749))
}

fn config_for(server: &MockServer) -> booker_api::BookerConfigBuilder {
    BookerConfig::builder()
        .environment(Environment::Custom(ApiBaseUrl::new(server.uri()).unwrap()))
}

fn client_for(server: &MockServer) -> BookerClient {
    let config = config_for(server).build().unwrap();
    BookerClient::new(create_test_session(), Some(&config)).unwrap()
}

// ============================================================================
// Request Encoding Tests
// ============================================================================

#[tokio::test]
async fn test_get_sends_params_as_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/3749"))
        .and(query_param("access_token", "test-token"))
        .and(query_param("LocationID", "3749"))
        .and(query_param("includeFieldValues", "false"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"IsSuccess": true, "ID": 3749})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(
        Params::new().with("includeFieldValues", false),
        Params::new(),
        false,
    );
    let location: Location = assert_ok!(
        client
            .request_one(HttpMethod::Get, "/v4.1/merchant/location/3749", &params)
            .await
    );
    assert_eq!(location.id, 3749);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_post_sends_params_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4.1/merchant/orders"))
        .and(body_partial_json(json!({
            "access_token": "test-token",
            "LocationID": 3749,
            "Nested": {"Deep": [1, 2]}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"IsSuccess": true, "Orders": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(
        Params::new().with("Nested", json!({"Deep": [1, 2]})),
        Params::new(),
        false,
    );
    let body = assert_ok!(
        client
            .request_raw(HttpMethod::Post, "v4.1/merchant/orders", &params)
            .await
    );
    assert_eq!(body["Orders"], json!([]));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_subscription_key_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .and(header(SUBSCRIPTION_KEY_HEADER, "apim-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .subscription_key(SubscriptionKey::new("apim-key").unwrap())
        .build()
        .unwrap();
    let client = BookerClient::new(create_test_session(), Some(&config)).unwrap();
    let params = client.build_params(Params::new(), Params::new(), false);

    assert_ok!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/location/1", &params)
            .await
    );
}

// ============================================================================
// Hydration Tests
// ============================================================================

#[tokio::test]
async fn test_no_model_target_returns_decoded_body() {
    let server = MockServer::start().await;
    let body = json!({"IsSuccess": true, "Order": {"ID": 5, "Items": [{"ID": 1}]}});
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/order/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let hydrated = assert_ok!(
        client
            .single_request(
                HttpMethod::Get,
                "/v4.1/merchant/order/5",
                &params,
                &HydrationTarget::raw(),
            )
            .await
    );
    assert_eq!(hydrated, Hydrated::Raw(body));
}

#[tokio::test]
async fn test_missing_required_field_names_the_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4.1/merchant/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [{"ID": 1, "FirstName": "Ana"}, {"FirstName": "Ben"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let error = assert_err!(
        client
            .single_request(
                HttpMethod::Post,
                "/v4.1/merchant/employees",
                &params,
                &HydrationTarget::<Employee>::model(),
            )
            .await
    );

    match error {
        BookerError::Hydration(HydrationError::MissingField { model, field }) => {
            assert_eq!(model, "Employee");
            assert_eq!(field, "ID");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_request_many_on_single_record_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let error = assert_err!(
        client
            .request_many::<Employee>(HttpMethod::Get, "/v4.1/merchant/employees", &params)
            .await
    );
    assert!(matches!(error, BookerError::MalformedResponse { .. }));
}

// ============================================================================
// Error Classification Tests
// ============================================================================

#[tokio::test]
async fn test_error_status_carries_payload_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/customer/9"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("x-request-id", "req-42")
                .set_body_json(json!({
                    "IsSuccess": false,
                    "ErrorCode": 1000,
                    "ErrorMessage": "Invalid access token"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let error = assert_err!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/customer/9", &params)
            .await
    );

    assert_eq!(error.status(), Some(401));
    let BookerError::Api(api_error) = error else {
        panic!("expected an API error");
    };
    assert_eq!(api_error.message(), Some("Invalid access token"));
    assert_eq!(api_error.request_id.as_deref(), Some("req-42"));
    assert_eq!(api_error.path, "/v4.1/merchant/customer/9");
}

#[tokio::test]
async fn test_is_success_false_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v4.1/merchant/appointment/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsSuccess": false,
            "ErrorMessage": "Appointment already confirmed"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new().with("ID", 77), Params::new(), false);
    let error = assert_err!(
        client
            .request_raw(HttpMethod::Put, "/v4.1/merchant/appointment/confirm", &params)
            .await
    );
    assert!(matches!(
        error,
        BookerError::Api(ref e)
            if e.status == 200 && e.message() == Some("Appointment already confirmed")
    ));
}

#[tokio::test]
async fn test_undecodable_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let error = assert_err!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/location/1", &params)
            .await
    );
    assert!(matches!(error, BookerError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_empty_path_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);

    let error = assert_err!(client.request_raw(HttpMethod::Get, "", &params).await);
    assert!(matches!(error, BookerError::InvalidPath { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Retry Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": 1})))
        .mount(&server)
        .await;

    let config = config_for(&server).tries(2).build().unwrap();
    let client = BookerClient::new(create_test_session(), Some(&config)).unwrap();
    let params = client.build_params(Params::new(), Params::new(), false);

    let body = assert_ok!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/location/1", &params)
            .await
    );
    assert_eq!(body, json!({"ID": 1}));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_rate_limit_without_retries_surfaces_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = client.build_params(Params::new(), Params::new(), false);
    let error = assert_err!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/location/1", &params)
            .await
    );
    assert_eq!(error.status(), Some(429));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4.1/merchant/location/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).tries(3).build().unwrap();
    let client = BookerClient::new(create_test_session(), Some(&config)).unwrap();
    let params = client.build_params(Params::new(), Params::new(), false);

    let error = assert_err!(
        client
            .request_raw(HttpMethod::Get, "/v4.1/merchant/location/1", &params)
            .await
    );
    assert_eq!(error.status(), Some(404));
}
