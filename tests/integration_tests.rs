//! Client-level properties against a wiremock server.

use http::StatusCode;
use petstore_smoke::report::MemoryReporter;
use petstore_smoke::{ApiPath, Backoff, Config, Error, HeaderOverride, JsonClient, MultipartClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    Config {
        base_api_url: server.uri(),
        base_files_url: server.uri(),
        ..Config::default()
    }
}

fn fast_backoff(max_retries: u32) -> Backoff {
    Backoff::Fixed {
        delay: Duration::from_millis(10),
        max_retries,
    }
}

#[tokio::test]
async fn default_headers_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/inventory"))
        .and(header("Accept-Language", "en-US"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer special-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let body = client.get(None, ApiPath::StoreInventory, &[]).await.unwrap();
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn blank_token_sends_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/inventory"))
        .respond_with(move |req: &wiremock::Request| {
            if req.headers.contains_key("Authorization") {
                ResponseTemplate::new(400).set_body_string("unexpected Authorization header")
            } else {
                ResponseTemplate::new(200).set_body_string("{}")
            }
        })
        .mount(&mock_server)
        .await;

    let config = Config {
        bearer_token: "   ".to_string(),
        ..test_config(&mock_server)
    };
    let client = JsonClient::new(&config).unwrap();
    client.get(None, ApiPath::StoreInventory, &[]).await.unwrap();
}

#[tokio::test]
async fn override_header_wins_over_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/inventory"))
        .and(header("Content-Type", "text/plain"))
        .and(header("Accept-Language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let overridden = HeaderOverride::new("Content-Type", "text/plain").unwrap();
    client
        .get(Some(&overridden), ApiPath::StoreInventory, &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn retry_bound_is_max_retries_plus_one() {
    let mock_server = MockServer::start().await;
    let attempt_count = Arc::new(AtomicUsize::new(0));
    let attempt_count_clone = attempt_count.clone();

    Mock::given(method("GET"))
        .and(path("/pet/1"))
        .respond_with(move |_req: &wiremock::Request| {
            attempt_count_clone.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(500).set_body_string("Server error")
        })
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server))
        .unwrap()
        .with_backoff(fast_backoff(2));

    let result = client.get(None, ApiPath::PetId, &["1"]).await;

    // retry_max 2 means one initial try plus two retries.
    assert_eq!(attempt_count.load(Ordering::SeqCst), 3);
    match result {
        Err(Error::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "Server error");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn success_short_circuits_without_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server))
        .unwrap()
        .with_backoff(Backoff::Fixed {
            delay: Duration::from_secs(1),
            max_retries: 3,
        });

    let start = std::time::Instant::now();
    let body = client.get(None, ApiPath::PetId, &["1"]).await.unwrap();

    assert_eq!(body, r#"{"id":1}"#);
    assert!(
        start.elapsed() < Duration::from_millis(500),
        "a first-attempt success must not sleep"
    );
}

#[tokio::test]
async fn retried_then_succeeded_is_transparent() {
    let mock_server = MockServer::start().await;
    let attempt_count = Arc::new(AtomicUsize::new(0));
    let attempt_count_clone = attempt_count.clone();

    // Two conflicts, then a success.
    Mock::given(method("GET"))
        .and(path("/store/order/7"))
        .respond_with(move |_req: &wiremock::Request| {
            let count = attempt_count_clone.fetch_add(1, Ordering::SeqCst);
            if count < 2 {
                ResponseTemplate::new(409).set_body_string("conflict")
            } else {
                ResponseTemplate::new(200).set_body_string(r#"{"id":7}"#)
            }
        })
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server))
        .unwrap()
        .with_backoff(fast_backoff(3));

    let body = client.get(None, ApiPath::StoreOrderId, &["7"]).await.unwrap();

    assert_eq!(body, r#"{"id":7}"#);
    assert_eq!(attempt_count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/404404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Pet not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server))
        .unwrap()
        .with_backoff(fast_backoff(3));

    let result = client.get(None, ApiPath::PetId, &["404404"]).await;

    match result {
        Err(Error::UnexpectedStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn raw_get_bypasses_the_success_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/no_such_user"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();

    // Raw variant: full response, no error.
    let response = client
        .get_raw(None, ApiPath::UserUsername, &[], &["no_such_user"])
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "User not found");
    assert!(!response.is_success());

    // Strict variant against the same path: uniform failure.
    let result = client.get(None, ApiPath::UserUsername, &["no_such_user"]).await;
    assert!(matches!(result, Err(Error::UnexpectedStatus { .. })));
}

#[tokio::test]
async fn delete_raw_returns_the_failure_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/store/order/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Order not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let response = client
        .delete_raw(None, ApiPath::StoreOrderId, &["999"])
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 404);
}

#[tokio::test]
async fn html_response_adds_base_url_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/inventory"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw("<!DOCTYPE html><html><body>oops</body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let err = client.get(None, ApiPath::StoreInventory, &[]).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("actual = 404"));
    assert!(message.contains("Hint"), "HTML responses should hint at a base URL problem");
}

#[tokio::test]
async fn reports_are_masked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(move |req: &wiremock::Request| {
            ResponseTemplate::new(200).set_body_raw(req.body.clone(), "application/json")
        })
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(MemoryReporter::new());
    let client =
        JsonClient::with_reporter(&test_config(&mock_server), reporter.clone()).unwrap();

    let user = petstore_smoke::User::new("Jane", "Doe", "jane.doe@example.com", "qa_1");
    client.post(None, &user, ApiPath::User, &[]).await.unwrap();

    let records = reporter.records();
    assert_eq!(records.len(), 1);
    let (title, message) = &records[0];
    assert_eq!(title, "HTTP: POST /user");
    assert!(message.contains("j***@example.com"), "email must be masked: {message}");
    assert!(!message.contains("jane.doe@example.com"));
    assert!(message.contains("Status: 200"));
}

#[tokio::test]
async fn raw_calls_are_reported_too() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&mock_server)
        .await;

    let reporter = Arc::new(MemoryReporter::new());
    let client =
        JsonClient::with_reporter(&test_config(&mock_server), reporter.clone()).unwrap();

    client
        .get_raw(None, ApiPath::UserUsername, &[], &["ghost"])
        .await
        .unwrap();

    let records = reporter.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "HTTP: RAW GET /user/ghost");
    assert!(records[0].1.contains("Status: 404"));
}

#[tokio::test]
async fn order_post_round_trips_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/order"))
        .respond_with(move |req: &wiremock::Request| {
            ResponseTemplate::new(200).set_body_raw(req.body.clone(), "application/json")
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let order = petstore_smoke::Order::new(
        1001,
        1,
        3,
        "2026-08-06T10:00:00Z",
        petstore_smoke::OrderStatus::Placed,
        true,
    );

    let body = client.post(None, &order, ApiPath::StoreOrder, &[]).await.unwrap();
    let echoed: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(echoed["id"], 1001);
    assert_eq!(echoed["petId"], 1);
    assert_eq!(echoed["quantity"], 3);
    assert_eq!(echoed["status"], "placed");
    assert_eq!(echoed["complete"], true);
}

#[tokio::test]
async fn query_parameters_are_appended() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/login"))
        .and(query_param("username", "qa_1"))
        .and(query_param("password", "hunter2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code":200,"message":"logged in user session:123"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();
    let body = client
        .get_with_query(
            None,
            ApiPath::UserLogin,
            &[("username", "qa_1"), ("password", "hunter2")],
            &[],
        )
        .await
        .unwrap();
    assert!(body.contains("logged in user session"));
}

#[tokio::test]
async fn patch_and_options_dispatch_through_the_executor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/pet"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("OPTIONS"))
        .and(path("/pet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = JsonClient::new(&test_config(&mock_server)).unwrap();

    client
        .send(
            http::Method::PATCH,
            None,
            Some(&serde_json::json!({"status": "sold"})),
            ApiPath::Pet,
            &[],
            &[],
        )
        .await
        .unwrap();
    client
        .send::<()>(http::Method::OPTIONS, None, None, ApiPath::Pet, &[], &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn multipart_upload_sends_once_and_checks_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet/1/uploadImage"))
        .and(header("Authorization", "Bearer file-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code":200,"message":"file uploaded"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("rex.png");
    std::fs::write(&image, b"not really a png").unwrap();

    let reporter = Arc::new(MemoryReporter::new());
    let client =
        MultipartClient::with_reporter(&test_config(&mock_server), reporter.clone()).unwrap();

    let endpoint = ApiPath::PetUploadImage.resolve(&["1"]);
    let body = client
        .post_multipart(
            "file-token",
            &[("file", image.as_path())],
            &[("additionalMetadata", "smoke upload")],
            &endpoint,
        )
        .await
        .unwrap();

    assert!(body.contains("file uploaded"));
    let records = reporter.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "HTTP: POST multipart /pet/1/uploadImage");
}

#[tokio::test]
async fn multipart_failure_raises_uniform_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet/1/uploadImage"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad upload"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MultipartClient::new(&test_config(&mock_server)).unwrap();
    let endpoint = ApiPath::PetUploadImage.resolve(&["1"]);
    let result = client
        .post_multipart("file-token", &[], &[("additionalMetadata", "x")], &endpoint)
        .await;

    match result {
        Err(Error::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, "bad upload");
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}
