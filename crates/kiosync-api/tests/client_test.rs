#![allow(clippy::unwrap_used)]
// Integration tests for `Client` using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kiosync_api::{Client, Error, FailureKind};

// ── Helpers ─────────────────────────────────────────────────────────

fn client_for(server: &MockServer, username: Option<&str>) -> Client {
    let url: url::Url = server.uri().parse().unwrap();
    Client::new(
        url.host_str().unwrap(),
        url.port().unwrap(),
        username.map(String::from),
        "secret".to_string().into(),
        Duration::from_secs(5),
    )
    .unwrap()
}

// ── Query construction ──────────────────────────────────────────────

#[tokio::test]
async fn test_cmd_and_password_always_attached() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .and(query_param("cmd", "screenOn"))
        .and(query_param("password", "secret"))
        .and(query_param_is_missing("username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.screen_on().await.unwrap();
}

#[tokio::test]
async fn test_username_attached_when_configured() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some("admin"));

    Mock::given(method("GET"))
        .and(query_param("cmd", "screenOff"))
        .and(query_param("username", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.screen_off().await.unwrap();
}

#[tokio::test]
async fn test_empty_username_left_off() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some(""));

    Mock::given(method("GET"))
        .and(query_param_is_missing("username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.screen_on().await.unwrap();
}

#[tokio::test]
async fn test_empty_password_still_sent() {
    let server = MockServer::start().await;
    let url: url::Url = server.uri().parse().unwrap();
    let client = Client::new(
        url.host_str().unwrap(),
        url.port().unwrap(),
        None,
        String::new().into(),
        Duration::from_secs(5),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(query_param("password", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.screen_on().await.unwrap();
}

#[tokio::test]
async fn test_set_config_parameters() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .and(query_param("cmd", "setConfig"))
        .and(query_param("key", "screensaver"))
        .and(query_param("value", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_config("screensaver", "true").await.unwrap();
}

#[tokio::test]
async fn test_brightness_value_sent_as_string() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .and(query_param("cmd", "setScreenBrightness"))
        .and(query_param("value", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_screen_brightness(42).await.unwrap();
}

// ── Device info decoding ────────────────────────────────────────────

#[tokio::test]
async fn test_device_info_snapshot() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .and(query_param("cmd", "getDeviceInfo"))
        .and(query_param("type", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "screenOn": true,
            "batteryLevel": 73,
            "isPlugged": false,
            "screenBrightness": 200,
            "startUrl": "http://hub.local/panel"
        })))
        .mount(&server)
        .await;

    let info = client.device_info().await.unwrap().unwrap();

    assert!(info.screen_on);
    assert_eq!(info.battery_level, 73);
    assert!(!info.is_plugged);
    // absent field defaults
    assert!(!info.screensaver_enabled);
    assert!(!info.motion_detector_started);
    assert_eq!(info.start_url.as_deref(), Some("http://hub.local/panel"));
}

#[tokio::test]
async fn test_malformed_body_is_no_data() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>please log in</html>"))
        .mount(&server)
        .await;

    let info = client.device_info().await.unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn test_non_object_json_is_no_data() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Error: wrong password")))
        .mount(&server)
        .await;

    let info = client.device_info().await.unwrap();
    assert!(info.is_none());
}

// ── Failure paths ───────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.device_info().await;

    match result {
        Err(Error::Http { status }) => assert_eq!(status, 500),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_classified() {
    let server = MockServer::start().await;
    let url: url::Url = server.uri().parse().unwrap();
    let client = Client::new(
        url.host_str().unwrap(),
        url.port().unwrap(),
        None,
        "secret".to_string().into(),
        Duration::from_millis(100),
    )
    .unwrap();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.device_info().await.unwrap_err();
    assert_eq!(err.failure_kind(), FailureKind::TimedOut);
}

#[tokio::test]
async fn test_connect_failure_classified_best_effort() {
    // Reserve a port, then drop the listener so nothing is bound to it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = Client::new(
        "127.0.0.1",
        port,
        None,
        "secret".to_string().into(),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.screen_on().await.unwrap_err();

    // Exact kind is platform-dependent; the contract is error vs. success.
    assert!(matches!(
        err.failure_kind(),
        FailureKind::Refused | FailureKind::NoRoute | FailureKind::TimedOut | FailureKind::Other
    ));
}
