#![allow(clippy::unwrap_used)]
// Integration tests for `DeviceClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cygnus_api::{ActionResponse, DeviceClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DeviceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DeviceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "a",
                "hostname": "dev1.local",
                "ip": "10.0.0.5",
                "status": "online",
                "services": { "Cygnus Admin": null, "Web": 8081 }
            },
            { "name": "b", "hostname": "dev2.local" }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].identity.as_deref(), Some("a"));
    assert_eq!(devices[0].address.as_deref(), Some("10.0.0.5"));
    assert_eq!(devices[0].services.get("Web"), Some(&Some(8081)));
    assert_eq!(devices[1].address, None);
}

#[tokio::test]
async fn test_list_devices_tolerates_malformed_records() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "a", "hostname": "dev1.local", "ip": "10.0.0.5" },
            { "name": "b", "services": null },
            { "name": "c", "imei": 123_456_789, "port": "5001" },
            { "name": "d", "id": "d-1", "ip": "10.0.0.8", "address": "10.0.0.9" },
            { "name": "e", "port": "not a port", "model": { "rev": 2 } }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    let ids: Vec<_> = devices.iter().map(|d| d.identity.as_deref()).collect();
    assert_eq!(ids, [Some("a"), Some("b"), Some("c"), Some("d"), Some("e")]);
    assert!(devices[1].services.is_empty());
    assert_eq!(devices[2].imei.as_deref(), Some("123456789"));
    assert_eq!(devices[2].port, Some(5001));
    assert_eq!(devices[3].address.as_deref(), Some("10.0.0.8"));
    assert_eq!(devices[4].port, None);
    assert_eq!(devices[4].model, None);
}

#[tokio::test]
async fn test_list_devices_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(503).set_body_string("discovery not ready"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "discovery not ready");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_devices_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_name_sends_identity_and_display_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/devices/name"))
        .and(body_json(json!({ "identity": "a", "displayName": "Lab unit" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.update_name("a", "Lab unit").await.unwrap();

    assert_eq!(
        response,
        ActionResponse {
            success: true,
            error: None
        }
    );
}

#[tokio::test]
async fn test_delete_reports_application_failure_on_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/devices/delete"))
        .and(body_json(json!({ "identity": "ghost" })))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "success": false, "error": "device not found" })),
        )
        .mount(&server)
        .await;

    let response = client.delete_device("ghost").await.unwrap();

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("device not found"));
}

#[tokio::test]
async fn test_trigger_rediscovery() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/discovery/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.trigger_rediscovery().await.unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn test_action_with_unparseable_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/discovery/refresh"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = client.trigger_rediscovery().await;

    assert!(
        matches!(result, Err(Error::Http { status: 500, .. })),
        "expected Http 500, got: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 9 (discard) is essentially never listening on test hosts.
    let client = DeviceClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
    );

    let result = client.list_devices().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
