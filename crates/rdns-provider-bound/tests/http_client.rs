//! HTTP directory client tests
//!
//! Verify the wire behavior of `HttpDirectoryClient` against a mock
//! HTTP server: paths, auth header, payload shapes, and the envelope
//! vs. transport error split.

use rdns_core::Error;
use rdns_core::traits::DirectoryClient;
use rdns_provider_bound::HttpDirectoryClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpDirectoryClient {
    let addr = server.address();
    HttpDirectoryClient::new(&addr.ip().to_string(), addr.port(), false, "test-key".to_string())
        .expect("client builds")
}

#[tokio::test]
async fn list_zones_sends_bearer_token_and_parses_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/zones"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": [
                {"id": "3", "name": "2.0.192.in-addr.arpa"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.list_zones().await.expect("call succeeds");

    assert!(response.ok);
    let zones = response.data.expect("payload present");
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id, "3");
    assert_eq!(zones[0].name, "2.0.192.in-addr.arpa");
}

#[tokio::test]
async fn create_record_posts_the_form_data_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zones/3/records"))
        .and(body_json(json!({
            "name": "5",
            "type": "Bound::BuiltinRecordTypes::PTR",
            "form_data": {"name": "host1.example.com."},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {
                "id": "41",
                "name": "5",
                "type": {"class": "Bound::BuiltinRecordTypes::PTR"},
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .create_record("3", "5", "Bound::BuiltinRecordTypes::PTR", "host1.example.com.")
        .await
        .expect("call succeeds");

    assert!(response.ok);
    let record = response.data.expect("payload present");
    assert_eq!(record.id, "41");
    assert_eq!(record.record_type.class, "Bound::BuiltinRecordTypes::PTR");
}

#[tokio::test]
async fn update_and_destroy_target_the_record_resource() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/records/41"))
        .and(body_json(json!({"form_data": {"name": "new.example.com."}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/records/41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let updated = client
        .update_record("41", "new.example.com.")
        .await
        .expect("update call succeeds");
    assert!(updated.ok);

    let destroyed = client.destroy_record("41").await.expect("destroy call succeeds");
    assert!(destroyed.ok);
}

#[tokio::test]
async fn refused_calls_come_back_as_envelope_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zones"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "ok": false,
            "error": "zone name already taken",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.create_zone("2.0.192.in-addr.arpa").await.expect("transport fine");

    assert!(!response.ok);
    assert_eq!(response.error_message(), "zone name already taken");
}

#[tokio::test]
async fn server_errors_are_transport_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/zones"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.list_zones().await;

    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn unparseable_bodies_are_transport_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/zones/3/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.list_records("3").await;

    assert!(matches!(result, Err(Error::Transport(_))));
}
