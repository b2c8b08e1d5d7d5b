#![allow(clippy::unwrap_used)]
// Integration tests for `StatsClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ovenwatch_api::{Error, SnapshotShape, StatsClient, WirePayload};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, StatsClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/api/stats", server.uri())).unwrap();
    let client = StatsClient::with_client(reqwest::Client::new(), endpoint);
    (server, client)
}

async fn mount_json(server: &MockServer, body: &serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Payload forms ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_flat_payload() {
    let (server, client) = setup().await;
    mount_json(&server, &json!({ "accepted": 7, "refused": 2 })).await;

    let payload = client.fetch(SnapshotShape::Auto).await.unwrap();

    let WirePayload::Flat(counters) = payload else {
        panic!("expected flat payload, got {payload:?}");
    };
    assert_eq!(counters.accepted, 7);
    assert_eq!(counters.refused, 2);
}

#[tokio::test]
async fn test_fetch_rich_payload() {
    let (server, client) = setup().await;
    mount_json(
        &server,
        &json!({
            "stats": {
                "accepted": 10,
                "refused": 1,
                "ingredients": { "R": 4, "J": 3, "V": 2, "B": 1 }
            },
            "stations": [
                { "id": 3, "current_load": 18, "max_capacity": 18, "available": true,
                  "size": "G", "restrictions": ["Chevre", "4_Fromages"] },
                { "id": 5, "current_load": 0, "max_capacity": 27, "available": false,
                  "size": "M", "restrictions": "-" }
            ]
        }),
    )
    .await;

    let payload = client.fetch(SnapshotShape::Rich).await.unwrap();

    let WirePayload::Rich(rich) = payload else {
        panic!("expected rich payload, got {payload:?}");
    };
    let ingredients = rich.stats.ingredients.unwrap();
    assert_eq!(ingredients.r, 4);
    assert_eq!(ingredients.b, 1);
    assert_eq!(rich.stations.len(), 2);
    assert_eq!(rich.stations[0].restrictions.as_slice().len(), 2);
    assert!(rich.stations[1].restrictions.is_empty());
    assert!(!rich.stations[1].available);
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.fetch(SnapshotShape::Auto).await;

    assert!(
        matches!(result, Err(Error::Status { status: 500, .. })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let (_server, client) = setup().await;

    // Nothing mounted: wiremock answers 404.
    let err = client.fetch(SnapshotShape::Auto).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.fetch(SnapshotShape::Auto).await.unwrap_err();
    assert!(err.is_decode(), "expected decode error, got: {err:?}");
}

#[tokio::test]
async fn test_forced_shape_mismatch() {
    let (server, client) = setup().await;
    mount_json(&server, &json!({ "accepted": 1, "refused": 0 })).await;

    let err = client.fetch(SnapshotShape::Rich).await.unwrap_err();
    assert!(err.is_decode(), "expected decode error, got: {err:?}");
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener so the port is closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let endpoint = Url::parse(&format!("http://{addr}/api/stats")).unwrap();
    let client = StatsClient::with_client(reqwest::Client::new(), endpoint);

    let err = client.fetch(SnapshotShape::Auto).await.unwrap_err();
    assert!(
        matches!(err, Error::Transport(_)),
        "expected transport error, got: {err:?}"
    );
}
