#![allow(clippy::unwrap_used)]
// Integration tests for `ElementsClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use giga_api::{ElementsClient, Error, EventsQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ElementsClient) {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).unwrap();
    // One mock server plays both the identity host and the API host.
    let client = ElementsClient::with_bases(reqwest::Client::new(), base.clone(), base);
    (server, client)
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn login_success_returns_greeting() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/identity/api/v1/user/login"))
        .and(body_string_contains("email=user%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "Hello User!"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let reply = client.login("user@example.com", &secret).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Hello User!"));
}

#[tokio::test]
async fn login_rejection_is_an_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/identity/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("user@example.com", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn begin_session_returns_opaque_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/openid/begin"))
        .and(query_param("op", "gigaset"))
        .respond_with(ResponseTemplate::new(200).set_body_string("session token abc"))
        .mount(&server)
        .await;

    let token = client.begin_session().await.unwrap();
    assert_eq!(token, "session token abc");
}

// ── Basestations ────────────────────────────────────────────────────

#[tokio::test]
async fn list_basestations_decodes_sensors() {
    let (server, client) = setup().await;

    let body = json!([{
        "id": "F1A2B3",
        "friendly_name": "Home",
        "status": "online",
        "firmware_status": "up_to_date",
        "intrusion_settings": { "active_mode": "home" },
        "sensors": [{
            "id": "abc123",
            "type": "ds02",
            "friendly_name": "Front Door",
            "status": "online",
            "firmware_status": "up_to_date",
            "battery": { "state": "ok" },
            "position_status": "closed"
        }]
    }]);

    Mock::given(method("GET"))
        .and(path("/api/v1/me/basestations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stations = client.list_basestations().await.unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, "F1A2B3");
    let mode = stations[0]
        .intrusion_settings
        .as_ref()
        .and_then(|s| s.active_mode.as_deref());
    assert_eq!(mode, Some("home"));
    assert_eq!(stations[0].sensors[0].type_code, "ds02");
    assert_eq!(stations[0].sensors[0].position_status.as_deref(), Some("closed"));
}

#[tokio::test]
async fn set_mode_posts_intrusion_settings() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/me/basestations/F1A2B3"))
        .and(body_string_contains("\"active_mode\":\"away\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_mode("F1A2B3", "away").await.unwrap();
}

#[tokio::test]
async fn delayed_mode_posts_arm_delay_in_milliseconds() {
    let (server, client) = setup().await;

    // 4_300_000 s is past the u32 range once expressed in ms.
    Mock::given(method("POST"))
        .and(path("/api/v1/me/basestations/F1A2B3"))
        .and(body_string_contains("\"active_mode\":\"away\""))
        .and(body_string_contains("\"arm_delay\":4300000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_delayed_mode("F1A2B3", "away", 4_300_000).await.unwrap();
}

#[tokio::test]
async fn endnode_command_posts_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/me/basestations/F1A2B3/endnodes/plug1/cmd"))
        .and(body_string_contains("\"name\":\"on\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.endnode_command("F1A2B3", "plug1", "on").await.unwrap();
}

// ── Events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_events_with_filters() {
    let (server, client) = setup().await;

    let body = json!({
        "home_state": "ok",
        "events": [
            {
                "id": "evt2",
                "ts": "1469204461573",
                "type": "close",
                "source_type": "basestation",
                "o": { "type": "ds02", "id": "abc123", "friendly_name": "Front Door" }
            },
            {
                "id": "evt1",
                "ts": "1469204400000",
                "type": "open",
                "o": { "type": "ds02", "id": "abc123", "friendly_name": "Front Door" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/me/events"))
        .and(query_param("limit", "10"))
        .and(query_param("group", "door"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_events(&EventsQuery {
            limit: Some(10),
            group: Some("door".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.home_state.as_deref(), Some("ok"));
    assert_eq!(page.events.len(), 2);
    // Server order is newest-first.
    assert!(page.events[0].ts > page.events[1].ts);
}

// ── Cameras ─────────────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_returns_raw_bytes() {
    let (server, client) = setup().await;

    let jpeg = [0xFF_u8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    Mock::given(method("GET"))
        .and(path("/api/v1/me/cameras/cam12345678/snapshot"))
        .and(query_param("fresh", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(jpeg.as_slice()),
        )
        .mount(&server)
        .await;

    let bytes = client.snapshot("cam12345678").await.unwrap();
    assert_eq!(bytes, jpeg);
}

#[tokio::test]
async fn liveview_decodes_uri_map() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/me/cameras/cam12345678/liveview/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": {
                "rtsp": "rtsp://stream.example.com/live",
                "m3u8": "https://stream.example.com/live.m3u8"
            }
        })))
        .mount(&server)
        .await;

    let live = client.liveview("cam12345678").await.unwrap();
    assert_eq!(
        live.uri.get("rtsp").map(String::as_str),
        Some("rtsp://stream.example.com/live")
    );
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn expired_session_maps_to_auth_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_basestations().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn health_ping_swallows_failures() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/me/health"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // Fire-and-forget: a server error must not surface to the caller.
    client.health_ping().await;
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.system_health().await;
    match result {
        Err(Error::Status { status, ref body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}
