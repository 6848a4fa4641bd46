//! Login, authenticated traffic and server-side session expiry, end to end.


use fixtures::Harness;
use freightdesk_gateway::endpoints::{LoginRequest, ShipmentQuery};
use freightdesk_gateway::{GatewayError, ScopedSessionStore, SessionStore};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "user": { "id": 7, "role": "admin" }
        })))
        .mount(server)
        .await;
}

fn credentials() -> LoginRequest {
    LoginRequest::new("ops@example.com", "pw")
}

#[tokio::test]
async fn login_then_expiry_tears_the_session_down() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1").await;
    Mock::given(method("GET"))
        .and(path("/api/shipments"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shipments"))
        .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    let login = h.client.auth().login(&credentials(), false).await.unwrap();
    assert_eq!(login.token.as_deref(), Some("tok-1"));
    assert_eq!(h.store.read().unwrap().user, Some(json!({ "id": 7, "role": "admin" })));

    let first: Value = h.client.shipments().list(&ShipmentQuery::default()).await.unwrap();
    assert_eq!(first, json!({ "data": [] }));

    let err = h
        .client
        .shipments()
        .list::<Value>(&ShipmentQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::SessionExpired { ref body } if body == "jwt expired"));
    assert!(h.store.read().is_none());
    assert_eq!(h.invalidations(), 1);

    // Nothing left to attach.
    let _ = h.client.shipments().list::<Value>(&ShipmentQuery::default()).await;
    let received = server.received_requests().await.unwrap();
    let last = received.last().unwrap();
    assert!(!last.headers.contains_key("authorization"));
}

#[tokio::test]
async fn wrong_password_is_an_ordinary_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store
        .persist(
            freightdesk_gateway::SessionCredential::new("still-valid", None),
            freightdesk_gateway::StorageScope::Ephemeral,
        )
        .unwrap();

    let err = h.client.auth().login(&credentials(), true).await.unwrap_err();
    assert_eq!(err.status(), Some(http::StatusCode::UNAUTHORIZED));
    assert!(matches!(err, GatewayError::Api { .. }));
    assert_eq!(h.store.read().unwrap().token, "still-valid");
    assert_eq!(h.invalidations(), 0);
}

#[tokio::test]
async fn remembered_login_survives_a_restart() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-durable").await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let h = Harness::with_store(&server, ScopedSessionStore::with_durable_file(&file));
    h.client.auth().login(&credentials(), true).await.unwrap();

    let restarted = ScopedSessionStore::with_durable_file(&file);
    assert_eq!(restarted.read().unwrap().token, "tok-durable");

    restarted.clear();
    assert!(!file.exists());
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_server_fails() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-2").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.client.auth().login(&credentials(), false).await.unwrap();
    let err = h.client.auth().logout().await.unwrap_err();

    assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
    assert!(h.store.read().is_none());
    // Explicit logout is not a server-side invalidation.
    assert_eq!(h.invalidations(), 0);
}

#[tokio::test]
async fn two_factor_login_stores_token_only_after_verification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "requiresTwoFactor": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/2fa/verify"))
        .and(body_json(json!({ "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-2fa" })))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    let first = h.client.auth().login(&credentials(), false).await.unwrap();
    assert!(first.requires_two_factor);
    assert!(h.store.read().is_none());

    h.client.auth().verify_two_factor("123456", false).await.unwrap();
    assert_eq!(h.store.read().unwrap().token, "tok-2fa");
}

#[tokio::test]
async fn concurrent_expiries_keep_the_store_consistent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store
        .persist(
            freightdesk_gateway::SessionCredential::new("tok", None),
            freightdesk_gateway::StorageScope::Durable,
        )
        .unwrap();

    let a = h.client.clone();
    let b = h.client.clone();
    let (ra, rb) = tokio::join!(
        async move { a.fleet().get::<Value>(1).await },
        async move { b.users().get::<Value>(2).await },
    );
    assert!(matches!(ra, Err(GatewayError::SessionExpired { .. })));
    assert!(matches!(rb, Err(GatewayError::SessionExpired { .. })));
    assert!(h.store.read().is_none());
    // One notification per rejected request.
    assert_eq!(h.invalidations(), 2);
}
