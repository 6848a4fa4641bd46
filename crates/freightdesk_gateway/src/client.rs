//! Session-aware HTTP gateway client.
//!
//! Every request goes through two hooks:
//!
//! * outbound: the current [`SessionCredential`](crate::session::SessionCredential)
//!   is read from the [`SessionStore`] and attached as a bearer token; no
//!   credential means no `Authorization` header.
//! * inbound: a 401 from anything other than the login endpoint means the
//!   session is gone server-side. Both credential scopes are cleared, the
//!   [`SessionListener`] is told once, and the caller gets
//!   [`GatewayError::SessionExpired`]. Every other failure is returned as is.
//!
//! The client never retries.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::request::{RequestBody, RequestDescriptor, ResponseKind};
use crate::session::SessionStore;
use freightdesk_common::create_client;
use freightdesk_config::GatewaySettings;
use http::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Told when the server invalidates the session.
///
/// The hosting application decides what "back to the start" means: a UI
/// resets navigation to `/`, a CLI prints a re-login hint.
pub trait SessionListener: Send + Sync {
    fn session_invalidated(&self);
}

impl<F> SessionListener for F
where
    F: Fn() + Send + Sync,
{
    fn session_invalidated(&self) {
        self()
    }
}

/// Listener that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyListener;

impl SessionListener for LogOnlyListener {
    fn session_invalidated(&self) {
        warn!("session invalidated; returning to application root");
    }
}

/// A successful response, body already read.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl GatewayResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body as JSON. An empty body (e.g. `204 No Content`) decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Hand the body over as an opaque binary payload.
    pub fn into_binary(self) -> BinaryPayload {
        let content_type = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let file_name = self
            .headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name);
        BinaryPayload {
            content_type,
            file_name,
            bytes: self.body,
        }
    }
}

/// Raw document content returned by view/download endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryPayload {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

fn disposition_file_name(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        param
            .strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

/// HTTP client for the FreightDesk API.
///
/// Cheap to clone; clones share the connection pool, session store and listener.
#[derive(Clone)]
pub struct GatewayClient {
    http: Client,
    config: Arc<GatewayConfig>,
    sessions: Arc<dyn SessionStore>,
    listener: Arc<dyn SessionListener>,
}

impl GatewayClient {
    /// Creates a client from an already resolved configuration.
    pub fn new(
        config: GatewayConfig,
        sessions: Arc<dyn SessionStore>,
        listener: Arc<dyn SessionListener>,
    ) -> Result<Self, GatewayError> {
        let http = create_client(config.timeout_secs(), true, config.default_headers().clone())?;
        debug!(base_url = config.base_url(), "gateway client created");
        Ok(Self {
            http,
            config: Arc::new(config),
            sessions,
            listener,
        })
    }

    /// Resolves the configuration from loaded settings and creates the client.
    pub fn from_settings(
        settings: &GatewaySettings,
        sessions: Arc<dyn SessionStore>,
        listener: Arc<dyn SessionListener>,
    ) -> Result<Self, GatewayError> {
        Self::new(GatewayConfig::from_settings(settings)?, sessions, listener)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Sends a request through both interception hooks.
    ///
    /// # Errors
    ///
    /// * [`GatewayError::Transport`] when no response arrives
    /// * [`GatewayError::SessionExpired`] for a 401 outside the login endpoint
    /// * [`GatewayError::Api`] for every other non-success status
    pub async fn dispatch(
        &self,
        request: &RequestDescriptor,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut url = self.config.endpoint_url(request.path())?;
        url.set_query(request.query());

        let mut builder = self.http.request(request.method().clone(), url);
        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(payload) => builder.multipart(payload.to_form()?),
        };
        if request.response_kind() == ResponseKind::Binary {
            builder = builder.header(ACCEPT, "*/*");
        }
        let builder = self.authorize(builder);

        debug!(method = %request.method(), path = request.path(), "dispatching request");
        let response = builder.send().await?;
        self.intercept(request, response).await
    }

    /// Dispatches and decodes a JSON response.
    pub async fn json<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<T, GatewayError> {
        self.dispatch(request).await?.json()
    }

    /// Dispatches a binary request; the body is never JSON-decoded.
    pub async fn binary(&self, request: &RequestDescriptor) -> Result<BinaryPayload, GatewayError> {
        if request.response_kind() != ResponseKind::Binary {
            return Err(GatewayError::InvalidRequest(format!(
                "{} {} does not request a binary response",
                request.method(),
                request.path()
            )));
        }
        Ok(self.dispatch(request).await?.into_binary())
    }

    /// Outbound hook: attach the bearer token when a session exists.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.sessions.read() {
            Some(credential) => builder.header(AUTHORIZATION, format!("Bearer {}", credential.token)),
            None => builder,
        }
    }

    /// Inbound hook: pass successes through, tear the session down on a
    /// 401 from a protected endpoint, surface everything else unchanged.
    async fn intercept(
        &self,
        request: &RequestDescriptor,
        response: Response,
    ) -> Result<GatewayResponse, GatewayError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && !request.is_login() {
            // The status alone decides teardown; a truncated body must not skip it.
            let body = response.bytes().await.unwrap_or_default();
            warn!(
                method = %request.method(),
                path = request.path(),
                "server rejected the session; clearing stored credentials"
            );
            self.sessions.clear();
            self.listener.session_invalidated();
            return Err(GatewayError::SessionExpired {
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            return Ok(GatewayResponse {
                status,
                headers,
                body,
            });
        }

        let message = String::from_utf8_lossy(&body).into_owned();
        debug!(%status, path = request.path(), "request failed");
        Err(GatewayError::Api { status, message })
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.config.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FilePart, MultipartPayload};
    use crate::session::{ScopedSessionStore, SessionCredential, SessionError, StorageScope};
    use freightdesk_config::DeploymentMode;
    use mockall::mock;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    mock! {
        pub Store {}
        impl SessionStore for Store {
            fn read(&self) -> Option<SessionCredential>;
            fn clear(&self);
            fn persist(&self, credential: SessionCredential, scope: StorageScope) -> Result<(), SessionError>;
        }
    }

    mock! {
        pub Listener {}
        impl SessionListener for Listener {
            fn session_invalidated(&self);
        }
    }

    fn settings_for(server: &MockServer) -> GatewaySettings {
        GatewaySettings {
            mode: DeploymentMode::Production,
            host: "ignored".to_string(),
            origin: Some(server.uri()),
            timeout_secs: Some(5),
        }
    }

    fn client(
        server: &MockServer,
        store: Arc<dyn SessionStore>,
        listener: Arc<dyn SessionListener>,
    ) -> GatewayClient {
        GatewayClient::from_settings(&settings_for(server), store, listener).unwrap()
    }

    fn logged_in_store(token: &str) -> Arc<ScopedSessionStore> {
        let store = ScopedSessionStore::in_memory();
        store
            .persist(SessionCredential::new(token, None), StorageScope::Durable)
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_logged_in() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/shipments"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, logged_in_store("tok-123"), Arc::new(LogOnlyListener));
        let shipments: Value = client
            .json(&RequestDescriptor::get("/shipments"))
            .await
            .unwrap();
        assert_eq!(shipments[0]["id"], 1);
    }

    #[tokio::test]
    async fn sends_no_authorization_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client(
            &server,
            Arc::new(ScopedSessionStore::in_memory()),
            Arc::new(LogOnlyListener),
        );
        client
            .dispatch(&RequestDescriptor::get("/auth/me"))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0].headers.contains_key("authorization"));
        assert_eq!(received[0].headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn login_rejection_leaves_session_alone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid username or password"))
            .mount(&server)
            .await;

        let mut store = MockStore::new();
        store.expect_read().returning(|| None);
        store.expect_clear().times(0);
        let mut listener = MockListener::new();
        listener.expect_session_invalidated().times(0);

        let client = client(&server, Arc::new(store), Arc::new(listener));
        let err = client
            .dispatch(
                &RequestDescriptor::post("/auth/login")
                    .with_json(&json!({ "email": "a@b.c", "password": "nope" }))
                    .unwrap(),
            )
            .await
            .unwrap_err();

        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid username or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_session_clears_store_and_notifies_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fleet"))
            .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
            .mount(&server)
            .await;

        let mut store = MockStore::new();
        store
            .expect_read()
            .returning(|| Some(SessionCredential::new("stale", None)));
        store.expect_clear().times(1).return_const(());
        let mut listener = MockListener::new();
        listener.expect_session_invalidated().times(1).return_const(());

        let client = client(&server, Arc::new(store), Arc::new(listener));
        let err = client
            .dispatch(&RequestDescriptor::get("/fleet"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::SessionExpired { ref body } if body == "jwt expired"));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn truncated_401_body_still_tears_session_down() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        // Promises 64 bytes of body, sends 5, then hangs up.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 64\r\n\r\nshort")
                .await;
        });

        let mut store = MockStore::new();
        store
            .expect_read()
            .returning(|| Some(SessionCredential::new("stale", None)));
        store.expect_clear().times(1).return_const(());
        let mut listener = MockListener::new();
        listener.expect_session_invalidated().times(1).return_const(());

        let settings = GatewaySettings {
            mode: DeploymentMode::Production,
            host: "ignored".to_string(),
            origin: Some(format!("http://{addr}")),
            timeout_secs: Some(5),
        };
        let client =
            GatewayClient::from_settings(&settings, Arc::new(store), Arc::new(listener)).unwrap();
        let err = client
            .dispatch(&RequestDescriptor::get("/shipments"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::SessionExpired { .. }));
    }

    #[tokio::test]
    async fn other_statuses_pass_through_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/invoices/9"))
            .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"forbidden"}"#))
            .mount(&server)
            .await;

        let mut store = MockStore::new();
        store.expect_read().returning(|| None);
        store.expect_clear().times(0);

        let client = client(&server, Arc::new(store), Arc::new(LogOnlyListener));
        let err = client
            .dispatch(&RequestDescriptor::delete("/invoices/9"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.body(), Some(r#"{"error":"forbidden"}"#));
    }

    #[tokio::test]
    async fn binary_requests_skip_json_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/shipments/4/documents/2/download"))
            .and(header("accept", "*/*"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .insert_header("content-disposition", "attachment; filename=\"bl-4.pdf\"")
                    .set_body_bytes(b"%PDF-1.7 {not json".to_vec()),
            )
            .mount(&server)
            .await;

        let client = client(
            &server,
            Arc::new(ScopedSessionStore::in_memory()),
            Arc::new(LogOnlyListener),
        );
        let payload = client
            .binary(&RequestDescriptor::get("/shipments/4/documents/2/download").expect_binary())
            .await
            .unwrap();

        assert_eq!(payload.bytes, b"%PDF-1.7 {not json".to_vec());
        assert_eq!(payload.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(payload.file_name.as_deref(), Some("bl-4.pdf"));
    }

    #[tokio::test]
    async fn binary_helper_rejects_json_descriptors() {
        let server = MockServer::start().await;
        let client = client(
            &server,
            Arc::new(ScopedSessionStore::in_memory()),
            Arc::new(LogOnlyListener),
        );
        let err = client
            .binary(&RequestDescriptor::get("/shipments"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn multipart_body_overrides_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/fleet/import"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "imported": 3 })))
            .mount(&server)
            .await;

        let client = client(&server, logged_in_store("tok"), Arc::new(LogOnlyListener));
        let payload = MultipartPayload::new().file(
            "file",
            FilePart::new("fleet.csv", b"plate,type\nAB-1,truck\n".to_vec()).with_mime_type("text/csv"),
        );
        let result: Value = client
            .json(&RequestDescriptor::post("/fleet/import").with_multipart(payload))
            .await
            .unwrap();
        assert_eq!(result["imported"], 3);

        let received = server.received_requests().await.unwrap();
        let content_type = received[0].headers["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert!(String::from_utf8_lossy(&received[0].body).contains("filename=\"fleet.csv\""));
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/payments/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client(&server, logged_in_store("tok"), Arc::new(LogOnlyListener));
        let () = client
            .json(&RequestDescriptor::delete("/payments/3"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn transport_failure_is_not_a_session_failure() {
        let server = MockServer::start().await;
        let settings = settings_for(&server);
        drop(server);

        let mut store = MockStore::new();
        store.expect_read().returning(|| None);
        store.expect_clear().times(0);
        let client =
            GatewayClient::from_settings(&settings, Arc::new(store), Arc::new(LogOnlyListener))
                .unwrap();

        let err = client
            .dispatch(&RequestDescriptor::get("/shipments"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[test]
    fn closures_can_listen_for_invalidation() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let listener = move || {
            counter.fetch_add(1, Ordering::SeqCst);
        };
        listener.session_invalidated();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disposition_parsing_handles_missing_name() {
        assert_eq!(disposition_file_name("inline"), None);
        assert_eq!(
            disposition_file_name("attachment; filename=manifest.xlsx"),
            Some("manifest.xlsx".to_string())
        );
    }
}
