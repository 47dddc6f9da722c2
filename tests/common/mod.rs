use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use reqwest::{Client, Url};
use serde_json::{json, Value};

use portfolio::config::Config;
use portfolio::profile::Profile;
use portfolio::relay::HttpRelay;

/// One request as seen by the fake collection service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct CollectorState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: Arc<AtomicU16>,
    delay_ms: Arc<AtomicU64>,
}

/// Stand-in for the third-party form collection service.
pub struct FakeCollector {
    pub addr: SocketAddr,
    state: CollectorState,
}

impl FakeCollector {
    pub async fn spawn(status: u16) -> Self {
        let state = CollectorState {
            requests: Arc::new(Mutex::new(Vec::new())),
            status: Arc::new(AtomicU16::new(status)),
            delay_ms: Arc::new(AtomicU64::new(0)),
        };

        let app = Router::new()
            .route("/f/contact", post(collect))
            // 307 keeps the method and body on the follow-up request
            .route(
                "/moved/temporary",
                post(|| async { (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, "/f/contact")]) }),
            )
            // A redirect with nowhere to go
            .route("/moved/dangling", post(|| async { StatusCode::FOUND }))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind collector");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Collector failed");
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}/f/contact", self.addr)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn respond_with(&self, status: u16) {
        self.state.status.store(status, Ordering::SeqCst);
    }

    pub fn delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

async fn collect(
    State(state): State<CollectorState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: header("content-type"),
        accept: header("accept"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let status = StatusCode::from_u16(state.status.load(Ordering::SeqCst)).unwrap();
    (status, Json(json!({ "ok": status.is_success() })))
}

/// A running portfolio server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit form-urlencoded fields to the relay endpoint, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-form"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a raw body with an explicit content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, body: impl Into<reqwest::Body>) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-form"))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(relay_url: &str) -> Config {
    Config {
        relay_url: Url::parse(relay_url).expect("relay url"),
        relay_timeout: Duration::from_secs(5),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        trusted_proxies: vec![],
        static_dir: "static".into(),
        profile_path: None,
        log_level: "warn".to_string(),
    }
}

/// Spawn the app relaying to `relay_url`.
pub async fn spawn_app(relay_url: &str) -> TestApp {
    spawn_app_with_config(test_config(relay_url)).await
}

pub async fn spawn_app_with_config(config: Config) -> TestApp {
    let relay = HttpRelay::from_config(&config).expect("Failed to build relay");
    let app = portfolio::build_app(config, Profile::default(), Arc::new(relay));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { addr, client }
}

/// Spawn a collector answering `status` and an app relaying to it.
pub async fn spawn_with_collector(status: u16) -> (TestApp, FakeCollector) {
    let collector = FakeCollector::spawn(status).await;
    let app = spawn_app(&collector.url()).await;
    (app, collector)
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind spare port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/f/contact")
}
