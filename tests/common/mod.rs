//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use problem_gateway::config::{GatewayConfig, UpstreamConfig};
use problem_gateway::http::HttpServer;
use problem_gateway::lifecycle::Shutdown;
use serde_json::Value;
use tokio::net::TcpListener;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "secret";
/// `Basic base64("admin:secret")`
pub const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Requests received by a mock upstream, in arrival order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedCall>>>);

impl Recorder {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedCall {
        self.calls().pop().expect("upstream received no calls")
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    recorder.0.lock().unwrap().push(RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Serve `router` as a fake table API on an ephemeral port.
///
/// Returns the base URL to configure the gateway with and the recorder.
pub async fn start_mock_upstream(router: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), recorder)
}

/// A base URL nothing is listening on.
pub async fn unreachable_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn gateway_config(upstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream = UpstreamConfig {
        base_url: upstream_url.to_string(),
        username: USER.to_string(),
        password: PASSWORD.to_string(),
    };
    config
}

/// Handle to a running gateway; shuts it down on drop.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

/// Mock upstream plus a gateway pointed at it.
pub async fn start_pair(router: Router) -> (Gateway, Recorder) {
    let (upstream_url, recorder) = start_mock_upstream(router).await;
    let gateway = start_gateway(gateway_config(&upstream_url)).await;
    (gateway, recorder)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
