#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request received by the mock payment API.
#[derive(Debug, Clone)]
pub struct ReceivedPayment {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    received: Arc<Mutex<Vec<ReceivedPayment>>>,
}

/// In-process payment API answering every `POST /payments` with a fixed status.
pub struct MockPaymentApi {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedPayment>>>,
}

impl MockPaymentApi {
    pub async fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            received: received.clone(),
        };
        let app = Router::new()
            .route("/payments", post(record_payment))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, received }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<ReceivedPayment> {
        self.received.lock().unwrap().clone()
    }
}

async fn record_payment(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .received
        .lock()
        .unwrap()
        .push(ReceivedPayment { content_type, body });
    state.status
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
