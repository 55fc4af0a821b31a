//! Fake Telegram Bot API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every `POST` is recorded (path + JSON body) and answered with
//! the currently configured reply, `200 {"ok":true,...}` by default.
//!
//! Point a [`relay_delivery::TelegramClient`] at [`FakeTelegramApi::base_url`]
//! via `TelegramConfig::api_base`.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeTelegramApi::start().await.unwrap();
//! api.reply_with(500, "gateway down").await;
//! // ... deliver ...
//! assert_eq!(api.call_count().await, 1);
//! ```

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request the fake received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Path without the leading slash, e.g. `bot123:abc/sendMessage`.
    pub path: String,
    /// Request body; `Value::Null` if it was not JSON.
    pub body: serde_json::Value,
}

struct ApiState {
    calls: Vec<RecordedCall>,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            status: 200,
            body: r#"{"ok":true,"result":{"message_id":1}}"#.to_string(),
            delay: None,
        }
    }
}

/// Handle to the running fake Telegram API server.
pub struct FakeTelegramApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeTelegramApi {
    /// Start the fake server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/{*path}", post(record_call))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer every following call with `status` and a raw `body`.
    pub async fn reply_with(&self, status: u16, body: &str) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.to_string();
    }

    /// Hold every following reply for `delay`.
    pub async fn delay_replies(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Poll until at least `n` calls arrived or `timeout` elapsed.
    pub async fn wait_for_calls(&self, n: usize, timeout: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let count = self.call_count().await;
            if count >= n || tokio::time::Instant::now() >= deadline {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn record_call(
    Path(path): Path<String>,
    State(state): State<Arc<Mutex<ApiState>>>,
    body: String,
) -> impl IntoResponse {
    let (status, reply, delay) = {
        let mut state = state.lock().await;
        state.calls.push(RecordedCall {
            path,
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        });
        (state.status, state.body.clone(), state.delay)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}
