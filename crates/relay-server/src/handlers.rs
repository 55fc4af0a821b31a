use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{ORIGIN, REFERER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::InboundRecord;
use serde_json::{json, Value};

use crate::relay::Relay;

pub const SERVICE_NAME: &str = "lead-relay";

// ═══════════════════════════════════════════════════════════════
//  GET /health
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "service": SERVICE_NAME }))
}

// ═══════════════════════════════════════════════════════════════
//  POST /lead
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn submit_lead(
    State(relay): State<Arc<Relay>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    // Anything other than an object carries no usable fields.
    let inbound = match body {
        Value::Object(map) => map,
        other => {
            tracing::warn!(kind = json_kind(&other), "lead body is not an object");
            InboundRecord::new()
        }
    };

    let keys: Vec<&str> = inbound.keys().map(String::as_str).collect();
    tracing::info!(?keys, "lead received");
    let raw = Value::Object(inbound.clone());
    tracing::debug!(body = %raw, "lead body");

    match relay.submit(&inbound, source_context(&headers)).await {
        Ok(_) => Json(json!({ "ok": true })).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": "delivery failed" })),
        )
            .into_response(),
    }
}

/// `Origin`, else `Referer`: where the form was posted from.
fn source_context(headers: &HeaderMap) -> Option<&str> {
    [ORIGIN, REFERER]
        .iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|v| v.to_str().ok())
        .find(|v| !v.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
