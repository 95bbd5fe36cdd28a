use axum::{http::Method, Json};
use bytes::Bytes;
use serde_json::json;

/// Passive sink for gateway payment callbacks: log the payload and
/// acknowledge. No signature verification, no state changes; any method
/// and any body receive the same trivial reply.
pub async fn callback(method: Method, body: Bytes) -> Json<serde_json::Value> {
    tracing::info!(
        method = %method,
        payload = %String::from_utf8_lossy(&body),
        "gateway callback received"
    );
    Json(json!({ "ok": true }))
}
