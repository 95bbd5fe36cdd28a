use axum::{extract::State, Json};
use serde_json::json;

use crate::http::state::AppState;

pub async fn health(State(_state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "order-server"
    }))
}
