use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.gateway.allowed_origin.as_deref());

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/paytm/callback", any(handlers::callback::callback))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS by default, restricted to a single origin when one is
/// configured. Preflight OPTIONS requests are answered here and never reach
/// the handlers.
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}
