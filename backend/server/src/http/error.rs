use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_types::errors::OrderError;
use serde_json::json;

/// Boundary wrapper converting order flow failures into HTTP responses.
/// Every variant maps to one status and a structured JSON body; gateway
/// diagnostics pass through for observability.
#[derive(Debug)]
pub struct ApiError(error_stack::Report<OrderError>);

impl From<error_stack::Report<OrderError>> for ApiError {
    fn from(report: error_stack::Report<OrderError>) -> Self {
        Self(report)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "order creation failed");

        let (status, body) = match self.0.current_context() {
            OrderError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid amount" }),
            ),
            OrderError::Misconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Paytm not configured" }),
            ),
            OrderError::RequestEncodingFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server error" }),
            ),
            OrderError::GatewayUnreachable { detail } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Failed to reach Paytm", "detail": detail }),
            ),
            OrderError::GatewayProtocolError => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Unexpected response from Paytm" }),
            ),
            OrderError::GatewayRejected { result } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Paytm initiateTransaction failed", "result": result }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
