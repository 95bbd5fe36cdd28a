/// Type alias for Result with error_stack::Report attached, matching the
/// convention used across the workspace.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures of the order initiation flow. Each variant maps to exactly one
/// HTTP status at the server boundary.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Paytm not configured")]
    Misconfigured,
    #[error("Failed to encode the gateway request")]
    RequestEncodingFailed,
    #[error("Failed to reach Paytm")]
    GatewayUnreachable { detail: String },
    #[error("Paytm returned a response that could not be parsed")]
    GatewayProtocolError,
    #[error("Paytm initiateTransaction failed")]
    GatewayRejected { result: serde_json::Value },
}

/// Transport-level failures of the outbound HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("Failed to construct the http client")]
    ClientConstructionFailed,
    #[error("Request to the gateway timed out")]
    RequestTimeout,
    #[error("Failed to establish a connection with the gateway")]
    ConnectionError,
    #[error("Failed to read the gateway response body")]
    ResponseDecodingFailed,
}
