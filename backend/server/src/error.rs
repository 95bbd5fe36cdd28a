#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error while constructing the gateway http client")]
    GatewayClientError,
}
