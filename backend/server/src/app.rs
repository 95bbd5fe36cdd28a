use std::sync::Arc;

use external_services::http_client::ReqwestGatewayClient;

use crate::{
    configs::Config,
    error::ConfigurationError,
    http::{create_router, state::AppState},
};

pub async fn server_builder(config: Config) -> Result<(), ConfigurationError> {
    let listener = config.server.tcp_listener().await?;

    let gateway_client = ReqwestGatewayClient::new().map_err(|err| {
        tracing::error!(?err, "failed to construct the gateway http client");
        ConfigurationError::GatewayClientError
    })?;

    let state = AppState {
        config: Arc::new(config),
        gateway_client: Arc::new(gateway_client),
    };
    let router = create_router(state);

    tracing::info!("order server started");
    axum::serve(listener, router).await?;

    Ok(())
}
