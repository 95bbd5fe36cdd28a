use std::sync::Arc;

use external_services::http_client::GatewayClient;

use crate::configs::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway_client: Arc<dyn GatewayClient>,
}
