use axum::{extract::State, Json};
use connector_integration::connectors::paytm;
use domain_types::types::{CreateOrderRequest, OrderCreated};

use crate::http::{error::ApiError, state::AppState};

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<OrderCreated>, ApiError> {
    let order = paytm::create_order(
        &state.config.gateway,
        state.gateway_client.as_ref(),
        &payload,
    )
    .await?;

    tracing::info!(order_id = %order.order_id, "order initiated");
    Ok(Json(order))
}
