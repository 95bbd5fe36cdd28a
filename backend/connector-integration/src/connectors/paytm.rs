pub mod constants;
pub mod transformers;

#[cfg(test)]
mod test;

use domain_types::{
    errors::{CustomResult, OrderError},
    types::{CreateOrderRequest, GatewayConfig, OrderCreated},
};
use error_stack::{report, Report, ResultExt};
use external_services::http_client::{GatewayClient, RawGatewayResponse};
use masking::PeekInterface;

use self::transformers::{
    PaytmInitiateRespBody, PaytmInitiateTxnRequest, PaytmInitiateTxnResponse, PaytmResultInfo,
    PaytmResultStatus,
};

/// Initiate-transaction endpoint, keyed strictly by the configured
/// environment. Merchant id and order id travel as query parameters.
pub fn initiate_transaction_url(gateway: &GatewayConfig, order_id: &str) -> String {
    format!(
        "{}/{}?mid={}&orderId={}",
        gateway.environment.profile().base_url,
        constants::INITIATE_TXN_PATH,
        gateway.merchant_id,
        order_id
    )
}

/// Runs the full order initiation protocol: build the transaction request,
/// sign its serialized form, submit it, and validate the gateway's reply
/// into an [`OrderCreated`]. One attempt, no retries.
pub async fn create_order(
    gateway: &GatewayConfig,
    client: &dyn GatewayClient,
    request: &CreateOrderRequest,
) -> CustomResult<OrderCreated, OrderError> {
    gateway.validate().map_err(Report::new)?;

    let txn_request = PaytmInitiateTxnRequest::build(request, gateway)?;
    // Serialize exactly once. This string is both signed and transmitted;
    // re-serializing would invalidate the signature at the gateway.
    let payload = serde_json::to_string(&txn_request)
        .change_context(OrderError::RequestEncodingFailed)?;
    let signature = transformers::sign_payload(&payload, gateway.merchant_key.peek());

    let url = initiate_transaction_url(gateway, &txn_request.order_id);
    let headers = [(constants::SIGNATURE_HEADER.to_string(), signature)];

    tracing::info!(
        order_id = %txn_request.order_id,
        environment = %gateway.environment,
        "initiating gateway transaction"
    );

    let response = client
        .send_json(&url, &headers, payload)
        .await
        .map_err(|err| {
            let detail = err.current_context().to_string();
            err.change_context(OrderError::GatewayUnreachable { detail })
        })?;

    validate_response(&txn_request, gateway, response)
}

/// Response validation: non-2xx is unreachable, unparseable 2xx is a
/// protocol error, anything but Success-with-token is a rejection carrying
/// the gateway's diagnostic payload verbatim.
fn validate_response(
    txn_request: &PaytmInitiateTxnRequest,
    gateway: &GatewayConfig,
    response: RawGatewayResponse,
) -> CustomResult<OrderCreated, OrderError> {
    if !(200..300).contains(&response.status_code) {
        return Err(report!(OrderError::GatewayUnreachable {
            detail: String::from_utf8_lossy(&response.body).into_owned(),
        }));
    }

    let parsed: PaytmInitiateTxnResponse = serde_json::from_slice(&response.body)
        .change_context(OrderError::GatewayProtocolError)?;
    let PaytmInitiateRespBody {
        result_info,
        txn_token,
    } = parsed.body;
    let classified: PaytmResultInfo = serde_json::from_value(result_info.clone())
        .change_context(OrderError::GatewayProtocolError)?;

    match (&classified.result_status, txn_token) {
        (PaytmResultStatus::Success, Some(txn_token)) => {
            tracing::info!(order_id = %txn_request.order_id, "gateway accepted the transaction");
            Ok(OrderCreated {
                order_id: txn_request.order_id.clone(),
                txn_token,
                amount: txn_request.txn_amount.value.clone(),
                environment: gateway.environment,
                mid: gateway.merchant_id.clone(),
            })
        }
        _ => {
            tracing::warn!(
                order_id = %txn_request.order_id,
                result_code = ?classified.result_code,
                "gateway rejected the transaction"
            );
            Err(report!(OrderError::GatewayRejected {
                result: result_info,
            }))
        }
    }
}
