use std::collections::HashSet;

use async_trait::async_trait;
use bytes::Bytes;
use domain_types::{
    environment::Environment,
    errors::{ApiClientError, CustomResult, OrderError},
    types::{AmountInput, CreateOrderRequest, GatewayConfig},
};
use external_services::http_client::{GatewayClient, RawGatewayResponse};
use masking::Secret;

use super::*;

fn gateway_config(environment: Environment) -> GatewayConfig {
    GatewayConfig {
        environment,
        merchant_id: "MID_test_1".to_owned(),
        merchant_key: Secret::new("0123456789abcdef".to_owned()),
        website_override: None,
        callback_base_url: None,
        allowed_origin: None,
    }
}

fn order_request(amount: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        amount: AmountInput::Text(amount.to_owned()),
        plan_key: None,
        customer_id: Some("uid1".to_owned()),
        customer_email: None,
    }
}

struct NeverCalledClient;

#[async_trait]
impl GatewayClient for NeverCalledClient {
    async fn send_json(
        &self,
        _url: &str,
        _headers: &[(String, String)],
        _body: String,
    ) -> CustomResult<RawGatewayResponse, ApiClientError> {
        panic!("no outbound call expected");
    }
}

#[test]
fn test_amount_normalization() {
    assert_eq!(transformers::normalize_amount("999").unwrap(), "999.00");
    assert_eq!(transformers::normalize_amount("10.5").unwrap(), "10.50");
    assert_eq!(transformers::normalize_amount("10.505").unwrap(), "10.51");
    assert_eq!(transformers::normalize_amount("0.01").unwrap(), "0.01");
}

#[test]
fn test_invalid_amounts_are_rejected() {
    for raw in ["abc", "", "0", "0.00", "-5", "1,000"] {
        let err = transformers::normalize_amount(raw).unwrap_err();
        assert_eq!(err.current_context(), &OrderError::InvalidAmount, "{raw}");
    }
}

#[test]
fn test_order_id_format() {
    let order_id = transformers::generate_order_id();
    let parts: Vec<&str> = order_id.split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "ORD");
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_order_ids_do_not_collide() {
    let ids: HashSet<String> = (0..10_000)
        .map(|_| transformers::generate_order_id())
        .collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn test_signature_is_deterministic() {
    let first = transformers::sign_payload(r#"{"a":1}"#, "key");
    let second = transformers::sign_payload(r#"{"a":1}"#, "key");
    assert_eq!(first, second);
    assert_ne!(first, transformers::sign_payload(r#"{"a":2}"#, "key"));
    assert_ne!(first, transformers::sign_payload(r#"{"a":1}"#, "other"));
}

#[test]
fn test_signature_known_vector() {
    // RFC 4231 test case 2, base64-encoded.
    assert_eq!(
        transformers::sign_payload("what do ya want for nothing?", "Jefe"),
        "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM="
    );
}

#[test]
fn test_build_embeds_normalized_amount_and_labels() {
    let gateway = gateway_config(Environment::Stage);
    let built =
        PaytmInitiateTxnRequest::build(&order_request("10.5"), &gateway).unwrap();
    assert_eq!(built.request_type, "Payment");
    assert_eq!(built.mid, "MID_test_1");
    assert_eq!(built.website_name, "WEBSTAGING");
    assert_eq!(built.txn_amount.value, "10.50");
    assert_eq!(built.txn_amount.currency, "INR");
    assert_eq!(built.user_info.cust_id, "uid1");
}

#[test]
fn test_identity_falls_back_to_email_then_guest() {
    let gateway = gateway_config(Environment::Stage);

    let mut request = order_request("10");
    request.customer_id = None;
    request.customer_email = Some("a@b.test".to_owned());
    let built = PaytmInitiateTxnRequest::build(&request, &gateway).unwrap();
    assert_eq!(built.user_info.cust_id, "a@b.test");
    assert_eq!(built.user_info.email.as_deref(), Some("a@b.test"));

    request.customer_email = None;
    let built = PaytmInitiateTxnRequest::build(&request, &gateway).unwrap();
    assert_eq!(built.user_info.cust_id, "guest");
}

#[test]
fn test_optional_fields_are_omitted_from_the_wire() {
    let gateway = gateway_config(Environment::Stage);
    let built =
        PaytmInitiateTxnRequest::build(&order_request("10"), &gateway).unwrap();
    let wire = serde_json::to_value(&built).unwrap();
    assert!(wire.get("callbackUrl").is_none());
    assert!(wire["userInfo"].get("email").is_none());
}

#[test]
fn test_callback_url_is_included_when_configured() {
    let mut gateway = gateway_config(Environment::Stage);
    gateway.callback_base_url = Some("https://merchant.example/".to_owned());
    let built =
        PaytmInitiateTxnRequest::build(&order_request("10"), &gateway).unwrap();
    assert_eq!(
        built.callback_url.as_deref(),
        Some("https://merchant.example/api/paytm/callback")
    );
}

#[test]
fn test_initiate_url_is_environment_paired() {
    let stage = gateway_config(Environment::Stage);
    assert_eq!(
        initiate_transaction_url(&stage, "ORD_1_2"),
        "https://securegw-stage.paytm.in/theia/api/v1/initiateTransaction?mid=MID_test_1&orderId=ORD_1_2"
    );

    let prod = gateway_config(Environment::Prod);
    assert!(!initiate_transaction_url(&prod, "ORD_1_2").contains("stage"));
}

fn raw_response(status_code: u16, body: &str) -> RawGatewayResponse {
    RawGatewayResponse {
        status_code,
        body: Bytes::copy_from_slice(body.as_bytes()),
    }
}

fn built_request(gateway: &GatewayConfig) -> PaytmInitiateTxnRequest {
    PaytmInitiateTxnRequest::build(&order_request("999"), gateway).unwrap()
}

#[test]
fn test_accepted_response_yields_order() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    let response = raw_response(
        200,
        r#"{"head":{},"body":{"resultInfo":{"resultStatus":"S","resultCode":"0000","resultMsg":"Success"},"txnToken":"tok_123"}}"#,
    );

    let order = validate_response(&txn_request, &gateway, response).unwrap();
    assert_eq!(order.order_id, txn_request.order_id);
    assert_eq!(order.txn_token, "tok_123");
    assert_eq!(order.amount, "999.00");
    assert_eq!(order.environment, Environment::Stage);
    assert_eq!(order.mid, "MID_test_1");
}

#[test]
fn test_non_2xx_is_unreachable_with_raw_body() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    let response = raw_response(503, "<html>gateway down</html>");

    let err = validate_response(&txn_request, &gateway, response).unwrap_err();
    match err.current_context() {
        OrderError::GatewayUnreachable { detail } => {
            assert_eq!(detail, "<html>gateway down</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unparseable_2xx_is_a_protocol_error() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    let response = raw_response(200, "not json");

    let err = validate_response(&txn_request, &gateway, response).unwrap_err();
    assert_eq!(err.current_context(), &OrderError::GatewayProtocolError);
}

#[test]
fn test_failure_status_is_rejected_with_result_info() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    let response = raw_response(
        200,
        r#"{"body":{"resultInfo":{"resultStatus":"F","resultCode":"00_000","resultMsg":"Request failed"}}}"#,
    );

    let err = validate_response(&txn_request, &gateway, response).unwrap_err();
    match err.current_context() {
        OrderError::GatewayRejected { result } => {
            assert_eq!(result["resultCode"], "00_000");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_success_without_token_is_rejected() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    let response = raw_response(
        200,
        r#"{"body":{"resultInfo":{"resultStatus":"S","resultCode":"0000","resultMsg":"Success"}}}"#,
    );

    let err = validate_response(&txn_request, &gateway, response).unwrap_err();
    assert!(matches!(
        err.current_context(),
        OrderError::GatewayRejected { .. }
    ));
}

#[test]
fn test_unknown_result_status_classifies_as_pending() {
    let info: PaytmResultInfo = serde_json::from_str(
        r#"{"resultStatus":"X","resultCode":null,"resultMsg":null}"#,
    )
    .unwrap();
    assert_eq!(info.result_status, PaytmResultStatus::Pending);
}

#[test]
fn test_rejection_echoes_result_info_verbatim() {
    let gateway = gateway_config(Environment::Stage);
    let txn_request = built_request(&gateway);
    // Unknown status tag and an extra field; both must reach the caller
    // exactly as the gateway sent them.
    let response = raw_response(
        200,
        r#"{"body":{"resultInfo":{"resultStatus":"PENDING","resultCode":"0002","resultMsg":"In progress","retry":true}}}"#,
    );

    let err = validate_response(&txn_request, &gateway, response).unwrap_err();
    match err.current_context() {
        OrderError::GatewayRejected { result } => {
            assert_eq!(result["resultStatus"], "PENDING");
            assert_eq!(result["resultCode"], "0002");
            assert_eq!(result["retry"], true);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_misconfigured_gateway_makes_no_outbound_call() {
    let mut gateway = gateway_config(Environment::Stage);
    gateway.merchant_id = String::new();

    let err = create_order(&gateway, &NeverCalledClient, &order_request("10"))
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &OrderError::Misconfigured);
}

#[tokio::test]
async fn test_invalid_amount_makes_no_outbound_call() {
    let gateway = gateway_config(Environment::Stage);

    let err = create_order(&gateway, &NeverCalledClient, &order_request("abc"))
        .await
        .unwrap_err();
    assert_eq!(err.current_context(), &OrderError::InvalidAmount);
}
