use std::{
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use base64::{engine::general_purpose, Engine};
use domain_types::{
    errors::{CustomResult, OrderError},
    types::{CreateOrderRequest, GatewayConfig},
};
use error_stack::report;
use rand::Rng;
use ring::hmac;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::constants;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytmInitiateTxnRequest {
    pub request_type: String, // "Payment"
    pub mid: String,
    pub website_name: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    pub txn_amount: PaytmAmount,
    pub user_info: PaytmUserInfo,
}

#[derive(Debug, Serialize)]
pub struct PaytmAmount {
    pub value: String, // "10.50"
    pub currency: String, // "INR"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytmUserInfo {
    pub cust_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaytmInitiateTxnResponse {
    #[serde(default)]
    pub head: Option<serde_json::Value>,
    pub body: PaytmInitiateRespBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytmInitiateRespBody {
    // Kept as raw JSON: rejections echo it to the caller verbatim, so
    // unknown statuses and extra fields must survive untouched.
    pub result_info: serde_json::Value,
    pub txn_token: Option<String>,
}

/// Typed view of `resultInfo`, used for classification only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytmResultInfo {
    pub result_status: PaytmResultStatus,
    pub result_code: Option<String>,
    pub result_msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum PaytmResultStatus {
    #[serde(rename = "S")]
    Success,
    #[serde(rename = "F")]
    Failure,
    #[serde(rename = "U", other)]
    Pending,
}

impl PaytmInitiateTxnRequest {
    /// Assembles the wire request from the merchant's order request and the
    /// gateway configuration. Amount normalization happens first so that an
    /// invalid amount never produces an order id.
    pub fn build(
        request: &CreateOrderRequest,
        gateway: &GatewayConfig,
    ) -> CustomResult<Self, OrderError> {
        let value = normalize_amount(&request.amount.raw())?;

        let email = request
            .customer_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .map(str::to_owned);
        let cust_id = request
            .customer_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(email.as_deref())
            .unwrap_or(constants::DEFAULT_CUSTOMER_ID)
            .to_owned();

        Ok(Self {
            request_type: constants::REQUEST_TYPE_PAYMENT.to_owned(),
            mid: gateway.merchant_id.clone(),
            website_name: gateway.website_label().to_owned(),
            order_id: generate_order_id(),
            callback_url: gateway.callback_url(),
            txn_amount: PaytmAmount {
                value,
                currency: constants::CURRENCY_INR.to_owned(),
            },
            user_info: PaytmUserInfo { cust_id, email },
        })
    }
}

/// Parses the merchant-supplied amount, rejects non-positive values and
/// renders the canonical two-decimal string the gateway expects.
pub fn normalize_amount(raw: &str) -> CustomResult<String, OrderError> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| report!(OrderError::InvalidAmount))?;
    if amount <= Decimal::ZERO {
        return Err(report!(OrderError::InvalidAmount));
    }
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{rounded:.2}"))
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// ORD_{unixMillis}_{seq}{random}. The monotonic sequence makes ids unique
/// within the process even when many are minted in the same millisecond;
/// the random tail keeps them distinct across restarts.
pub fn generate_order_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let seq = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let entropy = rand::thread_rng().gen_range(0..constants::ORDER_ID_SUFFIX_BOUND);
    format!("{}_{millis}_{seq}{entropy:06}", constants::ORDER_ID_PREFIX)
}

/// HMAC-SHA256 over the exact serialized payload, base64-encoded.
pub fn sign_payload(payload: &str, merchant_key: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, merchant_key.as_bytes());
    let tag = hmac::sign(&key, payload.as_bytes());
    general_purpose::STANDARD.encode(tag.as_ref())
}
