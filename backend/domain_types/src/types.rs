use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{environment::Environment, errors::OrderError};

/// Path under the merchant's own host where the gateway posts payment
/// callbacks. Appended to `callback_base_url` when one is configured.
pub const CALLBACK_PATH: &str = "/api/paytm/callback";

/// Amount as received from the caller. The original clients send either a
/// JSON number or a string, so both are accepted and validated later.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    pub fn raw(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_string(),
        }
    }
}

/// Inbound order creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: AmountInput,
    /// Accepted for compatibility with existing clients, unused by the core.
    #[serde(default)]
    pub plan_key: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Successful order initiation, as returned to the caller. `txn_token` is
/// the short-lived credential consumed by the checkout widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub order_id: String,
    pub txn_token: String,
    pub amount: String,
    pub environment: Environment,
    pub mid: String,
}

/// Merchant-side gateway settings. The merchant key is the shared signing
/// secret and is never transmitted or logged.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub merchant_id: String,
    pub merchant_key: Secret<String>,
    #[serde(default)]
    pub website_override: Option<String>,
    #[serde(default)]
    pub callback_base_url: Option<String>,
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl GatewayConfig {
    /// Credentials check performed before any request is built, mirroring
    /// the "Paytm not configured" refusal of the original service.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.merchant_id.trim().is_empty() || self.merchant_key.peek().trim().is_empty() {
            return Err(OrderError::Misconfigured);
        }
        Ok(())
    }

    /// Website label for the resolved environment, unless the merchant
    /// account uses a custom one.
    pub fn website_label(&self) -> &str {
        self.website_override
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(self.environment.profile().website_label)
    }

    pub fn callback_url(&self) -> Option<String> {
        self.callback_base_url
            .as_deref()
            .filter(|base| !base.trim().is_empty())
            .map(|base| format!("{}{}", base.trim_end_matches('/'), CALLBACK_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment) -> GatewayConfig {
        GatewayConfig {
            environment,
            merchant_id: "MID_test_1".to_string(),
            merchant_key: Secret::new("sign_key".to_string()),
            website_override: None,
            callback_base_url: None,
            allowed_origin: None,
        }
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut cfg = config(Environment::Stage);
        assert!(cfg.validate().is_ok());

        cfg.merchant_id = "  ".to_string();
        assert!(matches!(cfg.validate(), Err(OrderError::Misconfigured)));

        cfg.merchant_id = "MID_test_1".to_string();
        cfg.merchant_key = Secret::new(String::new());
        assert!(matches!(cfg.validate(), Err(OrderError::Misconfigured)));
    }

    #[test]
    fn website_label_follows_environment_unless_overridden() {
        assert_eq!(config(Environment::Stage).website_label(), "WEBSTAGING");
        assert_eq!(config(Environment::Prod).website_label(), "DEFAULT");

        let mut cfg = config(Environment::Stage);
        cfg.website_override = Some("MYSITE".to_string());
        assert_eq!(cfg.website_label(), "MYSITE");
    }

    #[test]
    fn callback_url_joins_base_without_double_slash() {
        let mut cfg = config(Environment::Stage);
        assert_eq!(cfg.callback_url(), None);

        cfg.callback_base_url = Some("https://merchant.example.com/".to_string());
        assert_eq!(
            cfg.callback_url().as_deref(),
            Some("https://merchant.example.com/api/paytm/callback")
        );
    }

    #[test]
    fn amount_input_accepts_number_and_string() {
        let from_number: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": 999, "customerId": "uid1"}"#).unwrap();
        assert_eq!(from_number.amount.raw(), "999");

        let from_string: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": " 10.5 ", "planKey": "premium"}"#).unwrap();
        assert_eq!(from_string.amount.raw(), "10.5");
        assert_eq!(from_string.plan_key.as_deref(), Some("premium"));
    }
}
