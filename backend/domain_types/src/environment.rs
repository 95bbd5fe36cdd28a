use serde::{Deserialize, Serialize};

/// Deployment environment of the merchant account. Every gateway-facing
/// value (host, website label) is resolved through [`Environment::profile`]
/// so that staging and production settings can never be mixed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Environment {
    Stage,
    Prod,
}

/// Gateway-side settings that belong to a single environment. Resolved as
/// one record, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayProfile {
    pub base_url: &'static str,
    pub website_label: &'static str,
}

impl Environment {
    pub const fn profile(self) -> GatewayProfile {
        match self {
            Self::Stage => GatewayProfile {
                base_url: "https://securegw-stage.paytm.in",
                website_label: "WEBSTAGING",
            },
            Self::Prod => GatewayProfile {
                base_url: "https://securegw.paytm.in",
                website_label: "DEFAULT",
            },
        }
    }
}
