use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use domain_types::errors::{ApiClientError, CustomResult};
use error_stack::{report, ResultExt};

/// Upper bound on a single gateway round trip. Expiry surfaces as
/// [`ApiClientError::RequestTimeout`] and is mapped to a 502 upstream.
pub const GATEWAY_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw transport-level reply from the gateway, before any protocol
/// interpretation happens.
#[derive(Debug, Clone)]
pub struct RawGatewayResponse {
    pub status_code: u16,
    pub body: Bytes,
}

/// Outbound JSON transport. The body string passed in is transmitted
/// byte-for-byte; callers sign the exact same string beforehand, so this
/// layer must never re-serialize it.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn send_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> CustomResult<RawGatewayResponse, ApiClientError>;
}

/// Production client backed by a shared reqwest connection pool.
pub struct ReqwestGatewayClient {
    client: reqwest::Client,
}

impl ReqwestGatewayClient {
    pub fn new() -> CustomResult<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(GATEWAY_REQUEST_TIMEOUT)
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GatewayClient for ReqwestGatewayClient {
    async fn send_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> CustomResult<RawGatewayResponse, ApiClientError> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                report!(ApiClientError::RequestTimeout)
            } else {
                tracing::error!(?err, "gateway request failed");
                report!(ApiClientError::ConnectionError)
            }
        })?;

        let status_code = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .change_context(ApiClientError::ResponseDecodingFailed)?;

        Ok(RawGatewayResponse { status_code, body })
    }
}
