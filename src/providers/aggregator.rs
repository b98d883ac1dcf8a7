//! Signature-aggregation service client.

use alloy_primitives::{hex, FixedBytes};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, trace, Instrument};
use url::Url;

use crate::error::{Result, TeleporterError};
use crate::protocol::{SignatureResponse, UnsignedWarpMessage};
use crate::spans;
use crate::traits::SignatureAggregator;

/// Path of the aggregation endpoint relative to the service base URL.
pub const SIGNATURE_PATH: &str = "/v1/signatures";

/// Default quorum percentage of validator stake required for a signature.
pub const DEFAULT_QUORUM_PERCENTAGE: u8 = 67;

/// Production signature aggregator using the standalone aggregation service.
///
/// The service collects BLS signature shares from the source subnet's
/// validators and returns the signed Warp message once quorum stake has
/// signed. The relay client polls it the same way it would poll any
/// asynchronous proof service.
///
/// # Examples
///
/// ```rust,no_run
/// use teleporter_rs::providers::AggregatorClient;
/// use teleporter_rs::{SignatureAggregator, UnsignedWarpMessage};
/// use alloy_primitives::{Bytes, FixedBytes};
///
/// # async fn example() -> Result<(), teleporter_rs::TeleporterError> {
/// let aggregator = AggregatorClient::new("http://localhost:8080");
/// let message = UnsignedWarpMessage::new(1337, FixedBytes::ZERO, Bytes::new());
/// let response = aggregator.get_signature(&message).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    base_url: String,
    client: Client,
    signing_subnet_id: Option<FixedBytes<32>>,
    quorum_percentage: u8,
}

#[derive(Debug, Serialize)]
struct SignatureRequest {
    /// Hex-encoded unsigned Warp message bytes.
    message: String,
    #[serde(rename = "signing-subnet-id", skip_serializing_if = "Option::is_none")]
    signing_subnet_id: Option<String>,
    #[serde(rename = "quorum-percentage")]
    quorum_percentage: u8,
}

impl AggregatorClient {
    /// Creates a new aggregator client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the aggregation service
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            signing_subnet_id: None,
            quorum_percentage: DEFAULT_QUORUM_PERCENTAGE,
        }
    }

    /// Pins the subnet whose validator set must sign the message.
    ///
    /// Without this the service resolves the signing subnet from the
    /// message's source chain id.
    pub fn with_signing_subnet(mut self, subnet_id: FixedBytes<32>) -> Self {
        self.signing_subnet_id = Some(subnet_id);
        self
    }

    /// Overrides the required quorum percentage.
    pub fn with_quorum_percentage(mut self, percentage: u8) -> Self {
        self.quorum_percentage = percentage;
        self
    }

    /// Constructs the full endpoint URL.
    fn signature_url(&self) -> Result<Url> {
        let url = format!("{}{SIGNATURE_PATH}", self.base_url);
        Url::parse(&url).map_err(|e| TeleporterError::InvalidUrl {
            reason: format!("{url}: {e}"),
        })
    }
}

#[async_trait]
impl SignatureAggregator for AggregatorClient {
    #[instrument(skip(self, message), fields(message_id = %hex::encode(message.id())))]
    async fn get_signature(&self, message: &UnsignedWarpMessage) -> Result<SignatureResponse> {
        let url = self.signature_url()?;
        trace!(url = %url, "Requesting aggregated signature");

        let request = SignatureRequest {
            message: format!("0x{}", hex::encode(message.encode())),
            signing_subnet_id: self
                .signing_subnet_id
                .map(|id| format!("0x{}", hex::encode(id))),
            quorum_percentage: self.quorum_percentage,
        };

        let request_span = spans::get_signature(&url);
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .instrument(request_span)
            .await
            .map_err(TeleporterError::Network)?;

        let status_code = response.status();
        trace!(status_code = %status_code, "Received response from aggregator");

        {
            let process_span = spans::process_signature_response(status_code.as_u16());
            let _guard = process_span.enter();

            // Rate limiting - honor the Retry-After header if present
            if status_code == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(300);

                debug!(retry_after_seconds = retry_after, "Rate limit exceeded");
                return Err(TeleporterError::RateLimitExceeded {
                    retry_after_seconds: retry_after,
                });
            }

            // 404 - the service has not seen the message yet (should be retried)
            if status_code == reqwest::StatusCode::NOT_FOUND {
                debug!("Signature not found");
                return Err(TeleporterError::SignatureNotFound);
            }

            response.error_for_status_ref()?;
        }

        let json_value = response
            .json::<serde_json::Value>()
            .await
            .map_err(TeleporterError::Network)?;

        let signature: SignatureResponse = serde_json::from_value(json_value)?;
        debug!(status = ?signature.status, "Signature response parsed");

        Ok(signature)
    }
}
