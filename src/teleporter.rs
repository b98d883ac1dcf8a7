//! Teleporter relay client with trait-based abstraction.

mod config;

pub use config::PollingConfig;

use crate::contracts::teleporter_messenger::TeleporterMessenger::SendCrossChainMessage;
use crate::contracts::warp_messenger::WarpMessenger::SendWarpMessage;
use crate::error::{Result, TeleporterError};
use crate::protocol::{
    warp_access_list, SignatureResponse, SignatureStatus, SignedMessageBytes, SignedWarpMessage,
    UnsignedWarpMessage,
};
use crate::receipt_adapter::ReceiptAdapter;
use crate::spans;
use crate::subnet::{TELEPORTER_MESSENGER_ADDRESS, WARP_PRECOMPILE_ADDRESS};
use crate::traits::{BlockchainProvider, Clock, SignatureAggregator};
use alloy_network::Network;
use alloy_primitives::{hex, Address, FixedBytes, TxHash};
use alloy_rpc_types::{AccessList, Log};
use alloy_sol_types::SolEvent;
use bon::Builder;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, Level};

/// Teleporter relay client with trait-based abstraction.
///
/// This struct provides the off-chain half of relaying a Teleporter message
/// between two subnets: extracting the send event and its Warp message from
/// the source chain, obtaining an aggregated BLS signature over that message,
/// and preparing delivery on the destination chain. It is generic over:
///
/// - `SN`: Source network type
/// - `DN`: Destination network type
/// - `SP`: Source blockchain provider
/// - `DP`: Destination blockchain provider
/// - `A`: Signature aggregator
/// - `C`: Clock for time operations
///
/// This design enables comprehensive testing by allowing fake implementations
/// of all external I/O operations.
///
/// # Examples
///
/// ## Production Usage
///
/// ```rust,no_run
/// # use teleporter_rs::{Teleporter, TeleporterError, SubnetReceiptAdapter};
/// # use teleporter_rs::providers::{AggregatorClient, AlloyProvider, TokioClock};
/// # use alloy_network::Ethereum;
/// # use alloy_provider::ProviderBuilder;
/// # async fn example() -> Result<(), TeleporterError> {
/// let subnet_a = ProviderBuilder::new().connect("http://localhost:9650/ext/bc/A/rpc").await?;
/// let subnet_b = ProviderBuilder::new().connect("http://localhost:9650/ext/bc/B/rpc").await?;
///
/// let relay = Teleporter::builder()
///     .source_blockchain_id([1u8; 32].into())
///     .destination_blockchain_id([2u8; 32].into())
///     .source_provider(AlloyProvider::new(subnet_a))
///     .destination_provider(AlloyProvider::new(subnet_b))
///     .signature_aggregator(AggregatorClient::new("http://localhost:8080"))
///     .clock(TokioClock::new())
///     .receipt_adapter(SubnetReceiptAdapter)
///     .build();
/// # Ok(())
/// # }
/// ```
///
/// ## Testing with Fakes
///
/// ```rust,ignore
/// let fake_blockchain = FakeBlockchainProvider::new();
/// let fake_aggregator = FakeAggregator::new();
/// let fake_clock = FakeClock::new();
///
/// let relay = Teleporter::builder()
///     .source_blockchain_id([1u8; 32].into())
///     .destination_blockchain_id([2u8; 32].into())
///     .source_provider(fake_blockchain.clone())
///     .destination_provider(fake_blockchain)
///     .signature_aggregator(fake_aggregator)
///     .clock(fake_clock)
///     .receipt_adapter(SubnetReceiptAdapter)
///     .build();
/// ```
#[derive(Builder, Clone, Debug)]
pub struct Teleporter<SN, DN, SP, DP, A, C, RA>
where
    SN: Network,
    DN: Network,
    SP: BlockchainProvider<SN>,
    DP: BlockchainProvider<DN>,
    A: SignatureAggregator,
    C: Clock,
    RA: ReceiptAdapter<SN>,
{
    source_provider: SP,
    destination_provider: DP,
    signature_aggregator: A,
    clock: C,
    receipt_adapter: RA,
    source_blockchain_id: FixedBytes<32>,
    destination_blockchain_id: FixedBytes<32>,
    #[builder(default = TELEPORTER_MESSENGER_ADDRESS)]
    messenger_address: Address,
    #[builder(skip)]
    _source_network: std::marker::PhantomData<SN>,
    #[builder(skip)]
    _destination_network: std::marker::PhantomData<DN>,
}

impl<SN, DN, SP, DP, A, C, RA> Teleporter<SN, DN, SP, DP, A, C, RA>
where
    SN: Network,
    DN: Network,
    SP: BlockchainProvider<SN>,
    DP: BlockchainProvider<DN>,
    A: SignatureAggregator,
    C: Clock,
    RA: ReceiptAdapter<SN>,
{
    /// Returns the source blockchain id
    pub fn source_blockchain_id(&self) -> &FixedBytes<32> {
        &self.source_blockchain_id
    }

    /// Returns the destination blockchain id
    pub fn destination_blockchain_id(&self) -> &FixedBytes<32> {
        &self.destination_blockchain_id
    }

    /// Returns the source provider
    pub fn source_provider(&self) -> &SP {
        &self.source_provider
    }

    /// Returns the destination provider
    pub fn destination_provider(&self) -> &DP {
        &self.destination_provider
    }

    /// Returns the signature aggregator
    pub fn signature_aggregator(&self) -> &A {
        &self.signature_aggregator
    }

    /// Returns the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the TeleporterMessenger contract address on both chains.
    ///
    /// The messenger deploys to the same address on every chain through a
    /// Nick's-method transaction, so one address covers source and
    /// destination.
    pub fn messenger_address(&self) -> &Address {
        &self.messenger_address
    }

    /// Gets the `SendCrossChainMessage` event data from a Teleporter send
    /// transaction.
    ///
    /// The decoded event carries the message id and the full Teleporter
    /// message, which a caller needs to later check delivery with
    /// `messageReceived` or to build a `retrySendCrossChainMessage`
    /// transaction.
    ///
    /// # Arguments
    ///
    /// * `tx_hash`: The hash of the transaction to get the event for
    #[instrument(skip(self), level = Level::INFO, fields(
        source_blockchain_id = %self.source_blockchain_id,
        destination_blockchain_id = %self.destination_blockchain_id,
    ))]
    pub async fn get_send_cross_chain_message_event(
        &self,
        tx_hash: TxHash,
    ) -> Result<SendCrossChainMessage> {
        let tx_receipt = self
            .source_provider
            .get_transaction_receipt(tx_hash)
            .await?;

        if let Some(tx_receipt) = tx_receipt {
            let log = self.find_log(
                &tx_receipt,
                tx_hash,
                self.messenger_address,
                SendCrossChainMessage::SIGNATURE_HASH,
                "SendCrossChainMessage",
            )?;

            let event = SendCrossChainMessage::decode_log_data(log.data())?;

            info!(
                tx_hash = %tx_hash,
                message_id = %event.messageID,
                destination_blockchain_id = %event.destinationChainID,
                event = "send_cross_chain_message_event_extracted"
            );

            Ok(event)
        } else {
            error!(
                tx_hash = %tx_hash,
                source_blockchain_id = %self.source_blockchain_id,
                event = "transaction_not_found"
            );
            Err(TeleporterError::TransactionFailed {
                reason: "Transaction not found".to_string(),
            })
        }
    }

    /// Gets the unsigned Warp message emitted by a Teleporter send
    /// transaction.
    ///
    /// The messenger forwards its serialized message through the Warp
    /// precompile, which logs a `SendWarpMessage` event whose payload is the
    /// unsigned Warp message the validators will sign.
    ///
    /// # Arguments
    ///
    /// * `tx_hash`: The hash of the transaction to get the Warp message for
    #[instrument(skip(self), level = Level::INFO, fields(
        source_blockchain_id = %self.source_blockchain_id,
    ))]
    pub async fn get_unsigned_warp_message(&self, tx_hash: TxHash) -> Result<UnsignedWarpMessage> {
        let tx_receipt = self
            .source_provider
            .get_transaction_receipt(tx_hash)
            .await?;

        if let Some(tx_receipt) = tx_receipt {
            let log = self.find_log(
                &tx_receipt,
                tx_hash,
                WARP_PRECOMPILE_ADDRESS,
                SendWarpMessage::SIGNATURE_HASH,
                "SendWarpMessage",
            )?;

            let event = SendWarpMessage::decode_log_data(log.data())?;
            let unsigned = UnsignedWarpMessage::decode(&event.message)?;

            info!(
                tx_hash = %tx_hash,
                warp_message_id = %hex::encode(unsigned.id()),
                payload_length_bytes = unsigned.payload.len(),
                event = "unsigned_warp_message_extracted"
            );

            Ok(unsigned)
        } else {
            error!(
                tx_hash = %tx_hash,
                source_blockchain_id = %self.source_blockchain_id,
                event = "transaction_not_found"
            );
            Err(TeleporterError::TransactionFailed {
                reason: "Transaction not found".to_string(),
            })
        }
    }

    /// Finds an event log in a transaction receipt using the receipt adapter
    fn find_log(
        &self,
        tx_receipt: &SN::ReceiptResponse,
        tx_hash: TxHash,
        emitter: Address,
        topic: FixedBytes<32>,
        event_name: &str,
    ) -> Result<Log> {
        let logs = self.receipt_adapter.logs(tx_receipt);

        logs.iter()
            .find(|log| {
                log.address() == emitter
                    && log
                        .topics()
                        .first()
                        .is_some_and(|log_topic| *log_topic == topic)
            })
            .cloned()
            .ok_or_else(|| {
                error!(
                    tx_hash = %tx_hash,
                    source_blockchain_id = %self.source_blockchain_id,
                    emitter = %emitter,
                    available_logs = logs.len(),
                    event = "event_log_not_found"
                );
                TeleporterError::TransactionFailed {
                    reason: format!("{event_name} event not found"),
                }
            })
    }

    /// Builds the access list that carries signed Warp message bytes in the
    /// delivery transaction on the destination chain.
    ///
    /// The same list is applied automatically by
    /// `receive_cross_chain_message_transaction` on the messenger contract
    /// wrapper; this method exists for callers assembling delivery
    /// transactions themselves.
    pub fn receive_transaction_access_list(&self, signed_message: &[u8]) -> AccessList {
        warp_access_list(signed_message)
    }

    /// Gets the signed Warp message for an unsigned message with retry logic.
    ///
    /// This method polls the signature aggregator until aggregation is
    /// complete, failed, or the polling budget is exhausted.
    ///
    /// # Arguments
    ///
    /// * `unsigned_message`: The unsigned Warp message to get signed
    /// * `config`: Polling attempt count and interval
    ///
    /// # Returns
    ///
    /// The wire bytes of the signed Warp message if successful
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The aggregator reports the message failed (quorum unreachable)
    /// - The polling budget is exhausted (timeout)
    /// - Five consecutive aggregator errors occur (circuit breaker)
    pub async fn get_signed_warp_message(
        &self,
        unsigned_message: &UnsignedWarpMessage,
        config: PollingConfig,
    ) -> Result<SignedMessageBytes> {
        let PollingConfig {
            max_attempts,
            poll_interval_secs: poll_interval,
        } = config;
        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 5;

        let warp_message_id = unsigned_message.id();

        let span =
            spans::get_signed_warp_message_with_retry(&warp_message_id, max_attempts, poll_interval);
        let _guard = span.enter();

        info!(
            source_blockchain_id = %self.source_blockchain_id,
            destination_blockchain_id = %self.destination_blockchain_id,
            warp_message_id = %hex::encode(warp_message_id),
            max_attempts = max_attempts,
            poll_interval_secs = poll_interval,
            event = "signature_polling_started"
        );

        for attempt in 1..=max_attempts {
            trace!(
                attempt = attempt,
                max_attempts = max_attempts,
                event = "signature_attempt"
            );

            match self
                .signature_aggregator
                .get_signature(unsigned_message)
                .await
            {
                Ok(response) => {
                    consecutive_errors = 0;
                    match response.status {
                        SignatureStatus::Complete => {
                            return self.handle_complete_signature(
                                response,
                                attempt,
                                warp_message_id,
                            );
                        }
                        SignatureStatus::Failed => {
                            return self.handle_failed_signature(attempt, warp_message_id);
                        }
                        SignatureStatus::Pending => {
                            self.handle_pending_signature(attempt, max_attempts, poll_interval)
                                .await;
                        }
                    }
                }
                Err(e) => {
                    match e {
                        TeleporterError::RateLimitExceeded {
                            retry_after_seconds,
                        } => {
                            consecutive_errors = 0;
                            debug!(
                                source_blockchain_id = %self.source_blockchain_id,
                                destination_blockchain_id = %self.destination_blockchain_id,
                                retry_after_seconds = retry_after_seconds,
                                event = "rate_limit_exceeded"
                            );
                            self.clock
                                .sleep(Duration::from_secs(retry_after_seconds))
                                .await;
                            continue;
                        }
                        TeleporterError::SignatureNotFound => {
                            consecutive_errors = 0;
                            debug!(
                                source_blockchain_id = %self.source_blockchain_id,
                                destination_blockchain_id = %self.destination_blockchain_id,
                                attempt = attempt,
                                max_attempts = max_attempts,
                                poll_interval_secs = poll_interval,
                                event = "signature_not_found"
                            );
                            self.clock.sleep(Duration::from_secs(poll_interval)).await;
                            continue;
                        }
                        _ => {}
                    }

                    // For other errors, increment consecutive error counter
                    consecutive_errors += 1;
                    spans::record_error(&e);
                    error!(
                        source_blockchain_id = %self.source_blockchain_id,
                        destination_blockchain_id = %self.destination_blockchain_id,
                        error = %e,
                        attempt = attempt,
                        consecutive_errors = consecutive_errors,
                        event = "signature_request_failed"
                    );

                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        spans::record_error_with_context(
                            "SignatureFailed",
                            &format!(
                                "Circuit breaker triggered after {consecutive_errors} consecutive errors"
                            ),
                            Some("Aggregation service may be unreachable"),
                        );
                        error!(
                            source_blockchain_id = %self.source_blockchain_id,
                            destination_blockchain_id = %self.destination_blockchain_id,
                            consecutive_errors = consecutive_errors,
                            event = "circuit_breaker_triggered"
                        );
                        return Err(TeleporterError::SignatureFailed {
                            reason: format!(
                                "Circuit breaker triggered after {} consecutive errors: {}",
                                consecutive_errors, e
                            ),
                        });
                    }

                    self.clock.sleep(Duration::from_secs(poll_interval)).await;
                }
            }
        }

        spans::record_error_with_context(
            "SignatureTimeout",
            &format!("Signature polling timed out after {max_attempts} attempts"),
            Some(&format!(
                "Total duration: {} seconds",
                config.total_timeout_secs()
            )),
        );
        error!(
            source_blockchain_id = %self.source_blockchain_id,
            destination_blockchain_id = %self.destination_blockchain_id,
            warp_message_id = %hex::encode(warp_message_id),
            max_attempts = max_attempts,
            total_duration_secs = config.total_timeout_secs(),
            event = "signature_timeout"
        );
        Err(TeleporterError::SignatureTimeout)
    }

    fn handle_complete_signature(
        &self,
        response: SignatureResponse,
        attempt: u32,
        warp_message_id: FixedBytes<32>,
    ) -> Result<SignedMessageBytes> {
        let signed_message = response
            .signed_message
            .ok_or_else(|| {
                spans::record_error_with_context(
                    "SignatureDataMissing",
                    "Aggregation status is complete but signed-message field is null",
                    Some("This indicates an unexpected aggregation service response"),
                );
                TeleporterError::SignatureFailed {
                    reason: "Signed message missing".to_string(),
                }
            })?;

        // A complete response must still parse as a signed Warp message for
        // the original unsigned message; a stale or garbled response would
        // otherwise surface as an opaque revert at delivery time.
        let signed = SignedWarpMessage::decode(&signed_message)?;
        if signed.unsigned.id() != warp_message_id {
            return Err(TeleporterError::SignatureFailed {
                reason: "Aggregator returned a signature for a different message".to_string(),
            });
        }

        info!(
            source_blockchain_id = %self.source_blockchain_id,
            destination_blockchain_id = %self.destination_blockchain_id,
            attempt = attempt,
            signed_message_length_bytes = signed_message.len(),
            event = "signature_complete"
        );
        Ok(signed_message.to_vec())
    }

    fn handle_failed_signature(
        &self,
        attempt: u32,
        warp_message_id: FixedBytes<32>,
    ) -> Result<SignedMessageBytes> {
        spans::record_error_with_context(
            "SignatureFailed",
            "Aggregation service returned failed status",
            Some("Quorum stake may be unreachable for the source subnet"),
        );
        error!(
            source_blockchain_id = %self.source_blockchain_id,
            destination_blockchain_id = %self.destination_blockchain_id,
            warp_message_id = %hex::encode(warp_message_id),
            attempt = attempt,
            event = "signature_failed"
        );
        Err(TeleporterError::SignatureFailed {
            reason: "Signature aggregation failed".to_string(),
        })
    }

    async fn handle_pending_signature(&self, attempt: u32, max_attempts: u32, poll_interval: u64) {
        debug!(
            source_blockchain_id = %self.source_blockchain_id,
            destination_blockchain_id = %self.destination_blockchain_id,
            attempt = attempt,
            max_attempts = max_attempts,
            poll_interval_secs = poll_interval,
            event = "signature_pending"
        );
        self.clock.sleep(Duration::from_secs(poll_interval)).await;
    }
}

/// Parameters for relaying a Teleporter message
#[derive(Builder, Debug, Clone)]
pub struct RelayParams {
    pub from_address: Address,
    pub relayer_reward_address: Address,
    pub message_index: u32,
}

impl RelayParams {
    pub fn from_address(&self) -> Address {
        self.from_address
    }

    pub fn relayer_reward_address(&self) -> Address {
        self.relayer_reward_address
    }

    pub fn message_index(&self) -> u32 {
        self.message_index
    }
}
