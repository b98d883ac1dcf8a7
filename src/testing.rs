//! Test utilities and fake implementations for Teleporter relaying
//!
//! This module provides fake/mock implementations of the relay traits that
//! enable comprehensive testing including adversarial scenarios without
//! requiring actual blockchain or API interactions.
//!
//! These fakes are designed to be used in integration tests to verify the
//! behavior of the [`Teleporter`](crate::Teleporter) client under various
//! conditions like timeouts, rate limiting, transaction failures, signature
//! state progressions, and validator-set churn.

use alloy_network::{Ethereum, Network};
use alloy_primitives::{Bytes, FixedBytes, TxHash};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::protocol::{
    BitSetSignature, SignatureResponse, SignatureStatus, SignedMessageBytes, SignedWarpMessage,
    UnsignedWarpMessage,
};
use crate::traits::{BlockchainProvider, Clock, SignatureAggregator};
use crate::{Result, TeleporterError};

// ============================================================================
// Fake Blockchain Provider
// ============================================================================

/// A fake blockchain provider that returns pre-configured transaction receipts.
///
/// This allows testing scenarios like:
/// - Transaction not found
/// - Transaction found but no SendCrossChainMessage event
/// - Malformed event data
/// - Delayed responses
#[derive(Clone, Debug, Default)]
pub struct FakeBlockchainProvider {
    receipts: Arc<Mutex<HashMap<TxHash, Option<<Ethereum as Network>::ReceiptResponse>>>>,
    failures: Arc<Mutex<Vec<TxHash>>>,
}

impl FakeBlockchainProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction receipt that will be returned for the given hash
    pub fn add_receipt(&self, tx_hash: TxHash, receipt: <Ethereum as Network>::ReceiptResponse) {
        self.receipts.lock().unwrap().insert(tx_hash, Some(receipt));
    }

    /// Configure a transaction hash to return None (not found)
    pub fn add_not_found(&self, tx_hash: TxHash) {
        self.receipts.lock().unwrap().insert(tx_hash, None);
    }

    /// Configure a transaction hash to return an error
    pub fn add_failure(&self, tx_hash: TxHash) {
        self.failures.lock().unwrap().push(tx_hash);
    }
}

#[async_trait]
impl BlockchainProvider<Ethereum> for FakeBlockchainProvider {
    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<<Ethereum as Network>::ReceiptResponse>> {
        if self.failures.lock().unwrap().contains(&tx_hash) {
            return Err(TeleporterError::Provider("Simulated RPC error".to_string()));
        }

        Ok(self
            .receipts
            .lock()
            .unwrap()
            .get(&tx_hash)
            .cloned()
            .unwrap_or(None))
    }

    async fn get_block_number(&self) -> Result<u64> {
        Ok(12345)
    }
}

// ============================================================================
// Fake Signature Aggregator
// ============================================================================

/// A fake signature aggregator that simulates various service behaviors.
///
/// Responses are keyed by the Warp message id of the unsigned message being
/// signed. This allows testing scenarios like:
/// - Immediate success
/// - Pending → Complete progression
/// - Rate limiting (429)
/// - Not found (404)
/// - Failed aggregation (quorum unreachable)
/// - Timeout scenarios
#[derive(Clone, Debug, Default)]
pub struct FakeAggregator {
    responses: Arc<Mutex<HashMap<FixedBytes<32>, Vec<SignatureResponse>>>>,
    response_index: Arc<Mutex<HashMap<FixedBytes<32>, usize>>>,
}

impl FakeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a sequence of responses for a Warp message id.
    ///
    /// Each call to get_signature will return the next response in the
    /// sequence. This allows testing state progressions like Pending →
    /// Complete.
    pub fn add_response_sequence(
        &self,
        warp_message_id: FixedBytes<32>,
        responses: Vec<SignatureResponse>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert(warp_message_id, responses);
        self.response_index
            .lock()
            .unwrap()
            .insert(warp_message_id, 0);
    }

    /// Configure an immediate complete response with the signed wire bytes
    pub fn add_complete_response(&self, warp_message_id: FixedBytes<32>, signed_message: &[u8]) {
        let response = SignatureResponse {
            status: SignatureStatus::Complete,
            signed_message: Some(Bytes::copy_from_slice(signed_message)),
        };
        self.add_response_sequence(warp_message_id, vec![response]);
    }

    /// Configure an immediate failed response
    pub fn add_failed_response(&self, warp_message_id: FixedBytes<32>) {
        let response = SignatureResponse {
            status: SignatureStatus::Failed,
            signed_message: None,
        };
        self.add_response_sequence(warp_message_id, vec![response]);
    }

    /// Configure a pending response that will never complete (for timeout testing)
    pub fn add_always_pending(&self, warp_message_id: FixedBytes<32>) {
        let response = SignatureResponse {
            status: SignatureStatus::Pending,
            signed_message: None,
        };
        self.add_response_sequence(warp_message_id, vec![response; 100]);
    }

    /// Configure a number of pending responses followed by success
    pub fn add_pending_then_success(
        &self,
        warp_message_id: FixedBytes<32>,
        pending_count: usize,
        signed_message: &[u8],
    ) {
        let mut responses = Vec::new();

        for _ in 0..pending_count {
            responses.push(SignatureResponse {
                status: SignatureStatus::Pending,
                signed_message: None,
            });
        }

        responses.push(SignatureResponse {
            status: SignatureStatus::Complete,
            signed_message: Some(Bytes::copy_from_slice(signed_message)),
        });

        self.add_response_sequence(warp_message_id, responses);
    }

    /// Get the current call count for a Warp message id
    pub fn get_call_count(&self, warp_message_id: FixedBytes<32>) -> usize {
        self.response_index
            .lock()
            .unwrap()
            .get(&warp_message_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SignatureAggregator for FakeAggregator {
    async fn get_signature(&self, message: &UnsignedWarpMessage) -> Result<SignatureResponse> {
        let warp_message_id = message.id();
        let responses = self.responses.lock().unwrap();
        let mut indices = self.response_index.lock().unwrap();

        if let Some(response_seq) = responses.get(&warp_message_id) {
            let index = indices.get(&warp_message_id).copied().unwrap_or(0);

            if index < response_seq.len() {
                let response = response_seq[index].clone();
                indices.insert(warp_message_id, index + 1);
                Ok(response)
            } else {
                Ok(response_seq.last().unwrap().clone())
            }
        } else {
            Err(TeleporterError::SignatureNotFound)
        }
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// This enables testing timeout behavior without actually waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }

    /// Clear the sleep log
    pub fn clear_sleep_log(&self) {
        self.sleep_log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

// ============================================================================
// Fake Subnet Network
// ============================================================================

/// A fake subnet validator set that signs and verifies Warp messages.
///
/// The validator set has a version that increments whenever validators are
/// added or removed. Signatures embed the version of the set that produced
/// them, and delivery rejects any signature whose version no longer matches.
/// This mirrors how a real subnet behaves during validator churn: a BLS
/// aggregate collected before the churn fails verification against the
/// post-churn set, and the message must be re-signed before it can be
/// delivered.
///
/// The fake also implements [`SignatureAggregator`], always returning a
/// complete signature from the *current* validator set. Polling after a
/// churn therefore naturally yields a fresh, deliverable signature.
#[derive(Clone, Debug, Default)]
pub struct FakeSubnetNetwork {
    validator_set_version: Arc<Mutex<u64>>,
    delivered: Arc<Mutex<HashSet<FixedBytes<32>>>>,
}

impl FakeSubnetNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version of the validator set
    pub fn validator_set_version(&self) -> u64 {
        *self.validator_set_version.lock().unwrap()
    }

    /// Add a validator to the set, incrementing the set version.
    ///
    /// Any signature produced before this call becomes stale.
    pub fn add_validator(&self) {
        *self.validator_set_version.lock().unwrap() += 1;
    }

    /// Sign a Warp message with the current validator set.
    ///
    /// The returned wire bytes parse as a [`SignedWarpMessage`] whose
    /// signature embeds the current set version.
    pub fn sign_message(&self, unsigned: &UnsignedWarpMessage) -> SignedMessageBytes {
        let version = self.validator_set_version();
        let mut signature_bytes = [0u8; 96];
        signature_bytes[..8].copy_from_slice(&version.to_be_bytes());

        let signed = SignedWarpMessage {
            unsigned: unsigned.clone(),
            signature: BitSetSignature {
                signers: Bytes::from(vec![0xff]),
                signature: FixedBytes::from(signature_bytes),
            },
        };
        signed.encode().to_vec()
    }

    /// Attempt delivery of a signed Warp message.
    ///
    /// Returns `true` and records the message as received if the signature
    /// was produced by the current validator set; returns `false` if the
    /// signature is stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not parse as a signed Warp message.
    pub fn deliver(&self, signed_message: &[u8]) -> Result<bool> {
        let signed = SignedWarpMessage::decode(signed_message)?;

        let mut version_bytes = [0u8; 8];
        version_bytes.copy_from_slice(&signed.signature.signature[..8]);
        let signature_version = u64::from_be_bytes(version_bytes);

        if signature_version != self.validator_set_version() {
            return Ok(false);
        }

        self.delivered.lock().unwrap().insert(signed.unsigned.id());
        Ok(true)
    }

    /// Whether a Warp message has been successfully delivered
    pub fn message_received(&self, warp_message_id: FixedBytes<32>) -> bool {
        self.delivered.lock().unwrap().contains(&warp_message_id)
    }
}

#[async_trait]
impl SignatureAggregator for FakeSubnetNetwork {
    async fn get_signature(&self, message: &UnsignedWarpMessage) -> Result<SignatureResponse> {
        Ok(SignatureResponse {
            status: SignatureStatus::Complete,
            signed_message: Some(Bytes::from(self.sign_message(message))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsigned_message() -> UnsignedWarpMessage {
        UnsignedWarpMessage {
            network_id: 1337,
            source_chain_id: FixedBytes::from([7u8; 32]),
            payload: vec![1, 2, 3].into(),
        }
    }

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_fake_aggregator_sequence() {
        let aggregator = FakeAggregator::new();
        let message = unsigned_message();

        aggregator.add_response_sequence(
            message.id(),
            vec![
                SignatureResponse {
                    status: SignatureStatus::Pending,
                    signed_message: None,
                },
                SignatureResponse {
                    status: SignatureStatus::Complete,
                    signed_message: Some(Bytes::from_static(&[0xde, 0xad])),
                },
            ],
        );

        let first = aggregator.get_signature(&message).await.unwrap();
        assert!(matches!(first.status, SignatureStatus::Pending));

        let second = aggregator.get_signature(&message).await.unwrap();
        assert!(matches!(second.status, SignatureStatus::Complete));
    }

    #[tokio::test]
    async fn test_fake_aggregator_not_found() {
        let aggregator = FakeAggregator::new();
        let message = unsigned_message();

        let result = aggregator.get_signature(&message).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            TeleporterError::SignatureNotFound
        ));
    }

    #[tokio::test]
    async fn test_fake_blockchain_provider_not_found() {
        let provider = FakeBlockchainProvider::new();
        let tx_hash = TxHash::from([1u8; 32]);

        provider.add_not_found(tx_hash);

        let result = provider.get_transaction_receipt(tx_hash).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fake_blockchain_provider_failure() {
        let provider = FakeBlockchainProvider::new();
        let tx_hash = TxHash::from([1u8; 32]);

        provider.add_failure(tx_hash);

        let result = provider.get_transaction_receipt(tx_hash).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), TeleporterError::Provider(_)));
    }

    #[test]
    fn test_fake_subnet_network_accepts_current_signature() {
        let network = FakeSubnetNetwork::new();
        let message = unsigned_message();

        let signed = network.sign_message(&message);
        assert!(network.deliver(&signed).unwrap());
        assert!(network.message_received(message.id()));
    }

    #[test]
    fn test_fake_subnet_network_rejects_stale_signature() {
        let network = FakeSubnetNetwork::new();
        let message = unsigned_message();

        let signed = network.sign_message(&message);
        network.add_validator();

        assert!(!network.deliver(&signed).unwrap());
        assert!(!network.message_received(message.id()));

        // Re-signing with the churned set makes delivery succeed.
        let resigned = network.sign_message(&message);
        assert!(network.deliver(&resigned).unwrap());
        assert!(network.message_received(message.id()));
    }
}
