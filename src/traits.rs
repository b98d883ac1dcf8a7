//! Core trait abstractions for Teleporter relay operations.
//!
//! This module defines the traits that enable dependency injection and
//! testing of the relay client. By abstracting blockchain access, signature
//! aggregation, and time control behind traits, users can implement
//! fake/mock versions for comprehensive testing including adversarial
//! scenarios such as validator churn.

use alloy_network::Network;
use alloy_primitives::TxHash;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::protocol::{SignatureResponse, UnsignedWarpMessage};

/// Trait for blockchain RPC operations.
///
/// This trait abstracts the chain interactions the relay client needs,
/// allowing tests to use fake implementations that simulate failure modes
/// and edge cases.
///
/// The trait is generic over `N: Network` since every subnet runs its own
/// EVM instance with potentially different receipt shapes.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Transaction receipt not found
/// - Malformed or missing event logs
/// - Network timeouts
/// - Slow block acceptance
#[async_trait]
pub trait BlockchainProvider<N: Network>: Send + Sync {
    /// Fetches the transaction receipt for a given transaction hash.
    ///
    /// Returns `None` if the transaction is not found or not yet accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or the response cannot be parsed.
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<N::ReceiptResponse>>;

    /// Gets the current block number.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn get_block_number(&self) -> Result<u64>;
}

/// Trait for Warp signature aggregation.
///
/// The relay client polls an aggregation service that collects BLS
/// signatures from the source subnet's validators until quorum stake has
/// signed the message.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Pending → Complete progressions
/// - Rate limiting and backoff
/// - Aggregation failures (quorum unreachable)
/// - Stale signatures after validator-set changes
#[async_trait]
pub trait SignatureAggregator: Send + Sync {
    /// Requests the aggregation status and signed bytes for a Warp message.
    ///
    /// Typically called repeatedly (polling) until the status becomes
    /// `Complete` or `Failed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response cannot be parsed,
    /// or the service reports rate limiting.
    async fn get_signature(&self, message: &UnsignedWarpMessage) -> Result<SignatureResponse>;
}

/// Trait for time-based operations.
///
/// Abstracts sleep and time queries so tests can fast-forward through
/// polling loops and timeouts without actually waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}
