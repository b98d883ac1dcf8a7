//! Network-agnostic access to transaction receipt logs.
//!
//! The relay client reads two kinds of logs out of a send receipt: the
//! messenger's `SendCrossChainMessage` event and the Warp precompile's
//! `SendWarpMessage` event. This module abstracts how those logs are pulled
//! out of a receipt so the client works across subnet network types.

use alloy_network::Network;
use alloy_rpc_types::{Log, TransactionReceipt};

/// Trait for network-agnostic receipt log access.
///
/// Works with any Alloy `Network` type whose `ReceiptResponse` is a
/// `TransactionReceipt`.
pub trait ReceiptAdapter<N: Network> {
    /// Extract logs from a receipt response
    fn logs<'a>(&self, receipt: &'a N::ReceiptResponse) -> &'a [Log];
}

/// Receipt adapter for subnet-evm chains.
///
/// Subnet-evm receipts follow Alloy's standard `TransactionReceipt` layout
/// with an inner `ReceiptEnvelope`, so a single implementation covers every
/// subnet regardless of which transaction types its chain config enables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubnetReceiptAdapter;

impl<N> ReceiptAdapter<N> for SubnetReceiptAdapter
where
    N: Network<ReceiptResponse = TransactionReceipt>,
{
    fn logs<'a>(&self, receipt: &'a N::ReceiptResponse) -> &'a [Log] {
        match &receipt.inner {
            alloy_rpc_types::ReceiptEnvelope::Eip1559(r) => &r.receipt.logs,
            alloy_rpc_types::ReceiptEnvelope::Eip2930(r) => &r.receipt.logs,
            alloy_rpc_types::ReceiptEnvelope::Legacy(r) => &r.receipt.logs,
            alloy_rpc_types::ReceiptEnvelope::Eip4844(r) => &r.receipt.logs,
            alloy_rpc_types::ReceiptEnvelope::Eip7702(r) => &r.receipt.logs,
        }
    }
}
