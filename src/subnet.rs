//! Subnet and blockchain identity types.
//!
//! Teleporter addresses chains by their 32-byte blockchain ID rather than by
//! EVM chain id, since every subnet runs its own EVM instance. This module
//! holds the identity value types and the well-known protocol addresses.

use alloy_primitives::{address, hex, Address, FixedBytes};

use crate::error::{Result, TeleporterError};

/// Address of the Warp precompile on every subnet-evm chain.
///
/// The precompile emits `SendWarpMessage` logs for outgoing messages and
/// verifies predicate-carried signed messages for incoming ones.
pub const WARP_PRECOMPILE_ADDRESS: Address =
    address!("0200000000000000000000000000000000000005");

/// Address the TeleporterMessenger contract is deployed to on every chain.
///
/// The messenger is deployed with a Nick's-method keyless transaction, so the
/// contract address is identical across all subnets.
pub const TELEPORTER_MESSENGER_ADDRESS: Address =
    address!("253b2784c75e510dD0fF1da844684a1aC0aa5fcf");

/// Avalanche primary network ID used in Warp messages on mainnet.
pub const MAINNET_NETWORK_ID: u32 = 1;

/// Network ID used by local test networks.
pub const LOCAL_NETWORK_ID: u32 = 1337;

/// Identity of one subnet and the blockchain it runs.
///
/// Both ids are 32-byte Avalanche ids. The subnet id names the validator set;
/// the blockchain id names the chain whose Warp messages that set signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetInfo {
    pub subnet_id: FixedBytes<32>,
    pub blockchain_id: FixedBytes<32>,
}

impl SubnetInfo {
    pub fn new(subnet_id: FixedBytes<32>, blockchain_id: FixedBytes<32>) -> Self {
        Self {
            subnet_id,
            blockchain_id,
        }
    }
}

/// Parses a 32-byte id from a hex string, with or without the `0x` prefix.
pub fn parse_chain_id(s: &str) -> Result<FixedBytes<32>> {
    let bytes = hex::decode(s.trim_start_matches("0x"))?;
    if bytes.len() != 32 {
        return Err(TeleporterError::InvalidConfig(format!(
            "blockchain id must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(FixedBytes::from_slice(&bytes))
}
