//! Warp precompile bindings
//!
//! Every subnet-evm chain exposes the Warp precompile at a fixed address.
//! Outgoing messages show up as `SendWarpMessage` logs on the send
//! transaction; the relay client decodes those logs to recover the unsigned
//! Warp message it hands to the signature aggregator.

use alloy_network::Ethereum;
use alloy_primitives::{Address, FixedBytes};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use tracing::debug;

use crate::error::{Result, TeleporterError};
use crate::subnet::WARP_PRECOMPILE_ADDRESS;
use WarpMessenger::WarpMessengerInstance;

/// Wrapper over the Warp precompile's view surface.
pub struct WarpMessengerContract<P: Provider<Ethereum>> {
    instance: WarpMessengerInstance<P>,
}

impl<P: Provider<Ethereum>> WarpMessengerContract<P> {
    /// Create a wrapper bound to the fixed precompile address.
    pub fn new(provider: P) -> Self {
        debug!(
            contract_address = %WARP_PRECOMPILE_ADDRESS,
            event = "warp_messenger_contract_initialized"
        );
        Self {
            instance: WarpMessengerInstance::new(WARP_PRECOMPILE_ADDRESS, provider),
        }
    }

    /// The blockchain id of the chain this provider is connected to.
    pub async fn blockchain_id(&self) -> Result<FixedBytes<32>> {
        self.instance
            .getBlockchainID()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Returns the precompile address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract WarpMessenger {
        event SendWarpMessage(
            address indexed sender,
            bytes32 indexed messageID,
            bytes message
        );

        function sendWarpMessage(bytes calldata payload)
            external
            returns (bytes32 messageID);

        function getBlockchainID() external view returns (bytes32 blockchainID);
    }
);
