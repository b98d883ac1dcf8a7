//! TeleporterRegistry contract bindings and wrapper
//!
//! The registry tracks the TeleporterMessenger versions deployed on a chain.
//! Applications such as the native-token bridge resolve the messenger they
//! trust through it rather than hard-coding an address.

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use tracing::debug;

use crate::error::{Result, TeleporterError};
use TeleporterRegistry::TeleporterRegistryInstance;

/// The TeleporterRegistry contract wrapper
pub struct TeleporterRegistryContract<P: Provider<Ethereum>> {
    instance: TeleporterRegistryInstance<P>,
}

impl<P: Provider<Ethereum>> TeleporterRegistryContract<P> {
    /// Create a new TeleporterRegistryContract.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "teleporter_registry_contract_initialized"
        );
        Self {
            instance: TeleporterRegistryInstance::new(address, provider),
        }
    }

    /// Highest messenger version registered on this chain.
    pub async fn latest_version(&self) -> Result<U256> {
        self.instance
            .latestVersion()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Address of the latest registered messenger.
    pub async fn get_latest_teleporter(&self) -> Result<Address> {
        self.instance
            .getLatestTeleporter()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Address of the messenger registered for a specific version.
    pub async fn get_teleporter_from_version(&self, version: U256) -> Result<Address> {
        self.instance
            .getTeleporterFromVersion(version)
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract TeleporterRegistry {
        function latestVersion() external view returns (uint256);
        function getLatestTeleporter() external view returns (address);
        function getTeleporterFromVersion(uint256 version) external view returns (address);
        function getVersionFromAddress(address protocolAddress) external view returns (uint256);
    }
);
