//! NativeTokenSource contract bindings and wrapper
//!
//! The native-token bridge locks the native asset on a source chain and
//! mints a mirrored native asset on a destination chain, using Teleporter
//! for the cross-chain messaging. This module wraps the source-side
//! contract: locking transfers in and unlocking them when the destination
//! reports back.

use alloy_contract::CallBuilder;
use alloy_network::Ethereum;
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::error::{Result, TeleporterError};
use NativeTokenSource::{transferToDestinationCall, NativeTokenSourceInstance};

/// The NativeTokenSource contract wrapper
pub struct NativeTokenSourceContract<P: Provider<Ethereum>> {
    instance: NativeTokenSourceInstance<P>,
}

impl<P: Provider<Ethereum>> NativeTokenSourceContract<P> {
    /// Create a new NativeTokenSourceContract.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "native_token_source_contract_initialized"
        );
        Self {
            instance: NativeTokenSourceInstance::new(address, provider),
        }
    }

    /// Create the call builder for the `transferToDestination` function.
    ///
    /// The transferred amount is the transaction value; `fee_info` names an
    /// ERC20 used to reward the relayer, if any.
    pub fn transfer_to_destination_call_builder(
        &self,
        from_address: Address,
        recipient: Address,
        amount: U256,
        fee_info: NativeTokenSource::TeleporterFeeInfo,
        allowed_relayer_addresses: Vec<Address>,
    ) -> CallBuilder<&P, PhantomData<transferToDestinationCall>> {
        self.instance
            .transferToDestination(recipient, fee_info, allowed_relayer_addresses)
            .from(from_address)
            .value(amount)
    }

    /// Create the transaction request for the `transferToDestination` function.
    pub fn transfer_to_destination_transaction(
        &self,
        from_address: Address,
        recipient: Address,
        amount: U256,
        fee_info: NativeTokenSource::TeleporterFeeInfo,
        allowed_relayer_addresses: Vec<Address>,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            recipient = %recipient,
            amount = %amount,
            fee_token_address = %fee_info.feeTokenAddress,
            fee_amount = %fee_info.amount,
            contract_address = %self.instance.address(),
            event = "transfer_to_destination_transaction_created"
        );

        self.transfer_to_destination_call_builder(
            from_address,
            recipient,
            amount,
            fee_info,
            allowed_relayer_addresses,
        )
        .into_transaction_request()
    }

    /// Blockchain id of the paired destination chain.
    pub async fn destination_blockchain_id(&self) -> Result<FixedBytes<32>> {
        self.instance
            .destinationBlockchainID()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Address of the paired NativeTokenDestination contract.
    pub async fn native_token_destination_address(&self) -> Result<Address> {
        self.instance
            .nativeTokenDestinationAddress()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Total amount the destination chain has reported as burned fees.
    pub async fn destination_burned_total(&self) -> Result<U256> {
        self.instance
            .destinationBurnedTotal()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Minimum messenger version this bridge accepts messages from.
    pub async fn get_min_teleporter_version(&self) -> Result<U256> {
        self.instance
            .getMinTeleporterVersion()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Whether the bridge has paused a messenger address.
    pub async fn is_teleporter_address_paused(&self, teleporter_address: Address) -> Result<bool> {
        self.instance
            .isTeleporterAddressPaused(teleporter_address)
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Create the transaction request for the `pauseTeleporterAddress`
    /// function. Owner only.
    pub fn pause_teleporter_address_transaction(
        &self,
        from_address: Address,
        teleporter_address: Address,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            teleporter_address = %teleporter_address,
            contract_address = %self.instance.address(),
            event = "pause_teleporter_address_transaction_created"
        );

        self.instance
            .pauseTeleporterAddress(teleporter_address)
            .from(from_address)
            .into_transaction_request()
    }

    /// Create the transaction request for the `unpauseTeleporterAddress`
    /// function. Owner only.
    pub fn unpause_teleporter_address_transaction(
        &self,
        from_address: Address,
        teleporter_address: Address,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            teleporter_address = %teleporter_address,
            contract_address = %self.instance.address(),
            event = "unpause_teleporter_address_transaction_created"
        );

        self.instance
            .unpauseTeleporterAddress(teleporter_address)
            .from(from_address)
            .into_transaction_request()
    }

    /// Create the transaction request for the `updateMinTeleporterVersion`
    /// function. Owner only.
    pub fn update_min_teleporter_version_transaction(
        &self,
        from_address: Address,
        version: U256,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            version = %version,
            contract_address = %self.instance.address(),
            event = "update_min_teleporter_version_transaction_created"
        );

        self.instance
            .updateMinTeleporterVersion(version)
            .from(from_address)
            .into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    contract NativeTokenSource {
        struct TeleporterFeeInfo {
            address feeTokenAddress;
            uint256 amount;
        }

        event TransferToDestination(
            address indexed sender,
            address indexed recipient,
            bytes32 indexed teleporterMessageID,
            uint256 amount
        );

        event UnlockTokens(address indexed recipient, uint256 amount);

        event BurnTokens(uint256 amount);

        event TeleporterAddressPaused(address indexed teleporterAddress);

        event TeleporterAddressUnpaused(address indexed teleporterAddress);

        event MinTeleporterVersionUpdated(
            uint256 indexed oldMinTeleporterVersion,
            uint256 indexed newMinTeleporterVersion
        );

        function BURNED_TX_FEES_ADDRESS() external view returns (address);
        function MINT_NATIVE_TOKENS_REQUIRED_GAS() external view returns (uint256);
        function destinationBlockchainID() external view returns (bytes32);
        function destinationBurnedTotal() external view returns (uint256);
        function getMinTeleporterVersion() external view returns (uint256);
        function isTeleporterAddressPaused(address teleporterAddress)
            external
            view
            returns (bool);
        function nativeTokenDestinationAddress() external view returns (address);
        function owner() external view returns (address);
        function teleporterRegistry() external view returns (address);

        function pauseTeleporterAddress(address teleporterAddress) external;
        function unpauseTeleporterAddress(address teleporterAddress) external;
        function receiveTeleporterMessage(
            bytes32 originBlockchainID,
            address originSenderAddress,
            bytes calldata message
        ) external;
        function transferToDestination(
            address recipient,
            TeleporterFeeInfo calldata feeInfo,
            address[] calldata allowedRelayerAddresses
        ) external payable;
        function updateMinTeleporterVersion(uint256 version) external;
    }
);
