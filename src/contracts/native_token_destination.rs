//! NativeTokenDestination contract bindings and wrapper
//!
//! Destination side of the native-token bridge: mints the mirrored native
//! asset when the source chain reports a lock, and burns it again when a
//! holder transfers back to the source chain.

use alloy_contract::CallBuilder;
use alloy_network::Ethereum;
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::error::{Result, TeleporterError};
use NativeTokenDestination::{transferToSourceCall, NativeTokenDestinationInstance};

/// The NativeTokenDestination contract wrapper
pub struct NativeTokenDestinationContract<P: Provider<Ethereum>> {
    instance: NativeTokenDestinationInstance<P>,
}

impl<P: Provider<Ethereum>> NativeTokenDestinationContract<P> {
    /// Create a new NativeTokenDestinationContract.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "native_token_destination_contract_initialized"
        );
        Self {
            instance: NativeTokenDestinationInstance::new(address, provider),
        }
    }

    /// Create the call builder for the `transferToSource` function.
    ///
    /// Burns the transaction value on this chain and asks the source chain
    /// to unlock the same amount for `recipient`.
    pub fn transfer_to_source_call_builder(
        &self,
        from_address: Address,
        recipient: Address,
        amount: U256,
        fee_info: NativeTokenDestination::TeleporterFeeInfo,
        allowed_relayer_addresses: Vec<Address>,
    ) -> CallBuilder<&P, PhantomData<transferToSourceCall>> {
        self.instance
            .transferToSource(recipient, fee_info, allowed_relayer_addresses)
            .from(from_address)
            .value(amount)
    }

    /// Create the transaction request for the `transferToSource` function.
    pub fn transfer_to_source_transaction(
        &self,
        from_address: Address,
        recipient: Address,
        amount: U256,
        fee_info: NativeTokenDestination::TeleporterFeeInfo,
        allowed_relayer_addresses: Vec<Address>,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            recipient = %recipient,
            amount = %amount,
            fee_token_address = %fee_info.feeTokenAddress,
            fee_amount = %fee_info.amount,
            contract_address = %self.instance.address(),
            event = "transfer_to_source_transaction_created"
        );

        self.transfer_to_source_call_builder(
            from_address,
            recipient,
            amount,
            fee_info,
            allowed_relayer_addresses,
        )
        .into_transaction_request()
    }

    /// Create the transaction request for the `reportTotalBurnedTxFees`
    /// function, which tells the source chain how much of the mirrored asset
    /// has been burned as transaction fees.
    pub fn report_total_burned_tx_fees_transaction(
        &self,
        from_address: Address,
        fee_info: NativeTokenDestination::TeleporterFeeInfo,
        allowed_relayer_addresses: Vec<Address>,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            contract_address = %self.instance.address(),
            event = "report_total_burned_tx_fees_transaction_created"
        );

        self.instance
            .reportTotalBurnedTxFees(fee_info, allowed_relayer_addresses)
            .from(from_address)
            .into_transaction_request()
    }

    /// Circulating supply of the mirrored asset on this chain.
    pub async fn total_supply(&self) -> Result<U256> {
        self.instance
            .totalSupply()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Whether the source chain has finished collateralizing this bridge.
    /// Transfers back to the source are rejected until it has.
    pub async fn is_collateralized(&self) -> Result<bool> {
        self.instance
            .isCollateralized()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Blockchain id of the paired source chain.
    pub async fn source_blockchain_id(&self) -> Result<FixedBytes<32>> {
        self.instance
            .sourceBlockchainID()
            .call()
            .await
            .map_err(|e| TeleporterError::ContractCall(e.to_string()))
    }

    /// Address of the paired NativeTokenSource contract.
    pub async fn native_token_source_address(&self) -> Result<Address> {
        self.instance
            .nativeTokenSourceAddress()
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
    #[derive(Debug, PartialEq, Eq)]
    contract NativeTokenDestination {
        struct TeleporterFeeInfo {
            address feeTokenAddress;
            uint256 amount;
        }

        event NativeTokensMinted(address indexed recipient, uint256 amount);

        event TransferToSource(
            address indexed sender,
            address indexed recipient,
            bytes32 indexed teleporterMessageID,
            uint256 amount
        );

        event BurnTokens(uint256 amount);

        event ReportTotalBurnedTxFees(
            bytes32 indexed teleporterMessageID,
            uint256 burnedTxFees
        );

        event CollateralAdded(uint256 amount, uint256 remaining);

        function totalSupply() external view returns (uint256);
        function isCollateralized() external view returns (bool);
        function sourceBlockchainID() external view returns (bytes32);
        function nativeTokenSourceAddress() external view returns (address);

        function transferToSource(
            address recipient,
            TeleporterFeeInfo calldata feeInfo,
            address[] calldata allowedRelayerAddresses
        ) external payable;
        function reportTotalBurnedTxFees(
            TeleporterFeeInfo calldata feeInfo,
            address[] calldata allowedRelayerAddresses
        ) external;
    }
);
