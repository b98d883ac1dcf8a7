//! TeleporterMessenger contract bindings and wrapper
//!
//! This module contains the Alloy-generated contract bindings for the
//! TeleporterMessenger contract, the on-chain half of the Teleporter
//! protocol: it assigns message ids, escrows relayer fees, and verifies
//! incoming Warp messages before executing them.

use alloy_contract::CallBuilder;
use alloy_network::Ethereum;
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::error::Result;
use crate::protocol::warp_access_list;
use crate::spans;
use TeleporterMessenger::{
    receiveCrossChainMessageCall, retrySendCrossChainMessageCall, sendCrossChainMessageCall,
    TeleporterMessengerInstance,
};

/// The TeleporterMessenger contract wrapper
pub struct TeleporterMessengerContract<P: Provider<Ethereum>> {
    instance: TeleporterMessengerInstance<P>,
}

impl<P: Provider<Ethereum>> TeleporterMessengerContract<P> {
    /// Create a new TeleporterMessengerContract.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "teleporter_messenger_contract_initialized"
        );
        Self {
            instance: TeleporterMessengerInstance::new(address, provider),
        }
    }

    /// Create the call builder for the `sendCrossChainMessage` function.
    ///
    /// Most users will want to use the `send_cross_chain_message_transaction`
    /// function instead.
    pub fn send_cross_chain_message_call_builder(
        &self,
        from_address: Address,
        input: TeleporterMessenger::TeleporterMessageInput,
    ) -> CallBuilder<&P, PhantomData<sendCrossChainMessageCall>> {
        self.instance.sendCrossChainMessage(input).from(from_address)
    }

    /// Create the transaction request for the `sendCrossChainMessage` function.
    pub fn send_cross_chain_message_transaction(
        &self,
        from_address: Address,
        input: TeleporterMessenger::TeleporterMessageInput,
    ) -> TransactionRequest {
        let span = spans::send_cross_chain_message(
            &from_address,
            &input.destinationChainID,
            &input.destinationAddress,
        );
        let _guard = span.enter();

        info!(
            from_address = %from_address,
            destination_chain_id = %input.destinationChainID,
            destination_address = %input.destinationAddress,
            required_gas_limit = %input.requiredGasLimit,
            message_length_bytes = input.message.len(),
            contract_address = %self.instance.address(),
            event = "send_cross_chain_message_transaction_created"
        );

        self.send_cross_chain_message_call_builder(from_address, input)
            .into_transaction_request()
    }

    /// Create the call builder for the `retrySendCrossChainMessage` function.
    pub fn retry_send_cross_chain_message_call_builder(
        &self,
        from_address: Address,
        destination_chain_id: FixedBytes<32>,
        message: TeleporterMessenger::TeleporterMessage,
    ) -> CallBuilder<&P, PhantomData<retrySendCrossChainMessageCall>> {
        self.instance
            .retrySendCrossChainMessage(destination_chain_id, message)
            .from(from_address)
    }

    /// Create the transaction request for the `retrySendCrossChainMessage`
    /// function.
    ///
    /// Used when the original send's Warp message can no longer be signed by
    /// the current validator set and a fresh one must be produced for the
    /// same Teleporter message.
    pub fn retry_send_cross_chain_message_transaction(
        &self,
        from_address: Address,
        destination_chain_id: FixedBytes<32>,
        message: TeleporterMessenger::TeleporterMessage,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            destination_chain_id = %destination_chain_id,
            message_id = %message.messageID,
            contract_address = %self.instance.address(),
            event = "retry_send_cross_chain_message_transaction_created"
        );

        self.retry_send_cross_chain_message_call_builder(
            from_address,
            destination_chain_id,
            message,
        )
        .into_transaction_request()
    }

    /// Create the call builder for the `receiveCrossChainMessage` function.
    pub fn receive_cross_chain_message_call_builder(
        &self,
        from_address: Address,
        message_index: u32,
        relayer_reward_address: Address,
    ) -> CallBuilder<&P, PhantomData<receiveCrossChainMessageCall>> {
        self.instance
            .receiveCrossChainMessage(message_index, relayer_reward_address)
            .from(from_address)
    }

    /// Create the delivery transaction for a signed Warp message.
    ///
    /// The signed message itself does not travel in calldata: it is packed
    /// into predicate form and carried as access-list storage keys under the
    /// Warp precompile address, where the destination chain verifies it
    /// before the messenger executes the message.
    pub fn receive_cross_chain_message_transaction(
        &self,
        from_address: Address,
        message_index: u32,
        relayer_reward_address: Address,
        signed_warp_message: &[u8],
    ) -> TransactionRequest {
        let span = spans::receive_cross_chain_message(
            &from_address,
            message_index,
            signed_warp_message.len(),
        );
        let _guard = span.enter();

        info!(
            from_address = %from_address,
            message_index = message_index,
            relayer_reward_address = %relayer_reward_address,
            signed_message_length_bytes = signed_warp_message.len(),
            contract_address = %self.instance.address(),
            event = "receive_cross_chain_message_transaction_created"
        );

        let mut tx = self
            .receive_cross_chain_message_call_builder(
                from_address,
                message_index,
                relayer_reward_address,
            )
            .into_transaction_request();
        tx.access_list = Some(warp_access_list(signed_warp_message));
        tx
    }

    /// Whether a message from the given origin chain has been delivered.
    pub async fn message_received(
        &self,
        origin_chain_id: FixedBytes<32>,
        message_id: U256,
    ) -> Result<bool> {
        debug!(
            origin_chain_id = %origin_chain_id,
            message_id = %message_id,
            contract_address = %self.instance.address(),
            event = "checking_message_received"
        );

        let delivered = self
            .instance
            .messageReceived(origin_chain_id, message_id)
            .call()
            .await
            .map_err(|e| crate::error::TeleporterError::ContractCall(e.to_string()))?;

        info!(
            origin_chain_id = %origin_chain_id,
            message_id = %message_id,
            delivered = delivered,
            event = "message_received_checked"
        );

        Ok(delivered)
    }

    /// The message id the next send to the given destination will be assigned.
    pub async fn get_next_message_id(
        &self,
        destination_chain_id: FixedBytes<32>,
    ) -> Result<U256> {
        self.instance
            .getNextMessageID(destination_chain_id)
            .call()
            .await
            .map_err(|e| crate::error::TeleporterError::ContractCall(e.to_string()))
    }

    /// Fee asset and amount currently escrowed for an outstanding message.
    pub async fn get_fee_info(
        &self,
        destination_chain_id: FixedBytes<32>,
        message_id: U256,
    ) -> Result<(Address, U256)> {
        let fee_info = self
            .instance
            .getFeeInfo(destination_chain_id, message_id)
            .call()
            .await
            .map_err(|e| crate::error::TeleporterError::ContractCall(e.to_string()))?;
        Ok((fee_info.feeAsset, fee_info.feeAmount))
    }

    /// Create the transaction request for the `redeemRelayerRewards` function.
    pub fn redeem_relayer_rewards_transaction(
        &self,
        from_address: Address,
        fee_asset: Address,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            fee_asset = %fee_asset,
            contract_address = %self.instance.address(),
            event = "redeem_relayer_rewards_transaction_created"
        );

        self.instance
            .redeemRelayerRewards(fee_asset)
            .from(from_address)
            .into_transaction_request()
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}


sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    contract TeleporterMessenger {
        struct TeleporterMessageReceipt {
            uint256 receivedMessageID;
            address relayerRewardAddress;
        }

        struct TeleporterFeeInfo {
            address contractAddress;
            uint256 amount;
        }

        struct TeleporterMessage {
            uint256 messageID;
            address senderAddress;
            address destinationAddress;
            uint256 requiredGasLimit;
            address[] allowedRelayerAddresses;
            TeleporterMessageReceipt[] receipts;
            bytes message;
        }

        struct TeleporterMessageInput {
            bytes32 destinationChainID;
            address destinationAddress;
            TeleporterFeeInfo feeInfo;
            uint256 requiredGasLimit;
            address[] allowedRelayerAddresses;
            bytes message;
        }

        event SendCrossChainMessage(
            bytes32 indexed destinationChainID,
            uint256 indexed messageID,
            TeleporterMessage message
        );

        event ReceiveCrossChainMessage(
            bytes32 indexed originChainID,
            uint256 indexed messageID,
            address indexed deliverer,
            TeleporterMessage message
        );

        event MessageExecuted(bytes32 indexed originChainID, uint256 indexed messageID);

        event MessageExecutionFailed(
            bytes32 indexed originChainID,
            uint256 indexed messageID,
            TeleporterMessage message
        );

        function sendCrossChainMessage(TeleporterMessageInput calldata messageInput)
            external
            returns (uint256 messageID);

        function retrySendCrossChainMessage(
            bytes32 destinationChainID,
            TeleporterMessage calldata message
        ) external;

        function receiveCrossChainMessage(uint32 messageIndex, address relayerRewardAddress)
            external;

        function messageReceived(bytes32 originChainID, uint256 messageID)
            external
            view
            returns (bool delivered);

        function getNextMessageID(bytes32 destinationChainID)
            external
            view
            returns (uint256 messageID);

        function getFeeInfo(bytes32 destinationChainID, uint256 messageID)
            external
            view
            returns (address feeAsset, uint256 feeAmount);

        function addFeeAmount(
            bytes32 destinationChainID,
            uint256 messageID,
            address feeContractAddress,
            uint256 additionalFeeAmount
        ) external;

        function checkRelayerRewardAmount(address relayer, address feeAsset)
            external
            view
            returns (uint256);

        function redeemRelayerRewards(address feeAsset) external;
    }
);
