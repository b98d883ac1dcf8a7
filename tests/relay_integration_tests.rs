//! Integration tests for the Teleporter relay client using fake implementations
//!
//! These tests demonstrate the core value proposition of the trait-based
//! design: comprehensive testability through fake implementations of every
//! external I/O seam.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, FixedBytes, LogData, U256};
use alloy_rpc_types::TransactionReceipt;
use alloy_sol_types::SolEvent;
use serde_json::json;
use teleporter_rs::testing::{
    FakeAggregator, FakeBlockchainProvider, FakeClock, FakeSubnetNetwork,
};
use teleporter_rs::{
    BitSetSignature, PollingConfig, SignatureAggregator, SignatureResponse, SignatureStatus,
    SignedWarpMessage, SubnetReceiptAdapter, Teleporter, TeleporterError, TeleporterMessenger,
    UnsignedWarpMessage, WarpMessenger, TELEPORTER_MESSENGER_ADDRESS, WARP_PRECOMPILE_ADDRESS,
};
use std::time::Duration;

const SOURCE_BLOCKCHAIN_ID: [u8; 32] = [0xaa; 32];
const DESTINATION_BLOCKCHAIN_ID: [u8; 32] = [0xbb; 32];

/// Helper function to create a test relay client with fake providers
fn create_test_relay<A: SignatureAggregator>(
    source_provider: FakeBlockchainProvider,
    signature_aggregator: A,
    clock: FakeClock,
) -> Teleporter<
    Ethereum,
    Ethereum,
    FakeBlockchainProvider,
    FakeBlockchainProvider,
    A,
    FakeClock,
    SubnetReceiptAdapter,
> {
    Teleporter::builder()
        .source_blockchain_id(FixedBytes::from(SOURCE_BLOCKCHAIN_ID))
        .destination_blockchain_id(FixedBytes::from(DESTINATION_BLOCKCHAIN_ID))
        .source_provider(source_provider)
        .destination_provider(FakeBlockchainProvider::new())
        .signature_aggregator(signature_aggregator)
        .clock(clock)
        .receipt_adapter(SubnetReceiptAdapter)
        .build()
}

/// An unsigned Warp message as the source chain would emit for a send
fn unsigned_message(tag: u8) -> UnsignedWarpMessage {
    UnsignedWarpMessage::new(
        1337,
        FixedBytes::from(SOURCE_BLOCKCHAIN_ID),
        Bytes::from(vec![tag; 40]),
    )
}

/// Wire bytes of a well-formed signed message for the given unsigned message
fn signed_bytes(unsigned: &UnsignedWarpMessage) -> Vec<u8> {
    SignedWarpMessage::new(
        unsigned.clone(),
        BitSetSignature::new(Bytes::from(vec![0b0000_0111]), FixedBytes::from([0x42; 96])),
    )
    .encode()
    .to_vec()
}

/// Builds a receipt carrying the given logs, shaped like a subnet-evm RPC
/// response
fn receipt_with_logs(tx_hash: FixedBytes<32>, logs: &[(Address, LogData)]) -> TransactionReceipt {
    let json_logs: Vec<serde_json::Value> = logs
        .iter()
        .enumerate()
        .map(|(i, (address, data))| {
            json!({
                "address": address,
                "topics": data.topics(),
                "data": data.data,
                "blockHash": FixedBytes::<32>::from([0xfe; 32]),
                "blockNumber": "0x1",
                "transactionHash": tx_hash,
                "transactionIndex": "0x0",
                "logIndex": format!("{:#x}", i),
                "removed": false
            })
        })
        .collect();

    serde_json::from_value(json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": FixedBytes::<32>::from([0xfe; 32]),
        "blockNumber": "0x1",
        "from": Address::ZERO,
        "to": TELEPORTER_MESSENGER_ADDRESS,
        "contractAddress": null,
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "effectiveGasPrice": "0x1",
        "status": "0x1",
        "type": "0x0",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "logs": json_logs
    }))
    .expect("receipt JSON should deserialize")
}

#[tokio::test]
async fn test_send_cross_chain_message_event_extraction() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([0x51u8; 32]);

    let event = TeleporterMessenger::SendCrossChainMessage {
        destinationChainID: FixedBytes::from(DESTINATION_BLOCKCHAIN_ID),
        messageID: U256::from(7),
        message: TeleporterMessenger::TeleporterMessage {
            messageID: U256::from(7),
            senderAddress: Address::from([0x01; 20]),
            destinationAddress: Address::from([0x02; 20]),
            requiredGasLimit: U256::from(100_000),
            allowedRelayerAddresses: vec![],
            receipts: vec![],
            message: Bytes::from(vec![0xab; 16]),
        },
    };

    fake_blockchain.add_receipt(
        tx_hash,
        receipt_with_logs(
            tx_hash,
            &[(TELEPORTER_MESSENGER_ADDRESS, event.encode_log_data())],
        ),
    );

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let extracted = relay
        .get_send_cross_chain_message_event(tx_hash)
        .await
        .unwrap();

    assert_eq!(extracted.messageID, U256::from(7));
    assert_eq!(
        extracted.destinationChainID,
        FixedBytes::from(DESTINATION_BLOCKCHAIN_ID)
    );
    assert_eq!(extracted.message.message, Bytes::from(vec![0xab; 16]));
    assert_eq!(extracted.message.requiredGasLimit, U256::from(100_000));
}

#[tokio::test]
async fn test_unsigned_warp_message_extraction() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([0x52u8; 32]);
    let unsigned = unsigned_message(0x5a);

    let event = WarpMessenger::SendWarpMessage {
        sender: TELEPORTER_MESSENGER_ADDRESS,
        messageID: unsigned.id(),
        message: unsigned.encode(),
    };

    fake_blockchain.add_receipt(
        tx_hash,
        receipt_with_logs(tx_hash, &[(WARP_PRECOMPILE_ADDRESS, event.encode_log_data())]),
    );

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let extracted = relay.get_unsigned_warp_message(tx_hash).await.unwrap();
    assert_eq!(extracted, unsigned);
}

#[tokio::test]
async fn test_event_log_missing_from_receipt() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([0x53u8; 32]);

    // A receipt with no logs at all: the transaction exists but did not go
    // through the messenger.
    fake_blockchain.add_receipt(tx_hash, receipt_with_logs(tx_hash, &[]));

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let result = relay.get_send_cross_chain_message_event(tx_hash).await;
    assert!(
        matches!(
            result.unwrap_err(),
            TeleporterError::TransactionFailed { .. }
        ),
        "A receipt without the event should be a typed failure"
    );
}

#[tokio::test]
async fn test_event_from_wrong_emitter_ignored() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([0x54u8; 32]);
    let unsigned = unsigned_message(0x5b);

    // Right topic, wrong emitting address: must not be mistaken for the
    // precompile's log.
    let event = WarpMessenger::SendWarpMessage {
        sender: Address::from([0x66; 20]),
        messageID: unsigned.id(),
        message: unsigned.encode(),
    };

    fake_blockchain.add_receipt(
        tx_hash,
        receipt_with_logs(tx_hash, &[(Address::from([0x66; 20]), event.encode_log_data())]),
    );

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let result = relay.get_unsigned_warp_message(tx_hash).await;
    assert!(matches!(
        result.unwrap_err(),
        TeleporterError::TransactionFailed { .. }
    ));
}

#[tokio::test]
async fn test_signature_timeout_with_fake_clock() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(1);

    fake_aggregator.add_always_pending(message.id());

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator.clone(),
        fake_clock.clone(),
    );

    let config = PollingConfig::default()
        .with_max_attempts(5)
        .with_poll_interval_secs(60);

    let result = relay.get_signed_warp_message(&message, config).await;

    assert!(result.is_err(), "Expected timeout error");
    assert!(
        matches!(result.unwrap_err(), TeleporterError::SignatureTimeout),
        "Expected SignatureTimeout error"
    );

    assert_eq!(
        fake_clock.sleep_count(),
        5,
        "Should have slept max_attempts times"
    );

    assert_eq!(
        fake_clock.total_sleep_time(),
        Duration::from_secs(config.total_timeout_secs()),
        "Total sleep time should match poll_interval * max_attempts"
    );

    assert_eq!(
        fake_aggregator.get_call_count(message.id()),
        5,
        "Should have called the aggregator max_attempts times"
    );
}

#[tokio::test]
async fn test_signature_state_progression() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(2);
    let expected = signed_bytes(&message);

    fake_aggregator.add_response_sequence(
        message.id(),
        vec![
            SignatureResponse {
                status: SignatureStatus::Pending,
                signed_message: None,
            },
            SignatureResponse {
                status: SignatureStatus::Pending,
                signed_message: None,
            },
            SignatureResponse {
                status: SignatureStatus::Complete,
                signed_message: Some(Bytes::from(expected.clone())),
            },
        ],
    );

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator.clone(),
        fake_clock.clone(),
    );

    let config = PollingConfig::default()
        .with_max_attempts(10)
        .with_poll_interval_secs(5);

    let result = relay.get_signed_warp_message(&message, config).await;

    assert!(result.is_ok(), "Should eventually complete");
    assert_eq!(result.unwrap(), expected, "Should return the signed bytes");

    assert_eq!(
        fake_aggregator.get_call_count(message.id()),
        3,
        "Should progress through 3 states: Pending → Pending → Complete"
    );

    assert_eq!(
        fake_clock.sleep_count(),
        2,
        "Should sleep twice (once after each pending response)"
    );

    assert_eq!(
        fake_clock.total_sleep_time(),
        Duration::from_secs(10),
        "Should have slept for 2 * 5 seconds"
    );
}

#[tokio::test]
async fn test_signature_failed_status() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(3);

    fake_aggregator.add_failed_response(message.id());

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator.clone(),
        fake_clock.clone(),
    );

    let result = relay
        .get_signed_warp_message(&message, PollingConfig::local_network())
        .await;

    assert!(result.is_err(), "Should return error for failed aggregation");
    assert!(
        matches!(result.unwrap_err(), TeleporterError::SignatureFailed { .. }),
        "Should return SignatureFailed error"
    );

    assert_eq!(
        fake_aggregator.get_call_count(message.id()),
        1,
        "Should only call once before failing"
    );

    assert_eq!(
        fake_clock.sleep_count(),
        0,
        "Should not sleep if failed immediately"
    );
}

#[tokio::test]
async fn test_signature_immediate_success() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(4);
    let expected = signed_bytes(&message);

    fake_aggregator.add_complete_response(message.id(), &expected);

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator.clone(),
        fake_clock.clone(),
    );

    let result = relay
        .get_signed_warp_message(&message, PollingConfig::default())
        .await;

    assert!(result.is_ok(), "Should succeed immediately");
    assert_eq!(result.unwrap(), expected);

    assert_eq!(
        fake_aggregator.get_call_count(message.id()),
        1,
        "Should only call once for immediate success"
    );

    assert_eq!(
        fake_clock.sleep_count(),
        0,
        "Should not sleep if successful immediately"
    );
}

#[tokio::test]
async fn test_signature_not_found_then_timeout() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(5);

    // No response configured - the aggregator 404s on every call

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator,
        fake_clock.clone(),
    );

    let config = PollingConfig::default()
        .with_max_attempts(5)
        .with_poll_interval_secs(10);

    let result = relay.get_signed_warp_message(&message, config).await;

    assert!(
        result.is_err(),
        "Should timeout when the signature never appears"
    );

    let err = result.unwrap_err();
    assert!(
        matches!(err, TeleporterError::SignatureTimeout),
        "Should return timeout error after max attempts with 404s, got: {:?}",
        err
    );

    assert_eq!(
        fake_clock.sleep_count(),
        5,
        "Should sleep after each 404 response"
    );

    assert_eq!(
        fake_clock.total_sleep_time(),
        Duration::from_secs(50),
        "Should have slept for 5 * 10 seconds"
    );
}

#[tokio::test]
async fn test_mismatched_signature_rejected() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(6);
    let other = unsigned_message(7);

    // Complete response, but the signed bytes belong to a different message.
    fake_aggregator.add_complete_response(message.id(), &signed_bytes(&other));

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator,
        fake_clock,
    );

    let result = relay
        .get_signed_warp_message(&message, PollingConfig::default())
        .await;

    assert!(
        matches!(
            result.unwrap_err(),
            TeleporterError::SignatureFailed { .. }
        ),
        "A signature over the wrong message must not be accepted"
    );
}

#[tokio::test]
async fn test_malformed_signed_message_rejected() {
    let fake_aggregator = FakeAggregator::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(8);

    fake_aggregator.add_complete_response(message.id(), &[0x01, 0x02, 0x03]);

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        fake_aggregator,
        fake_clock,
    );

    let result = relay
        .get_signed_warp_message(&message, PollingConfig::default())
        .await;

    assert!(
        matches!(
            result.unwrap_err(),
            TeleporterError::InvalidWarpMessage { .. }
        ),
        "Bytes that do not parse as a signed Warp message must be rejected"
    );
}

#[tokio::test]
async fn test_transaction_not_found() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([3u8; 32]);

    fake_blockchain.add_not_found(tx_hash);

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let result = relay.get_send_cross_chain_message_event(tx_hash).await;

    assert!(
        result.is_err(),
        "Should return error for missing transaction"
    );
    assert!(
        matches!(
            result.unwrap_err(),
            TeleporterError::TransactionFailed { .. }
        ),
        "Should return TransactionFailed error"
    );
}

#[tokio::test]
async fn test_warp_message_transaction_not_found() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([4u8; 32]);

    fake_blockchain.add_not_found(tx_hash);

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let result = relay.get_unsigned_warp_message(tx_hash).await;

    assert!(
        matches!(
            result.unwrap_err(),
            TeleporterError::TransactionFailed { .. }
        ),
        "Should return TransactionFailed error"
    );
}

#[tokio::test]
async fn test_provider_rpc_failure() {
    let fake_blockchain = FakeBlockchainProvider::new();
    let tx_hash = FixedBytes::from([8u8; 32]);

    fake_blockchain.add_failure(tx_hash);

    let relay = create_test_relay(fake_blockchain, FakeAggregator::new(), FakeClock::new());

    let result = relay.get_send_cross_chain_message_event(tx_hash).await;

    assert!(result.is_err(), "Should return error for RPC failure");
    assert!(
        matches!(result.unwrap_err(), TeleporterError::Provider(_)),
        "Should return Provider error"
    );
}

#[tokio::test]
async fn test_subnet_network_signs_with_current_validator_set() {
    let network = FakeSubnetNetwork::new();
    let fake_clock = FakeClock::new();
    let message = unsigned_message(9);

    let relay = create_test_relay(
        FakeBlockchainProvider::new(),
        network.clone(),
        fake_clock.clone(),
    );

    let signed = relay
        .get_signed_warp_message(&message, PollingConfig::local_network())
        .await
        .unwrap();

    assert!(
        network.deliver(&signed).unwrap(),
        "A freshly aggregated signature should verify"
    );
    assert!(network.message_received(message.id()));
    assert_eq!(fake_clock.sleep_count(), 0);
}
