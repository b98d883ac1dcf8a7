//! End-to-end walkthrough of relaying a Teleporter message, run against the
//! in-memory fakes so it needs no running subnet.
//!
//! The flow mirrors production: aggregate a BLS signature over the Warp
//! message, build the delivery transaction with the predicate access list,
//! and deliver. A validator churn step in the middle shows why relayers must
//! re-aggregate stale signatures.
//!
//! Run with: `cargo run --example relay_walkthrough`

use alloy_primitives::{address, hex, Bytes, FixedBytes};
use alloy_provider::ProviderBuilder;
use teleporter_rs::testing::{FakeBlockchainProvider, FakeClock, FakeSubnetNetwork};
use teleporter_rs::{
    PollingConfig, SubnetReceiptAdapter, Teleporter, TeleporterError, TeleporterMessengerContract,
    UnsignedWarpMessage, LOCAL_NETWORK_ID, TELEPORTER_MESSENGER_ADDRESS,
};

#[tokio::main]
async fn main() -> Result<(), TeleporterError> {
    tracing_subscriber::fmt::init();

    println!("🌉 Teleporter Relay Walkthrough - Subnet A to Subnet B");
    println!("======================================================\n");

    let subnet_a_id = FixedBytes::from([0x0a; 32]);
    let subnet_b_id = FixedBytes::from([0x0b; 32]);

    // Step 1: Set up the relay over the fakes. FakeSubnetNetwork plays both
    // the signature-aggregation service and subnet B's Warp verifier.
    println!("1️⃣ Setting up the relay...");
    let network = FakeSubnetNetwork::new();
    let relay = Teleporter::builder()
        .source_blockchain_id(subnet_a_id)
        .destination_blockchain_id(subnet_b_id)
        .source_provider(FakeBlockchainProvider::new())
        .destination_provider(FakeBlockchainProvider::new())
        .signature_aggregator(network.clone())
        .clock(FakeClock::new())
        .receipt_adapter(SubnetReceiptAdapter)
        .build();
    println!("   Source blockchain:      {}", relay.source_blockchain_id());
    println!(
        "   Destination blockchain: {}",
        relay.destination_blockchain_id()
    );
    println!("   Messenger address:      {}", relay.messenger_address());

    // Step 2: The Warp message subnet A emitted for a Teleporter send. In
    // production this comes from `relay.get_unsigned_warp_message(tx_hash)`.
    println!("\n2️⃣ Warp message from the send transaction...");
    let warp_message = UnsignedWarpMessage::new(
        LOCAL_NETWORK_ID,
        subnet_a_id,
        Bytes::from(vec![0x42; 64]),
    );
    println!("   Warp message id: 0x{}", hex::encode(warp_message.id()));

    // Step 3: Aggregate a signature from subnet A's validators.
    println!("\n3️⃣ Aggregating signature...");
    let signed = relay
        .get_signed_warp_message(&warp_message, PollingConfig::local_network())
        .await?;
    println!("   Signed message: {} bytes", signed.len());

    // Step 4: Churn the validator set, then show the stale signature no
    // longer verifies.
    println!("\n4️⃣ Churning subnet A's validator set...");
    for _ in 0..5 {
        network.add_validator();
    }
    println!(
        "   Validator set version is now {}",
        network.validator_set_version()
    );
    let delivered = network.deliver(&signed)?;
    println!("   Stale delivery accepted: {delivered} (expected: false)");

    // Step 5: Re-aggregate with the current set and build the delivery
    // transaction. The signed message travels as access-list storage keys
    // under the Warp precompile, not in calldata.
    println!("\n5️⃣ Re-aggregating and building the delivery transaction...");
    let fresh = relay
        .get_signed_warp_message(&warp_message, PollingConfig::local_network())
        .await?;

    let provider = ProviderBuilder::new()
        .connect_http("http://localhost:9650/ext/bc/B/rpc".parse().unwrap());
    let messenger =
        TeleporterMessengerContract::new(TELEPORTER_MESSENGER_ADDRESS, provider);
    let relayer = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
    let delivery_tx =
        messenger.receive_cross_chain_message_transaction(relayer, 0, relayer, &fresh);
    let access_list = delivery_tx.access_list.as_ref().unwrap();
    println!(
        "   Delivery tx carries {} predicate storage keys at {}",
        access_list.0[0].storage_keys.len(),
        access_list.0[0].address
    );

    // Step 6: Deliver with the fresh signature.
    println!("\n6️⃣ Delivering...");
    let delivered = network.deliver(&fresh)?;
    println!("   Delivery accepted: {delivered}");
    println!(
        "   Message received on subnet B: {}",
        network.message_received(warp_message.id())
    );

    println!("\n✅ Relay complete");
    Ok(())
}
