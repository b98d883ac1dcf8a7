//! Polling the signature-aggregation service for a signed Warp message.
//!
//! Shows how to configure [`AggregatorClient`] and pick a [`PollingConfig`]
//! for the target network. The final request only succeeds against a running
//! aggregation service; point `AGGREGATOR_URL` at one to see a live poll.
//!
//! Run with: `cargo run --example aggregator_polling`

use alloy_primitives::{hex, Bytes, FixedBytes};
use teleporter_rs::providers::AggregatorClient;
use teleporter_rs::{
    PollingConfig, SignatureAggregator, TeleporterError, UnsignedWarpMessage, LOCAL_NETWORK_ID,
};

#[tokio::main]
async fn main() -> Result<(), TeleporterError> {
    tracing_subscriber::fmt::init();

    println!("✍️  Warp Signature Aggregation Example");
    println!("=====================================\n");

    // Step 1: Configure the client. The signing subnet pin and quorum
    // override are optional; without them the service resolves the subnet
    // from the message's source chain id and uses the default quorum.
    println!("1️⃣ Configuring the aggregator client...");
    let base_url =
        std::env::var("AGGREGATOR_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let aggregator = AggregatorClient::new(&base_url)
        .with_signing_subnet(FixedBytes::from([0x0a; 32]))
        .with_quorum_percentage(67);
    println!("   Service URL: {base_url}");

    // Step 2: Pick a polling budget. Local networks sign within a second or
    // two; public networks need a longer leash.
    println!("\n2️⃣ Polling budgets:");
    let local = PollingConfig::local_network();
    let public = PollingConfig::default();
    println!(
        "   local_network: {} attempts x {}s = up to {}s",
        local.max_attempts,
        local.poll_interval_secs,
        local.total_timeout_secs()
    );
    println!(
        "   default:       {} attempts x {}s = up to {}s",
        public.max_attempts,
        public.poll_interval_secs,
        public.total_timeout_secs()
    );

    // Step 3: The unsigned Warp message to aggregate over. In production
    // this comes from `Teleporter::get_unsigned_warp_message(tx_hash)`.
    println!("\n3️⃣ Requesting a signature...");
    let message = UnsignedWarpMessage::new(
        LOCAL_NETWORK_ID,
        FixedBytes::from([0x0a; 32]),
        Bytes::from(vec![0x42; 64]),
    );
    println!("   Warp message id: 0x{}", hex::encode(message.id()));

    match aggregator.get_signature(&message).await {
        Ok(response) => {
            println!("   Status: {:?}", response.status);
            if let Some(signed) = response.signed_message {
                println!("   Signed message: {} bytes", signed.len());
            }
        }
        Err(TeleporterError::SignatureNotFound) => {
            println!("   Service has not seen this message yet; a relayer would keep polling.");
        }
        Err(TeleporterError::RateLimitExceeded {
            retry_after_seconds,
        }) => {
            println!("   Rate limited; retry after {retry_after_seconds}s.");
        }
        Err(e) => {
            println!("   Request failed: {e}");
            println!("   (expected when no aggregation service is running at {base_url})");
        }
    }

    Ok(())
}
