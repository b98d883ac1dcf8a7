//! # teleporter-rs
//!
//! A production-ready Rust SDK for Avalanche's Teleporter cross-chain
//! messaging protocol.
//!
//! This library provides a safe, ergonomic interface for sending, relaying,
//! and delivering Teleporter messages between Avalanche subnets, including
//! the Warp message wire codec, predicate packing for delivery transactions,
//! and a polling client for signature-aggregation services.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use teleporter_rs::{PollingConfig, SubnetReceiptAdapter, Teleporter, TeleporterError};
//! use teleporter_rs::providers::{AggregatorClient, AlloyProvider, TokioClock};
//! use alloy_primitives::FixedBytes;
//!
//! # async fn example() -> Result<(), TeleporterError> {
//! # use alloy_provider::ProviderBuilder;
//! // Set up providers and create the relay client
//! let subnet_a = ProviderBuilder::new().connect("http://localhost:9650/ext/bc/A/rpc").await?;
//! let subnet_b = ProviderBuilder::new().connect("http://localhost:9650/ext/bc/B/rpc").await?;
//!
//! let relay = Teleporter::builder()
//!     .source_blockchain_id(FixedBytes::from([1u8; 32]))
//!     .destination_blockchain_id(FixedBytes::from([2u8; 32]))
//!     .source_provider(AlloyProvider::new(subnet_a))
//!     .destination_provider(AlloyProvider::new(subnet_b))
//!     .signature_aggregator(AggregatorClient::new("http://localhost:8080"))
//!     .clock(TokioClock::new())
//!     .receipt_adapter(SubnetReceiptAdapter)
//!     .build();
//!
//! // Extract the Warp message from a send transaction, then get it signed
//! let send_tx_hash = FixedBytes::from([0u8; 32]);
//! let event = relay.get_send_cross_chain_message_event(send_tx_hash).await?;
//! let unsigned = relay.get_unsigned_warp_message(send_tx_hash).await?;
//! let signed = relay.get_signed_warp_message(&unsigned, PollingConfig::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Direct Contract Access
//!
//! For advanced use cases, you can use the contract wrappers directly:
//!
//! ```rust,no_run
//! use teleporter_rs::{TeleporterMessengerContract, TELEPORTER_MESSENGER_ADDRESS};
//! use alloy_provider::ProviderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect("http://localhost:9650/ext/bc/A/rpc").await?;
//!
//! // Create contract wrapper
//! let messenger = TeleporterMessengerContract::new(TELEPORTER_MESSENGER_ADDRESS, provider);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Type-safe contract interactions** using Alloy
//! - **Warp wire codec** for unsigned and signed messages, including
//!   predicate packing into access-list storage keys
//! - **Comprehensive error handling** with detailed error types
//! - **Builder pattern** for intuitive API usage
//! - **Trait-based I/O seams** so relays can be tested hermetically,
//!   including validator-churn scenarios
//!
//! ## Public API
//!
//! - [`Teleporter`] and [`PollingConfig`] - Core relay client and its polling knobs
//! - [`SignatureResponse`] and [`SignatureStatus`] - Aggregation service API types
//! - [`UnsignedWarpMessage`] and [`SignedWarpMessage`] - Warp wire codec
//! - [`TeleporterError`] and [`Result`] - Error types for error handling
//! - Contract wrappers for direct contract interaction:
//!   [`TeleporterMessengerContract`], [`TeleporterRegistryContract`],
//!   [`NativeTokenSourceContract`], [`NativeTokenDestinationContract`],
//!   [`WarpMessengerContract`]

mod contracts;
mod error;
mod protocol;
mod receipt_adapter;
mod subnet;
mod teleporter;
mod traits;

pub use contracts::{
    NativeTokenDestination, NativeTokenDestinationContract, NativeTokenSource,
    NativeTokenSourceContract, TeleporterMessenger, TeleporterMessengerContract,
    TeleporterRegistry, TeleporterRegistryContract, WarpMessenger, WarpMessengerContract,
};
pub use error::{Result, TeleporterError};
pub use protocol::{
    pack_predicate, predicate_storage_keys, unpack_predicate, warp_access_list, BitSetSignature,
    SignatureResponse, SignatureStatus, SignedMessageBytes, SignedWarpMessage,
    UnsignedWarpMessage, BIT_SET_SIGNATURE_TYPE_ID, BLS_SIGNATURE_SIZE, CODEC_VERSION,
    PREDICATE_DELIMITER,
};
pub use receipt_adapter::{ReceiptAdapter, SubnetReceiptAdapter};
pub use subnet::{
    parse_chain_id, SubnetInfo, LOCAL_NETWORK_ID, MAINNET_NETWORK_ID,
    TELEPORTER_MESSENGER_ADDRESS, WARP_PRECOMPILE_ADDRESS,
};
pub use teleporter::{PollingConfig, RelayParams, Teleporter};
pub use traits::{BlockchainProvider, Clock, SignatureAggregator};

// Production implementations of the relay traits
pub mod providers;

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fake implementations for hermetic testing
pub mod testing;
