//! Production implementations of Teleporter trait abstractions.
//!
//! This module provides the "real" implementations of the traits defined in
//! [`crate::traits`] that interact with subnet RPC endpoints, the Warp
//! signature-aggregation service, and the system clock.
//!
//! Users building applications will typically use these providers, while
//! test code will implement custom fakes.

mod aggregator;
mod alloy;
mod tokio_clock;

pub use self::aggregator::{AggregatorClient, DEFAULT_QUORUM_PERCENTAGE, SIGNATURE_PATH};
pub use self::alloy::AlloyProvider;
pub use self::tokio_clock::TokioClock;
