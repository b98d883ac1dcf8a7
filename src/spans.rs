//! OpenTelemetry span helpers for Teleporter operations
//!
//! This module provides orthogonal span instrumentation following production
//! best practices: static span names, structured attributes, and separation
//! from business logic.
//!
//! # Usage
//!
//! These span helpers are used internally by the [`Teleporter`](crate::Teleporter)
//! implementation but are exposed publicly for advanced users who need custom
//! instrumentation or want to integrate with existing OpenTelemetry setups.
//!
//! # Example
//!
//! ```rust,no_run
//! use teleporter_rs::spans;
//! use alloy_primitives::FixedBytes;
//!
//! // Create a span for signature polling
//! let message_id = FixedBytes::from([0u8; 32]);
//! let span = spans::get_signed_warp_message_with_retry(
//!     &message_id,
//!     30,  // max attempts
//!     10,  // poll interval
//! );
//! let _guard = span.enter();
//! // Your custom aggregation logic here
//! ```

use alloy_primitives::{hex, Address, FixedBytes};
use tracing::Span;
use url::Url;

/// Create span for polling the signature-aggregation service with retry
/// logic.
///
/// Parent: Top-level relay operation span
/// Children: teleporter_rs.get_signature (multiple attempts)
#[inline]
pub fn get_signed_warp_message_with_retry(
    warp_message_id: &FixedBytes<32>,
    max_attempts: u32,
    poll_interval_secs: u64,
) -> Span {
    tracing::info_span!(
        "teleporter_rs.get_signed_warp_message_with_retry",
        warp_message_id = %hex::encode(warp_message_id),
        max_attempts = max_attempts,
        poll_interval_secs = poll_interval_secs,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a single signature-aggregation request.
///
/// The retry attempt counter lives in the polling loop above the
/// [`SignatureAggregator`](crate::SignatureAggregator) seam, so per-request
/// spans carry only the endpoint.
///
/// Parent: teleporter_rs.get_signed_warp_message_with_retry
/// Children: HTTP client request spans (from reqwest instrumentation)
#[inline]
pub fn get_signature(url: &Url) -> Span {
    tracing::debug_span!(
        "teleporter_rs.get_signature",
        url = %url,
    )
}

/// Create span for signature response processing.
///
/// Parent: teleporter_rs.get_signature
/// Children: None
#[inline]
pub fn process_signature_response(status_code: u16) -> Span {
    tracing::debug_span!(
        "teleporter_rs.process_signature_response",
        status_code = status_code,
    )
}

/// Create span for Teleporter send transaction creation.
///
/// Parent: Top-level relay operation span
/// Children: Contract call preparation spans
#[inline]
pub fn send_cross_chain_message(
    from_address: &Address,
    destination_blockchain_id: &FixedBytes<32>,
    destination_address: &Address,
) -> Span {
    tracing::info_span!(
        "teleporter_rs.send_cross_chain_message",
        from_address = %from_address,
        destination_blockchain_id = %destination_blockchain_id,
        destination_address = %destination_address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for delivery transaction creation on the destination chain.
///
/// Parent: Top-level relay operation span
/// Children: Contract interaction spans, RPC calls
#[inline]
pub fn receive_cross_chain_message(
    from_address: &Address,
    message_index: u32,
    signed_message_length: usize,
) -> Span {
    tracing::info_span!(
        "teleporter_rs.receive_cross_chain_message",
        from_address = %from_address,
        message_index = message_index,
        signed_message_length_bytes = signed_message_length,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: Optional error chain context
///
/// # Example
///
/// ```rust,no_run
/// use teleporter_rs::spans;
/// use teleporter_rs::TeleporterError;
///
/// # fn example() -> Result<(), TeleporterError> {
/// let span = tracing::info_span!("teleporter_rs.operation");
/// let _guard = span.enter();
///
/// let result = some_operation();
/// if let Err(ref e) = result {
///     spans::record_error(e);
/// }
/// result
/// # }
/// # fn some_operation() -> Result<(), TeleporterError> { Ok(()) }
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    // Record error chain if available
    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
///
/// This variant allows adding additional context fields to the error.
///
/// # Example
///
/// ```rust,no_run
/// use teleporter_rs::spans;
///
/// # fn example() {
/// let span = tracing::info_span!("teleporter_rs.operation");
/// let _guard = span.enter();
///
/// if let Err(e) = some_operation() {
///     spans::record_error_with_context(
///         "SignatureFailed",
///         &format!("Aggregation request failed: {}", e),
///         Some("Validator set may not have reached quorum"),
///     );
/// }
/// # }
/// # fn some_operation() -> Result<(), String> { Ok(()) }
/// ```
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
