use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeleporterError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Signature aggregation failed: {reason}")]
    SignatureFailed { reason: String },

    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Signature not available yet (will retry)")]
    SignatureNotFound,

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Invalid Warp message: {reason}")]
    InvalidWarpMessage { reason: String },

    #[error("Invalid predicate bytes: {reason}")]
    InvalidPredicate { reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Timeout waiting for aggregated signature")]
    SignatureTimeout,

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, TeleporterError>;
