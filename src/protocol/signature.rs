use alloy_primitives::{hex::FromHex, Bytes};
use serde::{Deserialize, Deserializer};

/// The wire bytes of a signed Warp message.
pub type SignedMessageBytes = Vec<u8>;

/// Response from the signature-aggregation service.
///
/// The service returns the aggregation status and, once enough validator
/// stake has signed, the hex-encoded signed Warp message. Hex strings are
/// accepted with or without the `0x` prefix.
///
/// **API quirk**: some aggregator deployments return the literal string
/// `"PENDING"` for the `signed-message` field instead of `null` while
/// signatures are still being collected. The deserializer treats that the
/// same as a missing field.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureResponse {
    pub status: SignatureStatus,
    #[serde(
        default,
        rename = "signed-message",
        deserialize_with = "deserialize_optional_bytes_or_pending"
    )]
    pub signed_message: Option<Bytes>,
}

/// Aggregation status reported by the service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    /// Quorum reached, `signed_message` is populated.
    Complete,
    /// Still collecting validator signatures.
    Pending,
    /// The message cannot reach quorum (for example, it references a chain
    /// the service does not track).
    Failed,
}

fn deserialize_optional_bytes_or_pending<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;

    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("pending") => Ok(None),
        Some(s) => {
            let bytes = Bytes::from_hex(s).map_err(serde::de::Error::custom)?;
            Ok(Some(bytes))
        }
    }
}
