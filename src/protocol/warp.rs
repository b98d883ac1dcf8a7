//! Warp message wire format.
//!
//! A Warp message is the delivery proof for cross-subnet messages: the source
//! chain's validators sign the payload with BLS keys, and the destination
//! chain's Warp precompile verifies the aggregate signature against the
//! source subnet's current validator set.
//!
//! # Format
//!
//! Unsigned message:
//!
//! - codecVersion: uint16 (2 bytes)
//! - networkID: uint32 (4 bytes)
//! - sourceChainID: bytes32 (32 bytes)
//! - payload: uint32 length prefix + bytes
//!
//! Signed message appends a signature envelope:
//!
//! - signature type id: uint32 (0 = bit-set signature)
//! - signers: uint32 length prefix + bytes (validator bit set)
//! - signature: 96 bytes (BLS aggregate)

use alloy_primitives::{keccak256, Bytes, FixedBytes};
use alloy_rpc_types::{AccessList, AccessListItem};

use crate::error::{Result, TeleporterError};
use crate::subnet::WARP_PRECOMPILE_ADDRESS;

/// Warp codec version in use.
pub const CODEC_VERSION: u16 = 0;

/// Type id of the bit-set signature envelope.
pub const BIT_SET_SIGNATURE_TYPE_ID: u32 = 0;

/// Size of a BLS aggregate signature in bytes.
pub const BLS_SIGNATURE_SIZE: usize = 96;

/// Byte appended to predicate bytes before zero-padding, so that trailing
/// zeros of the payload survive the access-list transport.
pub const PREDICATE_DELIMITER: u8 = 0xff;

/// An unsigned Warp message as emitted by the Warp precompile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedWarpMessage {
    /// Avalanche network the message belongs to.
    pub network_id: u32,
    /// Blockchain id of the chain that emitted the message.
    pub source_chain_id: FixedBytes<32>,
    /// Opaque payload, a Teleporter message in this SDK's case.
    pub payload: Bytes,
}

impl UnsignedWarpMessage {
    /// Fixed-size prefix before the length-prefixed payload.
    const HEADER_SIZE: usize = 2 + 4 + 32 + 4;

    pub fn new(network_id: u32, source_chain_id: FixedBytes<32>, payload: Bytes) -> Self {
        Self {
            network_id,
            source_chain_id,
            payload,
        }
    }

    /// Identifier of this message, used as the aggregation lookup key.
    pub fn id(&self) -> FixedBytes<32> {
        keccak256(self.encode())
    }

    /// Encodes the unsigned message to its wire representation.
    pub fn encode(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(Self::HEADER_SIZE + self.payload.len());

        bytes.extend_from_slice(&CODEC_VERSION.to_be_bytes());
        bytes.extend_from_slice(&self.network_id.to_be_bytes());
        bytes.extend_from_slice(self.source_chain_id.as_slice());
        bytes.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&self.payload);

        Bytes::from(bytes)
    }

    /// Decodes an unsigned message, requiring the buffer to be fully consumed.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (message, consumed) = Self::decode_prefix(bytes)?;
        if consumed != bytes.len() {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!("{} trailing bytes after payload", bytes.len() - consumed),
            });
        }
        Ok(message)
    }

    /// Decodes an unsigned message from the front of a buffer, returning the
    /// number of bytes consumed. Used when parsing the signed envelope.
    fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < Self::HEADER_SIZE {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!(
                    "message too short: {} bytes, need at least {}",
                    bytes.len(),
                    Self::HEADER_SIZE
                ),
            });
        }

        let codec_version = u16::from_be_bytes([bytes[0], bytes[1]]);
        if codec_version != CODEC_VERSION {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!("unsupported codec version {codec_version}"),
            });
        }

        let network_id = u32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]);
        let source_chain_id = FixedBytes::from_slice(&bytes[6..38]);

        let payload_len =
            u32::from_be_bytes([bytes[38], bytes[39], bytes[40], bytes[41]]) as usize;
        let end = Self::HEADER_SIZE + payload_len;
        if bytes.len() < end {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!(
                    "payload truncated: header declares {} bytes, {} available",
                    payload_len,
                    bytes.len() - Self::HEADER_SIZE
                ),
            });
        }
        let payload = Bytes::copy_from_slice(&bytes[Self::HEADER_SIZE..end]);

        Ok((
            Self {
                network_id,
                source_chain_id,
                payload,
            },
            end,
        ))
    }
}

/// BLS aggregate signature plus the bit set naming which validators signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSetSignature {
    /// Bit set over the source subnet's canonical validator ordering.
    pub signers: Bytes,
    /// Aggregate BLS signature over the unsigned message bytes.
    pub signature: FixedBytes<BLS_SIGNATURE_SIZE>,
}

impl BitSetSignature {
    pub fn new(signers: Bytes, signature: FixedBytes<BLS_SIGNATURE_SIZE>) -> Self {
        Self { signers, signature }
    }
}

/// A Warp message together with its aggregate signature, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedWarpMessage {
    pub unsigned: UnsignedWarpMessage,
    pub signature: BitSetSignature,
}

impl SignedWarpMessage {
    pub fn new(unsigned: UnsignedWarpMessage, signature: BitSetSignature) -> Self {
        Self {
            unsigned,
            signature,
        }
    }

    /// Encodes the signed message to its wire representation.
    pub fn encode(&self) -> Bytes {
        let unsigned = self.unsigned.encode();
        let mut bytes =
            Vec::with_capacity(unsigned.len() + 8 + self.signature.signers.len() + BLS_SIGNATURE_SIZE);

        bytes.extend_from_slice(&unsigned);
        bytes.extend_from_slice(&BIT_SET_SIGNATURE_TYPE_ID.to_be_bytes());
        bytes.extend_from_slice(&(self.signature.signers.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&self.signature.signers);
        bytes.extend_from_slice(self.signature.signature.as_slice());

        Bytes::from(bytes)
    }

    /// Decodes a signed message, rejecting unknown signature envelopes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (unsigned, consumed) = UnsignedWarpMessage::decode_prefix(bytes)?;
        let rest = &bytes[consumed..];

        if rest.len() < 8 {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: "signature envelope truncated".to_string(),
            });
        }

        let type_id = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]);
        if type_id != BIT_SET_SIGNATURE_TYPE_ID {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!("unknown signature type id {type_id}"),
            });
        }

        let signers_len = u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
        let expected = 8 + signers_len + BLS_SIGNATURE_SIZE;
        if rest.len() != expected {
            return Err(TeleporterError::InvalidWarpMessage {
                reason: format!(
                    "signature envelope length mismatch: expected {expected} bytes, got {}",
                    rest.len()
                ),
            });
        }

        let signers = Bytes::copy_from_slice(&rest[8..8 + signers_len]);
        let signature = FixedBytes::from_slice(&rest[8 + signers_len..]);

        Ok(Self {
            unsigned,
            signature: BitSetSignature { signers, signature },
        })
    }
}

/// Packs signed-message bytes into predicate form: a delimiter byte followed
/// by zero padding up to a 32-byte multiple.
pub fn pack_predicate(signed_message: &[u8]) -> Bytes {
    let unpadded = signed_message.len() + 1;
    let padded = unpadded.div_ceil(32) * 32;

    let mut bytes = Vec::with_capacity(padded);
    bytes.extend_from_slice(signed_message);
    bytes.push(PREDICATE_DELIMITER);
    bytes.resize(padded, 0);

    Bytes::from(bytes)
}

/// Inverse of [`pack_predicate`]: strips the zero padding and delimiter,
/// rejecting inputs that were not produced by predicate packing.
pub fn unpack_predicate(predicate: &[u8]) -> Result<Bytes> {
    if predicate.is_empty() || predicate.len() % 32 != 0 {
        return Err(TeleporterError::InvalidPredicate {
            reason: format!("length {} is not a non-zero multiple of 32", predicate.len()),
        });
    }

    let trimmed = match predicate.iter().rposition(|&b| b != 0) {
        Some(i) => &predicate[..=i],
        None => {
            return Err(TeleporterError::InvalidPredicate {
                reason: "all-zero predicate".to_string(),
            })
        }
    };

    match trimmed.split_last() {
        Some((&PREDICATE_DELIMITER, message)) => Ok(Bytes::copy_from_slice(message)),
        _ => Err(TeleporterError::InvalidPredicate {
            reason: "missing delimiter before padding".to_string(),
        }),
    }
}

/// Splits predicate bytes into the 32-byte storage keys carried in the
/// delivery transaction's access list.
pub fn predicate_storage_keys(predicate: &[u8]) -> Vec<FixedBytes<32>> {
    predicate
        .chunks(32)
        .map(FixedBytes::from_slice)
        .collect()
}

/// Builds the access list that carries a signed Warp message to the
/// destination chain's Warp precompile.
pub fn warp_access_list(signed_message: &[u8]) -> AccessList {
    let predicate = pack_predicate(signed_message);
    AccessList(vec![AccessListItem {
        address: WARP_PRECOMPILE_ADDRESS,
        storage_keys: predicate_storage_keys(&predicate),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_unsigned() -> UnsignedWarpMessage {
        UnsignedWarpMessage::new(
            1337,
            FixedBytes::from([0x11u8; 32]),
            Bytes::from(vec![1, 2, 3, 4]),
        )
    }

    fn sample_signed() -> SignedWarpMessage {
        SignedWarpMessage::new(
            sample_unsigned(),
            BitSetSignature::new(
                Bytes::from(vec![0b0000_0111]),
                FixedBytes::from([0x22u8; 96]),
            ),
        )
    }

    #[test]
    fn test_unsigned_encode_decode() {
        let message = sample_unsigned();
        let encoded = message.encode();
        assert_eq!(encoded.len(), 42 + 4);

        let decoded = UnsignedWarpMessage::decode(&encoded).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_unsigned_decode_truncated() {
        let encoded = sample_unsigned().encode();
        let result = UnsignedWarpMessage::decode(&encoded[..encoded.len() - 1]);
        assert!(matches!(
            result.unwrap_err(),
            TeleporterError::InvalidWarpMessage { .. }
        ));
    }

    #[test]
    fn test_unsigned_decode_trailing_bytes() {
        let mut encoded = sample_unsigned().encode().to_vec();
        encoded.push(0);
        assert!(UnsignedWarpMessage::decode(&encoded).is_err());
    }

    #[test]
    fn test_unsigned_decode_bad_codec_version() {
        let mut encoded = sample_unsigned().encode().to_vec();
        encoded[0] = 0xff;
        let result = UnsignedWarpMessage::decode(&encoded);
        assert!(matches!(
            result.unwrap_err(),
            TeleporterError::InvalidWarpMessage { .. }
        ));
    }

    #[test]
    fn test_unsigned_empty_payload() {
        let message = UnsignedWarpMessage::new(1, FixedBytes::ZERO, Bytes::new());
        let decoded = UnsignedWarpMessage::decode(&message.encode()).unwrap();
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn test_message_id_changes_with_payload() {
        let a = sample_unsigned();
        let mut b = a.clone();
        b.payload = Bytes::from(vec![9, 9, 9]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_signed_encode_decode() {
        let message = sample_signed();
        let decoded = SignedWarpMessage::decode(&message.encode()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_signed_decode_unknown_signature_type() {
        let mut encoded = sample_signed().encode().to_vec();
        // Signature type id sits right after the unsigned message.
        let offset = sample_unsigned().encode().len();
        encoded[offset + 3] = 7;
        let result = SignedWarpMessage::decode(&encoded);
        assert!(matches!(
            result.unwrap_err(),
            TeleporterError::InvalidWarpMessage { .. }
        ));
    }

    #[test]
    fn test_signed_decode_short_signature() {
        let encoded = sample_signed().encode();
        assert!(SignedWarpMessage::decode(&encoded[..encoded.len() - 10]).is_err());
    }

    #[test]
    fn test_pack_predicate_pads_to_32() {
        let packed = pack_predicate(&[0xaa; 5]);
        assert_eq!(packed.len(), 32);
        assert_eq!(packed[5], PREDICATE_DELIMITER);
        assert!(packed[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pack_predicate_exact_boundary() {
        // 31 payload bytes + delimiter fill a chunk exactly, no padding.
        let packed = pack_predicate(&[0xbb; 31]);
        assert_eq!(packed.len(), 32);
        assert_eq!(packed[31], PREDICATE_DELIMITER);

        // 32 payload bytes force a second chunk for the delimiter.
        let packed = pack_predicate(&[0xbb; 32]);
        assert_eq!(packed.len(), 64);
        assert_eq!(packed[32], PREDICATE_DELIMITER);
    }

    #[rstest]
    #[case(0, 32)]
    #[case(1, 32)]
    #[case(31, 32)]
    #[case(32, 64)]
    #[case(63, 64)]
    #[case(64, 96)]
    fn test_pack_predicate_lengths(#[case] message_len: usize, #[case] packed_len: usize) {
        let packed = pack_predicate(&vec![0xaa; message_len]);
        assert_eq!(packed.len(), packed_len);
        assert_eq!(packed[message_len], PREDICATE_DELIMITER);
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let message = sample_signed().encode();
        let packed = pack_predicate(&message);
        let unpacked = unpack_predicate(&packed).unwrap();
        assert_eq!(unpacked, message);
    }

    #[test]
    fn test_unpack_preserves_trailing_zeros() {
        let message = vec![1, 2, 3, 0, 0, 0];
        let unpacked = unpack_predicate(&pack_predicate(&message)).unwrap();
        assert_eq!(unpacked.to_vec(), message);
    }

    #[test]
    fn test_unpack_rejects_bad_length() {
        let result = unpack_predicate(&[0xff; 33]);
        assert!(matches!(
            result.unwrap_err(),
            TeleporterError::InvalidPredicate { .. }
        ));
        assert!(unpack_predicate(&[]).is_err());
    }

    #[test]
    fn test_unpack_rejects_missing_delimiter() {
        let mut bytes = vec![0u8; 32];
        bytes[31] = 0x01;
        assert!(unpack_predicate(&bytes).is_err());
    }

    #[test]
    fn test_unpack_rejects_all_zero() {
        assert!(unpack_predicate(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_warp_access_list_targets_precompile() {
        let list = warp_access_list(&sample_signed().encode());
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].address, WARP_PRECOMPILE_ADDRESS);

        let joined: Vec<u8> = list.0[0]
            .storage_keys
            .iter()
            .flat_map(|k| k.to_vec())
            .collect();
        assert_eq!(unpack_predicate(&joined).unwrap(), sample_signed().encode());
    }

    #[test]
    fn test_predicate_storage_keys() {
        let packed = pack_predicate(&[0xcc; 40]);
        let keys = predicate_storage_keys(&packed);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], FixedBytes::from([0xcc; 32]));
    }
}
