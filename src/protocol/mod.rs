//! Teleporter protocol types and definitions
//!
//! This module contains protocol-level types shared by the relay client and
//! the contract wrappers: the Warp message wire codec, predicate packing for
//! the access-list transport, and the signature-aggregation API types.

mod signature;
mod warp;

pub use signature::{SignatureResponse, SignatureStatus, SignedMessageBytes};
pub use warp::{
    pack_predicate, predicate_storage_keys, unpack_predicate, warp_access_list, BitSetSignature,
    SignedWarpMessage, UnsignedWarpMessage, BIT_SET_SIGNATURE_TYPE_ID, BLS_SIGNATURE_SIZE,
    CODEC_VERSION, PREDICATE_DELIMITER,
};
