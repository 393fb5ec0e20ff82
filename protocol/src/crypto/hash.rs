//! # Hashing Utilities
//!
//! Keccak-256 is the only hash the transaction layer needs: signing hashes,
//! transaction hashes and sender transaction hashes are all Keccak-256 of
//! an RLP encoding.
//!
//! Note that this is the original Keccak padding, *not* NIST SHA3-256. The
//! two produce different digests for the same input; the network uses
//! Keccak.

use primitive_types::H256;
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 digest of `data`.
///
/// # Example
///
/// ```
/// use klay_tx::crypto::keccak256;
///
/// let hash = keccak256(b"");
/// assert_eq!(
///     format!("{:x}", hash),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_slice(&hasher.finalize())
}

/// Hex-encode a digest with a `0x` prefix.
pub fn hash_to_hex(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
