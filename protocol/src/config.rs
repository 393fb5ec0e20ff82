//! # Wire-Format Constants
//!
//! Every magic number in the transaction codec lives here. These values are
//! part of the wire contract with the network: changing one after release
//! silently changes transaction hashes, so they only ever get *added to*.
//!
//! The library has no runtime configuration. Anything that looks like a
//! knob (chain id, fee payer, gas price) is a per-transaction field, not a
//! process-wide setting.

// ---------------------------------------------------------------------------
// Addresses & Hashes
// ---------------------------------------------------------------------------

/// Account addresses are 20 bytes on the wire, 40 hex characters in text.
pub const ADDRESS_LENGTH: usize = 20;

/// Keccak-256 output length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Widest integer the codec accepts: a 256-bit unsigned value.
pub const MAX_UINT_BYTES: usize = 32;

/// Width of the 64-bit quantities (nonce, gas, chain id).
pub const MAX_U64_BYTES: usize = 8;

/// Text form of the empty-recipient sentinel used by contract deployment.
pub const EMPTY_RECIPIENT: &str = "0x";

// ---------------------------------------------------------------------------
// Codec Limits
// ---------------------------------------------------------------------------

/// Maximum list nesting the decoder will follow. Real transactions nest
/// three levels deep (envelope, signature list, triplet); anything beyond
/// this is hostile input.
pub const RLP_MAX_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// `v` of the placeholder signature written for an unsigned role.
/// The placeholder is `[0x01, 0x, 0x]`.
pub const EMPTY_SIGNATURE_V: u64 = 1;

// ---------------------------------------------------------------------------
// Variant Fields
// ---------------------------------------------------------------------------

/// Lowest fee ratio a fee payer can cover, in percent.
pub const MIN_FEE_RATIO: u8 = 1;

/// Highest fee ratio a fee payer can cover, in percent. 100 is expressed by
/// the plain fee-delegated variant instead.
pub const MAX_FEE_RATIO: u8 = 99;

/// One-byte flag written for `humanReadable = true`. `false` is the
/// canonical zero (the empty string).
pub const HUMAN_READABLE_FLAG: u8 = 0x01;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Chain id of the production network (Cypress).
pub const CHAIN_ID_MAINNET: u64 = 8217;

/// Chain id of the public test network (Baobab).
pub const CHAIN_ID_TESTNET: u64 = 1001;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
