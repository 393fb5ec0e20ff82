//! # Cryptographic Primitives
//!
//! Hashing only. This crate never touches private keys: signatures arrive
//! from an external signer as `(v, r, s)` triplets and are stored as opaque
//! values (see [`crate::transaction::signature`]).

pub mod hash;

pub use hash::{hash_to_hex, keccak256};
