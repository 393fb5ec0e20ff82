// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # klay-tx
//!
//! Typed transactions for Klaytn-style chains: build them from a field map,
//! produce the exact bytes a signer signs over and the bytes a node accepts
//! for broadcast, and decode those bytes back.
//!
//! Signing keys never enter this crate. A signer is handed a 32-byte
//! Keccak-256 digest and returns a `(v, r, s)` triplet.
//!
//! ## Architecture
//!
//! - **codec**: canonical RLP items on top of the `rlp` crate, with strict
//!   decoding (no trailing bytes, no non-minimal integers).
//! - **crypto**: Keccak-256 hashing.
//! - **transaction**: the variant table, field validation, wire forms,
//!   signature lists and tag-dispatched decoding.
//! - **config**: wire-format constants.
//!
//! ## Example
//!
//! ```rust
//! use klay_tx::transaction::{decode_raw, SignerRole, TransactionBuilder, TxType};
//!
//! let tx = TransactionBuilder::new(TxType::ValueTransfer)
//!     .nonce(0)
//!     .gas_price(25_000_000_000u64)
//!     .gas(21_000)
//!     .chain_id(1001)
//!     .from("0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b")
//!     .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
//!     .value(1)
//!     .build()?;
//!
//! let digest = tx.signing_hash(SignerRole::Sender)?;
//! assert_eq!(digest.as_bytes().len(), 32);
//!
//! let raw = tx.raw_transaction()?;
//! let decoded = decode_raw(&raw)?;
//! assert_eq!(decoded.raw_transaction()?, raw);
//! assert_eq!(decoded.chain_id(), None); // not part of the broadcast form
//! # Ok::<(), klay_tx::transaction::TxError>(())
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;
