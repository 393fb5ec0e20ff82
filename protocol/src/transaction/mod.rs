//! # Transaction Module
//!
//! Typed transactions: construction, wire encoding, decoding and the
//! signature lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        Tag table, field layouts and small enums
//! validation.rs   Per-field validation of field-map input
//! signature.rs    (v, r, s) triplets and signature lists
//! common.rs       Fields shared by every variant, plus fee delegation
//! body.rs         Variant-specific payloads
//! variant.rs      The Transaction value, its accessors and field map
//! encoding.rs     Signable and broadcast forms, hashes, decoding
//! signing.rs      Appending and merging signatures
//! registry.rs     Decoding by leading tag
//! builder.rs      Fluent TransactionBuilder
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** with [`TransactionBuilder`] or [`Transaction::from_json`].
//! 2. **Sign** externally over [`Transaction::signing_hash`] and hand the
//!    triplet back with [`Transaction::append_signatures`].
//! 3. **Fee payer** does the same with [`SignerRole::FeePayer`].
//! 4. **Broadcast** [`Transaction::raw_transaction`].
//! 5. **Decode** anything received with [`decode_raw`] / [`decode_any`].

pub mod body;
pub mod builder;
pub mod common;
pub mod encoding;
pub mod error;
pub mod registry;
pub mod signature;
pub mod signing;
pub mod types;
pub mod validation;
pub mod variant;

pub use body::TxBody;
pub use builder::TransactionBuilder;
pub use common::{CommonFields, FeeDelegation};
pub use error::TxError;
pub use registry::{decode_any, decode_raw, lookup_name, lookup_tag};
pub use signature::SignatureData;
pub use types::{
    Address, CodeFormat, FeeMode, Field, Recipient, SignerRole, SigningState, TxKind, TxType,
    TX_TYPES,
};
pub use variant::Transaction;
