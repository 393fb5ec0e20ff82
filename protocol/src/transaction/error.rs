//! Error types for transaction construction, encoding and decoding.
//!
//! Every fallible operation in [`crate::transaction`] returns a
//! [`TxError`]. Nothing is retried and nothing is silently coerced: a
//! failure never leaves a partially populated transaction behind.

use thiserror::Error;

use super::types::TxType;
use crate::codec::CodecError;

/// Errors raised while building, mutating, encoding or decoding a
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// A field value failed validation (bad address, non-hex input,
    /// wrong JSON type, out-of-range number, ...).
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Field-map key of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A field that this variant requires was not supplied.
    #[error("missing {field} for {tx_type}")]
    MissingField {
        field: &'static str,
        tx_type: TxType,
    },

    /// A field was supplied that this variant does not carry.
    #[error("{field} is not a field of {tx_type}")]
    UnsupportedField { field: String, tx_type: TxType },

    /// Two aliased names for the same field were both supplied.
    #[error("{first} and {second} cannot be supplied together")]
    MutuallyExclusive {
        first: &'static str,
        second: &'static str,
    },

    /// The leading tag belongs to a different variant than the one asked for.
    #[error(
        "cannot decode as {expected}: expected tag {expected_tag:#04x}, found {found_tag:#04x} ({found}) in {bytes}"
    )]
    TypeMismatch {
        expected: TxType,
        expected_tag: u8,
        found_tag: u8,
        /// Name of the variant owning `found_tag`, or `unknown`.
        found: String,
        /// Hex of the offending input.
        bytes: String,
    },

    /// No variant owns this leading tag.
    #[error("unrecognized type tag {tag:#04x}")]
    UnknownTypeTag { tag: u8 },

    /// No variant is known by this name.
    #[error("unknown transaction type name: {0}")]
    UnknownTypeName(String),

    /// There were no bytes to decode.
    #[error("empty transaction encoding")]
    EmptyInput,

    /// The payload after the tag does not match the variant's layout.
    #[error("malformed {tx_type} encoding: {reason}")]
    Decode { tx_type: TxType, reason: String },

    /// The RLP structure itself is broken.
    #[error("rlp error: {0}")]
    Codec(#[from] CodecError),

    /// An encoding was requested before a mandatory field was set.
    #[error("{field} must be set before {operation}")]
    MissingPrecondition {
        field: &'static str,
        operation: &'static str,
    },

    /// A fee-payer operation was requested on a variant without a fee payer.
    #[error("{tx_type} is not fee-delegated")]
    NotFeeDelegated { tx_type: TxType },

    /// Raw transactions handed to a merge describe different transactions.
    #[error("cannot combine transactions: {0}")]
    CombineMismatch(String),
}

impl TxError {
    /// Shorthand for [`TxError::InvalidField`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TxError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
