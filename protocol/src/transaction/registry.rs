//! Tag-dispatched decoding.
//!
//! The set of variants is closed: [`TX_TYPES`](super::types::TX_TYPES) owns
//! every tag, and a tag nobody owns is an error rather than a fallback.

use super::error::TxError;
use super::types::TxType;
use super::validation::strip_hex_prefix;
use super::variant::Transaction;

/// Resolves a leading tag byte.
pub fn lookup_tag(tag: u8) -> Result<TxType, TxError> {
    TxType::from_tag(tag).ok_or(TxError::UnknownTypeTag { tag })
}

/// Resolves a canonical type name or its upper snake-case alias.
pub fn lookup_name(name: &str) -> Result<TxType, TxError> {
    TxType::from_name(name).ok_or_else(|| TxError::UnknownTypeName(name.to_string()))
}

/// Decodes a broadcast encoding of any known variant, dispatching on its
/// first byte.
pub fn decode_any(bytes: &[u8]) -> Result<Transaction, TxError> {
    let tag = *bytes.first().ok_or(TxError::EmptyInput)?;
    let tx_type = lookup_tag(tag)?;
    Transaction::decode_as(tx_type, bytes)
}

/// [`decode_any`] for hex text, with or without `0x`.
pub fn decode_raw(raw: &str) -> Result<Transaction, TxError> {
    let digits = strip_hex_prefix(raw.trim());
    if digits.is_empty() {
        return Err(TxError::EmptyInput);
    }
    let bytes = hex::decode(digits)
        .map_err(|e| TxError::invalid("rawTransaction", format!("not hex: {e}")))?;
    decode_any(&bytes)
}
