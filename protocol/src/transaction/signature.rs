//! Signature values and signature lists.
//!
//! A signature is an opaque `(v, r, s)` triplet produced by an external
//! signer. This module only cares about its byte layout: each element is a
//! minimal-width integer, the triplet is a 3-item list, and a role's
//! signatures form a list of triplets.
//!
//! An unsigned role is written as the placeholder list `[[0x01, 0x, 0x]]`.
//! Placeholders and exact duplicates are dropped whenever a list is
//! decoded or appended to, so a decoded list only ever holds real
//! signatures in their original order.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::TxError;
use super::validation::parse_quantity;
use crate::codec::{self, CodecError, RlpItem};
use crate::config::EMPTY_SIGNATURE_V;

// ---------------------------------------------------------------------------
// SignatureData
// ---------------------------------------------------------------------------

/// One `(v, r, s)` signature.
///
/// Serialises to and from a `["0x..", "0x..", "0x.."]` triplet of hex
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[String; 3]", into = "[String; 3]")]
pub struct SignatureData {
    /// Recovery id folded with the chain id (`chainId * 2 + 35 + parity`).
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl SignatureData {
    pub fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// The `[0x01, 0x, 0x]` placeholder written for an unsigned role.
    pub fn empty() -> Self {
        Self {
            v: EMPTY_SIGNATURE_V,
            r: U256::zero(),
            s: U256::zero(),
        }
    }

    /// `true` for the placeholder.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Parses hex-string elements. Used for field-map input.
    pub fn from_hex(field: &'static str, v: &str, r: &str, s: &str) -> Result<Self, TxError> {
        let v = parse_quantity(field, v)?;
        if v > U256::from(u64::MAX) {
            return Err(TxError::invalid(field, "signature v exceeds 64 bits"));
        }
        Ok(Self {
            v: v.as_u64(),
            r: parse_quantity(field, r)?,
            s: parse_quantity(field, s)?,
        })
    }

    /// The triplet as a 3-item list of minimal-width integers.
    pub fn to_rlp_item(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(self.v),
            RlpItem::u256(self.r),
            RlpItem::u256(self.s),
        ])
    }

    /// Reads a triplet back from its list form.
    pub fn from_rlp_item(item: &RlpItem) -> Result<Self, CodecError> {
        match item.as_list()? {
            [v, r, s] => Ok(Self {
                v: v.to_u64()?,
                r: r.to_u256()?,
                s: s.to_u256()?,
            }),
            other => Err(CodecError::ItemCount {
                expected: 3,
                found: other.len(),
            }),
        }
    }

    /// Canonical byte encoding of this triplet.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(&self.to_rlp_item())
    }

    /// Decodes a triplet from its canonical byte encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::from_rlp_item(&codec::decode(bytes)?)
    }

    /// Hex strings `[v, r, s]`, each `0x`-prefixed and minimal.
    pub fn to_hex(&self) -> [String; 3] {
        [
            format!("{:#x}", self.v),
            format!("{:#x}", self.r),
            format!("{:#x}", self.s),
        ]
    }
}

impl fmt::Display for SignatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [v, r, s] = self.to_hex();
        write!(f, "[{v}, {r}, {s}]")
    }
}

impl From<SignatureData> for [String; 3] {
    fn from(sig: SignatureData) -> Self {
        sig.to_hex()
    }
}

impl TryFrom<[String; 3]> for SignatureData {
    type Error = TxError;

    fn try_from(parts: [String; 3]) -> Result<Self, Self::Error> {
        let [v, r, s] = parts;
        Self::from_hex("signatures", &v, &r, &s)
    }
}

// ---------------------------------------------------------------------------
// Signature lists
// ---------------------------------------------------------------------------

/// Drops placeholders and exact duplicates, keeping first-seen order.
pub fn refine_signatures(signatures: impl IntoIterator<Item = SignatureData>) -> Vec<SignatureData> {
    let mut refined: Vec<SignatureData> = Vec::new();
    for sig in signatures {
        if sig.is_empty() {
            continue;
        }
        if refined.contains(&sig) {
            tracing::warn!(signature = %sig, "dropping duplicate signature");
            continue;
        }
        refined.push(sig);
    }
    refined
}

/// Encodes a role's signature list, writing the placeholder when empty.
pub fn encode_signatures(signatures: &[SignatureData]) -> RlpItem {
    if signatures.is_empty() {
        return RlpItem::list(vec![SignatureData::empty().to_rlp_item()]);
    }
    RlpItem::list(signatures.iter().map(SignatureData::to_rlp_item).collect())
}

/// JSON form of a signature list: an array of `[v, r, s]` hex triplets.
pub fn signatures_to_value(signatures: &[SignatureData]) -> serde_json::Value {
    serde_json::Value::Array(
        signatures
            .iter()
            .map(|sig| {
                serde_json::Value::Array(
                    sig.to_hex().into_iter().map(serde_json::Value::String).collect(),
                )
            })
            .collect(),
    )
}

/// Decodes a role's signature list and refines it.
pub fn decode_signatures(item: &RlpItem) -> Result<Vec<SignatureData>, CodecError> {
    let decoded = item
        .as_list()?
        .iter()
        .map(SignatureData::from_rlp_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(refine_signatures(decoded))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
