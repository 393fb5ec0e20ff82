//! # Canonical RLP Codec
//!
//! The primitive layer under every transaction encoding: a recursive
//! length-prefixed list format where each item is either a byte string or a
//! nested list of items.
//!
//! Encoding goes through `rlp::RlpStream`, so headers always come out in
//! their shortest form. Decoding uses `rlp::Rlp` to read headers and then
//! adds the strictness the transaction layer needs on top:
//!
//! - the whole input must be consumed (no trailing bytes),
//! - a single byte below `0x80` must not carry a string header,
//! - list payloads must be exactly covered by their children,
//! - nesting is bounded by [`RLP_MAX_DEPTH`].
//!
//! Integers are big-endian with no leading zero byte; zero is the empty
//! string. [`RlpItem::uint`] and [`RlpItem::to_u64`] / [`RlpItem::to_u256`]
//! enforce that in both directions.

use primitive_types::{H160, U256};
use rlp::{Encodable, Rlp, RlpStream};
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, MAX_U64_BYTES, MAX_UINT_BYTES, RLP_MAX_DEPTH};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural failures while encoding or interpreting RLP data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Nothing to decode.
    #[error("empty rlp input")]
    Empty,

    /// A header is malformed or points past the end of the input.
    #[error("malformed rlp: {0}")]
    Malformed(#[from] rlp::DecoderError),

    /// Bytes remain after the top-level item.
    #[error("{0} trailing byte(s) after rlp item")]
    TrailingBytes(usize),

    /// A single byte below 0x80 was wrapped in a one-byte string header.
    #[error("non-canonical encoding of single byte 0x{0:02x}")]
    NonCanonicalByte(u8),

    /// A list was nested deeper than the decoder allows.
    #[error("rlp nesting deeper than {0} levels")]
    TooDeep(usize),

    /// A byte string was required but a list was found.
    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    /// A list was required but a byte string was found.
    #[error("expected a list, found a byte string")]
    ExpectedList,

    /// An integer carried a leading zero byte.
    #[error("integer has a leading zero byte")]
    LeadingZero,

    /// An integer does not fit the target width.
    #[error("integer of {len} bytes exceeds {max} bytes")]
    IntegerTooLarge { len: usize, max: usize },

    /// A list had the wrong number of children.
    #[error("expected a list of {expected} items, found {found}")]
    ItemCount { expected: usize, found: usize },

    /// A fixed-width value had the wrong length.
    #[error("expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// RlpItem
// ---------------------------------------------------------------------------

/// One decoded RLP item: a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// A byte string item.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(data.into())
    }

    /// The empty byte string (`0x80` on the wire). Also the canonical zero.
    pub fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// A list item.
    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// A 64-bit integer in minimal big-endian form.
    pub fn uint(value: u64) -> Self {
        RlpItem::Bytes(trim_leading_zeros(&value.to_be_bytes()).to_vec())
    }

    /// A 256-bit integer in minimal big-endian form.
    pub fn u256(value: U256) -> Self {
        let mut buf = [0u8; 32];
        value.to_big_endian(&mut buf);
        RlpItem::Bytes(trim_leading_zeros(&buf).to_vec())
    }

    /// A 20-byte address, always written at full width.
    pub fn address(address: &H160) -> Self {
        RlpItem::Bytes(address.as_bytes().to_vec())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Borrow the byte string, failing on a list.
    pub fn as_bytes(&self) -> Result<&[u8], CodecError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(CodecError::ExpectedBytes),
        }
    }

    /// Borrow the children, failing on a byte string.
    pub fn as_list(&self) -> Result<&[RlpItem], CodecError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(CodecError::ExpectedList),
        }
    }

    /// Interpret as a canonical integer of at most 8 bytes.
    pub fn to_u64(&self) -> Result<u64, CodecError> {
        let bytes = self.as_bytes()?;
        check_canonical_uint(bytes, MAX_U64_BYTES)?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// Interpret as a canonical integer of at most 32 bytes.
    pub fn to_u256(&self) -> Result<U256, CodecError> {
        let bytes = self.as_bytes()?;
        check_canonical_uint(bytes, MAX_UINT_BYTES)?;
        Ok(U256::from_big_endian(bytes))
    }

    /// Interpret as a full-width 20-byte address.
    pub fn to_address(&self) -> Result<H160, CodecError> {
        let bytes = self.as_bytes()?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(CodecError::InvalidLength {
                expected: ADDRESS_LENGTH,
                found: bytes.len(),
            });
        }
        Ok(H160::from_slice(bytes))
    }
}

impl Encodable for RlpItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            RlpItem::Bytes(data) => {
                s.append(data);
            }
            RlpItem::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    s.append(item);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes a single item.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    rlp::encode(item).to_vec()
}

/// Encodes `items` as one list.
pub fn encode_list(items: &[RlpItem]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(items.len());
    for item in items {
        stream.append(item);
    }
    stream.out().to_vec()
}

/// Strips leading zero bytes. An all-zero input becomes empty.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

fn check_canonical_uint(bytes: &[u8], max: usize) -> Result<(), CodecError> {
    if bytes.first() == Some(&0) {
        return Err(CodecError::LeadingZero);
    }
    if bytes.len() > max {
        return Err(CodecError::IntegerTooLarge {
            len: bytes.len(),
            max,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes exactly one item spanning the whole input.
pub fn decode(bytes: &[u8]) -> Result<RlpItem, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::Empty);
    }
    let (item, consumed) = decode_item(bytes, 0)?;
    if consumed != bytes.len() {
        return Err(CodecError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(item)
}

/// Decodes an input that must be a single list, returning its children.
pub fn decode_list(bytes: &[u8]) -> Result<Vec<RlpItem>, CodecError> {
    match decode(bytes)? {
        RlpItem::List(items) => Ok(items),
        RlpItem::Bytes(_) => Err(CodecError::ExpectedList),
    }
}

/// Decodes the item at the front of `bytes`, returning it with the number
/// of bytes it occupies.
fn decode_item(bytes: &[u8], depth: usize) -> Result<(RlpItem, usize), CodecError> {
    if depth > RLP_MAX_DEPTH {
        return Err(CodecError::TooDeep(RLP_MAX_DEPTH));
    }

    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info()?;
    let total = info.header_len + info.value_len;
    if total > bytes.len() {
        return Err(CodecError::Malformed(rlp::DecoderError::RlpIsTooShort));
    }
    let payload = &bytes[info.header_len..total];

    if rlp.is_data() {
        if info.header_len == 1 && info.value_len == 1 && payload[0] < 0x80 {
            return Err(CodecError::NonCanonicalByte(payload[0]));
        }
        return Ok((RlpItem::Bytes(payload.to_vec()), total));
    }

    let mut items = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (item, used) = decode_item(rest, depth + 1)?;
        items.push(item);
        rest = &rest[used..];
    }
    Ok((RlpItem::List(items), total))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
