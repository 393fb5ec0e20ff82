//! Per-field validation and normalisation.
//!
//! One pure function per field kind. Each takes the raw value as it arrives
//! in a field map (`serde_json::Value`) and returns either the normalised
//! typed value or a [`TxError::InvalidField`] naming the field. Numbers may
//! be JSON integers, decimal strings or `0x` hex strings; everything else is
//! rejected rather than coerced.

use primitive_types::U256;
use serde_json::Value;

use super::error::TxError;
use super::signature::SignatureData;
use super::types::{Address, CodeFormat, Recipient};
use crate::codec::trim_leading_zeros;
use crate::config::{
    ADDRESS_LENGTH, EMPTY_RECIPIENT, MAX_FEE_RATIO, MAX_UINT_BYTES, MIN_FEE_RATIO,
};

/// Strips a leading `0x` / `0X`, if any.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Parses a `0x` hex or decimal string into a 256-bit quantity.
///
/// `"0x"` on its own is zero. Leading zeros are accepted on input and
/// disappear in the normalised value.
pub fn parse_quantity(field: &'static str, text: &str) -> Result<U256, TxError> {
    if text.is_empty() {
        return Err(TxError::invalid(field, "empty string"));
    }

    if text.starts_with("0x") || text.starts_with("0X") {
        let digits = strip_hex_prefix(text);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TxError::invalid(field, format!("not a hex number: {text}")));
        }
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded)
            .map_err(|e| TxError::invalid(field, format!("hex decode failed: {e}")))?;
        let bytes = trim_leading_zeros(&bytes);
        if bytes.len() > MAX_UINT_BYTES {
            return Err(TxError::invalid(field, "exceeds 256 bits"));
        }
        return Ok(U256::from_big_endian(bytes));
    }

    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(TxError::invalid(
            field,
            format!("not a decimal or 0x-prefixed hex number: {text}"),
        ));
    }
    U256::from_dec_str(text).map_err(|_| TxError::invalid(field, "exceeds 256 bits"))
}

/// Normalises an unsigned 256-bit quantity (`value`, `gasPrice`).
pub fn quantity(field: &'static str, value: &Value) -> Result<U256, TxError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| TxError::invalid(field, format!("must be a non-negative integer, got {n}"))),
        Value::String(s) => parse_quantity(field, s),
        other => Err(TxError::invalid(
            field,
            format!("expected a number or numeric string, got {}", describe(other)),
        )),
    }
}

/// Normalises a quantity that must fit in 64 bits (`nonce`, `gas`, `chainId`).
pub fn uint64(field: &'static str, value: &Value) -> Result<u64, TxError> {
    let q = quantity(field, value)?;
    if q > U256::from(u64::MAX) {
        return Err(TxError::invalid(field, "exceeds 64 bits"));
    }
    Ok(q.as_u64())
}

/// Normalises `feeRatio`: an integer percentage in `1..=99`.
pub fn fee_ratio(value: &Value) -> Result<u8, TxError> {
    let ratio = uint64("feeRatio", value)?;
    if ratio < u64::from(MIN_FEE_RATIO) || ratio > u64::from(MAX_FEE_RATIO) {
        return Err(TxError::invalid(
            "feeRatio",
            format!("must be between {MIN_FEE_RATIO} and {MAX_FEE_RATIO}, got {ratio}"),
        ));
    }
    Ok(ratio as u8)
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Parses a 20-byte hex address, with or without `0x`, any case.
pub fn parse_address(field: &'static str, text: &str) -> Result<Address, TxError> {
    let digits = strip_hex_prefix(text);
    if digits.len() != ADDRESS_LENGTH * 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TxError::invalid(field, format!("not a 20-byte hex address: {text}")));
    }
    let bytes = hex::decode(digits)
        .map_err(|e| TxError::invalid(field, format!("hex decode failed: {e}")))?;
    Ok(Address::from_slice(&bytes))
}

/// Normalises an address field (`from`, `feePayer`).
pub fn address(field: &'static str, value: &Value) -> Result<Address, TxError> {
    match value {
        Value::String(s) => parse_address(field, s),
        other => Err(TxError::invalid(
            field,
            format!("expected an address string, got {}", describe(other)),
        )),
    }
}

/// Normalises `to`. The sentinel `0x` is accepted only when `allow_empty`.
pub fn recipient(value: &Value, allow_empty: bool) -> Result<Recipient, TxError> {
    match value {
        Value::String(s) if s == EMPTY_RECIPIENT => {
            if allow_empty {
                Ok(Recipient::Empty)
            } else {
                Err(TxError::invalid("to", "empty recipient is only valid for deployment"))
            }
        }
        Value::String(s) => parse_address("to", s).map(Recipient::Account),
        other => Err(TxError::invalid(
            "to",
            format!("expected an address string, got {}", describe(other)),
        )),
    }
}

// ---------------------------------------------------------------------------
// Bytes, flags, enums
// ---------------------------------------------------------------------------

/// Decodes a hex string of whole bytes. `0x` alone is the empty string.
pub fn parse_hex_bytes(field: &'static str, text: &str) -> Result<Vec<u8>, TxError> {
    let digits = strip_hex_prefix(text);
    if digits.len() % 2 == 1 {
        return Err(TxError::invalid(field, "odd number of hex digits"));
    }
    hex::decode(digits).map_err(|e| TxError::invalid(field, format!("not hex: {e}")))
}

/// Normalises a byte-string field (`input` / `data`).
pub fn hex_bytes(field: &'static str, value: &Value) -> Result<Vec<u8>, TxError> {
    match value {
        Value::String(s) => parse_hex_bytes(field, s),
        other => Err(TxError::invalid(
            field,
            format!("expected a hex string, got {}", describe(other)),
        )),
    }
}

/// Accepts JSON booleans only.
pub fn boolean(field: &'static str, value: &Value) -> Result<bool, TxError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(TxError::invalid(
            field,
            format!("expected a boolean, got {}", describe(other)),
        )),
    }
}

/// Resolves `codeFormat` by symbolic name (`"EVM"`) or by wire tag.
pub fn code_format(value: &Value) -> Result<CodeFormat, TxError> {
    if let Value::String(name) = value {
        if let Some(format) = CodeFormat::from_name(&name.to_ascii_uppercase()) {
            return Ok(format);
        }
    }
    let tag = quantity("codeFormat", value)
        .map_err(|_| TxError::invalid("codeFormat", format!("unknown code format: {value}")))?;
    if tag > U256::from(u8::MAX) {
        return Err(TxError::invalid("codeFormat", format!("unknown code format: {value}")));
    }
    CodeFormat::from_tag(tag.as_u32() as u8)
        .ok_or_else(|| TxError::invalid("codeFormat", format!("unknown code format: {value}")))
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Normalises a signature list: either one `[v, r, s]` triplet of hex
/// strings or an array of them.
pub fn signatures(field: &'static str, value: &Value) -> Result<Vec<SignatureData>, TxError> {
    let entries = value
        .as_array()
        .ok_or_else(|| TxError::invalid(field, format!("expected an array, got {}", describe(value))))?;

    if entries.first().map(Value::is_string).unwrap_or(false) {
        return Ok(vec![signature_triplet(field, value)?]);
    }
    entries
        .iter()
        .map(|entry| signature_triplet(field, entry))
        .collect()
}

fn signature_triplet(field: &'static str, value: &Value) -> Result<SignatureData, TxError> {
    let parts: Vec<&str> = value
        .as_array()
        .and_then(|items| items.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
        .ok_or_else(|| TxError::invalid(field, "each signature must be a [v, r, s] array of hex strings"))?;
    match parts.as_slice() {
        [v, r, s] => SignatureData::from_hex(field, v, r, s),
        _ => Err(TxError::invalid(
            field,
            format!("a signature has 3 elements, got {}", parts.len()),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantity_accepts_integer_decimal_and_hex() {
        assert_eq!(quantity("gas", &json!(100000)).unwrap(), U256::from(100_000u64));
        assert_eq!(quantity("gas", &json!("100000")).unwrap(), U256::from(100_000u64));
        assert_eq!(quantity("gas", &json!("0x186a0")).unwrap(), U256::from(100_000u64));
        assert_eq!(quantity("gas", &json!("0x000186a0")).unwrap(), U256::from(100_000u64));
    }

    #[test]
    fn quantity_zero_forms() {
        assert_eq!(quantity("value", &json!(0)).unwrap(), U256::zero());
        assert_eq!(quantity("value", &json!("0")).unwrap(), U256::zero());
        assert_eq!(quantity("value", &json!("0x0")).unwrap(), U256::zero());
        assert_eq!(quantity("value", &json!("0x")).unwrap(), U256::zero());
    }

    #[test]
    fn quantity_rejects_garbage() {
        for bad in [json!(-1), json!(1.5), json!("12a"), json!("0xzz"), json!(""), json!(true), json!(null)] {
            assert!(quantity("value", &bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn quantity_max_u256() {
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(quantity("value", &json!(max)).unwrap(), U256::MAX);
        let too_big = format!("0x1{}", "0".repeat(64));
        assert!(quantity("value", &json!(too_big)).is_err());
    }

    #[test]
    fn uint64_bounds() {
        assert_eq!(uint64("nonce", &json!("0xffffffffffffffff")).unwrap(), u64::MAX);
        assert!(uint64("nonce", &json!("0x10000000000000000")).is_err());
    }

    #[test]
    fn address_is_lowercased() {
        let addr = address("from", &json!("0xA94F5374FCE5EDBC8E2A8697C15331677E6EBF0B")).unwrap();
        assert_eq!(format!("{:#x}", addr), "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b");
    }

    #[test]
    fn address_rejects_wrong_length_and_type() {
        assert!(address("from", &json!("0x1234")).is_err());
        assert!(address("from", &json!("0xg94f5374fce5edbc8e2a8697c15331677e6ebf0b")).is_err());
        assert!(address("from", &json!(5)).is_err());
    }

    #[test]
    fn recipient_sentinel_only_when_allowed() {
        assert_eq!(recipient(&json!("0x"), true).unwrap(), Recipient::Empty);
        assert!(recipient(&json!("0x"), false).is_err());
        let r = recipient(&json!("0x7b65b75d204abed71587c9e519a89277766ee1d0"), false).unwrap();
        assert!(matches!(r, Recipient::Account(_)));
    }

    #[test]
    fn hex_bytes_rules() {
        assert_eq!(hex_bytes("input", &json!("0x6080")).unwrap(), vec![0x60, 0x80]);
        assert_eq!(hex_bytes("input", &json!("0x")).unwrap(), Vec::<u8>::new());
        assert!(hex_bytes("input", &json!("0x608")).is_err());
        assert!(hex_bytes("input", &json!("0xnothex")).is_err());
        assert!(hex_bytes("input", &json!(42)).is_err());
    }

    #[test]
    fn boolean_rejects_non_booleans() {
        assert!(boolean("humanReadable", &json!(true)).unwrap());
        assert!(boolean("humanReadable", &json!("true")).is_err());
        assert!(boolean("humanReadable", &json!(1)).is_err());
    }

    #[test]
    fn code_format_table_lookup() {
        assert_eq!(code_format(&json!("EVM")).unwrap(), CodeFormat::Evm);
        assert_eq!(code_format(&json!("0x0")).unwrap(), CodeFormat::Evm);
        assert_eq!(code_format(&json!(0)).unwrap(), CodeFormat::Evm);
        assert!(code_format(&json!("WASM")).is_err());
        assert!(code_format(&json!(1)).is_err());
    }

    #[test]
    fn fee_ratio_bounds() {
        assert_eq!(fee_ratio(&json!(30)).unwrap(), 30);
        assert_eq!(fee_ratio(&json!("0x63")).unwrap(), 99);
        assert!(fee_ratio(&json!(0)).is_err());
        assert!(fee_ratio(&json!(100)).is_err());
    }

    #[test]
    fn signatures_single_and_list() {
        let single = json!(["0x0fe9", "0x01", "0x02"]);
        assert_eq!(signatures("signatures", &single).unwrap().len(), 1);

        let list = json!([["0x0fe9", "0x01", "0x02"], ["0x0fea", "0x03", "0x04"]]);
        let sigs = signatures("signatures", &list).unwrap();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs[1].v, 0x0fea);

        assert!(signatures("signatures", &json!(["0x01", "0x02"])).is_err());
        assert!(signatures("signatures", &json!("0x01")).is_err());
        assert!(signatures("signatures", &json!([])).unwrap().is_empty());
    }
}
