//! The [`Transaction`] value: construction, accessors and setters.
//!
//! A transaction is one [`TxType`] plus the field groups that type carries.
//! Construction goes through a field map (`serde_json::Map`) so that callers
//! holding JSON, a builder, or a CLI argument list all share one validation
//! path. Every setter validates before it writes; a rejected value leaves the
//! transaction untouched.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::body::TxBody;
use super::common::{CommonFields, FeeDelegation};
use super::error::TxError;
use super::signature::{refine_signatures, signatures_to_value, SignatureData};
use super::types::{Address, CodeFormat, FeeMode, Field, Recipient, TxKind, TxType};
use super::validation;
use crate::config::EMPTY_RECIPIENT;

// Field-map keys that are not variant field slots.
pub(crate) const TYPE_KEY: &str = "type";
pub(crate) const CHAIN_ID_KEY: &str = "chainId";
pub(crate) const DATA_KEY: &str = "data";
pub(crate) const SIGNATURES_KEY: &str = "signatures";
pub(crate) const FEE_PAYER_KEY: &str = "feePayer";
pub(crate) const FEE_PAYER_SIGNATURES_KEY: &str = "feePayerSignatures";

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A typed transaction.
///
/// The type is fixed at construction. `fee_delegation` is `Some` exactly
/// when the type is fee-delegated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) tx_type: TxType,
    pub(crate) common: CommonFields,
    pub(crate) body: TxBody,
    pub(crate) fee_delegation: Option<FeeDelegation>,
}

impl Transaction {
    /// Zero-valued transaction of `tx_type`. Decoding fills it in.
    pub(crate) fn blank(tx_type: TxType) -> Self {
        let fee_delegation = tx_type.is_fee_delegated().then(|| FeeDelegation {
            fee_ratio: (tx_type.fee_mode() == FeeMode::FeeDelegatedWithRatio)
                .then_some(crate::config::MIN_FEE_RATIO),
            ..FeeDelegation::default()
        });
        Self {
            tx_type,
            common: CommonFields::blank(),
            body: TxBody::blank(tx_type.kind()),
            fee_delegation,
        }
    }

    /// Builds a transaction of `tx_type` from a field map.
    ///
    /// Keys are the camelCase field names (`gasPrice`, `feePayer`, ...).
    /// `null` values count as absent. Unknown keys and keys for fields this
    /// type does not carry are rejected. `input` and `data` name the same
    /// field and may not both be present.
    ///
    /// Required: `from`, `gas`, plus `to`/`value`/`input`/`feeRatio` where
    /// the type needs them. `nonce`, `gasPrice` and `chainId` may be set
    /// later.
    pub fn from_fields(tx_type: TxType, fields: &Map<String, Value>) -> Result<Self, TxError> {
        check_keys(tx_type, fields)?;

        let present = |key: &str| fields.get(key).filter(|v| !v.is_null());
        let require = |key: &'static str| {
            present(key).ok_or(TxError::MissingField {
                field: key,
                tx_type,
            })
        };

        let mut tx = Transaction::blank(tx_type);
        tx.put_from(require(Field::From.key())?)?;
        tx.put_gas(require(Field::Gas.key())?)?;
        if let Some(v) = present(Field::Nonce.key()) {
            tx.put_nonce(v)?;
        }
        if let Some(v) = present(Field::GasPrice.key()) {
            tx.put_gas_price(v)?;
        }
        if let Some(v) = present(CHAIN_ID_KEY) {
            tx.put_chain_id(v)?;
        }
        if let Some(v) = present(SIGNATURES_KEY) {
            tx.common.signatures =
                refine_signatures(validation::signatures(SIGNATURES_KEY, v)?);
        }

        let kind = tx_type.kind();
        if tx_type.has_field(Field::To) {
            match present(Field::To.key()) {
                Some(v) => tx.put_to(v)?,
                None if kind == TxKind::SmartContractDeploy => {}
                None => return Err(TxError::MissingField { field: "to", tx_type }),
            }
        }
        if tx_type.has_field(Field::Value) {
            match present(Field::Value.key()) {
                Some(v) => tx.put_value(v)?,
                None if matches!(kind, TxKind::ValueTransfer | TxKind::ValueTransferMemo) => {
                    return Err(TxError::MissingField {
                        field: "value",
                        tx_type,
                    })
                }
                None => {}
            }
        }
        if tx_type.has_field(Field::Input) {
            let input = match (present(Field::Input.key()), present(DATA_KEY)) {
                (Some(_), Some(_)) => {
                    return Err(TxError::MutuallyExclusive {
                        first: "input",
                        second: "data",
                    })
                }
                (Some(v), None) => v,
                (None, Some(v)) => v,
                (None, None) => {
                    return Err(TxError::MissingField {
                        field: "input",
                        tx_type,
                    })
                }
            };
            tx.put_input(input)?;
        }
        if let Some(v) = present(Field::HumanReadable.key()) {
            tx.put_human_readable(v)?;
        }
        if let Some(v) = present(Field::CodeFormat.key()) {
            tx.put_code_format(v)?;
        }

        if tx_type.is_fee_delegated() {
            if let Some(v) = present(FEE_PAYER_KEY) {
                tx.put_fee_payer(v)?;
            }
            if let Some(v) = present(FEE_PAYER_SIGNATURES_KEY) {
                let sigs = validation::signatures(FEE_PAYER_SIGNATURES_KEY, v)?;
                if let Some(fd) = tx.fee_delegation.as_mut() {
                    fd.fee_payer_signatures = refine_signatures(sigs);
                }
            }
        }
        if tx_type.has_field(Field::FeeRatio) {
            tx.put_fee_ratio(require(Field::FeeRatio.key())?)?;
        }

        Ok(tx)
    }

    /// Builds a transaction from a JSON object whose `type` key names the
    /// variant, either by canonical name or by upper snake-case alias.
    pub fn from_json(value: &Value) -> Result<Self, TxError> {
        let fields = value
            .as_object()
            .ok_or_else(|| TxError::invalid(TYPE_KEY, "transaction must be a JSON object"))?;
        let tx_type = match fields.get(TYPE_KEY) {
            Some(Value::String(name)) => TxType::from_name(name)
                .ok_or_else(|| TxError::UnknownTypeName(name.clone()))?,
            Some(other) => {
                return Err(TxError::invalid(
                    TYPE_KEY,
                    format!("expected a type name, got {other}"),
                ))
            }
            None => return Err(TxError::invalid(TYPE_KEY, "missing transaction type")),
        };
        Self::from_fields(tx_type, fields)
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    pub fn nonce(&self) -> Option<u64> {
        self.common.nonce
    }

    pub fn gas_price(&self) -> Option<U256> {
        self.common.gas_price
    }

    pub fn gas(&self) -> u64 {
        self.common.gas
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.common.chain_id
    }

    pub fn from(&self) -> Address {
        self.common.from
    }

    /// `None` for types without a recipient.
    pub fn to(&self) -> Option<Recipient> {
        self.body.to()
    }

    pub fn value(&self) -> Option<U256> {
        self.body.value()
    }

    pub fn input(&self) -> Option<&[u8]> {
        self.body.input()
    }

    /// Alias of [`Transaction::input`].
    pub fn data(&self) -> Option<&[u8]> {
        self.input()
    }

    pub fn human_readable(&self) -> Option<bool> {
        self.body.human_readable()
    }

    pub fn code_format(&self) -> Option<CodeFormat> {
        self.body.code_format()
    }

    pub fn fee_payer(&self) -> Option<Address> {
        self.fee_delegation.as_ref().and_then(|fd| fd.fee_payer)
    }

    pub fn fee_ratio(&self) -> Option<u8> {
        self.fee_delegation.as_ref().and_then(|fd| fd.fee_ratio)
    }

    pub fn signatures(&self) -> &[SignatureData] {
        &self.common.signatures
    }

    /// Empty for basic types.
    pub fn fee_payer_signatures(&self) -> &[SignatureData] {
        self.fee_delegation
            .as_ref()
            .map(|fd| fd.fee_payer_signatures.as_slice())
            .unwrap_or(&[])
    }

    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn body(&self) -> &TxBody {
        &self.body
    }

    pub fn fee_delegation(&self) -> Option<&FeeDelegation> {
        self.fee_delegation.as_ref()
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    pub fn set_nonce(&mut self, nonce: impl Into<Value>) -> Result<(), TxError> {
        self.put_nonce(&nonce.into())
    }

    pub fn set_gas_price(&mut self, gas_price: impl Into<Value>) -> Result<(), TxError> {
        self.put_gas_price(&gas_price.into())
    }

    pub fn set_gas(&mut self, gas: impl Into<Value>) -> Result<(), TxError> {
        self.put_gas(&gas.into())
    }

    pub fn set_chain_id(&mut self, chain_id: impl Into<Value>) -> Result<(), TxError> {
        self.put_chain_id(&chain_id.into())
    }

    pub fn set_from(&mut self, from: impl Into<Value>) -> Result<(), TxError> {
        self.put_from(&from.into())
    }

    pub fn set_to(&mut self, to: impl Into<Value>) -> Result<(), TxError> {
        self.put_to(&to.into())
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), TxError> {
        self.put_value(&value.into())
    }

    /// Overwrites the input, whichever name it was first given under.
    pub fn set_input(&mut self, input: impl Into<Value>) -> Result<(), TxError> {
        self.put_input(&input.into())
    }

    /// Alias of [`Transaction::set_input`].
    pub fn set_data(&mut self, data: impl Into<Value>) -> Result<(), TxError> {
        self.put_input(&data.into())
    }

    pub fn set_human_readable(&mut self, flag: impl Into<Value>) -> Result<(), TxError> {
        self.put_human_readable(&flag.into())
    }

    pub fn set_code_format(&mut self, format: impl Into<Value>) -> Result<(), TxError> {
        self.put_code_format(&format.into())
    }

    pub fn set_fee_payer(&mut self, fee_payer: impl Into<Value>) -> Result<(), TxError> {
        self.put_fee_payer(&fee_payer.into())
    }

    pub fn set_fee_ratio(&mut self, ratio: impl Into<Value>) -> Result<(), TxError> {
        self.put_fee_ratio(&ratio.into())
    }

    fn put_nonce(&mut self, v: &Value) -> Result<(), TxError> {
        self.common.nonce = Some(validation::uint64("nonce", v)?);
        Ok(())
    }

    fn put_gas_price(&mut self, v: &Value) -> Result<(), TxError> {
        self.common.gas_price = Some(validation::quantity("gasPrice", v)?);
        Ok(())
    }

    fn put_gas(&mut self, v: &Value) -> Result<(), TxError> {
        self.common.gas = validation::uint64("gas", v)?;
        Ok(())
    }

    fn put_chain_id(&mut self, v: &Value) -> Result<(), TxError> {
        self.common.chain_id = Some(validation::uint64("chainId", v)?);
        Ok(())
    }

    fn put_from(&mut self, v: &Value) -> Result<(), TxError> {
        self.common.from = validation::address("from", v)?;
        Ok(())
    }

    fn put_to(&mut self, v: &Value) -> Result<(), TxError> {
        let tx_type = self.tx_type;
        let slot = self.body.to_mut().ok_or_else(|| unsupported("to", tx_type))?;
        let recipient = validation::recipient(v, slot.allows_empty())?;
        if !slot.set(recipient) {
            return Err(TxError::invalid("to", "empty recipient is only valid for deployment"));
        }
        Ok(())
    }

    fn put_value(&mut self, v: &Value) -> Result<(), TxError> {
        let parsed = validation::quantity("value", v)?;
        let tx_type = self.tx_type;
        *self.body.value_mut().ok_or_else(|| unsupported("value", tx_type))? = parsed;
        Ok(())
    }

    fn put_input(&mut self, v: &Value) -> Result<(), TxError> {
        let parsed = validation::hex_bytes("input", v)?;
        let tx_type = self.tx_type;
        *self.body.input_mut().ok_or_else(|| unsupported("input", tx_type))? = parsed;
        Ok(())
    }

    fn put_human_readable(&mut self, v: &Value) -> Result<(), TxError> {
        let parsed = validation::boolean("humanReadable", v)?;
        let tx_type = self.tx_type;
        *self
            .body
            .human_readable_mut()
            .ok_or_else(|| unsupported("humanReadable", tx_type))? = parsed;
        Ok(())
    }

    fn put_code_format(&mut self, v: &Value) -> Result<(), TxError> {
        let parsed = validation::code_format(v)?;
        let tx_type = self.tx_type;
        *self
            .body
            .code_format_mut()
            .ok_or_else(|| unsupported("codeFormat", tx_type))? = parsed;
        Ok(())
    }

    fn put_fee_payer(&mut self, v: &Value) -> Result<(), TxError> {
        let parsed = match v {
            Value::String(s) if s == EMPTY_RECIPIENT => None,
            other => Some(validation::address("feePayer", other)?),
        };
        let tx_type = self.tx_type;
        let fd = self
            .fee_delegation
            .as_mut()
            .ok_or_else(|| unsupported(FEE_PAYER_KEY, tx_type))?;
        fd.fee_payer = parsed;
        Ok(())
    }

    fn put_fee_ratio(&mut self, v: &Value) -> Result<(), TxError> {
        let tx_type = self.tx_type;
        if !tx_type.has_field(Field::FeeRatio) {
            return Err(unsupported("feeRatio", tx_type));
        }
        let parsed = validation::fee_ratio(v)?;
        if let Some(fd) = self.fee_delegation.as_mut() {
            fd.fee_ratio = Some(parsed);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Field map
    // -----------------------------------------------------------------------

    /// The field map form: numbers as minimal `0x` hex, bytes as `0x` hex,
    /// signatures as `[v, r, s]` triplets. Unset optional fields are
    /// omitted. Feeding the result to [`Transaction::from_json`] yields an
    /// equal transaction.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(TYPE_KEY.into(), Value::String(self.tx_type.name().into()));
        for field in self.tx_type.field_order() {
            if let Some(value) = self.field_value(*field) {
                map.insert(field.key().into(), value);
            }
        }
        if let Some(chain_id) = self.common.chain_id {
            map.insert(CHAIN_ID_KEY.into(), hex_quantity(chain_id));
        }
        map.insert(
            SIGNATURES_KEY.into(),
            signatures_to_value(&self.common.signatures),
        );
        if let Some(fd) = &self.fee_delegation {
            let fee_payer = fd
                .fee_payer
                .map(|addr| format!("{addr:#x}"))
                .unwrap_or_else(|| EMPTY_RECIPIENT.to_string());
            map.insert(FEE_PAYER_KEY.into(), Value::String(fee_payer));
            map.insert(
                FEE_PAYER_SIGNATURES_KEY.into(),
                signatures_to_value(&fd.fee_payer_signatures),
            );
        }
        map
    }

    fn field_value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Nonce => self.common.nonce.map(hex_quantity),
            Field::GasPrice => self.common.gas_price.map(|p| Value::String(format!("{p:#x}"))),
            Field::Gas => Some(hex_quantity(self.common.gas)),
            Field::To => self.body.to().map(|to| Value::String(to.to_string())),
            Field::Value => self.body.value().map(|v| Value::String(format!("{v:#x}"))),
            Field::From => Some(Value::String(format!("{:#x}", self.common.from))),
            Field::Input => self
                .body
                .input()
                .map(|input| Value::String(format!("0x{}", hex::encode(input)))),
            Field::HumanReadable => self.body.human_readable().map(Value::Bool),
            Field::FeeRatio => self.fee_ratio().map(|r| hex_quantity(u64::from(r))),
            Field::CodeFormat => self
                .body
                .code_format()
                .map(|f| hex_quantity(u64::from(f.tag()))),
        }
    }
}

fn hex_quantity(n: u64) -> Value {
    Value::String(format!("{n:#x}"))
}

fn unsupported(field: &str, tx_type: TxType) -> TxError {
    TxError::UnsupportedField {
        field: field.to_string(),
        tx_type,
    }
}

/// Rejects keys `tx_type` does not know, and a `type` key naming a
/// different variant.
fn check_keys(tx_type: TxType, fields: &Map<String, Value>) -> Result<(), TxError> {
    for (key, value) in fields {
        let known = match key.as_str() {
            TYPE_KEY => {
                let named = value.as_str().and_then(TxType::from_name);
                if !value.is_null() && named != Some(tx_type) {
                    return Err(TxError::invalid(
                        TYPE_KEY,
                        format!("{value} does not name {tx_type}"),
                    ));
                }
                true
            }
            CHAIN_ID_KEY | SIGNATURES_KEY => true,
            DATA_KEY => tx_type.has_field(Field::Input),
            FEE_PAYER_KEY | FEE_PAYER_SIGNATURES_KEY => tx_type.is_fee_delegated(),
            other => tx_type.field_order().iter().any(|f| f.key() == other),
        };
        if !known {
            return Err(unsupported(key, tx_type));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Transaction::from_json(&value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
