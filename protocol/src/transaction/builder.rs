//! Transaction construction via the builder pattern.
//!
//! [`TransactionBuilder`] collects fields into the same map that
//! [`Transaction::from_fields`] takes, so builder and JSON input share one
//! validation path. Nothing is checked until `.build()`.

use serde_json::{Map, Value};

use super::error::TxError;
use super::signature::{signatures_to_value, SignatureData};
use super::types::{Field, TxType};
use super::variant::{
    Transaction, CHAIN_ID_KEY, DATA_KEY, FEE_PAYER_KEY, FEE_PAYER_SIGNATURES_KEY, SIGNATURES_KEY,
};

/// Fluent builder for [`Transaction`] values.
///
/// # Usage
///
/// ```rust
/// use klay_tx::transaction::{TransactionBuilder, TxType};
///
/// let tx = TransactionBuilder::new(TxType::FeeDelegatedValueTransfer)
///     .nonce(0)
///     .gas_price("0x5d21dba00")
///     .gas(21_000)
///     .chain_id(1001)
///     .from("0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b")
///     .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
///     .value("0xde0b6b3a7640000")
///     .build()
///     .unwrap();
///
/// assert!(tx.fee_payer().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx_type: TxType,
    fields: Map<String, Value>,
}

impl TransactionBuilder {
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            fields: Map::new(),
        }
    }

    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn nonce(self, nonce: impl Into<Value>) -> Self {
        self.set(Field::Nonce.key(), nonce)
    }

    pub fn gas_price(self, gas_price: impl Into<Value>) -> Self {
        self.set(Field::GasPrice.key(), gas_price)
    }

    pub fn gas(self, gas: impl Into<Value>) -> Self {
        self.set(Field::Gas.key(), gas)
    }

    pub fn chain_id(self, chain_id: impl Into<Value>) -> Self {
        self.set(CHAIN_ID_KEY, chain_id)
    }

    pub fn from(self, from: impl Into<Value>) -> Self {
        self.set(Field::From.key(), from)
    }

    pub fn to(self, to: impl Into<Value>) -> Self {
        self.set(Field::To.key(), to)
    }

    pub fn value(self, value: impl Into<Value>) -> Self {
        self.set(Field::Value.key(), value)
    }

    pub fn input(self, input: impl Into<Value>) -> Self {
        self.set(Field::Input.key(), input)
    }

    /// Sets `data`, the alias of `input`. Setting both fails at build time.
    pub fn data(self, data: impl Into<Value>) -> Self {
        self.set(DATA_KEY, data)
    }

    pub fn human_readable(self, flag: bool) -> Self {
        self.set(Field::HumanReadable.key(), flag)
    }

    pub fn code_format(self, format: impl Into<Value>) -> Self {
        self.set(Field::CodeFormat.key(), format)
    }

    pub fn fee_ratio(self, ratio: impl Into<Value>) -> Self {
        self.set(Field::FeeRatio.key(), ratio)
    }

    pub fn fee_payer(self, fee_payer: impl Into<Value>) -> Self {
        self.set(FEE_PAYER_KEY, fee_payer)
    }

    pub fn signatures(self, signatures: &[SignatureData]) -> Self {
        self.set(SIGNATURES_KEY, signatures_to_value(signatures))
    }

    pub fn fee_payer_signatures(self, signatures: &[SignatureData]) -> Self {
        self.set(FEE_PAYER_SIGNATURES_KEY, signatures_to_value(signatures))
    }

    /// Validates the collected fields and builds the transaction.
    pub fn build(self) -> Result<Transaction, TxError> {
        Transaction::from_fields(self.tx_type, &self.fields)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
