//! Wire forms of a transaction.
//!
//! Four byte sequences are derived from one transaction:
//!
//! ```text
//! sender signable     rlp([ rlp([tag, ...fields]), chainId, 0, 0 ])
//! fee-payer signable  rlp([ rlp([tag, ...fields]), feePayer, chainId, 0, 0 ])
//! broadcast (basic)   tag || rlp([ ...fields, signatures ])
//! broadcast (fd)      tag || rlp([ ...fields, signatures, feePayer, feePayerSignatures ])
//! ```
//!
//! `fields` follows [`TxType::field_order`]. The inner `rlp([tag, ...])` is
//! embedded as a byte string, not as a nested list. Decoding is the exact
//! inverse of the broadcast form; `chainId` is never on that wire.

use primitive_types::H256;

use super::error::TxError;
use super::signature::{decode_signatures, encode_signatures};
use super::types::{Address, CodeFormat, Field, Recipient, SignerRole, TxType};
use super::validation;
use super::variant::Transaction;
use crate::codec::{self, CodecError, RlpItem};
use crate::config::HUMAN_READABLE_FLAG;
use crate::crypto::keccak256;

const OP_ENCODE: &str = "encoding";
const OP_SIGN: &str = "signing";

impl Transaction {
    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// The variant fields in wire order.
    fn field_items(&self, operation: &'static str) -> Result<Vec<RlpItem>, TxError> {
        self.tx_type
            .field_order()
            .iter()
            .map(|field| self.field_item(*field, operation))
            .collect()
    }

    fn field_item(&self, field: Field, operation: &'static str) -> Result<RlpItem, TxError> {
        let missing = |field: &'static str| TxError::MissingPrecondition { field, operation };
        let item = match field {
            Field::Nonce => RlpItem::uint(self.common.nonce.ok_or_else(|| missing("nonce"))?),
            Field::GasPrice => {
                RlpItem::u256(self.common.gas_price.ok_or_else(|| missing("gasPrice"))?)
            }
            Field::Gas => RlpItem::uint(self.common.gas),
            Field::From => RlpItem::address(&self.common.from),
            Field::To => match self.body.to() {
                Some(Recipient::Account(addr)) => RlpItem::address(&addr),
                _ => RlpItem::empty(),
            },
            Field::Value => RlpItem::u256(self.body.value().unwrap_or_default()),
            Field::Input => RlpItem::bytes(self.body.input().unwrap_or_default()),
            Field::HumanReadable => {
                if self.body.human_readable().unwrap_or(false) {
                    RlpItem::bytes(vec![HUMAN_READABLE_FLAG])
                } else {
                    RlpItem::empty()
                }
            }
            Field::FeeRatio => {
                RlpItem::uint(u64::from(self.fee_ratio().ok_or_else(|| missing("feeRatio"))?))
            }
            Field::CodeFormat => {
                RlpItem::uint(u64::from(self.body.code_format().unwrap_or_default().tag()))
            }
        };
        Ok(item)
    }

    /// `rlp([tag, ...fields])`, the inner part of both signable forms.
    fn common_encoding_for_signature(&self) -> Result<Vec<u8>, TxError> {
        let mut items = Vec::with_capacity(self.tx_type.field_order().len() + 1);
        items.push(RlpItem::bytes(vec![self.tx_type.tag()]));
        items.extend(self.field_items(OP_SIGN)?);
        Ok(codec::encode_list(&items))
    }

    /// The byte sequence a `role` signer signs over.
    ///
    /// Requires `chainId` (and `nonce`/`gasPrice`). The fee-payer form also
    /// requires `feePayer` and is only defined for fee-delegated types.
    pub fn rlp_encoding_for_signature(&self, role: SignerRole) -> Result<Vec<u8>, TxError> {
        let chain_id = self
            .common
            .chain_id
            .ok_or(TxError::MissingPrecondition {
                field: "chainId",
                operation: OP_SIGN,
            })?;

        let inner = RlpItem::bytes(self.common_encoding_for_signature()?);
        let chain_id = RlpItem::uint(chain_id);
        let items = match role {
            SignerRole::Sender => vec![inner, chain_id, RlpItem::empty(), RlpItem::empty()],
            SignerRole::FeePayer => {
                let fee_payer = self.require_fee_payer(OP_SIGN)?;
                vec![
                    inner,
                    RlpItem::address(&fee_payer),
                    chain_id,
                    RlpItem::empty(),
                    RlpItem::empty(),
                ]
            }
        };
        Ok(codec::encode_list(&items))
    }

    /// Keccak-256 of [`Transaction::rlp_encoding_for_signature`].
    pub fn signing_hash(&self, role: SignerRole) -> Result<H256, TxError> {
        Ok(keccak256(&self.rlp_encoding_for_signature(role)?))
    }

    /// The broadcast form: `tag || rlp([...fields, signatures, ...])`.
    ///
    /// Unsigned roles are written as the placeholder signature. An unset
    /// fee payer is written as the empty string.
    pub fn rlp_encoding(&self) -> Result<Vec<u8>, TxError> {
        let mut items = self.field_items(OP_ENCODE)?;
        items.push(encode_signatures(&self.common.signatures));
        if let Some(fd) = &self.fee_delegation {
            items.push(match &fd.fee_payer {
                Some(addr) => RlpItem::address(addr),
                None => RlpItem::empty(),
            });
            items.push(encode_signatures(&fd.fee_payer_signatures));
        }

        let body = codec::encode_list(&items);
        let mut out = Vec::with_capacity(body.len() + 1);
        out.push(self.tx_type.tag());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// `0x`-prefixed hex of [`Transaction::rlp_encoding`].
    pub fn raw_transaction(&self) -> Result<String, TxError> {
        Ok(format!("0x{}", hex::encode(self.rlp_encoding()?)))
    }

    /// Keccak-256 of the broadcast form.
    pub fn transaction_hash(&self) -> Result<H256, TxError> {
        Ok(keccak256(&self.rlp_encoding()?))
    }

    /// Hash identifying the sender's part of the transaction: the broadcast
    /// form without the fee payer and its signatures. For basic types this
    /// equals [`Transaction::transaction_hash`].
    pub fn sender_tx_hash(&self) -> Result<H256, TxError> {
        if self.fee_delegation.is_none() {
            return self.transaction_hash();
        }
        let mut items = self.field_items(OP_ENCODE)?;
        items.push(encode_signatures(&self.common.signatures));
        let mut bytes = vec![self.tx_type.tag()];
        bytes.extend_from_slice(&codec::encode_list(&items));
        Ok(keccak256(&bytes))
    }

    pub(crate) fn require_fee_payer(
        &self,
        operation: &'static str,
    ) -> Result<Address, TxError> {
        let fd = self
            .fee_delegation
            .as_ref()
            .ok_or(TxError::NotFeeDelegated {
                tx_type: self.tx_type,
            })?;
        fd.fee_payer.ok_or(TxError::MissingPrecondition {
            field: "feePayer",
            operation,
        })
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decodes the broadcast form of `tx_type`.
    ///
    /// The first byte must be `tx_type`'s tag; the rest must be one list
    /// with exactly the items the layout names. Placeholder and duplicate
    /// signatures are dropped.
    pub fn decode_as(tx_type: TxType, bytes: &[u8]) -> Result<Self, TxError> {
        let (&tag, payload) = bytes.split_first().ok_or(TxError::EmptyInput)?;
        if tag != tx_type.tag() {
            return Err(TxError::TypeMismatch {
                expected: tx_type,
                expected_tag: tx_type.tag(),
                found_tag: tag,
                found: TxType::from_tag(tag)
                    .map(|t| t.name().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                bytes: format!("0x{}", hex::encode(bytes)),
            });
        }

        let items = codec::decode_list(payload)?;
        let order = tx_type.field_order();
        let expected = order.len() + if tx_type.is_fee_delegated() { 3 } else { 1 };
        if items.len() != expected {
            return Err(TxError::Decode {
                tx_type,
                reason: format!("expected {expected} items, found {}", items.len()),
            });
        }

        let mut tx = Transaction::blank(tx_type);
        for (field, item) in order.iter().zip(&items) {
            tx.read_field(*field, item)?;
        }

        let rest = &items[order.len()..];
        tx.common.signatures =
            decode_signatures(&rest[0]).map_err(|e| decode_err(tx_type, "signatures", e))?;
        if let Some(fd) = tx.fee_delegation.as_mut() {
            let payer = rest[1].as_bytes().map_err(|e| decode_err(tx_type, "feePayer", e))?;
            fd.fee_payer = if payer.is_empty() {
                None
            } else {
                Some(
                    rest[1]
                        .to_address()
                        .map_err(|e| decode_err(tx_type, "feePayer", e))?,
                )
            };
            fd.fee_payer_signatures = decode_signatures(&rest[2])
                .map_err(|e| decode_err(tx_type, "feePayerSignatures", e))?;
        }

        tracing::debug!(
            tx_type = %tx_type,
            signatures = tx.common.signatures.len(),
            fee_payer_signatures = tx.fee_payer_signatures().len(),
            "decoded transaction"
        );
        Ok(tx)
    }

    fn read_field(&mut self, field: Field, item: &RlpItem) -> Result<(), TxError> {
        let tx_type = self.tx_type;
        let err = |e: CodecError| decode_err(tx_type, field.key(), e);
        match field {
            Field::Nonce => self.common.nonce = Some(item.to_u64().map_err(err)?),
            Field::GasPrice => self.common.gas_price = Some(item.to_u256().map_err(err)?),
            Field::Gas => self.common.gas = item.to_u64().map_err(err)?,
            Field::From => self.common.from = item.to_address().map_err(err)?,
            Field::To => {
                let recipient = if item.as_bytes().map_err(err)?.is_empty() {
                    Recipient::Empty
                } else {
                    Recipient::Account(item.to_address().map_err(err)?)
                };
                let accepted = self.body.to_mut().map(|slot| slot.set(recipient));
                if accepted != Some(true) {
                    return Err(TxError::Decode {
                        tx_type,
                        reason: "to: empty recipient outside deployment".into(),
                    });
                }
            }
            Field::Value => {
                let value = item.to_u256().map_err(err)?;
                if let Some(slot) = self.body.value_mut() {
                    *slot = value;
                }
            }
            Field::Input => {
                let input = item.as_bytes().map_err(err)?.to_vec();
                if let Some(slot) = self.body.input_mut() {
                    *slot = input;
                }
            }
            Field::HumanReadable => {
                let flag = match item.as_bytes().map_err(err)? {
                    [] => false,
                    [HUMAN_READABLE_FLAG] => true,
                    other => {
                        return Err(TxError::Decode {
                            tx_type,
                            reason: format!("humanReadable: not a flag: 0x{}", hex::encode(other)),
                        })
                    }
                };
                if let Some(slot) = self.body.human_readable_mut() {
                    *slot = flag;
                }
            }
            Field::FeeRatio => {
                let ratio = item.to_u64().map_err(err)?;
                let ratio = validation::fee_ratio(&ratio.into()).map_err(|e| {
                    TxError::Decode {
                        tx_type,
                        reason: e.to_string(),
                    }
                })?;
                if let Some(fd) = self.fee_delegation.as_mut() {
                    fd.fee_ratio = Some(ratio);
                }
            }
            Field::CodeFormat => {
                let tag = item.to_u64().map_err(err)?;
                let format = u8::try_from(tag)
                    .ok()
                    .and_then(CodeFormat::from_tag)
                    .ok_or_else(|| TxError::Decode {
                        tx_type,
                        reason: format!("codeFormat: unknown tag {tag:#x}"),
                    })?;
                if let Some(slot) = self.body.code_format_mut() {
                    *slot = format;
                }
            }
        }
        Ok(())
    }
}

fn decode_err(tx_type: TxType, field: &str, e: CodecError) -> TxError {
    TxError::Decode {
        tx_type,
        reason: format!("{field}: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
