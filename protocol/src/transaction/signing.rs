//! Signature lifecycle.
//!
//! Signing itself happens outside this crate: a signer takes
//! [`Transaction::signing_hash`] for its role, produces a `(v, r, s)`
//! triplet, and hands it back through [`Transaction::append_signatures`].
//! Signature lists only grow. Several partially signed copies of the same
//! transaction can be merged with
//! [`Transaction::combine_signed_raw_transactions`].

use super::error::TxError;
use super::registry;
use super::signature::{refine_signatures, SignatureData};
use super::types::{SignerRole, SigningState};
use super::variant::Transaction;

impl Transaction {
    /// Where this transaction stands in the signing lifecycle.
    pub fn signing_state(&self) -> SigningState {
        if self.common.signatures.is_empty() {
            return SigningState::Unsigned;
        }
        match &self.fee_delegation {
            None => SigningState::Signed,
            Some(fd) if fd.fee_payer_signatures.is_empty() => SigningState::PartiallySigned,
            Some(_) => SigningState::FullySigned,
        }
    }

    /// Appends signatures for `role`, keeping existing ones first.
    ///
    /// Placeholders and signatures already present are dropped. Appending
    /// fee-payer signatures to a basic type fails with
    /// [`TxError::NotFeeDelegated`].
    pub fn append_signatures(
        &mut self,
        role: SignerRole,
        signatures: impl IntoIterator<Item = SignatureData>,
    ) -> Result<(), TxError> {
        let tx_type = self.tx_type;
        let list = match role {
            SignerRole::Sender => &mut self.common.signatures,
            SignerRole::FeePayer => {
                &mut self
                    .fee_delegation
                    .as_mut()
                    .ok_or(TxError::NotFeeDelegated { tx_type })?
                    .fee_payer_signatures
            }
        };

        let before = list.len();
        let merged = refine_signatures(list.drain(..).chain(signatures));
        *list = merged;
        tracing::debug!(
            tx_type = %tx_type,
            role = %role,
            added = list.len().saturating_sub(before),
            total = list.len(),
            "appended signatures"
        );
        Ok(())
    }

    /// Merges the signatures of other encodings of this same transaction and
    /// returns the combined raw transaction.
    ///
    /// Every input must decode to the same type with the same fields. A fee
    /// payer missing here is taken from the first input that has one; two
    /// different fee payers are a mismatch. On error `self` is unchanged.
    pub fn combine_signed_raw_transactions(&mut self, raws: &[&str]) -> Result<String, TxError> {
        let mut combined = self.clone();
        for raw in raws {
            let other = registry::decode_raw(raw)?;
            combined.absorb(&other)?;
        }
        let raw = combined.raw_transaction()?;
        tracing::debug!(
            tx_type = %combined.tx_type,
            inputs = raws.len(),
            signatures = combined.common.signatures.len(),
            fee_payer_signatures = combined.fee_payer_signatures().len(),
            "combined raw transactions"
        );
        *self = combined;
        Ok(raw)
    }

    fn absorb(&mut self, other: &Transaction) -> Result<(), TxError> {
        if other.tx_type != self.tx_type {
            return Err(TxError::CombineMismatch(format!(
                "type {} differs from {}",
                other.tx_type, self.tx_type
            )));
        }
        let same_common = other.common.nonce == self.common.nonce
            && other.common.gas_price == self.common.gas_price
            && other.common.gas == self.common.gas
            && other.common.from == self.common.from;
        if !same_common || other.body != self.body || other.fee_ratio() != self.fee_ratio() {
            return Err(TxError::CombineMismatch(
                "transaction fields differ".to_string(),
            ));
        }

        if let (Some(mine), Some(theirs)) = (self.fee_delegation.as_mut(), &other.fee_delegation) {
            match (mine.fee_payer, theirs.fee_payer) {
                (Some(a), Some(b)) if a != b => {
                    return Err(TxError::CombineMismatch(format!(
                        "fee payer {b:#x} differs from {a:#x}"
                    )))
                }
                (None, Some(b)) => mine.fee_payer = Some(b),
                _ => {}
            }
        }

        self.append_signatures(SignerRole::Sender, other.common.signatures.iter().copied())?;
        if other.fee_delegation.is_some() {
            self.append_signatures(
                SignerRole::FeePayer,
                other.fee_payer_signatures().iter().copied(),
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
