//! Fields shared by every transaction variant.
//!
//! [`CommonFields`] is carried by all variants. [`FeeDelegation`] is
//! attached only to the fee-delegated ones; a basic variant has no slot for
//! a fee payer at all, so there is nothing to forget to clear.

use primitive_types::U256;

use super::signature::SignatureData;
use super::types::Address;

/// Nonce, gas, chain id, sender and the sender's signatures.
///
/// `nonce`, `gas_price` and `chain_id` may be left unset at construction.
/// They must be filled in before an encoding that needs them is requested;
/// see [`TxError::MissingPrecondition`](super::error::TxError::MissingPrecondition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub nonce: Option<u64>,
    pub gas_price: Option<U256>,
    pub gas: u64,
    /// Never on the broadcast wire; used only by the signing forms.
    pub chain_id: Option<u64>,
    pub from: Address,
    /// Sender signatures, refined: no placeholders, no duplicates.
    pub signatures: Vec<SignatureData>,
}

impl CommonFields {
    /// All-zero fields with nothing set. Decoding starts from here and
    /// overwrites every slot it reads.
    pub(crate) fn blank() -> Self {
        Self {
            nonce: None,
            gas_price: None,
            gas: 0,
            chain_id: None,
            from: Address::zero(),
            signatures: Vec::new(),
        }
    }
}

/// The fee payer's side of a fee-delegated transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeeDelegation {
    /// `None` until the fee payer is known. Encoded as the empty string.
    pub fee_payer: Option<Address>,
    /// Fee payer signatures, refined like the sender's.
    pub fee_payer_signatures: Vec<SignatureData>,
    /// Percentage of the fee the fee payer covers. `Some` exactly for the
    /// with-ratio variants.
    pub fee_ratio: Option<u8>,
}
