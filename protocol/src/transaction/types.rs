//! Core type definitions for typed transactions.
//!
//! The [`TxType`] table is the wire contract: every variant owns one
//! reserved leading tag byte, and tags are never reassigned. New variants
//! only ever append rows to [`TX_TYPES`].

use primitive_types::H160;
use std::fmt;

/// 20-byte account address.
pub type Address = H160;

// ---------------------------------------------------------------------------
// TxKind / FeeMode
// ---------------------------------------------------------------------------

/// The body shape of a transaction, independent of who pays the fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    /// Plain value transfer to an account.
    ValueTransfer,
    /// Value transfer with an attached memo.
    ValueTransferMemo,
    /// Contract deployment.
    SmartContractDeploy,
    /// Contract method call.
    SmartContractExecution,
    /// Cancels a pending transaction with the same nonce.
    Cancel,
    /// Anchors service-chain data.
    ChainDataAnchoring,
}

/// Who pays for gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeMode {
    /// The sender pays everything.
    Basic,
    /// A separate fee payer covers the whole fee.
    FeeDelegated,
    /// The fee payer covers `feeRatio` percent, the sender the rest.
    FeeDelegatedWithRatio,
}

impl FeeMode {
    /// `true` for both fee-delegated modes.
    pub fn is_delegated(self) -> bool {
        !matches!(self, FeeMode::Basic)
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A variant-specific field slot in the wire layout.
///
/// The fee payer and the two signature lists are not listed here: they
/// always trail the field block in the same positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nonce,
    GasPrice,
    Gas,
    To,
    Value,
    From,
    Input,
    HumanReadable,
    FeeRatio,
    CodeFormat,
}

impl Field {
    /// Field-map key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Field::Nonce => "nonce",
            Field::GasPrice => "gasPrice",
            Field::Gas => "gas",
            Field::To => "to",
            Field::Value => "value",
            Field::From => "from",
            Field::Input => "input",
            Field::HumanReadable => "humanReadable",
            Field::FeeRatio => "feeRatio",
            Field::CodeFormat => "codeFormat",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

mod layouts {
    use super::Field::{self, *};

    pub(super) const VALUE_TRANSFER_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, To, Value, From];
    pub(super) const VALUE_TRANSFER_RATIO_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, To, Value, From, FeeRatio];
    pub(super) const MEMO_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, To, Value, From, Input];
    pub(super) const MEMO_RATIO_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, To, Value, From, Input, FeeRatio];
    pub(super) const DEPLOY_FIELDS: &[Field] = &[
        Nonce,
        GasPrice,
        Gas,
        To,
        Value,
        From,
        Input,
        HumanReadable,
        CodeFormat,
    ];
    // feeRatio sits before codeFormat for deployments.
    pub(super) const DEPLOY_RATIO_FIELDS: &[Field] = &[
        Nonce,
        GasPrice,
        Gas,
        To,
        Value,
        From,
        Input,
        HumanReadable,
        FeeRatio,
        CodeFormat,
    ];
    pub(super) const CANCEL_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, From];
    pub(super) const CANCEL_RATIO_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, From, FeeRatio];
    pub(super) const ANCHOR_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, From, Input];
    pub(super) const ANCHOR_RATIO_FIELDS: &[Field] = &[Nonce, GasPrice, Gas, From, Input, FeeRatio];
}

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminator of a transaction variant.
///
/// Each value maps to one fixed tag byte via [`TX_TYPES`]. A transaction's
/// type is fixed at construction and has no setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxType {
    ValueTransfer,
    FeeDelegatedValueTransfer,
    FeeDelegatedValueTransferWithRatio,
    ValueTransferMemo,
    FeeDelegatedValueTransferMemo,
    FeeDelegatedValueTransferMemoWithRatio,
    SmartContractDeploy,
    FeeDelegatedSmartContractDeploy,
    FeeDelegatedSmartContractDeployWithRatio,
    SmartContractExecution,
    FeeDelegatedSmartContractExecution,
    FeeDelegatedSmartContractExecutionWithRatio,
    Cancel,
    FeeDelegatedCancel,
    FeeDelegatedCancelWithRatio,
    ChainDataAnchoring,
    FeeDelegatedChainDataAnchoring,
    FeeDelegatedChainDataAnchoringWithRatio,
}

/// One row of the tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxTypeInfo {
    pub tx_type: TxType,
    /// Leading byte on the wire.
    pub tag: u8,
    /// Canonical name, e.g. `TxTypeFeeDelegatedSmartContractDeploy`.
    pub name: &'static str,
    /// Upper snake-case alias, e.g. `FEE_DELEGATED_SMART_CONTRACT_DEPLOY`.
    pub alias: &'static str,
    pub kind: TxKind,
    pub fee_mode: FeeMode,
}

macro_rules! tx_type_row {
    ($ty:ident, $tag:expr, $alias:expr, $kind:ident, $mode:ident) => {
        TxTypeInfo {
            tx_type: TxType::$ty,
            tag: $tag,
            name: concat!("TxType", stringify!($ty)),
            alias: $alias,
            kind: TxKind::$kind,
            fee_mode: FeeMode::$mode,
        }
    };
}

/// The closed tag table. Order matches [`TxType`] declaration order.
pub static TX_TYPES: [TxTypeInfo; 18] = [
    tx_type_row!(ValueTransfer, 0x08, "VALUE_TRANSFER", ValueTransfer, Basic),
    tx_type_row!(FeeDelegatedValueTransfer, 0x09, "FEE_DELEGATED_VALUE_TRANSFER", ValueTransfer, FeeDelegated),
    tx_type_row!(FeeDelegatedValueTransferWithRatio, 0x0a, "FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO", ValueTransfer, FeeDelegatedWithRatio),
    tx_type_row!(ValueTransferMemo, 0x10, "VALUE_TRANSFER_MEMO", ValueTransferMemo, Basic),
    tx_type_row!(FeeDelegatedValueTransferMemo, 0x11, "FEE_DELEGATED_VALUE_TRANSFER_MEMO", ValueTransferMemo, FeeDelegated),
    tx_type_row!(FeeDelegatedValueTransferMemoWithRatio, 0x12, "FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO", ValueTransferMemo, FeeDelegatedWithRatio),
    tx_type_row!(SmartContractDeploy, 0x28, "SMART_CONTRACT_DEPLOY", SmartContractDeploy, Basic),
    tx_type_row!(FeeDelegatedSmartContractDeploy, 0x29, "FEE_DELEGATED_SMART_CONTRACT_DEPLOY", SmartContractDeploy, FeeDelegated),
    tx_type_row!(FeeDelegatedSmartContractDeployWithRatio, 0x2a, "FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO", SmartContractDeploy, FeeDelegatedWithRatio),
    tx_type_row!(SmartContractExecution, 0x30, "SMART_CONTRACT_EXECUTION", SmartContractExecution, Basic),
    tx_type_row!(FeeDelegatedSmartContractExecution, 0x31, "FEE_DELEGATED_SMART_CONTRACT_EXECUTION", SmartContractExecution, FeeDelegated),
    tx_type_row!(FeeDelegatedSmartContractExecutionWithRatio, 0x32, "FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO", SmartContractExecution, FeeDelegatedWithRatio),
    tx_type_row!(Cancel, 0x38, "CANCEL", Cancel, Basic),
    tx_type_row!(FeeDelegatedCancel, 0x39, "FEE_DELEGATED_CANCEL", Cancel, FeeDelegated),
    tx_type_row!(FeeDelegatedCancelWithRatio, 0x3a, "FEE_DELEGATED_CANCEL_WITH_RATIO", Cancel, FeeDelegatedWithRatio),
    tx_type_row!(ChainDataAnchoring, 0x48, "CHAIN_DATA_ANCHORING", ChainDataAnchoring, Basic),
    tx_type_row!(FeeDelegatedChainDataAnchoring, 0x49, "FEE_DELEGATED_CHAIN_DATA_ANCHORING", ChainDataAnchoring, FeeDelegated),
    tx_type_row!(FeeDelegatedChainDataAnchoringWithRatio, 0x4a, "FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO", ChainDataAnchoring, FeeDelegatedWithRatio),
];

impl TxType {
    /// Every known variant, in table order.
    pub fn all() -> impl Iterator<Item = TxType> {
        TX_TYPES.iter().map(|row| row.tx_type)
    }

    /// The table row for this variant.
    pub fn info(self) -> &'static TxTypeInfo {
        // The table is declared in enum order.
        &TX_TYPES[self as usize]
    }

    /// Leading tag byte on the wire.
    pub fn tag(self) -> u8 {
        self.info().tag
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn kind(self) -> TxKind {
        self.info().kind
    }

    pub fn fee_mode(self) -> FeeMode {
        self.info().fee_mode
    }

    pub fn is_fee_delegated(self) -> bool {
        self.fee_mode().is_delegated()
    }

    /// Looks up the variant owning `tag`.
    pub fn from_tag(tag: u8) -> Option<TxType> {
        TX_TYPES.iter().find(|row| row.tag == tag).map(|row| row.tx_type)
    }

    /// Resolves either the canonical name or the upper snake-case alias.
    pub fn from_name(name: &str) -> Option<TxType> {
        TX_TYPES
            .iter()
            .find(|row| row.name == name || row.alias == name)
            .map(|row| row.tx_type)
    }

    /// The fixed order of variant fields on the wire.
    pub fn field_order(self) -> &'static [Field] {
        let ratio = self.fee_mode() == FeeMode::FeeDelegatedWithRatio;
        match (self.kind(), ratio) {
            (TxKind::ValueTransfer, false) => layouts::VALUE_TRANSFER_FIELDS,
            (TxKind::ValueTransfer, true) => layouts::VALUE_TRANSFER_RATIO_FIELDS,
            (TxKind::ValueTransferMemo, false) => layouts::MEMO_FIELDS,
            (TxKind::ValueTransferMemo, true) => layouts::MEMO_RATIO_FIELDS,
            (TxKind::SmartContractDeploy, false) => layouts::DEPLOY_FIELDS,
            (TxKind::SmartContractDeploy, true) => layouts::DEPLOY_RATIO_FIELDS,
            // Execution shares the memo layout.
            (TxKind::SmartContractExecution, false) => layouts::MEMO_FIELDS,
            (TxKind::SmartContractExecution, true) => layouts::MEMO_RATIO_FIELDS,
            (TxKind::Cancel, false) => layouts::CANCEL_FIELDS,
            (TxKind::Cancel, true) => layouts::CANCEL_RATIO_FIELDS,
            (TxKind::ChainDataAnchoring, false) => layouts::ANCHOR_FIELDS,
            (TxKind::ChainDataAnchoring, true) => layouts::ANCHOR_RATIO_FIELDS,
        }
    }

    /// `true` if `field` appears in this variant's layout.
    pub fn has_field(self, field: Field) -> bool {
        self.field_order().contains(&field)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CodeFormat
// ---------------------------------------------------------------------------

/// Format of deployed contract code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeFormat {
    /// EVM bytecode.
    #[default]
    Evm,
}

/// The closed code-format table: symbolic name to wire tag.
pub static CODE_FORMATS: [(&str, u8, CodeFormat); 1] = [("EVM", 0x00, CodeFormat::Evm)];

impl CodeFormat {
    pub fn tag(self) -> u8 {
        CODE_FORMATS
            .iter()
            .find(|(_, _, format)| *format == self)
            .map(|(_, tag, _)| *tag)
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        CODE_FORMATS
            .iter()
            .find(|(_, _, format)| *format == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("EVM")
    }

    pub fn from_tag(tag: u8) -> Option<CodeFormat> {
        CODE_FORMATS
            .iter()
            .find(|(_, t, _)| *t == tag)
            .map(|(_, _, format)| *format)
    }

    pub fn from_name(name: &str) -> Option<CodeFormat> {
        CODE_FORMATS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, format)| *format)
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// The `to` field: a real account, or the empty-recipient sentinel `0x`
/// used by contract deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Empty,
    Account(Address),
}

impl Recipient {
    pub fn account(&self) -> Option<Address> {
        match self {
            Recipient::Empty => None,
            Recipient::Account(addr) => Some(*addr),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Empty => f.write_str(crate::config::EMPTY_RECIPIENT),
            Recipient::Account(addr) => write!(f, "{:#x}", addr),
        }
    }
}

// ---------------------------------------------------------------------------
// SignerRole / SigningState
// ---------------------------------------------------------------------------

/// Which signature list a signer contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerRole {
    Sender,
    FeePayer,
}

impl fmt::Display for SignerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sender => write!(f, "sender"),
            Self::FeePayer => write!(f, "feePayer"),
        }
    }
}

/// Position in the append-only signing lifecycle.
///
/// There is no transition back to `Unsigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningState {
    /// No sender signature yet.
    Unsigned,
    /// Sender signed; the fee payer has not (fee-delegated variants only).
    PartiallySigned,
    /// Sender signed a non-delegated variant. Ready for broadcast.
    Signed,
    /// Sender and fee payer both signed. Ready for broadcast.
    FullySigned,
}

impl SigningState {
    /// `true` once every required signature list is non-empty.
    pub fn is_ready(self) -> bool {
        matches!(self, SigningState::Signed | SigningState::FullySigned)
    }
}

impl fmt::Display for SigningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "Unsigned"),
            Self::PartiallySigned => write!(f, "PartiallySigned"),
            Self::Signed => write!(f, "Signed"),
            Self::FullySigned => write!(f, "FullySigned"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
