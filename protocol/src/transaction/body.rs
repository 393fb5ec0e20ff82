//! Variant-specific payloads.
//!
//! One arm per [`TxKind`]. The fee mode does not change the body shape; it
//! only decides whether a [`FeeDelegation`](super::common::FeeDelegation)
//! rides along.

use primitive_types::U256;

use super::types::{Address, CodeFormat, Recipient, TxKind};

/// The fields a transaction carries beyond [`CommonFields`](super::common::CommonFields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxBody {
    ValueTransfer {
        to: Address,
        value: U256,
    },
    ValueTransferMemo {
        to: Address,
        value: U256,
        input: Vec<u8>,
    },
    SmartContractDeploy {
        /// `Recipient::Empty` for a plain deployment.
        to: Recipient,
        value: U256,
        input: Vec<u8>,
        human_readable: bool,
        code_format: CodeFormat,
    },
    SmartContractExecution {
        to: Address,
        value: U256,
        input: Vec<u8>,
    },
    Cancel,
    ChainDataAnchoring {
        input: Vec<u8>,
    },
}

impl TxBody {
    /// Zero-valued body for `kind`.
    pub(crate) fn blank(kind: TxKind) -> Self {
        match kind {
            TxKind::ValueTransfer => TxBody::ValueTransfer {
                to: Address::zero(),
                value: U256::zero(),
            },
            TxKind::ValueTransferMemo => TxBody::ValueTransferMemo {
                to: Address::zero(),
                value: U256::zero(),
                input: Vec::new(),
            },
            TxKind::SmartContractDeploy => TxBody::SmartContractDeploy {
                to: Recipient::Empty,
                value: U256::zero(),
                input: Vec::new(),
                human_readable: false,
                code_format: CodeFormat::default(),
            },
            TxKind::SmartContractExecution => TxBody::SmartContractExecution {
                to: Address::zero(),
                value: U256::zero(),
                input: Vec::new(),
            },
            TxKind::Cancel => TxBody::Cancel,
            TxKind::ChainDataAnchoring => TxBody::ChainDataAnchoring { input: Vec::new() },
        }
    }

    pub fn kind(&self) -> TxKind {
        match self {
            TxBody::ValueTransfer { .. } => TxKind::ValueTransfer,
            TxBody::ValueTransferMemo { .. } => TxKind::ValueTransferMemo,
            TxBody::SmartContractDeploy { .. } => TxKind::SmartContractDeploy,
            TxBody::SmartContractExecution { .. } => TxKind::SmartContractExecution,
            TxBody::Cancel => TxKind::Cancel,
            TxBody::ChainDataAnchoring { .. } => TxKind::ChainDataAnchoring,
        }
    }

    // -- getters ------------------------------------------------------------

    pub fn to(&self) -> Option<Recipient> {
        match self {
            TxBody::ValueTransfer { to, .. }
            | TxBody::ValueTransferMemo { to, .. }
            | TxBody::SmartContractExecution { to, .. } => Some(Recipient::Account(*to)),
            TxBody::SmartContractDeploy { to, .. } => Some(*to),
            TxBody::Cancel | TxBody::ChainDataAnchoring { .. } => None,
        }
    }

    pub fn value(&self) -> Option<U256> {
        match self {
            TxBody::ValueTransfer { value, .. }
            | TxBody::ValueTransferMemo { value, .. }
            | TxBody::SmartContractDeploy { value, .. }
            | TxBody::SmartContractExecution { value, .. } => Some(*value),
            TxBody::Cancel | TxBody::ChainDataAnchoring { .. } => None,
        }
    }

    pub fn input(&self) -> Option<&[u8]> {
        match self {
            TxBody::ValueTransferMemo { input, .. }
            | TxBody::SmartContractDeploy { input, .. }
            | TxBody::SmartContractExecution { input, .. }
            | TxBody::ChainDataAnchoring { input } => Some(input),
            TxBody::ValueTransfer { .. } | TxBody::Cancel => None,
        }
    }

    pub fn human_readable(&self) -> Option<bool> {
        match self {
            TxBody::SmartContractDeploy { human_readable, .. } => Some(*human_readable),
            _ => None,
        }
    }

    pub fn code_format(&self) -> Option<CodeFormat> {
        match self {
            TxBody::SmartContractDeploy { code_format, .. } => Some(*code_format),
            _ => None,
        }
    }

    // -- slot access --------------------------------------------------------
    //
    // Each returns `None` when this body has no such slot. The caller turns
    // that into an error naming the variant.

    pub(crate) fn to_mut(&mut self) -> Option<RecipientSlot<'_>> {
        match self {
            TxBody::ValueTransfer { to, .. }
            | TxBody::ValueTransferMemo { to, .. }
            | TxBody::SmartContractExecution { to, .. } => Some(RecipientSlot::Account(to)),
            TxBody::SmartContractDeploy { to, .. } => Some(RecipientSlot::Deploy(to)),
            TxBody::Cancel | TxBody::ChainDataAnchoring { .. } => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut U256> {
        match self {
            TxBody::ValueTransfer { value, .. }
            | TxBody::ValueTransferMemo { value, .. }
            | TxBody::SmartContractDeploy { value, .. }
            | TxBody::SmartContractExecution { value, .. } => Some(value),
            TxBody::Cancel | TxBody::ChainDataAnchoring { .. } => None,
        }
    }

    pub(crate) fn input_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            TxBody::ValueTransferMemo { input, .. }
            | TxBody::SmartContractDeploy { input, .. }
            | TxBody::SmartContractExecution { input, .. }
            | TxBody::ChainDataAnchoring { input } => Some(input),
            TxBody::ValueTransfer { .. } | TxBody::Cancel => None,
        }
    }

    pub(crate) fn human_readable_mut(&mut self) -> Option<&mut bool> {
        match self {
            TxBody::SmartContractDeploy { human_readable, .. } => Some(human_readable),
            _ => None,
        }
    }

    pub(crate) fn code_format_mut(&mut self) -> Option<&mut CodeFormat> {
        match self {
            TxBody::SmartContractDeploy { code_format, .. } => Some(code_format),
            _ => None,
        }
    }
}

/// Mutable view of a `to` slot. Only deployments accept the empty sentinel.
pub(crate) enum RecipientSlot<'a> {
    Account(&'a mut Address),
    Deploy(&'a mut Recipient),
}

impl RecipientSlot<'_> {
    pub(crate) fn allows_empty(&self) -> bool {
        matches!(self, RecipientSlot::Deploy(_))
    }

    /// Stores `recipient`. Returns `false` (and stores nothing) if the slot
    /// cannot hold the empty sentinel.
    pub(crate) fn set(self, recipient: Recipient) -> bool {
        match (self, recipient) {
            (RecipientSlot::Deploy(slot), r) => {
                *slot = r;
                true
            }
            (RecipientSlot::Account(slot), Recipient::Account(addr)) => {
                *slot = addr;
                true
            }
            (RecipientSlot::Account(_), Recipient::Empty) => false,
        }
    }
}
