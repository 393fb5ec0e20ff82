//! End-to-end tests for the transaction lifecycle.
//!
//! Each test walks a transaction through the public API only: build it,
//! produce the signable bytes, attach externally made signatures, broadcast
//! it as hex, decode it again and compare.

use primitive_types::U256;
use serde_json::json;

use klay_tx::codec;
use klay_tx::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET};
use klay_tx::transaction::{
    decode_any, decode_raw, CodeFormat, Recipient, SignatureData, SignerRole, SigningState, Transaction,
    TransactionBuilder, TxError, TxType,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SENDER: &str = "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b";
const RECIPIENT: &str = "0x7b65b75d204abed71587c9e519a89277766ee1d0";
const FEE_PAYER: &str = "0x5a0043070275d9f6054307ee7348bd660849d90f";

const DEPLOY_INPUT: &str = "0x608060405234801561001057600080fd5b5061011380610020";

fn sender_sig() -> SignatureData {
    SignatureData::from_hex(
        "signatures",
        "0x07f6",
        "0x2dfc8a28c2b18d3f2b3a6b5b5b0d3a7b1d4e3c3a2f1e0d9c8b7a6f5e4d3c2b1a",
        "0x1c2b3a4f5e6d7c8b9a0f1e2d3c4b5a69788796a5b4c3d2e1f0a9b8c7d6e5f4a3",
    )
    .unwrap()
}

fn fee_payer_sig() -> SignatureData {
    SignatureData::from_hex(
        "feePayerSignatures",
        "0x07f5",
        "0x6ab2d4a8f0e1c3b5a79886d4e2f1a3c5b7d9e0f2a4c6b8d0e1f3a5c7b9d1e3f5",
        "0x0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f9",
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Fee-delegated deployment
// ---------------------------------------------------------------------------

#[test]
fn fee_delegated_deploy_broadcast_and_decode() {
    let mut tx = TransactionBuilder::new(TxType::FeeDelegatedSmartContractDeploy)
        .nonce(0)
        .gas_price("0x5d21dba00")
        .gas(100_000)
        .chain_id(CHAIN_ID_TESTNET)
        .from(SENDER)
        .to("0x")
        .value(0)
        .input(DEPLOY_INPUT)
        .build()
        .unwrap();

    assert_eq!(tx.signing_state(), SigningState::Unsigned);
    let digest = tx.signing_hash(SignerRole::Sender).unwrap();
    assert_eq!(digest.as_bytes().len(), 32);

    tx.append_signatures(SignerRole::Sender, [sender_sig()]).unwrap();
    assert_eq!(tx.signing_state(), SigningState::PartiallySigned);

    let raw = tx.raw_transaction().unwrap();
    assert!(raw.starts_with("0x29"), "{raw}");

    let decoded = decode_raw(&raw).unwrap();
    assert_eq!(decoded.tx_type(), TxType::FeeDelegatedSmartContractDeploy);
    assert_eq!(decoded.nonce(), Some(0));
    assert_eq!(decoded.gas_price(), Some(U256::from(0x5d21dba00u64)));
    assert_eq!(decoded.gas(), 100_000);
    assert_eq!(decoded.to(), Some(Recipient::Empty));
    assert_eq!(decoded.value(), Some(U256::zero()));
    assert_eq!(format!("{:#x}", decoded.from()), SENDER);
    assert_eq!(
        decoded.input().map(hex::encode),
        Some(DEPLOY_INPUT[2..].to_string())
    );
    assert_eq!(decoded.human_readable(), Some(false));
    assert_eq!(decoded.code_format(), Some(CodeFormat::Evm));
    assert_eq!(decoded.signatures(), &[sender_sig()]);
    assert!(decoded.fee_payer().is_none());
    assert!(decoded.fee_payer_signatures().is_empty());
    assert_eq!(decoded.raw_transaction().unwrap(), raw);
}

#[test]
fn deploy_with_maximum_integers_survives_broadcast() {
    let max_value = format!("0x{}", "f".repeat(64));
    let mut tx = TransactionBuilder::new(TxType::FeeDelegatedSmartContractDeploy)
        .nonce(u64::MAX)
        .gas_price(max_value.as_str())
        .gas(u64::MAX)
        .from(SENDER)
        .to("0x")
        .value(max_value.as_str())
        .input(DEPLOY_INPUT)
        .fee_payer(FEE_PAYER)
        .build()
        .unwrap();
    tx.append_signatures(SignerRole::Sender, [sender_sig()]).unwrap();
    tx.append_signatures(SignerRole::FeePayer, [fee_payer_sig()])
        .unwrap();

    let raw = tx.raw_transaction().unwrap();
    let decoded = decode_raw(&raw).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.nonce(), Some(u64::MAX));
    assert_eq!(decoded.gas(), u64::MAX);
    assert_eq!(decoded.gas_price(), Some(U256::MAX));
    assert_eq!(decoded.value(), Some(U256::MAX));
    assert_eq!(decoded.to(), Some(Recipient::Empty));
    assert_eq!(decoded.code_format(), Some(CodeFormat::Evm));
    assert_eq!(decoded.raw_transaction().unwrap(), raw);
}

#[test]
fn fee_payer_completes_partially_signed_transaction() {
    let mut sender_side = TransactionBuilder::new(TxType::FeeDelegatedSmartContractDeploy)
        .nonce(0)
        .gas_price("0x5d21dba00")
        .gas(100_000)
        .chain_id(CHAIN_ID_TESTNET)
        .from(SENDER)
        .input(DEPLOY_INPUT)
        .build()
        .unwrap();
    sender_side
        .append_signatures(SignerRole::Sender, [sender_sig()])
        .unwrap();
    let sender_hash = sender_side.sender_tx_hash().unwrap();
    let raw_from_sender = sender_side.raw_transaction().unwrap();

    // The fee payer only sees the raw transaction.
    let mut payer_side = decode_raw(&raw_from_sender).unwrap();
    payer_side.set_chain_id(CHAIN_ID_TESTNET).unwrap();
    payer_side.set_fee_payer(FEE_PAYER).unwrap();
    let payer_digest = payer_side.signing_hash(SignerRole::FeePayer).unwrap();
    assert_ne!(payer_digest, payer_side.signing_hash(SignerRole::Sender).unwrap());
    payer_side
        .append_signatures(SignerRole::FeePayer, [fee_payer_sig()])
        .unwrap();

    assert_eq!(payer_side.signing_state(), SigningState::FullySigned);
    // Adding the fee payer's part leaves the sender's part untouched.
    assert_eq!(payer_side.sender_tx_hash().unwrap(), sender_hash);
    assert_ne!(
        payer_side.transaction_hash().unwrap(),
        sender_side.transaction_hash().unwrap()
    );

    let final_tx = decode_raw(&payer_side.raw_transaction().unwrap()).unwrap();
    assert_eq!(format!("{:#x}", final_tx.fee_payer().unwrap()), FEE_PAYER);
    assert_eq!(final_tx.fee_payer_signatures(), &[fee_payer_sig()]);
}

#[test]
fn combine_collects_signatures_from_several_signers() {
    let base = TransactionBuilder::new(TxType::FeeDelegatedValueTransferWithRatio)
        .nonce(7)
        .gas_price(25_000_000_000u64)
        .gas(21_000)
        .chain_id(CHAIN_ID_MAINNET)
        .from(SENDER)
        .to(RECIPIENT)
        .value("1000000000000000000")
        .fee_ratio(30)
        .fee_payer(FEE_PAYER)
        .build()
        .unwrap();

    let second = SignatureData::new(0x4055, U256::from(11u64), U256::from(12u64));
    let mut a = base.clone();
    a.append_signatures(SignerRole::Sender, [sender_sig()]).unwrap();
    let mut b = base.clone();
    b.append_signatures(SignerRole::Sender, [second]).unwrap();
    let mut c = base.clone();
    c.append_signatures(SignerRole::FeePayer, [fee_payer_sig()]).unwrap();

    let mut merged = base.clone();
    let raw = merged
        .combine_signed_raw_transactions(&[
            &a.raw_transaction().unwrap(),
            &b.raw_transaction().unwrap(),
            &c.raw_transaction().unwrap(),
            &a.raw_transaction().unwrap(),
        ])
        .unwrap();

    assert_eq!(merged.signatures(), &[sender_sig(), second]);
    assert_eq!(merged.fee_payer_signatures(), &[fee_payer_sig()]);
    assert_eq!(decode_raw(&raw).unwrap().fee_ratio(), Some(30));
}

// ---------------------------------------------------------------------------
// Exact bytes
// ---------------------------------------------------------------------------

#[test]
fn unsigned_cancel_exact_bytes() {
    let tx = Transaction::from_json(&json!({
        "type": "TxTypeCancel",
        "nonce": 1,
        "gasPrice": "0x19",
        "gas": 21000,
        "from": SENDER,
    }))
    .unwrap();

    let expected = format!(
        "0x38df011982520894{}c4c3018080",
        &SENDER[2..]
    );
    assert_eq!(tx.raw_transaction().unwrap(), expected);
}

#[test]
fn sender_signable_wraps_inner_encoding_as_bytes() {
    let tx = Transaction::from_json(&json!({
        "type": "TxTypeCancel",
        "nonce": 1,
        "gasPrice": "0x19",
        "gas": 21000,
        "from": SENDER,
        "chainId": 1,
    }))
    .unwrap();

    // inner = rlp([0x38, 0x01, 0x19, 0x5208, from])
    let inner = format!("db38011982520894{}", &SENDER[2..]);
    // outer = rlp([inner as a 28-byte string, 0x01, 0x, 0x])
    let expected = format!("e09c{inner}018080");
    assert_eq!(
        hex::encode(tx.rlp_encoding_for_signature(SignerRole::Sender).unwrap()),
        expected
    );
}

// ---------------------------------------------------------------------------
// Every variant
// ---------------------------------------------------------------------------

fn sample_fields(tx_type: TxType) -> serde_json::Map<String, serde_json::Value> {
    use klay_tx::transaction::Field;

    let mut map = serde_json::Map::new();
    map.insert("type".into(), json!(tx_type.name()));
    for field in tx_type.field_order() {
        let value = match field {
            Field::Nonce => json!("0x4d2"),
            Field::GasPrice => json!("0x19"),
            Field::Gas => json!("0xf4240"),
            Field::To => json!(RECIPIENT),
            Field::Value => json!("0xa"),
            Field::From => json!(SENDER),
            Field::Input => json!("0x68656c6c6f"),
            Field::HumanReadable => json!(false),
            Field::FeeRatio => json!(30),
            Field::CodeFormat => json!("EVM"),
        };
        map.insert(field.key().into(), value);
    }
    map.insert("signatures".into(), json!([sender_sig().to_hex()]));
    if tx_type.is_fee_delegated() {
        map.insert("feePayer".into(), json!(FEE_PAYER));
        map.insert("feePayerSignatures".into(), json!([fee_payer_sig().to_hex()]));
    }
    map
}

#[test]
fn every_variant_round_trips_through_registry() {
    for tx_type in TxType::all() {
        let tx = Transaction::from_fields(tx_type, &sample_fields(tx_type)).unwrap();
        let bytes = tx.rlp_encoding().unwrap();
        assert_eq!(bytes[0], tx_type.tag(), "{tx_type}");

        let decoded = decode_any(&bytes).unwrap();
        assert_eq!(decoded, tx, "{tx_type}");
        assert_eq!(decoded.rlp_encoding().unwrap(), bytes, "{tx_type}");
    }
}

#[test]
fn every_variant_rejects_other_tags() {
    let cancel = Transaction::from_fields(TxType::Cancel, &sample_fields(TxType::Cancel)).unwrap();
    let bytes = cancel.rlp_encoding().unwrap();
    for tx_type in TxType::all().filter(|t| *t != TxType::Cancel) {
        let err = Transaction::decode_as(tx_type, &bytes).unwrap_err();
        assert!(
            matches!(err, TxError::TypeMismatch { found_tag: 0x38, .. }),
            "{tx_type}: {err}"
        );
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let tx = Transaction::from_fields(TxType::Cancel, &sample_fields(TxType::Cancel)).unwrap();
    let mut bytes = tx.rlp_encoding().unwrap();
    bytes.push(0x00);
    assert!(matches!(
        decode_any(&bytes),
        Err(TxError::Codec(codec::CodecError::TrailingBytes(_)))
    ));
}

#[test]
fn json_round_trip_preserves_everything() {
    let tx = Transaction::from_fields(
        TxType::FeeDelegatedSmartContractExecutionWithRatio,
        &sample_fields(TxType::FeeDelegatedSmartContractExecutionWithRatio),
    )
    .unwrap();
    let text = serde_json::to_string_pretty(&tx).unwrap();
    let back: Transaction = serde_json::from_str(&text).unwrap();
    assert_eq!(back, tx);
}
