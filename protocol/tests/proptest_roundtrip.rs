//! Property tests: whatever a transaction holds, the broadcast form decodes
//! back to the same transaction, and malformed input never panics.

use primitive_types::{H160, U256};
use proptest::prelude::*;

use klay_tx::codec::{self, RlpItem};
use klay_tx::transaction::{
    decode_any, Field, SignatureData, SignerRole, Transaction, TxKind, TxType, TX_TYPES,
};

fn arb_tx_type() -> impl Strategy<Value = TxType> {
    (0..TX_TYPES.len()).prop_map(|i| TX_TYPES[i].tx_type)
}

fn arb_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform32(any::<u8>()).prop_map(|b| U256::from_big_endian(&b))
}

fn arb_address() -> impl Strategy<Value = H160> {
    prop::array::uniform20(any::<u8>()).prop_map(H160::from)
}

fn arb_signature() -> impl Strategy<Value = SignatureData> {
    (any::<u64>(), arb_u256(), arb_u256()).prop_map(|(v, r, s)| SignatureData::new(v, r, s))
}

#[derive(Debug, Clone)]
struct Inputs {
    nonce: u64,
    gas_price: U256,
    gas: u64,
    from: H160,
    to: Option<H160>,
    value: U256,
    input: Vec<u8>,
    human_readable: bool,
    fee_ratio: u8,
    fee_payer: Option<H160>,
    signatures: Vec<SignatureData>,
    fee_payer_signatures: Vec<SignatureData>,
}

fn arb_inputs() -> impl Strategy<Value = Inputs> {
    (
        (any::<u64>(), arb_u256(), any::<u64>(), arb_address()),
        (prop::option::of(arb_address()), arb_u256(), prop::collection::vec(any::<u8>(), 0..200)),
        (any::<bool>(), 1u8..=99, prop::option::of(arb_address())),
        (
            prop::collection::vec(arb_signature(), 0..4),
            prop::collection::vec(arb_signature(), 0..4),
        ),
    )
        .prop_map(
            |(
                (nonce, gas_price, gas, from),
                (to, value, input),
                (human_readable, fee_ratio, fee_payer),
                (signatures, fee_payer_signatures),
            )| Inputs {
                nonce,
                gas_price,
                gas,
                from,
                to,
                value,
                input,
                human_readable,
                fee_ratio,
                fee_payer,
                signatures,
                fee_payer_signatures,
            },
        )
}

fn build(tx_type: TxType, inputs: &Inputs) -> Transaction {
    let mut map = serde_json::Map::new();
    for field in tx_type.field_order() {
        let value = match field {
            Field::Nonce => serde_json::json!(format!("{:#x}", inputs.nonce)),
            Field::GasPrice => serde_json::json!(format!("{:#x}", inputs.gas_price)),
            Field::Gas => serde_json::json!(format!("{:#x}", inputs.gas)),
            Field::From => serde_json::json!(format!("{:#x}", inputs.from)),
            Field::To => match (inputs.to, tx_type.kind()) {
                (None, TxKind::SmartContractDeploy) => serde_json::json!("0x"),
                (to, _) => serde_json::json!(format!("{:#x}", to.unwrap_or(inputs.from))),
            },
            Field::Value => serde_json::json!(format!("{:#x}", inputs.value)),
            Field::Input => serde_json::json!(format!("0x{}", hex::encode(&inputs.input))),
            Field::HumanReadable => serde_json::json!(inputs.human_readable),
            Field::FeeRatio => serde_json::json!(inputs.fee_ratio),
            Field::CodeFormat => serde_json::json!(0),
        };
        map.insert(field.key().into(), value);
    }
    let mut tx = Transaction::from_fields(tx_type, &map).expect("generated fields are valid");
    tx.append_signatures(SignerRole::Sender, inputs.signatures.iter().copied())
        .expect("sender signatures");
    if tx_type.is_fee_delegated() {
        if let Some(payer) = inputs.fee_payer {
            tx.set_fee_payer(format!("{payer:#x}")).expect("fee payer");
        }
        tx.append_signatures(
            SignerRole::FeePayer,
            inputs.fee_payer_signatures.iter().copied(),
        )
        .expect("fee payer signatures");
    }
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn broadcast_form_round_trips(tx_type in arb_tx_type(), inputs in arb_inputs()) {
        let tx = build(tx_type, &inputs);
        let bytes = tx.rlp_encoding().unwrap();
        prop_assert_eq!(bytes[0], tx_type.tag());

        let decoded = decode_any(&bytes).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.rlp_encoding().unwrap(), bytes);
    }

    #[test]
    fn signable_form_is_deterministic(tx_type in arb_tx_type(), inputs in arb_inputs(), chain_id in 1u64..100_000) {
        let mut tx = build(tx_type, &inputs);
        tx.set_chain_id(chain_id).unwrap();
        let first = tx.rlp_encoding_for_signature(SignerRole::Sender).unwrap();
        // Signatures never feed into the signable form.
        tx.append_signatures(SignerRole::Sender, [SignatureData::new(0x25, U256::one(), U256::one())]).unwrap();
        prop_assert_eq!(tx.rlp_encoding_for_signature(SignerRole::Sender).unwrap(), first);
    }

    #[test]
    fn decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = decode_any(&bytes);
        let _ = codec::decode(&bytes);
    }

    #[test]
    fn tag_with_random_list_never_panics(
        tx_type in arb_tx_type(),
        items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..14),
    ) {
        let list: Vec<RlpItem> = items.into_iter().map(RlpItem::bytes).collect();
        let mut bytes = vec![tx_type.tag()];
        bytes.extend(codec::encode_list(&list));
        let _ = Transaction::decode_as(tx_type, &bytes);
    }
}
