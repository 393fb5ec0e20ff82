// Encoding & decoding benchmarks for typed transactions.
//
// Covers the broadcast encoding, the sender signing hash, tag-dispatched
// decoding, and signature-list merging at various sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primitive_types::U256;

use klay_tx::transaction::{
    decode_any, SignatureData, SignerRole, Transaction, TransactionBuilder, TxType,
};

fn deploy_tx() -> Transaction {
    TransactionBuilder::new(TxType::FeeDelegatedSmartContractDeployWithRatio)
        .nonce(42)
        .gas_price("0x5d21dba00")
        .gas(3_000_000)
        .chain_id(1001)
        .from("0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b")
        .input(format!("0x{}", "60806040".repeat(512)))
        .fee_ratio(30)
        .fee_payer("0x5a0043070275d9f6054307ee7348bd660849d90f")
        .build()
        .unwrap()
}

fn signature(i: u64) -> SignatureData {
    SignatureData::new(0x07f6, U256::from(i) << 128, U256::from(i + 1) << 64)
}

fn bench_rlp_encoding(c: &mut Criterion) {
    let tx = deploy_tx();
    c.bench_function("codec/rlp_encoding", |b| {
        b.iter(|| tx.rlp_encoding().unwrap());
    });
}

fn bench_signing_hash(c: &mut Criterion) {
    let tx = deploy_tx();
    c.bench_function("codec/sender_signing_hash", |b| {
        b.iter(|| tx.signing_hash(SignerRole::Sender).unwrap());
    });
}

fn bench_decode_any(c: &mut Criterion) {
    let mut tx = deploy_tx();
    tx.append_signatures(SignerRole::Sender, [signature(1)]).unwrap();
    tx.append_signatures(SignerRole::FeePayer, [signature(2)]).unwrap();
    let bytes = tx.rlp_encoding().unwrap();

    c.bench_function("codec/decode_any", |b| {
        b.iter(|| decode_any(&bytes).unwrap());
    });
}

fn bench_append_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/append_signatures");

    for size in [1u64, 4, 16, 64] {
        let sigs: Vec<_> = (0..size).map(signature).collect();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &sigs, |b, sigs| {
            b.iter(|| {
                let mut tx = deploy_tx();
                tx.append_signatures(SignerRole::Sender, sigs.iter().copied())
                    .unwrap();
                tx
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rlp_encoding,
    bench_signing_hash,
    bench_decode_any,
    bench_append_signatures,
);
criterion_main!(benches);
