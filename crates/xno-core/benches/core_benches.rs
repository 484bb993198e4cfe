//! Criterion benchmarks for xno-core hot paths.
//!
//! Covers: address encode/validate, ed25519-blake2b sign/verify and state
//! block signing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use xno_core::address::{derive_address, validate_address};
use xno_core::block::{Block, SendBlock};
use xno_core::constants::AddressPrefix;
use xno_core::crypto::{KeyPair, blake2b_256};
use xno_core::{Address, BlockHash};

fn sample_send(keypair: &KeyPair) -> Block {
    let own = Address::from_public_key(keypair.public_key().to_bytes(), AddressPrefix::Nano);
    Block::Send(SendBlock {
        wallet_balance_raw: 5_000_000_000_000_000_000_000_000_000_000,
        from_address: own,
        to_address: Address::from_public_key([0x11; 32], AddressPrefix::Nano),
        representative_address: Address::from_public_key([0x22; 32], AddressPrefix::Nano),
        frontier: BlockHash([0xAA; 32]),
        amount_raw: 1_000_000_000_000_000_000_000_000_000_000,
        work: None,
    })
}

fn bench_address(c: &mut Criterion) {
    let pk = [0x5B; 32];
    let encoded = derive_address(&pk, AddressPrefix::Nano);

    c.bench_function("derive_address", |b| {
        b.iter(|| derive_address(black_box(&pk), AddressPrefix::Nano))
    });

    c.bench_function("validate_address", |b| {
        b.iter(|| validate_address(black_box(&encoded)))
    });
}

fn bench_ed25519_blake2b(c: &mut Criterion) {
    let keypair = KeyPair::from_private_key([42u8; 32]);
    let message = blake2b_256(&[b"bench message".as_slice()]);
    let signature = keypair.sign(&message);
    let pubkey = keypair.public_key();

    c.bench_function("keypair_from_private_key", |b| {
        b.iter(|| KeyPair::from_private_key(black_box([42u8; 32])))
    });

    c.bench_function("ed25519_blake2b_sign", |b| {
        b.iter(|| keypair.sign(black_box(&message)))
    });

    c.bench_function("ed25519_blake2b_verify", |b| {
        b.iter(|| pubkey.verify(black_box(&message), black_box(&signature)))
    });
}

fn bench_block_signing(c: &mut Criterion) {
    let keypair = KeyPair::from_private_key([7u8; 32]);
    let block = sample_send(&keypair);
    let signed = block.sign(&keypair).expect("sample balances do not underflow");

    c.bench_function("state_block_sign", |b| {
        b.iter(|| black_box(&block).sign(&keypair))
    });

    c.bench_function("state_block_verify", |b| {
        b.iter(|| black_box(&signed).verify())
    });
}

criterion_group!(
    benches,
    bench_address,
    bench_ed25519_blake2b,
    bench_block_signing,
);
criterion_main!(benches);
