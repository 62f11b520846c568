//! ECDSA and EdDSA benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use curvekit::{PrivateKey, registry};
use hex_literal::hex;
use num_bigint::BigUint;
use sha2::{Sha256, Sha512};
use std::hint::black_box;

const D: [u8; 32] = hex!("bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6");
const Z: [u8; 32] = hex!("e33580eb6ed022aed6af20d92237635e7c20c5f1bcd6aee88182ed7180f6e267");
const K: [u8; 32] = hex!("49a0d7b786ec9cde0d0721d72804befd06571c974b191efb42ecf322ba9ddd9a");

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa");

    let curve = registry::lookup("secp256k1").unwrap();
    let d = PrivateKey::from_bytes(&D, &curve).unwrap();
    let k = BigUint::from_bytes_be(&K);

    group.bench_function("sign_prehash", |b| {
        b.iter(|| {
            black_box(&d)
                .ecdsa_sign_prehash_with_nonce(&black_box(Z), &k)
                .unwrap()
        })
    });

    let q = d.public_key();
    let s = d.ecdsa_sign_prehash_with_nonce(&Z, &k).unwrap();

    group.bench_function("verify_prehash", |b| {
        b.iter(|| assert!(black_box(q).ecdsa_verify_prehash(&black_box(Z), black_box(&s))))
    });

    group.bench_function("sign_sha256", |b| {
        b.iter(|| black_box(&d).ecdsa_sign_with_nonce::<Sha256>(b"message", &k).unwrap())
    });

    group.finish();
}

fn bench_eddsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("eddsa");

    let curve = registry::lookup("ed25519").unwrap();
    let d = PrivateKey::from_eddsa_seed::<Sha512>(&curve, &D).unwrap();

    group.bench_function("sign", |b| {
        b.iter(|| black_box(&d).eddsa_sign::<Sha512>(b"message").unwrap())
    });

    let q = d.public_key();
    let s = d.eddsa_sign::<Sha512>(b"message").unwrap();

    group.bench_function("verify", |b| {
        b.iter(|| assert!(black_box(q).eddsa_verify::<Sha512>(b"message", black_box(&s))))
    });

    group.finish();
}

criterion_group!(benches, bench_ecdsa, bench_eddsa);
criterion_main!(benches);
