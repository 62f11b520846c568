//! Point arithmetic benchmarks on each curve model

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use curvekit::registry;
use hex_literal::hex;
use num_bigint::BigUint;
use std::hint::black_box;

const SCALAR: [u8; 32] = hex!("9bb0d8b72602b70dd5cfed99607a2e2c021dd0fe3b3af842df02c06f8c1a0f4e");

const CURVES: &[&str] = &["secp256r1", "curve25519", "ed25519"];

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point");
    let k = BigUint::from_bytes_be(&SCALAR);

    for name in CURVES {
        let curve = registry::lookup(name).unwrap();
        let g = curve.generator().unwrap();
        let h = g.double().unwrap();

        group.bench_with_input(BenchmarkId::new("add", name), &(&g, &h), |b, (g, h)| {
            b.iter(|| black_box(*g).try_add(black_box(*h)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("double", name), &g, |b, g| {
            b.iter(|| black_box(g).double().unwrap())
        });
        group.bench_with_input(BenchmarkId::new("mul", name), &g, |b, g| {
            b.iter(|| black_box(g).try_mul(black_box(&k)).unwrap())
        });
    }

    let ed25519 = registry::lookup("ed25519").unwrap();
    let curve25519 = registry::lookup("curve25519").unwrap();
    let point = ed25519.generator().unwrap().try_mul(&k).unwrap();
    group.bench_function("convert/ed25519", |b| {
        b.iter(|| black_box(&point).convert(black_box(&curve25519)).unwrap())
    });

    let encoded = point.to_eddsa_bytes().unwrap();
    group.bench_function("from_eddsa_bytes/ed25519", |b| {
        b.iter(|| curvekit::AffinePoint::from_eddsa_bytes(black_box(&encoded), &ed25519).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
