//! Point and key encodings.

use curvekit::{AffinePoint, Error, PrivateKey, PublicKey, registry};
use hex_literal::hex;
use num_bigint::BigUint;
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

const UNCOMPRESSED_P256_GENERATOR: &[u8] = &hex!(
    "04 6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296
        4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"
);

#[test]
fn p256_generator() {
    let curve = registry::lookup("P-256").unwrap();
    let point = AffinePoint::from_uncompressed(UNCOMPRESSED_P256_GENERATOR, &curve).unwrap();
    assert_eq!(point, curve.generator().unwrap());
    assert_eq!(point.to_uncompressed().unwrap(), UNCOMPRESSED_P256_GENERATOR);
}

#[test]
fn uncompressed_width_follows_field() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    for (name, field_len) in [
        ("secp112r1", 14),
        ("secp160k1", 20),
        ("brainpoolP320t1", 40),
        ("secp521r1", 66),
    ] {
        let curve = registry::lookup(name).unwrap();
        let key = PrivateKey::random(&curve, &mut rng).unwrap();

        let bytes = key.public_key().to_uncompressed().unwrap();
        assert_eq!(bytes.len(), 1 + 2 * field_len, "{name}");
        assert_eq!(&PublicKey::from_uncompressed(&bytes, &curve).unwrap(), key.public_key());
    }
}

#[test]
fn private_key_bytes() {
    let curve = registry::lookup("secp521r1").unwrap();
    let key = PrivateKey::from_scalar(&curve, BigUint::from(1u32)).unwrap();

    let bytes = key.to_bytes().unwrap();
    assert_eq!(bytes.len(), 66);
    assert_eq!(bytes[65], 1);
    assert!(bytes[..65].iter().all(|&b| b == 0));
    assert_eq!(key.public_key().point(), &curve.generator().unwrap());
}

#[test]
fn compressed_points_are_unsupported() {
    let curve = registry::lookup("secp256r1").unwrap();
    let mut compressed = UNCOMPRESSED_P256_GENERATOR[..33].to_vec();
    compressed[0] = 0x03;
    assert_eq!(
        AffinePoint::from_uncompressed(&compressed, &curve),
        Err(Error::UnsupportedPointFormat(0x03))
    );
}

#[test]
fn eddsa_encoding_of_neutral() {
    let curve = registry::lookup("ed25519").unwrap();
    let mut expected = [0u8; 32];
    expected[0] = 1;

    let neutral = curve.neutral();
    assert_eq!(neutral.to_eddsa_bytes().unwrap(), expected);
    assert_eq!(AffinePoint::from_eddsa_bytes(&expected, &curve).unwrap(), neutral);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn eddsa_round_trip(k in 1u64..) {
        let curve = registry::lookup("ed25519").unwrap();
        let point = curve.generator().unwrap().try_mul(&BigUint::from(k)).unwrap();

        let bytes = point.to_eddsa_bytes().unwrap();
        prop_assert_eq!(bytes.len(), 32);
        prop_assert_eq!(AffinePoint::from_eddsa_bytes(&bytes, &curve).unwrap(), point);
    }

    #[test]
    fn truncated_encodings_are_rejected(len in 0usize..65) {
        let curve = registry::lookup("secp256r1").unwrap();
        let bytes = &UNCOMPRESSED_P256_GENERATOR[..len];
        prop_assert!(AffinePoint::from_uncompressed(bytes, &curve).is_err());
    }
}
