//! Edwards-curve Digital Signature Algorithm over twisted Edwards curves.
//!
//! Generic over the hash function, which must produce at least twice the
//! point encoding width (SHA-512 for ed25519). Private keys are derived from
//! a seed of the encoding width:
//!
//! 1. `h = H(seed)`
//! 2. the scalar is `le(h[..w])`, adjusted according to the curve's
//!    [`CurveQuirk`]s
//! 3. `h[w..2w]` is the prefix hashed into every signing nonce
//!
//! Signing is deterministic:
//!
//! ```
//! use curvekit::{PrivateKey, registry};
//! use sha2::Sha512;
//!
//! let curve = registry::lookup("ed25519")?;
//! let key = PrivateKey::from_eddsa_seed::<Sha512>(&curve, &[7u8; 32])?;
//! let signature = key.eddsa_sign::<Sha512>(b"message")?;
//! assert!(key.public_key().eddsa_verify::<Sha512>(b"message", &signature));
//! # Ok::<(), curvekit::Error>(())
//! ```

use crate::{
    AffinePoint, Curve, CurveModel, CurveQuirk, Error, PrivateKey, PublicKey, Result,
    point::eddsa_encoding_len,
};
use alloc::vec::Vec;
use digest::Digest;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use primefield::{ByteOrder, to_padded_bytes};
use zeroize::Zeroizing;

/// EdDSA signature `(R, s)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: AffinePoint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its components.
    pub fn new(r: AffinePoint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Commitment point `R`.
    pub fn r(&self) -> &AffinePoint {
        &self.r
    }

    /// Response scalar `s`.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Serialize as `enc(R) ‖ le(s)`, each part the width of the point
    /// encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let len = eddsa_encoding_len(self.r.curve());
        let mut bytes = self.r.to_eddsa_bytes()?;
        bytes.extend(
            to_padded_bytes(&self.s, ByteOrder::LittleEndian, len).ok_or(Error::InvalidEncoding)?,
        );
        Ok(bytes)
    }

    /// Decode `enc(R) ‖ le(s)` for `curve`.
    pub fn from_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        let len = eddsa_encoding_len(curve);
        if bytes.len() != 2 * len {
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = bytes.split_at(len);
        Ok(Self {
            r: AffinePoint::from_eddsa_bytes(r, curve)?,
            s: BigUint::from_bytes_le(s),
        })
    }
}

/// Seed of an EdDSA private key together with its hash.
#[derive(Clone)]
pub(crate) struct ExpandedSeed {
    seed: Zeroizing<Vec<u8>>,
    hash: Zeroizing<Vec<u8>>,
}

impl ExpandedSeed {
    pub(crate) fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Upper half of the seed hash, mixed into the signing nonce.
    fn prefix(&self) -> &[u8] {
        let len = self.seed.len();
        &self.hash[len..2 * len]
    }
}

/// Hash `seed` and derive the secret scalar for `curve`.
fn expand_seed<D: Digest>(curve: &Curve, seed: &[u8]) -> Result<(BigUint, ExpandedSeed)> {
    if !matches!(curve.model(), CurveModel::TwistedEdwards(_)) {
        return Err(Error::UnsupportedOperation(
            "EdDSA requires a twisted Edwards curve",
        ));
    }

    let len = eddsa_encoding_len(curve);
    if seed.len() != len {
        return Err(Error::InvalidEncoding);
    }

    let hash = Zeroizing::new(D::digest(seed).to_vec());
    if hash.len() < 2 * len {
        return Err(Error::UnsupportedOperation(
            "digest output is shorter than twice the encoding width",
        ));
    }

    let bits = 8 * len as u64;
    let mut scalar = BigUint::from_bytes_le(&hash[..len]);

    if curve.has_quirk(CurveQuirk::EddsaSetPrivateKeyMsb) {
        let msb = BigUint::one() << (bits - 2);
        scalar &= &msb - 1u32;
        scalar |= msb;
    }

    if curve.has_quirk(CurveQuirk::EddsaEnsurePrimeOrderSubgroup) {
        let cofactor = curve
            .cofactor()
            .ok_or(Error::UnsupportedOperation("curve cofactor is unknown"))?;
        if cofactor.count_ones() != 1 {
            return Err(Error::UnsupportedOperation(
                "cofactor clearing requires a power of two cofactor",
            ));
        }

        let shift = cofactor.trailing_zeros().unwrap_or(0);
        scalar = (scalar >> shift) << shift;
    }

    let expanded = ExpandedSeed {
        seed: Zeroizing::new(seed.to_vec()),
        hash,
    };
    Ok((scalar, expanded))
}

/// `le(H(parts...)) mod n`
fn hash_to_scalar<D: Digest>(parts: &[&[u8]], order: &BigUint) -> BigUint {
    let digest = parts
        .iter()
        .fold(D::new(), |hasher, part| hasher.chain_update(part))
        .finalize();
    BigUint::from_bytes_le(&digest) % order
}

impl PrivateKey {
    /// Derive an EdDSA private key from `seed`, which must be exactly the
    /// width of the curve's point encoding (32 bytes for ed25519).
    pub fn from_eddsa_seed<D: Digest>(curve: &Curve, seed: &[u8]) -> Result<Self> {
        let order = curve.require_order()?;
        let (scalar, expanded) = expand_seed::<D>(curve, seed)?;
        if (&scalar % order).is_zero() {
            return Err(Error::InvalidScalar);
        }

        Self::from_parts(curve, scalar, Some(expanded))
    }

    /// Sign `message`.
    ///
    /// Fails with [`Error::UnsupportedOperation`] if the key was not derived
    /// with [`PrivateKey::from_eddsa_seed`].
    pub fn eddsa_sign<D: Digest>(&self, message: &[u8]) -> Result<Signature> {
        let expanded = self.expanded_seed().ok_or(Error::UnsupportedOperation(
            "key was not derived from an EdDSA seed",
        ))?;
        let curve = self.curve();
        let order = curve.require_order()?;

        let r = hash_to_scalar::<D>(&[expanded.prefix(), message], order);
        let big_r = curve.require_generator()?.try_mul(&r)?;

        let encoded_r = big_r.to_eddsa_bytes()?;
        let encoded_a = self.public_key().to_eddsa_bytes()?;
        let k = hash_to_scalar::<D>(&[encoded_r.as_slice(), encoded_a.as_slice(), message], order);

        let s = (r + k * self.scalar()) % order;
        Ok(Signature { r: big_r, s })
    }
}

impl PublicKey {
    /// Verify an EdDSA signature: `s·G == R + k·A` with
    /// `k = H(enc(R) ‖ enc(A) ‖ M)`.
    pub fn eddsa_verify<D: Digest>(&self, message: &[u8], signature: &Signature) -> bool {
        self.try_eddsa_verify::<D>(message, signature)
            .unwrap_or(false)
    }

    fn try_eddsa_verify<D: Digest>(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        let curve = self.curve();
        let order = curve.require_order()?;
        if signature.r.curve() != curve || &signature.s >= order {
            return Ok(false);
        }

        let encoded_r = signature.r.to_eddsa_bytes()?;
        let encoded_a = self.to_eddsa_bytes()?;
        let k = hash_to_scalar::<D>(&[encoded_r.as_slice(), encoded_a.as_slice(), message], order);

        let lhs = curve.require_generator()?.try_mul(&signature.s)?;
        let rhs = signature.r.try_add(&self.point().try_mul(&k)?)?;
        Ok(lhs == rhs)
    }
}
