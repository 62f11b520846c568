//! Elliptic Curve Digital Signature Algorithm (ECDSA).
//!
//! Signing and verification are generic over the message digest. The
//! `*_prehash` variants take an already computed digest, for hash functions
//! that do not implement [`Digest`].
//!
//! ```
//! use curvekit::{PrivateKey, registry};
//! use rand_chacha::ChaCha20Rng;
//! use rand_core::SeedableRng;
//! use sha2::Sha256;
//!
//! let curve = registry::lookup("brainpoolP256r1")?;
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let key = PrivateKey::random(&curve, &mut rng)?;
//!
//! let signature = key.ecdsa_sign::<Sha256, _>(b"message", &mut rng)?;
//! assert!(key.public_key().ecdsa_verify::<Sha256>(b"message", &signature));
//! # Ok::<(), curvekit::Error>(())
//! ```

use crate::{
    Curve, Error, PrivateKey, PublicKey, Result, private_key::scalar_len,
    rand::{MAX_SAMPLING_ATTEMPTS, random_scalar},
};
use alloc::vec::Vec;
use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use primefield::{ByteOrder, FieldElement, to_padded_bytes};
use rand_core::CryptoRng;

/// ECDSA signature `(r, s)`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its components.
    ///
    /// The range `1 ≤ r, s < n` is checked at verification time.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Serialize as `r ‖ s`, each big-endian and as wide as the curve order.
    pub fn to_bytes(&self, curve: &Curve) -> Result<Vec<u8>> {
        let len = scalar_len(curve.require_order()?);
        let mut bytes =
            to_padded_bytes(&self.r, ByteOrder::BigEndian, len).ok_or(Error::InvalidEncoding)?;
        bytes.extend(
            to_padded_bytes(&self.s, ByteOrder::BigEndian, len).ok_or(Error::InvalidEncoding)?,
        );
        Ok(bytes)
    }

    /// Decode fixed-width `r ‖ s`.
    pub fn from_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        let len = scalar_len(curve.require_order()?);
        if bytes.len() != 2 * len {
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = bytes.split_at(len);
        Ok(Self::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s)))
    }
}

/// Convert a message digest into an integer mod `order`, keeping only its
/// leftmost `bits(order)` bits.
pub fn digest_to_integer(prehash: &[u8], order: &BigUint) -> BigUint {
    let mut e = BigUint::from_bytes_be(prehash);
    let digest_bits = 8 * prehash.len() as u64;
    if digest_bits > order.bits() {
        e >>= digest_bits - order.bits();
    }
    e % order
}

impl PrivateKey {
    /// Sign `message`, hashing it with `D` and drawing the nonce from `rng`.
    pub fn ecdsa_sign<D: Digest, R: CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        self.ecdsa_sign_prehash(&D::digest(message), rng)
    }

    /// Sign `message` with the caller-provided nonce `k`.
    ///
    /// A nonce outside `[1, n)` or one yielding `r = 0` or `s = 0` fails with
    /// [`Error::InvalidNonce`]. Reusing a nonce for different messages
    /// reveals the private key.
    pub fn ecdsa_sign_with_nonce<D: Digest>(&self, message: &[u8], k: &BigUint) -> Result<Signature> {
        self.ecdsa_sign_prehash_with_nonce(&D::digest(message), k)
    }

    /// Sign a precomputed digest with a random nonce.
    ///
    /// Nonces yielding a zero signature component are redrawn, at most
    /// [`MAX_SAMPLING_ATTEMPTS`] times.
    pub fn ecdsa_sign_prehash<R: CryptoRng + ?Sized>(
        &self,
        prehash: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        let order = self.curve().require_order()?;
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let k = random_scalar(rng, order)?;
            match self.ecdsa_sign_prehash_with_nonce(prehash, &k) {
                Err(Error::InvalidNonce) => continue,
                result => return result,
            }
        }

        Err(Error::SamplingFailed)
    }

    /// Sign a precomputed digest with the caller-provided nonce `k`.
    pub fn ecdsa_sign_prehash_with_nonce(&self, prehash: &[u8], k: &BigUint) -> Result<Signature> {
        let curve = self.curve();
        let order = curve.require_order()?;
        if k.is_zero() || k >= order {
            return Err(Error::InvalidNonce);
        }

        let point = curve.require_generator()?.try_mul(k)?;
        let r = match point.x() {
            Some(x) => x % order,
            None => return Err(Error::InvalidNonce),
        };
        if r.is_zero() {
            return Err(Error::InvalidNonce);
        }

        let e = scalar_element(digest_to_integer(prehash, order), order);
        let d = scalar_element(self.scalar(), order);
        let s = (e + d * scalar_element(r.clone(), order)).try_div(&scalar_element(k.clone(), order))?;
        if s.is_zero() {
            return Err(Error::InvalidNonce);
        }

        Ok(Signature::new(r, s.into_value()))
    }
}

impl PublicKey {
    /// Verify a signature over `message` hashed with `D`.
    pub fn ecdsa_verify<D: Digest>(&self, message: &[u8], signature: &Signature) -> bool {
        self.ecdsa_verify_prehash(&D::digest(message), signature)
    }

    /// Verify a signature over a precomputed digest.
    pub fn ecdsa_verify_prehash(&self, prehash: &[u8], signature: &Signature) -> bool {
        self.try_ecdsa_verify_prehash(prehash, signature)
            .unwrap_or(false)
    }

    fn try_ecdsa_verify_prehash(&self, prehash: &[u8], signature: &Signature) -> Result<bool> {
        let curve = self.curve();
        let order = curve.require_order()?;
        let Signature { r, s } = signature;
        if r.is_zero() || s.is_zero() || r >= order || s >= order {
            return Ok(false);
        }

        let w = scalar_element(s.clone(), order).invert()?;
        let u1 = scalar_element(digest_to_integer(prehash, order), order) * &w;
        let u2 = scalar_element(r.clone(), order) * &w;

        let point = curve
            .require_generator()?
            .try_mul(u1.value())?
            .try_add(&self.point().try_mul(u2.value())?)?;

        Ok(point.x().is_some_and(|x| &(x % order) == r))
    }
}

impl<D: Digest> signature::DigestVerifier<D, Signature> for PublicKey {
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        if self.ecdsa_verify_prehash(&digest.finalize(), signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

/// `value` as an element of the scalar field `GF(n)`.
fn scalar_element(value: BigUint, order: &BigUint) -> FieldElement {
    FieldElement::new(value, order)
}
