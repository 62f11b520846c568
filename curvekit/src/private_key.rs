//! Private keys.

use crate::{
    Curve, Error, PublicKey, Result,
    eddsa::ExpandedSeed,
    point::eddsa_encoding_len,
    rand::random_scalar,
};
use alloc::vec::Vec;
use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use primefield::{ByteOrder, to_padded_bytes};
use rand_core::CryptoRng;
use zeroize::Zeroizing;

#[cfg(feature = "getrandom")]
use rand_core::{OsRng, TryRngCore};

/// Private key: a secret scalar on a curve together with its public key.
///
/// The scalar is kept as big-endian bytes which are zeroized on drop. Keys
/// derived from an EdDSA seed additionally retain the seed and its hash,
/// from which signing derives the nonce prefix.
#[derive(Clone)]
pub struct PrivateKey {
    curve: Curve,
    scalar: Zeroizing<Vec<u8>>,
    eddsa: Option<ExpandedSeed>,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Private key with the given scalar, which must lie in `[1, n)`.
    pub fn from_scalar(curve: &Curve, scalar: BigUint) -> Result<Self> {
        let order = curve.require_order()?;
        if scalar.is_zero() || &scalar >= order {
            return Err(Error::InvalidScalar);
        }

        Self::from_parts(curve, scalar, None)
    }

    /// Decode a fixed-width big-endian scalar.
    pub fn from_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        if bytes.len() != scalar_len(curve.require_order()?) {
            return Err(Error::InvalidEncoding);
        }

        Self::from_scalar(curve, BigUint::from_bytes_be(bytes))
    }

    /// Generate a random private key using the provided RNG.
    pub fn random<R: CryptoRng + ?Sized>(curve: &Curve, rng: &mut R) -> Result<Self> {
        let scalar = random_scalar(rng, curve.require_order()?)?;
        Self::from_parts(curve, scalar, None)
    }

    /// Generate a random private key using the operating system's RNG.
    #[cfg(feature = "getrandom")]
    pub fn generate(curve: &Curve) -> Result<Self> {
        Self::random(curve, &mut OsRng.unwrap_err())
    }

    /// Secret scalar.
    pub fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.scalar)
    }

    /// Serialize the scalar as fixed-width big-endian bytes.
    ///
    /// The width is that of the curve order, or of the EdDSA encoding for
    /// keys derived from a seed.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        let len = match &self.eddsa {
            Some(_) => eddsa_encoding_len(&self.curve),
            None => scalar_len(self.curve.require_order()?),
        };
        to_padded_bytes(&self.scalar(), ByteOrder::BigEndian, len)
            .map(Zeroizing::new)
            .ok_or(Error::InvalidEncoding)
    }

    /// EdDSA seed this key was derived from, if any.
    pub fn eddsa_seed(&self) -> Option<&[u8]> {
        self.eddsa.as_ref().map(ExpandedSeed::seed)
    }

    /// Public key belonging to this private key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Curve the key belongs to.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub(crate) fn expanded_seed(&self) -> Option<&ExpandedSeed> {
        self.eddsa.as_ref()
    }

    /// Assemble a key from an already validated scalar.
    pub(crate) fn from_parts(
        curve: &Curve,
        scalar: BigUint,
        eddsa: Option<ExpandedSeed>,
    ) -> Result<Self> {
        let public_point = curve.require_generator()?.try_mul(&scalar)?;
        Ok(Self {
            curve: curve.clone(),
            scalar: Zeroizing::new(scalar.to_bytes_be()),
            eddsa,
            public_key: PublicKey::from_point_unchecked(public_point),
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.scalar == other.scalar
    }
}

impl Eq for PrivateKey {}

/// Byte length of scalars modulo `order`.
pub(crate) fn scalar_len(order: &BigUint) -> usize {
    order.bits().div_ceil(8) as usize
}
