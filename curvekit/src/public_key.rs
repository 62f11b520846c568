//! Public keys.

use crate::{AffinePoint, Curve, Error, Result};
use alloc::vec::Vec;
use num_bigint::BigUint;

/// Public key: a validated point on a curve.
///
/// Obtained from a [`PrivateKey`](crate::PrivateKey) or loaded from an
/// external encoding. Loading always checks the curve equation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Wrap a point, checking that it lies on its curve.
    pub fn from_point(point: AffinePoint) -> Result<Self> {
        if !point.is_on_curve() {
            return Err(Error::NotOnCurve);
        }

        Ok(Self { point })
    }

    /// Public key at the affine coordinates `(x, y)` on `curve`.
    pub fn from_affine_coordinates(x: BigUint, y: BigUint, curve: &Curve) -> Result<Self> {
        AffinePoint::new(x, y, curve).map(|point| Self { point })
    }

    /// Decode an uncompressed `0x04 ‖ X ‖ Y` point.
    pub fn from_uncompressed(bytes: &[u8], curve: &Curve) -> Result<Self> {
        AffinePoint::from_uncompressed(bytes, curve).map(|point| Self { point })
    }

    /// Decode an EdDSA encoded point.
    pub fn from_eddsa_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        AffinePoint::from_eddsa_bytes(bytes, curve).map(|point| Self { point })
    }

    /// Uncompressed `0x04 ‖ X ‖ Y` encoding.
    pub fn to_uncompressed(&self) -> Result<Vec<u8>> {
        self.point.to_uncompressed()
    }

    /// EdDSA encoding.
    pub fn to_eddsa_bytes(&self) -> Result<Vec<u8>> {
        self.point.to_eddsa_bytes()
    }

    /// Borrow the public point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }

    /// Curve the key belongs to.
    pub fn curve(&self) -> &Curve {
        self.point.curve()
    }

    /// Derived from a scalar known to be valid for the curve.
    pub(crate) fn from_point_unchecked(point: AffinePoint) -> Self {
        Self { point }
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        &self.point
    }
}

impl From<PublicKey> for AffinePoint {
    fn from(public_key: PublicKey) -> AffinePoint {
        public_key.point
    }
}

impl TryFrom<AffinePoint> for PublicKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::PublicKey;
    use crate::{AffinePoint, Error, registry};
    use num_bigint::BigUint;

    #[test]
    fn rejects_unchecked_off_curve_point() {
        let curve = registry::lookup("secp128r1").unwrap();
        let point =
            AffinePoint::from_coordinates_unchecked(BigUint::from(1u32), BigUint::from(1u32), &curve);
        assert_eq!(PublicKey::from_point(point), Err(Error::NotOnCurve));
    }

    #[test]
    fn uncompressed_round_trip() {
        let curve = registry::lookup("secp160r1").unwrap();
        let public_key = PublicKey::from_point(curve.generator().unwrap()).unwrap();
        let encoded = public_key.to_uncompressed().unwrap();
        assert_eq!(encoded.len(), 1 + 2 * 20);
        assert_eq!(PublicKey::from_uncompressed(&encoded, &curve).unwrap(), public_key);
    }
}
