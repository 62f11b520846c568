//! Point encodings: uncompressed SEC1 and the EdDSA encoding.

use super::AffinePoint;
use crate::{
    Curve, CurveModel, Error, Result,
    curve::Coordinates,
};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::One;
use primefield::{ByteOrder, FieldElement, to_padded_bytes};

/// Tag byte of the uncompressed SEC1 encoding.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Length of the EdDSA encoding of points on `curve`: `b/8` bytes where `b`
/// leaves room for the x parity bit above `bits(p)`.
pub(crate) fn eddsa_encoding_len(curve: &Curve) -> usize {
    (curve.field_bits() as usize + 8) / 8
}

/// Decode an uncompressed `0x04 ‖ X ‖ Y` point encoding without reference to
/// a curve, splitting the body into two halves.
///
/// Used for explicit domain parameters, where the generator has to be
/// decoded before the curve exists.
pub fn decode_uncompressed_coordinates(bytes: &[u8]) -> Result<(BigUint, BigUint)> {
    let (&tag, body) = bytes.split_first().ok_or(Error::InvalidEncoding)?;
    if tag != UNCOMPRESSED_TAG {
        return Err(Error::UnsupportedPointFormat(tag));
    }

    if body.is_empty() || body.len() % 2 != 0 {
        return Err(Error::InvalidEncoding);
    }

    let (x, y) = body.split_at(body.len() / 2);
    Ok((BigUint::from_bytes_be(x), BigUint::from_bytes_be(y)))
}

impl AffinePoint {
    /// Serialize as `0x04 ‖ X ‖ Y` with each coordinate zero-padded to the
    /// byte length of `p`.
    pub fn to_uncompressed(&self) -> Result<Vec<u8>> {
        let Coordinates::Affine(x, y) = self.coordinates() else {
            return Err(Error::UnsupportedOperation(
                "point at infinity has no uncompressed encoding",
            ));
        };

        let len = self.curve().field_len();
        let mut bytes = Vec::with_capacity(1 + 2 * len);
        bytes.push(UNCOMPRESSED_TAG);
        bytes.extend(x.to_bytes(ByteOrder::BigEndian, len).ok_or(Error::InvalidEncoding)?);
        bytes.extend(y.to_bytes(ByteOrder::BigEndian, len).ok_or(Error::InvalidEncoding)?);
        Ok(bytes)
    }

    /// Decode an uncompressed `0x04 ‖ X ‖ Y` encoding of a point on `curve`.
    pub fn from_uncompressed(bytes: &[u8], curve: &Curve) -> Result<Self> {
        let (x, y) = decode_uncompressed_coordinates(bytes)?;
        if bytes.len() != 1 + 2 * curve.field_len() {
            return Err(Error::InvalidEncoding);
        }

        if &x >= curve.p() || &y >= curve.p() {
            return Err(Error::InvalidEncoding);
        }

        Self::new(x, y, curve)
    }

    /// Serialize with the EdDSA encoding: little-endian `y` with the low bit
    /// of `x` stored in bit position `bits(p)`.
    pub fn to_eddsa_bytes(&self) -> Result<Vec<u8>> {
        if !matches!(self.curve().model(), CurveModel::TwistedEdwards(_)) {
            return Err(Error::UnsupportedOperation(
                "EdDSA encoding requires a twisted Edwards curve",
            ));
        }
        let Coordinates::Affine(x, y) = self.coordinates() else {
            return Err(Error::UnsupportedOperation(
                "point at infinity has no EdDSA encoding",
            ));
        };

        let mut value = y.value().clone();
        if x.is_odd() {
            value |= BigUint::one() << self.curve().field_bits();
        }
        to_padded_bytes(&value, ByteOrder::LittleEndian, eddsa_encoding_len(self.curve()))
            .ok_or(Error::InvalidEncoding)
    }

    /// Decode an EdDSA point encoding on the twisted Edwards `curve`.
    pub fn from_eddsa_bytes(bytes: &[u8], curve: &Curve) -> Result<Self> {
        let CurveModel::TwistedEdwards(model) = curve.model() else {
            return Err(Error::UnsupportedOperation(
                "EdDSA encoding requires a twisted Edwards curve",
            ));
        };
        if bytes.len() != eddsa_encoding_len(curve) {
            return Err(Error::InvalidEncoding);
        }

        let bits = curve.field_bits();
        let value = BigUint::from_bytes_le(bytes);
        let x_is_odd = value.bit(bits);
        if value.bits() > bits + 1 {
            return Err(Error::InvalidEncoding);
        }

        let y = &value & ((BigUint::one() << bits) - 1u32);
        if &y >= curve.p() {
            return Err(Error::InvalidEncoding);
        }
        let y = curve.element(y);

        // x² = (y² - 1) / (d·y² - a)
        let yy = y.square();
        let xx = (&yy - 1u64)
            .try_div(&(model.d() * &yy - model.a()))
            .map_err(|_| Error::NotOnCurve)?;
        let mut x = recover_x(&xx).ok_or(Error::NotOnCurve)?;

        if x.is_odd() != x_is_odd {
            if x.is_zero() {
                return Err(Error::InvalidEncoding);
            }
            x = -x;
        }

        Self::new(x.into_value(), y.into_value(), curve)
    }
}

/// Square root of `xx`, or `None` if it is not a quadratic residue.
fn recover_x(xx: &FieldElement) -> Option<FieldElement> {
    let p = xx.modulus();
    if p % 8u32 != BigUint::from(5u32) {
        return xx.sqrt().map(|(root, _)| root);
    }

    // p ≡ 5 (mod 8): candidate xx^((p+3)/8), corrected by √-1
    let candidate = xx.pow(&((p + 3u32) >> 3));
    if candidate.square() == *xx {
        return Some(candidate);
    }

    let (sqrt_minus_one, _) = (-xx.with_value(BigUint::one())).sqrt()?;
    let corrected = candidate * sqrt_minus_one;
    (corrected.square() == *xx).then_some(corrected)
}

#[cfg(test)]
mod tests {
    use super::decode_uncompressed_coordinates;
    use crate::{AffinePoint, Error, registry};
    use hex_literal::hex;
    use num_bigint::BigUint;

    #[test]
    fn secp112r1_vectors() {
        let curve = registry::lookup("secp112r1").unwrap();
        let generator = curve.generator().unwrap();

        for (scalar, encoded) in [
            (
                hex!("38b320d1a8c75a275a8c6c6d8df3").as_slice(),
                hex!("040020b65a4224192dab5255eee17d470a3471917b1672ed341a571b73").as_slice(),
            ),
            (
                hex!("65cd8dbdbd38d7a98a064e4cf741").as_slice(),
                hex!("04000024021cce683926bf0c6ac6b0cd71d968563e2646d9382e27b801").as_slice(),
            ),
        ] {
            let point = generator.try_mul(&BigUint::from_bytes_be(scalar)).unwrap();
            assert_eq!(point.to_uncompressed().unwrap(), encoded);
            assert_eq!(AffinePoint::from_uncompressed(encoded, &curve).unwrap(), point);
        }
    }

    #[test]
    fn reject_compressed_tag() {
        let curve = registry::lookup("secp112r1").unwrap();
        let mut encoded = curve.generator().unwrap().to_uncompressed().unwrap();
        encoded[0] = 0x02;
        assert_eq!(
            AffinePoint::from_uncompressed(&encoded, &curve),
            Err(Error::UnsupportedPointFormat(0x02))
        );

        // tag is checked before the length
        assert_eq!(
            decode_uncompressed_coordinates(&[0x03, 0x01]),
            Err(Error::UnsupportedPointFormat(0x03))
        );
    }

    #[test]
    fn reject_bad_length() {
        let curve = registry::lookup("secp112r1").unwrap();
        let encoded = curve.generator().unwrap().to_uncompressed().unwrap();
        assert_eq!(
            AffinePoint::from_uncompressed(&encoded[..encoded.len() - 2], &curve),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(decode_uncompressed_coordinates(&[]), Err(Error::InvalidEncoding));
        assert_eq!(decode_uncompressed_coordinates(&[0x04]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn reject_off_curve() {
        let curve = registry::lookup("secp112r1").unwrap();
        let mut encoded = curve.generator().unwrap().to_uncompressed().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 1;
        assert_eq!(
            AffinePoint::from_uncompressed(&encoded, &curve),
            Err(Error::NotOnCurve)
        );
    }

    #[test]
    fn infinity_has_no_encoding() {
        let curve = registry::lookup("secp112r1").unwrap();
        assert!(matches!(
            curve.neutral().to_uncompressed(),
            Err(Error::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn ed25519_generator() {
        let curve = registry::lookup("ed25519").unwrap();
        let generator = curve.generator().unwrap();
        let encoded = generator.to_eddsa_bytes().unwrap();
        assert_eq!(
            encoded,
            hex!("5866666666666666666666666666666666666666666666666666666666666666")
        );
        assert_eq!(AffinePoint::from_eddsa_bytes(&encoded, &curve).unwrap(), generator);
    }

    #[test]
    fn eddsa_requires_edwards() {
        let curve = registry::lookup("curve25519").unwrap();
        assert!(matches!(
            curve.generator().unwrap().to_eddsa_bytes(),
            Err(Error::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn eddsa_rejects_non_square() {
        let curve = registry::lookup("ed25519").unwrap();
        // y = 2 has no matching x on ed25519
        let mut encoded = [0u8; 32];
        encoded[0] = 2;
        assert_eq!(
            AffinePoint::from_eddsa_bytes(&encoded, &curve),
            Err(Error::NotOnCurve)
        );
        assert_eq!(
            AffinePoint::from_eddsa_bytes(&encoded[..31], &curve),
            Err(Error::InvalidEncoding)
        );
    }
}
