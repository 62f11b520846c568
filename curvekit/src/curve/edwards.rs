//! Twisted Edwards curves `ax² + y² = 1 + dx²y²`.

use super::{Coordinates, CurveBuilder, CurveModel, GroupLaw, montgomery::carry_order};
use crate::{
    Curve, Error, Result,
    point::{edwards_to_montgomery, scale_from_ratio},
};
use num_bigint::BigUint;
use primefield::FieldElement;

/// Coefficients of a twisted Edwards curve `ax² + y² = 1 + dx²y²`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TwistedEdwards {
    a: FieldElement,
    d: FieldElement,
}

impl TwistedEdwards {
    pub(crate) fn new(a: FieldElement, d: FieldElement) -> Self {
        Self { a, d }
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient `d`.
    pub fn d(&self) -> &FieldElement {
        &self.d
    }

    pub(crate) fn into_coefficients(self) -> (FieldElement, FieldElement) {
        (self.a, self.d)
    }

    pub(super) fn is_singular(&self) -> bool {
        self.a.is_zero() || self.d.is_zero() || self.a == self.d
    }

    pub(super) fn twist(&self, d: &FieldElement) -> Self {
        Self::new(&self.a * d, &self.d * d)
    }

    /// Isomorphic iff `a'/a = d'/d` and that ratio is a square.
    pub(super) fn is_isomorphic(&self, other: &Self) -> bool {
        let ratio = &other.a / &self.a;
        ratio == &other.d / &self.d && ratio.is_quadratic_residue()
    }

    /// Coefficients `(A, B)` of the native birationally equivalent
    /// Montgomery curve, `A = 2(a + d)/(a - d)` and `B = 4/(a - d)`.
    pub(crate) fn montgomery_coefficients(&self) -> Result<(FieldElement, FieldElement)> {
        let a_minus_d = &self.a - &self.d;
        let mont_a = ((&self.a + &self.d) * 2u64).try_div(&a_minus_d)?;
        let mont_b = self.a.with_value(4u32.into()).try_div(&a_minus_d)?;
        Ok((mont_a, mont_b))
    }
}

impl GroupLaw for TwistedEdwards {
    fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool {
        let (xx, yy) = (x.square(), y.square());
        &self.a * &xx + &yy == &self.d * xx * yy + 1u64
    }

    fn y_squared(&self, x: &FieldElement) -> Option<FieldElement> {
        let xx = x.square();
        let numerator = -(&self.a * &xx) + 1u64;
        let denominator = -(&self.d * xx) + 1u64;
        numerator.try_div(&denominator).ok()
    }

    fn neutral(&self) -> Coordinates {
        Coordinates::Affine(self.a.with_value(0u32.into()), self.a.with_value(1u32.into()))
    }

    fn negate(&self, point: &Coordinates) -> Coordinates {
        match point {
            Coordinates::Infinity => Coordinates::Infinity,
            Coordinates::Affine(x, y) => Coordinates::Affine(-x, y.clone()),
        }
    }

    fn add(&self, lhs: &Coordinates, rhs: &Coordinates) -> Result<Coordinates> {
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (Coordinates::Affine(x1, y1), Coordinates::Affine(x2, y2)) => ((x1, y1), (x2, y2)),
            _ => return Err(Error::UnsupportedOperation("twisted Edwards curves have no point at infinity")),
        };

        let t = &self.d * x1 * x2 * y1 * y2;
        let x3 = (x1 * y2 + y1 * x2).try_div(&(&t + 1u64))?;
        let y3 = (y1 * y2 - &self.a * x1 * x2).try_div(&(-t + 1u64))?;
        Ok(Coordinates::Affine(x3, y3))
    }

    fn double(&self, point: &Coordinates) -> Result<Coordinates> {
        self.add(point, point)
    }
}

impl Curve {
    /// Birationally equivalent Montgomery curve.
    ///
    /// The native image has `A = 2(a + d)/(a - d)` and `B = 4/(a - d)`. A
    /// requested `B` must lie in the same square class as the native one.
    /// Order, cofactor and generator carry over.
    pub fn to_montgomery(&self, b: Option<&BigUint>) -> Result<Curve> {
        let CurveModel::TwistedEdwards(model) = self.model() else {
            return Err(Error::UnsupportedOperation(
                "conversion to Montgomery requires a twisted Edwards curve",
            ));
        };

        let (mont_a, native_b) = model.montgomery_coefficients()?;
        let mont_b = match b {
            None => native_b.clone(),
            Some(b) => self.element(b.clone()),
        };
        let scale = scale_from_ratio(&mont_b, &native_b)?;

        let mut builder =
            CurveBuilder::montgomery(self.p().clone(), mont_a.into_value(), mont_b.into_value());
        builder = carry_order(builder, self);
        if let Some(generator) = self.generator() {
            let image = edwards_to_montgomery(generator.coordinates(), &scale)?;
            builder = builder.generator_coordinates(&image);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::{CurveBuilder, CurveFamily, Error, registry};
    use num_bigint::BigUint;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    fn toy() -> crate::Curve {
        CurveBuilder::twisted_edwards(big(101), big(1), big(2))
            .generator(big(2), big(17))
            .order(big(104))
            .build()
            .unwrap()
    }

    #[test]
    fn neutral_is_affine() {
        let curve = toy();
        let neutral = curve.neutral();
        assert!(neutral.is_neutral());
        assert!(!neutral.is_infinity());
        assert_eq!(neutral.x(), Some(&big(0)));
        assert_eq!(neutral.y(), Some(&big(1)));
    }

    #[test]
    fn isomorphic_by_square_ratio() {
        // 4 is a square, 2 is not (101 ≡ 5 mod 8)
        let curve = toy();
        let scaled = CurveBuilder::twisted_edwards(big(101), big(4), big(8))
            .build()
            .unwrap();
        assert!(curve.is_isomorphic(&scaled));

        let twist = curve.twist(None).unwrap();
        assert_eq!(twist, CurveBuilder::twisted_edwards(big(101), big(2), big(4)).build().unwrap());
        assert!(!curve.is_isomorphic(&twist));
    }

    #[test]
    fn montgomery_round_trip() {
        let curve = toy();
        let montgomery = curve.to_montgomery(None).unwrap();
        assert_eq!(montgomery.family(), CurveFamily::Montgomery);
        assert_eq!(montgomery.order(), Some(&big(104)));
        assert_eq!(montgomery.to_twisted_edwards(None).unwrap(), curve);

        let generator = montgomery.generator().unwrap();
        assert_eq!(generator.naive_order().unwrap(), big(104));
    }

    #[test]
    fn montgomery_b_must_match_square_class() {
        let curve = toy();
        let (_, native_b) = match curve.model() {
            crate::CurveModel::TwistedEdwards(model) => model.montgomery_coefficients().unwrap(),
            _ => unreachable!(),
        };
        // scaling B by the non-residue 2 leaves the square class
        let b = (native_b * 2u64).into_value();
        assert!(matches!(
            curve.to_montgomery(Some(&b)),
            Err(Error::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn ed25519_montgomery_form() {
        let ed25519 = registry::lookup("ed25519").unwrap();
        let curve25519 = registry::lookup("curve25519").unwrap();
        assert_eq!(ed25519.to_montgomery(Some(&big(1))).unwrap(), curve25519);

        let minus_one = ed25519.p() - 1u32;
        assert_eq!(
            curve25519.to_twisted_edwards(Some(&minus_one)).unwrap(),
            ed25519
        );
    }
}
