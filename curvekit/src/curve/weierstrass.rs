//! Short Weierstrass curves `y² = x³ + ax + b`.

use super::{Coordinates, CurveBuilder, CurveModel, GroupLaw, is_power_residue};
use crate::{Curve, Error, Result};
use num_bigint::BigInt;
use primefield::FieldElement;

/// Coefficients of a short Weierstrass curve `y² = x³ + ax + b`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ShortWeierstrass {
    a: FieldElement,
    b: FieldElement,
}

impl ShortWeierstrass {
    pub(crate) fn new(a: FieldElement, b: FieldElement) -> Self {
        Self { a, b }
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub(crate) fn into_coefficients(self) -> (FieldElement, FieldElement) {
        (self.a, self.b)
    }

    /// Discriminant `4a³ + 27b²` vanishes.
    pub(super) fn is_singular(&self) -> bool {
        (self.a.pow_u64(3) * 4u64 + self.b.square() * 27u64).is_zero()
    }

    pub(super) fn twist(&self, d: &FieldElement) -> Self {
        Self::new(&self.a * d.square(), &self.b * d.pow_u64(3))
    }

    /// Isomorphic iff `a' = u⁴a` and `b' = u⁶b` for some `u`.
    pub(super) fn is_isomorphic(&self, other: &Self) -> bool {
        let (a, b, a2, b2) = (&self.a, &self.b, &other.a, &other.b);
        if a.is_zero() != a2.is_zero() || b.is_zero() != b2.is_zero() {
            return false;
        }

        if a.is_zero() {
            return is_power_residue(&(b2 / b), 6);
        }
        if b.is_zero() {
            return is_power_residue(&(a2 / a), 4);
        }

        let u2 = (b2 * a) / (b * a2);
        u2.is_quadratic_residue() && u2.square() == a2 / a && u2.pow_u64(3) == b2 / b
    }
}

impl GroupLaw for ShortWeierstrass {
    fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool {
        self.y_squared(x).is_some_and(|rhs| y.square() == rhs)
    }

    fn y_squared(&self, x: &FieldElement) -> Option<FieldElement> {
        Some(x.pow_u64(3) + &self.a * x + &self.b)
    }

    fn neutral(&self) -> Coordinates {
        Coordinates::Infinity
    }

    fn negate(&self, point: &Coordinates) -> Coordinates {
        match point {
            Coordinates::Infinity => Coordinates::Infinity,
            Coordinates::Affine(x, y) => Coordinates::Affine(x.clone(), -y),
        }
    }

    fn add(&self, lhs: &Coordinates, rhs: &Coordinates) -> Result<Coordinates> {
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (Coordinates::Infinity, _) => return Ok(rhs.clone()),
            (_, Coordinates::Infinity) => return Ok(lhs.clone()),
            (Coordinates::Affine(x1, y1), Coordinates::Affine(x2, y2)) => ((x1, y1), (x2, y2)),
        };

        if x1 == x2 {
            if (y1 + y2).is_zero() {
                return Ok(Coordinates::Infinity);
            }
            return self.double(lhs);
        }

        let lambda = (y2 - y1).try_div(&(x2 - x1))?;
        let x3 = lambda.square() - x1 - x2;
        let y3 = lambda * (x1 - &x3) - y1;
        Ok(Coordinates::Affine(x3, y3))
    }

    fn double(&self, point: &Coordinates) -> Result<Coordinates> {
        let (x, y) = match point {
            Coordinates::Affine(_, y) if y.is_zero() => return Ok(Coordinates::Infinity),
            Coordinates::Affine(x, y) => (x, y),
            Coordinates::Infinity => return Ok(Coordinates::Infinity),
        };

        let lambda = (x.square() * 3u64 + &self.a).try_div(&(y * 2u64))?;
        let x3 = lambda.square() - x * 2u64;
        let y3 = lambda * (x - &x3) - y;
        Ok(Coordinates::Affine(x3, y3))
    }
}

impl Curve {
    /// Isomorphic short Weierstrass curve with the prescribed coefficient
    /// `a`.
    ///
    /// With `s² = a'/a` (taking the root `s` that is itself a square) the
    /// curve becomes `y² = x³ + a'x + s³b`, and points map as
    /// `(x, y) ↦ (s·x, s·√s·y)`. Order and cofactor are preserved.
    pub fn twist_fp_isomorphic_fixed_a(&self, a: &BigInt) -> Result<Curve> {
        let CurveModel::ShortWeierstrass(model) = self.model() else {
            return Err(Error::UnsupportedOperation(
                "fixed-a isomorphism requires a short Weierstrass curve",
            ));
        };

        let target_a = FieldElement::from_bigint(a, self.p());
        if model.a.is_zero() || target_a.is_zero() {
            return Err(Error::UnsupportedOperation(
                "fixed-a isomorphism requires non-zero a",
            ));
        }

        let (r1, r2) = target_a
            .try_div(&model.a)?
            .sqrt()
            .ok_or(Error::UnsupportedOperation("a'/a is not a square"))?;
        let s = [r1, r2]
            .into_iter()
            .find(FieldElement::is_quadratic_residue)
            .ok_or(Error::UnsupportedOperation("no square root of a'/a is a square"))?;
        let (sqrt_s, _) = s
            .sqrt()
            .ok_or(Error::UnsupportedOperation("no square root of a'/a is a square"))?;

        let b = s.pow_u64(3) * &model.b;
        let mut builder =
            CurveBuilder::short_weierstrass(self.p().clone(), target_a.into_value(), b.into_value());
        if let Some(order) = self.order() {
            builder = builder.order(order.clone());
        }
        if let Some(cofactor) = self.cofactor() {
            builder = builder.cofactor(cofactor.clone());
        }
        if let Some(generator) = self.generator() {
            if let Coordinates::Affine(x, y) = generator.coordinates() {
                let image = Coordinates::Affine(&s * x, &s * &sqrt_s * y);
                builder = builder.generator_coordinates(&image);
            }
        }

        builder.build()
    }
}
