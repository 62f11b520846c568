//! Montgomery curves `By² = x³ + Ax² + x`.

use super::{Coordinates, CurveBuilder, CurveModel, GroupLaw};
use crate::{
    Curve, Error, Result,
    point::{montgomery_to_edwards, montgomery_to_weierstrass, scale_from_ratio},
};
use primefield::FieldElement;

/// Coefficients of a Montgomery curve `By² = x³ + Ax² + x`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Montgomery {
    a: FieldElement,
    b: FieldElement,
}

impl Montgomery {
    pub(crate) fn new(a: FieldElement, b: FieldElement) -> Self {
        Self { a, b }
    }

    /// Coefficient `A`.
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient `B`.
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub(crate) fn into_coefficients(self) -> (FieldElement, FieldElement) {
        (self.a, self.b)
    }

    pub(super) fn is_singular(&self) -> bool {
        self.b.is_zero() || self.a.square() == self.a.with_value(4u32.into())
    }

    pub(super) fn twist(&self, d: &FieldElement) -> Self {
        Self::new(self.a.clone(), &self.b * d)
    }

    /// Isomorphic iff `A` agrees and `B'/B` is a square.
    pub(super) fn is_isomorphic(&self, other: &Self) -> bool {
        self.a == other.a && (&other.b / &self.b).is_quadratic_residue()
    }

    /// Coefficients `(a, d)` of the birationally equivalent twisted Edwards
    /// curve, `a = (A + 2)/B` and `d = (A - 2)/B`.
    pub(crate) fn twisted_edwards_coefficients(&self) -> Result<(FieldElement, FieldElement)> {
        let a = (&self.a + 2u64).try_div(&self.b)?;
        let d = (&self.a - 2u64).try_div(&self.b)?;
        Ok((a, d))
    }

    /// Coefficients of the isomorphic short Weierstrass curve,
    /// `a = (3 - A²)/(3B²)` and `b = (2A³ - 9A)/(27B³)`.
    pub(crate) fn short_weierstrass_coefficients(&self) -> Result<(FieldElement, FieldElement)> {
        let three = self.a.with_value(3u32.into());
        let a = (&three - self.a.square()).try_div(&(self.b.square() * 3u64))?;
        let b = (self.a.pow_u64(3) * 2u64 - &self.a * 9u64).try_div(&(self.b.pow_u64(3) * 27u64))?;
        Ok((a, b))
    }
}

impl GroupLaw for Montgomery {
    fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool {
        &self.b * y.square() == x.pow_u64(3) + &self.a * x.square() + x
    }

    fn y_squared(&self, x: &FieldElement) -> Option<FieldElement> {
        (x.pow_u64(3) + &self.a * x.square() + x).try_div(&self.b).ok()
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
        let x3 = &self.b * lambda.square() - &self.a - x1 - x2;
        let y3 = lambda * (x1 - &x3) - y1;
        Ok(Coordinates::Affine(x3, y3))
    }

    fn double(&self, point: &Coordinates) -> Result<Coordinates> {
        let (x, y) = match point {
            Coordinates::Affine(_, y) if y.is_zero() => return Ok(Coordinates::Infinity),
            Coordinates::Affine(x, y) => (x, y),
            Coordinates::Infinity => return Ok(Coordinates::Infinity),
        };

        let numerator = x.square() * 3u64 + &self.a * x * 2u64 + 1u64;
        let lambda = numerator.try_div(&(&self.b * y * 2u64))?;
        let x3 = &self.b * lambda.square() - &self.a - x * 2u64;
        let y3 = lambda * (x - &x3) - y;
        Ok(Coordinates::Affine(x3, y3))
    }
}

impl Curve {
    /// Birationally equivalent twisted Edwards curve.
    ///
    /// The native image has `a = (A + 2)/B` and `d = (A - 2)/B`. A requested
    /// `a` must differ from the native one by a square factor `c`, which then
    /// also scales `d`. Order, cofactor and generator carry over.
    pub fn to_twisted_edwards(&self, a: Option<&num_bigint::BigUint>) -> Result<Curve> {
        let CurveModel::Montgomery(model) = self.model() else {
            return Err(Error::UnsupportedOperation(
                "conversion to twisted Edwards requires a Montgomery curve",
            ));
        };

        let (native_a, native_d) = model.twisted_edwards_coefficients()?;
        let (a, d) = match a {
            None => (native_a, native_d),
            Some(a) => {
                let a = self.element(a.clone());
                let c = a.try_div(&native_a)?;
                if c.is_zero() || !c.is_quadratic_residue() {
                    return Err(Error::UnsupportedOperation(
                        "requested a is not in the square class of the native a",
                    ));
                }
                (a, c * native_d)
            }
        };

        // the Montgomery B of the Edwards curve's native image is 4/(a - d)
        let edwards_b = a.with_value(4u32.into()).try_div(&(&a - &d))?;
        let scale = scale_from_ratio(&model.b, &edwards_b)?;

        let mut builder =
            CurveBuilder::twisted_edwards(self.p().clone(), a.into_value(), d.into_value());
        builder = carry_order(builder, self);
        if let Some(generator) = self.generator() {
            let image = montgomery_to_edwards(generator.coordinates(), &scale)?;
            builder = builder.generator_coordinates(&image);
        }
        builder.build()
    }

    /// Isomorphic short Weierstrass curve, mapping points by
    /// `(u, v) ↦ (u/B + A/(3B), v/B)`.
    pub fn to_short_weierstrass(&self) -> Result<Curve> {
        let CurveModel::Montgomery(model) = self.model() else {
            return Err(Error::UnsupportedOperation(
                "conversion to short Weierstrass requires a Montgomery curve",
            ));
        };

        let (a, b) = model.short_weierstrass_coefficients()?;
        let mut builder =
            CurveBuilder::short_weierstrass(self.p().clone(), a.into_value(), b.into_value());
        builder = carry_order(builder, self);
        if let Some(generator) = self.generator() {
            let image = montgomery_to_weierstrass(generator.coordinates(), model)?;
            builder = builder.generator_coordinates(&image);
        }
        builder.build()
    }
}

/// Copy order and cofactor of `curve` into `builder`.
pub(super) fn carry_order(mut builder: CurveBuilder, curve: &Curve) -> CurveBuilder {
    if let Some(order) = curve.order() {
        builder = builder.order(order.clone());
    }
    if let Some(cofactor) = curve.cofactor() {
        builder = builder.cofactor(cofactor.clone());
    }
    builder
}
