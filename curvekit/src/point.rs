//! Affine curve points.

#![allow(clippy::op_ref)]

mod convert;
mod encoding;

pub use self::encoding::decode_uncompressed_coordinates;
pub(crate) use self::{
    convert::{edwards_to_montgomery, montgomery_to_edwards, montgomery_to_weierstrass, scale_from_ratio},
    encoding::eddsa_encoding_len,
};

use crate::{
    Curve, Error, Result,
    curve::{Coordinates, GroupLaw},
};
use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};
use num_bigint::{BigInt, BigUint, Sign};

/// Point on an elliptic curve in affine coordinates.
///
/// Points are immutable values carrying a handle to the [`Curve`] they
/// belong to. Arithmetic between points on different curves fails with
/// [`Error::CurveMismatch`] through the `try_*` methods and panics through
/// the operator impls.
#[derive(Clone)]
pub struct AffinePoint {
    coords: Coordinates,
    curve: Curve,
}

impl AffinePoint {
    /// Create a point, checking that it satisfies the curve equation.
    pub fn new(x: BigUint, y: BigUint, curve: &Curve) -> Result<Self> {
        let point = Self::from_coordinates_unchecked(x, y, curve);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    /// Create a point without checking the curve equation.
    ///
    /// Use [`AffinePoint::is_on_curve`] to validate the result.
    pub fn from_coordinates_unchecked(x: BigUint, y: BigUint, curve: &Curve) -> Self {
        let coords = Coordinates::Affine(curve.element(x), curve.element(y));
        Self::from_coords(coords, curve)
    }

    /// Neutral element of the curve group.
    pub fn neutral(curve: &Curve) -> Self {
        curve.neutral()
    }

    pub(crate) fn from_coords(coords: Coordinates, curve: &Curve) -> Self {
        Self {
            coords,
            curve: curve.clone(),
        }
    }

    /// Curve this point lives on.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Affine coordinates.
    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    /// x-coordinate, `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        match &self.coords {
            Coordinates::Affine(x, _) => Some(x.value()),
            Coordinates::Infinity => None,
        }
    }

    /// y-coordinate, `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        match &self.coords {
            Coordinates::Affine(_, y) => Some(y.value()),
            Coordinates::Infinity => None,
        }
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.coords == Coordinates::Infinity
    }

    /// Is this the neutral element of its curve group?
    ///
    /// For twisted Edwards curves this is the affine point `(0, 1)`, for the
    /// other families the point at infinity.
    pub fn is_neutral(&self) -> bool {
        self.coords == self.law().neutral()
    }

    /// Does this point satisfy its curve equation?
    pub fn is_on_curve(&self) -> bool {
        match &self.coords {
            Coordinates::Affine(x, y) => self.law().contains(x, y),
            Coordinates::Infinity => self.is_neutral(),
        }
    }

    /// Add two points on the same curve.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_curve(rhs)?;
        let coords = self.law().add(&self.coords, &rhs.coords)?;
        Ok(self.with_coords(coords))
    }

    /// Subtract two points on the same curve.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.try_add(&-rhs)
    }

    /// Double this point.
    pub fn double(&self) -> Result<Self> {
        let coords = self.law().double(&self.coords)?;
        Ok(self.with_coords(coords))
    }

    /// Multiply by a scalar using double-and-add.
    pub fn try_mul(&self, scalar: &BigUint) -> Result<Self> {
        let law = self.law();
        let mut acc = law.neutral();
        for bit in (0..scalar.bits()).rev() {
            acc = law.double(&acc)?;
            if scalar.bit(bit) {
                acc = law.add(&acc, &self.coords)?;
            }
        }
        Ok(self.with_coords(acc))
    }

    /// Multiply by a signed scalar.
    pub fn try_mul_signed(&self, scalar: &BigInt) -> Result<Self> {
        let product = self.try_mul(scalar.magnitude())?;
        Ok(match scalar.sign() {
            Sign::Minus => -product,
            _ => product,
        })
    }

    /// Order of this point, computed by repeated addition until the neutral
    /// element recurs.
    ///
    /// Runs in time linear in the order: only usable on toy curves.
    pub fn naive_order(&self) -> Result<BigUint> {
        if !self.is_on_curve() {
            return Err(Error::NotOnCurve);
        }

        let law = self.law();
        let neutral = law.neutral();
        let mut order = BigUint::from(1u32);
        let mut current = self.coords.clone();
        while current != neutral {
            current = law.add(&current, &self.coords)?;
            order += 1u32;
        }
        Ok(order)
    }

    fn law(&self) -> &dyn GroupLaw {
        self.curve.group_law()
    }

    fn with_coords(&self, coords: Coordinates) -> Self {
        Self::from_coords(coords, &self.curve)
    }

    fn check_curve(&self, other: &Self) -> Result<()> {
        if self.curve == other.curve {
            Ok(())
        } else {
            Err(Error::CurveMismatch)
        }
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords && self.curve == other.curve
    }
}

impl Eq for AffinePoint {}

impl fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            Coordinates::Affine(x, y) => f
                .debug_struct("AffinePoint")
                .field("x", &format_args!("0x{:x}", x))
                .field("y", &format_args!("0x{:x}", y))
                .finish(),
            Coordinates::Infinity => f.write_str("AffinePoint(Infinity)"),
        }
    }
}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            Coordinates::Affine(x, y) => write!(f, "(0x{:x}, 0x{:x})", x, y),
            Coordinates::Infinity => f.write_str("Infinity"),
        }
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        self.with_coords(self.law().negate(&self.coords))
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: &AffinePoint) -> AffinePoint {
        self.try_add(rhs).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl Add<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: AffinePoint) -> AffinePoint {
        &self + &rhs
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: &AffinePoint) -> AffinePoint {
        &self + rhs
    }
}

impl Sub<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: &AffinePoint) -> AffinePoint {
        self.try_sub(rhs).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl Sub<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: AffinePoint) -> AffinePoint {
        &self - &rhs
    }
}

impl Mul<&BigUint> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &BigUint) -> AffinePoint {
        self.try_mul(scalar).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl Mul<&BigUint> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &BigUint) -> AffinePoint {
        &self * scalar
    }
}
