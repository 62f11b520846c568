//! Elliptic curve domain parameters.
//!
//! A [`Curve`] is a cheaply clonable, immutable handle to a set of domain
//! parameters: the curve model with its coefficients, the prime `p`, and the
//! optional order, cofactor, generator, name, OID and quirks. Points keep a
//! handle to the curve they live on.

mod edwards;
mod montgomery;
mod weierstrass;

pub use self::{edwards::TwistedEdwards, montgomery::Montgomery, weierstrass::ShortWeierstrass};

use crate::{AffinePoint, CurveQuirk, Error, Result};
use alloc::{collections::BTreeSet, string::String, sync::Arc, vec::Vec};
use const_oid::ObjectIdentifier;
use core::fmt;
use num_bigint::{BigInt, BigUint, Sign};
use primefield::FieldElement;

/// Affine coordinates of a curve point.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Coordinates {
    /// Point at infinity of a Weierstrass or Montgomery curve.
    Infinity,

    /// Finite point `(x, y)`.
    Affine(FieldElement, FieldElement),
}

/// Group law of a curve family in affine coordinates.
pub trait GroupLaw {
    /// Does `(x, y)` satisfy the curve equation?
    fn contains(&self, x: &FieldElement, y: &FieldElement) -> bool;

    /// Value of `y²` implied by the curve equation at `x`, or `None` when the
    /// equation has no solution for any `y`.
    fn y_squared(&self, x: &FieldElement) -> Option<FieldElement>;

    /// Neutral element of the group.
    fn neutral(&self) -> Coordinates;

    /// Additive inverse.
    fn negate(&self, point: &Coordinates) -> Coordinates;

    /// Sum of two points.
    fn add(&self, lhs: &Coordinates, rhs: &Coordinates) -> Result<Coordinates>;

    /// Sum of a point with itself.
    fn double(&self, point: &Coordinates) -> Result<Coordinates>;
}

/// Curve family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CurveFamily {
    /// `y² = x³ + ax + b`
    ShortWeierstrass,

    /// `By² = x³ + Ax² + x`
    Montgomery,

    /// `ax² + y² = 1 + dx²y²`
    TwistedEdwards,
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CurveFamily::ShortWeierstrass => "short Weierstrass",
            CurveFamily::Montgomery => "Montgomery",
            CurveFamily::TwistedEdwards => "twisted Edwards",
        })
    }
}

/// Curve model along with its family specific coefficients.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CurveModel {
    /// Short Weierstrass curve.
    ShortWeierstrass(ShortWeierstrass),

    /// Montgomery curve.
    Montgomery(Montgomery),

    /// Twisted Edwards curve.
    TwistedEdwards(TwistedEdwards),
}

impl CurveModel {
    /// Family of this model.
    pub fn family(&self) -> CurveFamily {
        match self {
            CurveModel::ShortWeierstrass(_) => CurveFamily::ShortWeierstrass,
            CurveModel::Montgomery(_) => CurveFamily::Montgomery,
            CurveModel::TwistedEdwards(_) => CurveFamily::TwistedEdwards,
        }
    }

    /// Group law of this model.
    pub fn group_law(&self) -> &dyn GroupLaw {
        match self {
            CurveModel::ShortWeierstrass(model) => model,
            CurveModel::Montgomery(model) => model,
            CurveModel::TwistedEdwards(model) => model,
        }
    }

    /// The two curve coefficients: `(a, b)`, `(A, B)` or `(a, d)`.
    pub fn coefficients(&self) -> (&FieldElement, &FieldElement) {
        match self {
            CurveModel::ShortWeierstrass(model) => (model.a(), model.b()),
            CurveModel::Montgomery(model) => (model.a(), model.b()),
            CurveModel::TwistedEdwards(model) => (model.a(), model.d()),
        }
    }

    fn is_singular(&self) -> bool {
        match self {
            CurveModel::ShortWeierstrass(model) => model.is_singular(),
            CurveModel::Montgomery(model) => model.is_singular(),
            CurveModel::TwistedEdwards(model) => model.is_singular(),
        }
    }
}

/// Elliptic curve over a prime field.
#[derive(Clone)]
pub struct Curve(Arc<CurveInner>);

struct CurveInner {
    model: CurveModel,
    p: BigUint,
    order: Option<BigUint>,
    cofactor: Option<BigUint>,
    generator: Option<(FieldElement, FieldElement)>,
    name: Option<String>,
    oid: Option<ObjectIdentifier>,
    quirks: BTreeSet<CurveQuirk>,
}

impl Curve {
    /// Curve model and coefficients.
    pub fn model(&self) -> &CurveModel {
        &self.0.model
    }

    /// Curve family.
    pub fn family(&self) -> CurveFamily {
        self.0.model.family()
    }

    /// Prime modulus of the base field.
    pub fn p(&self) -> &BigUint {
        &self.0.p
    }

    /// Order of the generator, if known.
    pub fn order(&self) -> Option<&BigUint> {
        self.0.order.as_ref()
    }

    /// Cofactor, if known.
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.0.cofactor.as_ref()
    }

    /// Curve name, if any.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// ASN.1 object identifier, if any.
    pub fn oid(&self) -> Option<ObjectIdentifier> {
        self.0.oid
    }

    /// Quirks attached to this curve.
    pub fn quirks(&self) -> &BTreeSet<CurveQuirk> {
        &self.0.quirks
    }

    /// Does this curve carry the given quirk?
    pub fn has_quirk(&self, quirk: CurveQuirk) -> bool {
        self.0.quirks.contains(&quirk)
    }

    /// Bit length of the base field modulus.
    pub fn field_bits(&self) -> u64 {
        self.0.p.bits()
    }

    /// Byte length of an encoded base field element.
    pub fn field_len(&self) -> usize {
        self.field_bits().div_ceil(8) as usize
    }

    /// Element of the base field.
    pub fn element(&self, value: BigUint) -> FieldElement {
        FieldElement::new(value, &self.0.p)
    }

    /// Generator point, if the curve declares one.
    pub fn generator(&self) -> Option<AffinePoint> {
        self.0
            .generator
            .as_ref()
            .map(|(x, y)| AffinePoint::from_coords(Coordinates::Affine(x.clone(), y.clone()), self))
    }

    /// Neutral element of the curve group.
    pub fn neutral(&self) -> AffinePoint {
        AffinePoint::from_coords(self.group_law().neutral(), self)
    }

    /// Does `(x, y)` lie on this curve?
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        self.group_law()
            .contains(&self.element(x.clone()), &self.element(y.clone()))
    }

    /// All points with the given x-coordinate: zero, one or two of them.
    pub fn points_with_x(&self, x: &BigUint) -> Vec<AffinePoint> {
        let x = self.element(x.clone());
        let roots = self
            .group_law()
            .y_squared(&x)
            .and_then(|y_squared| y_squared.sqrt());

        match roots {
            None => Vec::new(),
            Some((y1, y2)) if y1 == y2 => {
                alloc::vec![AffinePoint::from_coords(Coordinates::Affine(x, y1), self)]
            }
            Some((y1, y2)) => alloc::vec![
                AffinePoint::from_coords(Coordinates::Affine(x.clone(), y1), self),
                AffinePoint::from_coords(Coordinates::Affine(x, y2), self),
            ],
        }
    }

    /// Quadratic twist of this curve by the non-residue `d`.
    ///
    /// When `d` is omitted the smallest quadratic non-residue is used. The
    /// twisted curve has neither generator nor order.
    pub fn twist(&self, d: Option<&BigUint>) -> Result<Curve> {
        let d = match d {
            Some(d) => {
                let d = self.element(d.clone());
                if d.is_zero() || d.is_quadratic_residue() {
                    return Err(Error::UnsupportedOperation(
                        "twist requires a quadratic non-residue",
                    ));
                }
                d
            }
            None => self.smallest_non_residue()?,
        };

        let model = match self.model() {
            CurveModel::ShortWeierstrass(model) => CurveModel::ShortWeierstrass(model.twist(&d)),
            CurveModel::Montgomery(model) => CurveModel::Montgomery(model.twist(&d)),
            CurveModel::TwistedEdwards(model) => CurveModel::TwistedEdwards(model.twist(&d)),
        };
        CurveBuilder::from_model(model).build()
    }

    /// Are the two curves isomorphic over the base field?
    pub fn is_isomorphic(&self, other: &Curve) -> bool {
        if self.p() != other.p() {
            return false;
        }

        match (self.model(), other.model()) {
            (CurveModel::ShortWeierstrass(lhs), CurveModel::ShortWeierstrass(rhs)) => {
                lhs.is_isomorphic(rhs)
            }
            (CurveModel::Montgomery(lhs), CurveModel::Montgomery(rhs)) => lhs.is_isomorphic(rhs),
            (CurveModel::TwistedEdwards(lhs), CurveModel::TwistedEdwards(rhs)) => {
                lhs.is_isomorphic(rhs)
            }
            _ => false,
        }
    }

    /// Trace of Frobenius `t = p + 1 - n·h`.
    ///
    /// The quadratic twist then has `p + 1 + t` points. Requires both order
    /// and cofactor to be known.
    pub fn frobenius_trace(&self) -> Option<BigInt> {
        let points = self.order()? * self.cofactor()?;
        Some(signed(&self.0.p) + 1 - signed(&points))
    }

    /// Builder pre-populated with this curve's parameters.
    pub fn to_builder(&self) -> CurveBuilder {
        let mut builder = CurveBuilder::from_model(self.0.model.clone());
        builder.order = self.0.order.clone();
        builder.cofactor = self.0.cofactor.clone();
        builder.generator = self
            .0
            .generator
            .as_ref()
            .map(|(x, y)| (x.value().clone(), y.value().clone()));
        builder.name = self.0.name.clone();
        builder.oid = self.0.oid;
        builder.quirks = self.0.quirks.clone();
        builder
    }

    pub(crate) fn group_law(&self) -> &dyn GroupLaw {
        self.0.model.group_law()
    }

    /// Generator, failing if the curve has none.
    pub(crate) fn require_generator(&self) -> Result<AffinePoint> {
        self.generator()
            .ok_or(Error::UnsupportedOperation("curve has no generator"))
    }

    /// Order, failing if the curve has none.
    pub(crate) fn require_order(&self) -> Result<&BigUint> {
        self.order()
            .ok_or(Error::UnsupportedOperation("curve order is unknown"))
    }

    /// Smallest non-residue in `2..p`. Only a malformed modulus leaves the
    /// range without one.
    fn smallest_non_residue(&self) -> Result<FieldElement> {
        let mut candidate = BigUint::from(2u32);
        while &candidate < self.p() {
            let element = self.element(candidate.clone());
            if !element.is_quadratic_residue() {
                return Ok(element);
            }
            candidate += 1u32;
        }
        Err(Error::InvalidCurve)
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.model == other.0.model
                && self.0.p == other.0.p
                && self.0.order == other.0.order
                && self.0.cofactor == other.0.cofactor
                && self.0.generator == other.0.generator)
    }
}

impl Eq for Curve {}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("name", &self.0.name)
            .field("model", &self.0.model)
            .field("p", &format_args!("0x{:x}", self.0.p))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{} curve over GF(0x{:x})", self.family(), self.0.p),
        }
    }
}

/// Builder for [`Curve`] domain parameters.
///
/// ```
/// use curvekit::CurveBuilder;
///
/// let curve = CurveBuilder::short_weierstrass(263u32.into(), 2u32.into(), 3u32.into())
///     .generator(0u32.into(), 23u32.into())
///     .order(135u32.into())
///     .name("toy")
///     .build()?;
/// assert!(curve.contains(&4u32.into(), &115u32.into()));
/// # Ok::<(), curvekit::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CurveBuilder {
    family: CurveFamily,
    p: BigUint,
    coefficients: (BigUint, BigUint),
    order: Option<BigUint>,
    cofactor: Option<BigUint>,
    generator: Option<(BigUint, BigUint)>,
    name: Option<String>,
    oid: Option<ObjectIdentifier>,
    quirks: BTreeSet<CurveQuirk>,
}

impl CurveBuilder {
    /// Short Weierstrass curve `y² = x³ + ax + b` over `GF(p)`.
    pub fn short_weierstrass(p: BigUint, a: BigUint, b: BigUint) -> Self {
        Self::new(CurveFamily::ShortWeierstrass, p, a, b)
    }

    /// Montgomery curve `By² = x³ + Ax² + x` over `GF(p)`.
    pub fn montgomery(p: BigUint, a: BigUint, b: BigUint) -> Self {
        Self::new(CurveFamily::Montgomery, p, a, b)
    }

    /// Twisted Edwards curve `ax² + y² = 1 + dx²y²` over `GF(p)`.
    pub fn twisted_edwards(p: BigUint, a: BigUint, d: BigUint) -> Self {
        Self::new(CurveFamily::TwistedEdwards, p, a, d)
    }

    /// Order of the generator.
    pub fn order(mut self, order: BigUint) -> Self {
        self.order = Some(order);
        self
    }

    /// Cofactor.
    pub fn cofactor(mut self, cofactor: BigUint) -> Self {
        self.cofactor = Some(cofactor);
        self
    }

    /// Generator point.
    pub fn generator(mut self, x: BigUint, y: BigUint) -> Self {
        self.generator = Some((x, y));
        self
    }

    /// Curve name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// ASN.1 object identifier.
    pub fn oid(mut self, oid: ObjectIdentifier) -> Self {
        self.oid = Some(oid);
        self
    }

    /// Attach a quirk.
    pub fn quirk(mut self, quirk: CurveQuirk) -> Self {
        self.quirks.insert(quirk);
        self
    }

    /// Validate the parameters and build the curve.
    ///
    /// Fails with [`Error::InvalidCurve`] for an even or tiny modulus, a
    /// singular curve or a zero order/cofactor, and with
    /// [`Error::NotOnCurve`] when the generator violates the curve equation.
    pub fn build(self) -> Result<Curve> {
        if self.p < BigUint::from(5u32) || !self.p.bit(0) {
            return Err(Error::InvalidCurve);
        }

        let fe = |value: BigUint| FieldElement::new(value, &self.p);
        let (c1, c2) = (fe(self.coefficients.0), fe(self.coefficients.1));
        let model = match self.family {
            CurveFamily::ShortWeierstrass => {
                CurveModel::ShortWeierstrass(ShortWeierstrass::new(c1, c2))
            }
            CurveFamily::Montgomery => CurveModel::Montgomery(Montgomery::new(c1, c2)),
            CurveFamily::TwistedEdwards => CurveModel::TwistedEdwards(TwistedEdwards::new(c1, c2)),
        };
        if model.is_singular() {
            return Err(Error::InvalidCurve);
        }

        let non_zero = |value: &Option<BigUint>| value.as_ref().is_none_or(|v| v.bits() > 0);
        if !non_zero(&self.order) || !non_zero(&self.cofactor) {
            return Err(Error::InvalidCurve);
        }

        let generator = match self.generator {
            Some((x, y)) => {
                let (x, y) = (fe(x), fe(y));
                if !model.group_law().contains(&x, &y) {
                    return Err(Error::NotOnCurve);
                }
                Some((x, y))
            }
            None => None,
        };

        Ok(Curve(Arc::new(CurveInner {
            model,
            p: self.p,
            order: self.order,
            cofactor: self.cofactor,
            generator,
            name: self.name,
            oid: self.oid,
            quirks: self.quirks,
        })))
    }

    fn new(family: CurveFamily, p: BigUint, c1: BigUint, c2: BigUint) -> Self {
        Self {
            family,
            p,
            coefficients: (c1, c2),
            order: None,
            cofactor: None,
            generator: None,
            name: None,
            oid: None,
            quirks: BTreeSet::new(),
        }
    }

    pub(crate) fn from_model(model: CurveModel) -> Self {
        let (family, (c1, c2)) = match model {
            CurveModel::ShortWeierstrass(m) => (CurveFamily::ShortWeierstrass, m.into_coefficients()),
            CurveModel::Montgomery(m) => (CurveFamily::Montgomery, m.into_coefficients()),
            CurveModel::TwistedEdwards(m) => (CurveFamily::TwistedEdwards, m.into_coefficients()),
        };
        let p = c1.modulus().clone();
        Self::new(family, p, c1.into_value(), c2.into_value())
    }

    pub(crate) fn generator_coordinates(self, point: &Coordinates) -> Self {
        match point {
            Coordinates::Affine(x, y) => self.generator(x.value().clone(), y.value().clone()),
            Coordinates::Infinity => self,
        }
    }
}

/// `value` as a signed integer.
pub(crate) fn signed(value: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, value.clone())
}

/// Is `value` a `k`-th power residue modulo the prime `p`?
pub(crate) fn is_power_residue(value: &FieldElement, k: u64) -> bool {
    use num_integer::Integer;

    if value.is_zero() {
        return true;
    }
    let p_minus_1 = value.modulus() - 1u32;
    let g = p_minus_1.gcd(&BigUint::from(k));
    value.pow(&(p_minus_1 / g)).is_one()
}

#[cfg(test)]
mod tests {
    use super::{CurveBuilder, CurveFamily};
    use crate::{Error, registry};
    use num_bigint::{BigInt, BigUint};

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn reject_singular() {
        // 4a³ + 27b² = 0 for a = -3, b = 2
        let result = CurveBuilder::short_weierstrass(big(263), big(260), big(2)).build();
        assert_eq!(result.unwrap_err(), Error::InvalidCurve);

        let result = CurveBuilder::montgomery(big(101), big(2), big(1)).build();
        assert_eq!(result.unwrap_err(), Error::InvalidCurve);

        let result = CurveBuilder::twisted_edwards(big(101), big(5), big(5)).build();
        assert_eq!(result.unwrap_err(), Error::InvalidCurve);
    }

    #[test]
    fn reject_bad_modulus() {
        for p in [0, 2, 3, 100] {
            let result = CurveBuilder::short_weierstrass(big(p), big(1), big(1)).build();
            assert_eq!(result.unwrap_err(), Error::InvalidCurve, "p = {}", p);
        }
    }

    #[test]
    fn reject_generator_off_curve() {
        let result = CurveBuilder::short_weierstrass(big(263), big(2), big(3))
            .generator(big(0), big(24))
            .build();
        assert_eq!(result.unwrap_err(), Error::NotOnCurve);
    }

    #[test]
    fn equality_ignores_metadata() {
        let a = CurveBuilder::short_weierstrass(big(263), big(2), big(3))
            .generator(big(0), big(23))
            .name("first")
            .build()
            .unwrap();
        let b = CurveBuilder::short_weierstrass(big(263), big(2), big(3))
            .generator(big(0), big(23))
            .name("second")
            .build()
            .unwrap();
        let c = CurveBuilder::short_weierstrass(big(263), big(2), big(3))
            .generator(big(4), big(115))
            .build()
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn points_with_x() {
        let curve = CurveBuilder::short_weierstrass(big(263), big(2), big(3))
            .build()
            .unwrap();
        let points = curve.points_with_x(&big(0));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].y(), Some(&big(23)));
        assert_eq!(points[1].y(), Some(&big(240)));

        // x = 2 gives y² = 15, a non-residue mod 263
        assert!(curve.points_with_x(&big(2)).is_empty());

        let edwards = CurveBuilder::twisted_edwards(big(101), big(1), big(2))
            .build()
            .unwrap();
        let points = edwards.points_with_x(&big(1));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].y(), Some(&big(0)));
    }

    #[test]
    fn twist_requires_non_residue() {
        let curve = registry::lookup("secp112r1").unwrap();
        assert!(matches!(
            curve.twist(Some(&big(4))),
            Err(Error::UnsupportedOperation(_))
        ));

        let twist = curve.twist(None).unwrap();
        assert_eq!(twist.family(), CurveFamily::ShortWeierstrass);
        assert!(twist.generator().is_none());
        assert!(twist.order().is_none());
    }

    #[test]
    fn smallest_non_residue_stays_below_modulus() {
        // 2 is a square mod 17, 3 is not
        let curve = CurveBuilder::short_weierstrass(big(17), big(1), big(1))
            .build()
            .unwrap();
        assert_eq!(curve.smallest_non_residue().unwrap().value(), &big(3));

        // composite moduli pass the builder, the search still ends inside 2..p
        let composite = CurveBuilder::short_weierstrass(big(9), big(1), big(1))
            .build()
            .unwrap();
        let d = composite.smallest_non_residue().unwrap().value().clone();
        assert!(d >= big(2) && d < big(9));
        assert!(composite.twist(None).is_ok());
    }

    #[test]
    fn frobenius_trace() {
        let curve = registry::lookup("secp112r1").unwrap();
        let n = BigInt::from_biguint(num_bigint::Sign::Plus, curve.order().unwrap().clone());
        let p = BigInt::from_biguint(num_bigint::Sign::Plus, curve.p().clone());
        assert_eq!(curve.frobenius_trace().unwrap(), p + 1 - n);

        let twist = curve.twist(None).unwrap();
        assert_eq!(twist.frobenius_trace(), None);
    }

    #[test]
    fn isomorphism_is_reflexive() {
        for name in ["secp256k1", "curve25519", "ed25519"] {
            let curve = registry::lookup(name).unwrap();
            assert!(curve.is_isomorphic(&curve), "{}", name);
        }
        let secp = registry::lookup("secp112r1").unwrap();
        assert!(!secp.is_isomorphic(&secp.twist(None).unwrap()));
    }
}
