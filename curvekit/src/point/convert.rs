//! Point maps between birationally equivalent curve models.

use super::AffinePoint;
use crate::{
    Curve, CurveModel, Error, Result,
    curve::{Coordinates, Montgomery, TwistedEdwards},
};
use primefield::FieldElement;

impl AffinePoint {
    /// Map this point onto `target`.
    ///
    /// Supported are the maps between a Montgomery curve and a twisted
    /// Edwards curve it is birationally equivalent to, and from a
    /// Montgomery curve to its short Weierstrass form. Converting onto the
    /// point's own curve returns a copy.
    pub fn convert(&self, target: &Curve) -> Result<AffinePoint> {
        if self.curve() == target {
            return Ok(self.clone());
        }

        let image = match (self.curve().model(), target.model()) {
            (CurveModel::Montgomery(mont), CurveModel::TwistedEdwards(edwards)) => {
                let scale = scale_factor(self.curve(), mont, target, edwards)?;
                montgomery_to_edwards(self.coordinates(), &scale)?
            }
            (CurveModel::TwistedEdwards(edwards), CurveModel::Montgomery(mont)) => {
                let scale = scale_factor(target, mont, self.curve(), edwards)?;
                edwards_to_montgomery(self.coordinates(), &scale)?
            }
            (CurveModel::Montgomery(mont), CurveModel::ShortWeierstrass(weierstrass)) => {
                let (a, b) = mont.short_weierstrass_coefficients()?;
                if self.curve().p() != target.p()
                    || weierstrass.a() != &a
                    || weierstrass.b() != &b
                {
                    return Err(Error::UnsupportedOperation(
                        "target is not the short Weierstrass form of the source curve",
                    ));
                }
                montgomery_to_weierstrass(self.coordinates(), mont)?
            }
            _ => {
                return Err(Error::UnsupportedOperation(
                    "no point map between these curve families",
                ));
            }
        };

        match image {
            Coordinates::Affine(x, y) => Self::new(x.into_value(), y.into_value(), target),
            Coordinates::Infinity => Ok(target.neutral()),
        }
    }
}

/// Map `(x, y)` on a twisted Edwards curve to `(u, v)` on a Montgomery curve
/// with `u = (1 + y)/(1 - y)` and `v = k·u/x`.
pub(crate) fn edwards_to_montgomery(point: &Coordinates, k: &FieldElement) -> Result<Coordinates> {
    let Coordinates::Affine(x, y) = point else {
        return Err(Error::UnsupportedOperation(
            "twisted Edwards points are affine",
        ));
    };

    if x.is_zero() {
        // (0, 1) is the neutral element and (0, -1) the point of order two
        return Ok(if y.is_one() {
            Coordinates::Infinity
        } else {
            Coordinates::Affine(x.clone(), x.clone())
        });
    }

    let u = (y + 1u64).try_div(&(-y + 1u64)).map_err(|_| exceptional())?;
    let v = u.try_div(x)? * k;
    Ok(Coordinates::Affine(u, v))
}

/// Map `(u, v)` on a Montgomery curve to `(x, y)` on a twisted Edwards curve
/// with `x = k·u/v` and `y = (u - 1)/(u + 1)`.
pub(crate) fn montgomery_to_edwards(point: &Coordinates, k: &FieldElement) -> Result<Coordinates> {
    let (u, v) = match point {
        Coordinates::Infinity => {
            return Ok(Coordinates::Affine(k.with_value(0u32.into()), k.with_value(1u32.into())));
        }
        Coordinates::Affine(u, v) if u.is_zero() && v.is_zero() => {
            return Ok(Coordinates::Affine(u.clone(), -k.with_value(1u32.into())));
        }
        Coordinates::Affine(u, v) => (u, v),
    };

    let x = u.try_div(v).map_err(|_| exceptional())? * k;
    let y = (u - 1u64).try_div(&(u + 1u64)).map_err(|_| exceptional())?;
    Ok(Coordinates::Affine(x, y))
}

/// Map `(u, v)` on the Montgomery curve `model` to its short Weierstrass
/// form: `(u/B + A/(3B), v/B)`.
pub(crate) fn montgomery_to_weierstrass(
    point: &Coordinates,
    model: &Montgomery,
) -> Result<Coordinates> {
    let Coordinates::Affine(u, v) = point else {
        return Ok(Coordinates::Infinity);
    };

    let b = model.b();
    let x = u.try_div(b)? + model.a().try_div(&(b * 3u64))?;
    let y = v.try_div(b)?;
    Ok(Coordinates::Affine(x, y))
}

/// Scale factor `k` relating a Montgomery curve with coefficient `b` to the
/// curve with coefficient `native_b`: the inverse of the smaller square root
/// of `b/native_b`.
pub(crate) fn scale_from_ratio(b: &FieldElement, native_b: &FieldElement) -> Result<FieldElement> {
    if b == native_b {
        return Ok(b.with_value(1u32.into()));
    }

    let ratio = b.try_div(native_b)?;
    let (root, _) = ratio.sqrt().ok_or(Error::UnsupportedOperation(
        "Montgomery coefficient B is not in the required square class",
    ))?;
    Ok(root.invert()?)
}

/// Scale factor for the point map between `mont_curve` and `edwards_curve`.
///
/// A Montgomery coefficient equal to the native one gives `k = 1`. Otherwise,
/// when both curves carry generators that correspond under the map, the
/// factor is taken from them so that generator maps to generator.
fn scale_factor(
    mont_curve: &Curve,
    mont: &Montgomery,
    edwards_curve: &Curve,
    edwards: &TwistedEdwards,
) -> Result<FieldElement> {
    let (native_a, native_b) = edwards.montgomery_coefficients()?;
    if mont_curve.p() != edwards_curve.p() || mont.a() != &native_a {
        return Err(Error::UnsupportedOperation(
            "curves are not birationally equivalent",
        ));
    }
    if mont.b() == &native_b {
        return Ok(native_b.with_value(1u32.into()));
    }

    if let (Some(mont_generator), Some(edwards_generator)) =
        (mont_curve.generator(), edwards_curve.generator())
    {
        if let Some(scale) = generator_scale(&mont_generator, &edwards_generator) {
            return Ok(scale);
        }
    }

    scale_from_ratio(mont.b(), &native_b)
}

/// `k = v/(u/x)` if the generators share their `u` coordinate.
fn generator_scale(mont: &AffinePoint, edwards: &AffinePoint) -> Option<FieldElement> {
    let (Coordinates::Affine(u, v), Coordinates::Affine(x, y)) =
        (mont.coordinates(), edwards.coordinates())
    else {
        return None;
    };

    let image_u = (y + 1u64).try_div(&(-y + 1u64)).ok()?;
    if &image_u != u || v.is_zero() {
        return None;
    }

    v.try_div(&image_u.try_div(x).ok()?).ok()
}

fn exceptional() -> Error {
    Error::UnsupportedOperation("point is exceptional for the birational map")
}

#[cfg(test)]
mod tests {
    use crate::{CurveBuilder, Error, registry};
    use num_bigint::BigUint;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn ed25519_curve25519_round_trip() {
        let ed25519 = registry::lookup("ed25519").unwrap();
        let curve25519 = registry::lookup("curve25519").unwrap();

        let generator = ed25519.generator().unwrap();
        assert_eq!(generator.convert(&curve25519).unwrap(), curve25519.generator().unwrap());

        let point = generator.try_mul(&big(77)).unwrap();
        let image = point.convert(&curve25519).unwrap();
        assert_eq!(image, curve25519.generator().unwrap().try_mul(&big(77)).unwrap());
        assert_eq!(image.convert(&ed25519).unwrap(), point);
    }

    #[test]
    fn special_points() {
        let ed25519 = registry::lookup("ed25519").unwrap();
        let curve25519 = registry::lookup("curve25519").unwrap();

        assert!(ed25519.neutral().convert(&curve25519).unwrap().is_infinity());
        assert!(curve25519.neutral().convert(&ed25519).unwrap().is_neutral());

        let two_torsion = crate::AffinePoint::new(big(0), ed25519.p() - 1u32, &ed25519).unwrap();
        let image = two_torsion.convert(&curve25519).unwrap();
        assert_eq!(image.x(), Some(&big(0)));
        assert_eq!(image.y(), Some(&big(0)));
        assert_eq!(image.convert(&ed25519).unwrap(), two_torsion);
    }

    #[test]
    fn toy_round_trip() {
        let edwards = CurveBuilder::twisted_edwards(big(101), big(1), big(2))
            .generator(big(2), big(17))
            .order(big(104))
            .build()
            .unwrap();
        let montgomery = edwards.to_montgomery(None).unwrap();

        let point = edwards.generator().unwrap().try_mul(&big(5)).unwrap();
        let image = point.convert(&montgomery).unwrap();
        assert_eq!(image, montgomery.generator().unwrap().try_mul(&big(5)).unwrap());
        assert_eq!(image.convert(&edwards).unwrap(), point);
    }

    #[test]
    fn native_coefficient_uses_unit_scale() {
        let edwards = CurveBuilder::twisted_edwards(big(101), big(1), big(2))
            .generator(big(2), big(17))
            .build()
            .unwrap();
        // A = -6, B = -4; generator (62, 70) is the image of (2, 17) under k = -1
        let montgomery = CurveBuilder::montgomery(big(101), big(95), big(97))
            .generator(big(62), big(70))
            .build()
            .unwrap();

        let image = edwards.generator().unwrap().convert(&montgomery).unwrap();
        assert_eq!(image.x(), Some(&big(62)));
        assert_eq!(image.y(), Some(&big(31)));
        assert_eq!(image.convert(&edwards).unwrap(), edwards.generator().unwrap());

        let bare = CurveBuilder::montgomery(big(101), big(95), big(97)).build().unwrap();
        let image = edwards.generator().unwrap().convert(&bare).unwrap();
        assert_eq!(image.y(), Some(&big(31)));
    }

    #[test]
    fn unrelated_curves() {
        let secp = registry::lookup("secp112r1").unwrap();
        let ed25519 = registry::lookup("ed25519").unwrap();
        assert!(matches!(
            secp.generator().unwrap().convert(&ed25519),
            Err(Error::UnsupportedOperation(_))
        ));

        let curve25519 = registry::lookup("curve25519").unwrap();
        assert!(matches!(
            curve25519.generator().unwrap().convert(&secp),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
