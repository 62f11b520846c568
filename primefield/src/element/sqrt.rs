//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.

use super::FieldElement;
use num_bigint::BigUint;
use num_traits::One;

/// Square root algorithms.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Algorithm {
    /// Atkin's algorithm for `q ≡ 5 (mod 8)`.
    Atkin,

    /// Shanks algorithm for `q ≡ 3 (mod 4)`.
    Shanks,

    /// Tonelli-Shanks algorithm for any odd prime.
    #[default]
    TonelliShanks,
}

impl Algorithm {
    /// Determine the best algorithm to use with a particular modulus.
    fn for_modulus(p: &BigUint) -> Self {
        if mod_residue(p, 4) == 3 {
            Self::Shanks
        } else if mod_residue(p, 8) == 5 {
            Self::Atkin
        } else {
            Self::TonelliShanks
        }
    }
}

impl FieldElement {
    /// Returns both square roots of self mod p, or `None` if no square root
    /// exists.
    ///
    /// The roots are returned as `(r, p - r)` with the smaller one first.
    /// Zero yields `(0, 0)`.
    pub fn sqrt(&self) -> Option<(Self, Self)> {
        if self.is_zero() {
            return Some((self.clone(), self.clone()));
        }

        let root = match Algorithm::for_modulus(self.modulus()) {
            Algorithm::Atkin => self.sqrt_atkin(),
            Algorithm::Shanks => self.sqrt_shanks(),
            Algorithm::TonelliShanks => self.sqrt_tonelli_shanks(),
        }?;

        let other = -&root;
        if root.value() <= other.value() {
            Some((root, other))
        } else {
            Some((other, root))
        }
    }

    /// Atkin's algorithm for `q ≡ 5 (mod 8)`.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 10, algorithm 3)
    fn sqrt_atkin(&self) -> Option<Self> {
        debug_assert_eq!(mod_residue(self.modulus(), 8), 5);

        let mod_minus_5_over_8 = (self.modulus() - 5u32) >> 3;

        let t = self.with_value(BigUint::from(2u32)).pow(&mod_minus_5_over_8);
        let a1 = self.pow(&mod_minus_5_over_8);
        let a0 = (a1.square() * self).square();
        if a0 == -self.with_value(BigUint::one()) {
            return None;
        }

        let b = t * &a1;
        let ab = self * &b;
        let i = &ab * &b * 2u64;
        let x = &ab * (i - 1u64);
        (x.square() == *self).then_some(x)
    }

    /// Shanks algorithm for `q ≡ 3 (mod 4)`.
    ///
    /// For `q = 3 (mod 4)`, sqrt can be computed with only one exponentiation as
    /// `self^((q + 1) / 4) (mod q)`.
    fn sqrt_shanks(&self) -> Option<Self> {
        debug_assert_eq!(mod_residue(self.modulus(), 4), 3);

        let mod_plus_1_over_4 = (self.modulus() + 1u32) >> 2;
        let sqrt = self.pow(&mod_plus_1_over_4);
        (sqrt.square() == *self).then_some(sqrt)
    }

    /// Tonelli-Shanks algorithm works for every odd prime.
    ///
    /// The quadratic non-residue is found by trial, starting at 2.
    fn sqrt_tonelli_shanks(&self) -> Option<Self> {
        if !self.is_quadratic_residue() {
            return None;
        }

        let p_minus_1 = self.modulus() - 1u32;
        let s = p_minus_1.trailing_zeros()?;
        let t = &p_minus_1 >> s;
        let z = self.non_residue()?;

        let mut m = s;
        let mut c = z.pow(&t);
        let mut x = self.pow(&((&t + 1u32) >> 1));
        let mut b = self.pow(&t);

        while !b.is_one() {
            // least i with b^(2^i) = 1
            let mut i = 0;
            let mut tmp = b.clone();
            while !tmp.is_one() {
                tmp = tmp.square();
                i += 1;
                if i == m {
                    return None;
                }
            }

            let e = c.pow(&(BigUint::one() << (m - i - 1)));
            m = i;
            c = e.square();
            b = b * &c;
            x = x * &e;
        }

        Some(x)
    }

    /// Smallest quadratic non-residue of this field.
    fn non_residue(&self) -> Option<Self> {
        let mut candidate = self.with_value(BigUint::from(2u32));
        while candidate.value() < self.modulus() {
            if !candidate.is_quadratic_residue() {
                return Some(candidate);
            }
            candidate = candidate + 1u64;
            if candidate.is_zero() {
                break;
            }
        }
        None
    }
}

/// Compute residue classes of the modulus for selecting particular square root algorithms.
fn mod_residue(p: &BigUint, n: u32) -> u32 {
    let residue = p % n;
    residue.iter_u32_digits().next().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, mod_residue};
    use crate::FieldElement;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    /// Generic sqrt test.
    fn sqrt_test<F: Fn(&FieldElement) -> Option<FieldElement>>(p: &BigUint, f: F) {
        for &n in &[1u64, 4, 9, 16, 25, 36, 49, 64] {
            let fe = FieldElement::from_u64(n, p);
            let sqrt = f(&fe).unwrap();
            assert_eq!(sqrt.square(), fe);
        }
    }

    /// Check both roots of every square of `1..count` for a prime modulus.
    fn roots_test(p: u64, count: u64) {
        let modulus = BigUint::from(p);
        for i in 1..count {
            let x = FieldElement::from_u64(i, &modulus);
            let square = x.square();
            let (r1, r2) = square.sqrt().unwrap();
            assert_eq!(r1.square(), square);
            assert_eq!(r2.square(), square);
            assert_eq!(r1, -&r2);
            assert!(r1.value() <= r2.value());
            assert!(r1 == x || r2 == x);
        }
    }

    /// Tests the Atkin algorithm implementation
    #[test]
    fn atkin() {
        // brainpoolP384 scalar field
        let p = BigUint::parse_bytes(
            b"8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7cf3ab6af6b7fc3103b883202e9046565",
            16,
        )
        .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::Atkin);
        sqrt_test(&p, FieldElement::sqrt_atkin);
    }

    /// Tests the Shanks algorithm implementation, where `p ≡ 3 mod 4`
    #[test]
    fn shanks() {
        // P-256 base field
        let p = BigUint::parse_bytes(
            b"ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            16,
        )
        .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::Shanks);
        sqrt_test(&p, FieldElement::sqrt_shanks);
    }

    /// Tests the Tonelli-Shanks algorithm implementation
    #[test]
    fn tonelli_shanks() {
        // P-224 base field
        let p = BigUint::parse_bytes(
            b"ffffffffffffffffffffffffffffffff000000000000000000000001",
            16,
        )
        .unwrap();
        assert_eq!(Algorithm::for_modulus(&p), Algorithm::TonelliShanks);
        sqrt_test(&p, FieldElement::sqrt_tonelli_shanks);
    }

    #[test]
    fn primes_1_mod_4() {
        for p in [
            10153776240248910961u64,
            13313520292754238121,
            15378050022937467689,
            15438372505554348001,
            15476752070461085857,
            17875746998751974477,
            18057875082506157121,
        ] {
            assert_eq!(mod_residue(&BigUint::from(p), 4), 1);
            roots_test(p, 100);
        }
    }

    #[test]
    fn primes_3_mod_4() {
        for p in [
            10164036603611688719u64,
            11802848526449265743,
            12398748969631217971,
            12821403563901948251,
            12871176861409354567,
            13022588269702988959,
            13784119435837260871,
        ] {
            assert_eq!(mod_residue(&BigUint::from(p), 4), 3);
            roots_test(p, 100);
        }
    }

    #[test]
    fn small_field_exhaustive() {
        roots_test(263, 263);

        // 17 ≡ 1 (mod 8) exercises the full Tonelli-Shanks loop
        roots_test(17, 17);
    }

    #[test]
    fn non_residue_has_no_root() {
        let p = BigUint::from(263u32);
        // 5 is a quadratic non-residue mod 263
        let fe = FieldElement::from_u64(5, &p);
        assert!(!fe.is_quadratic_residue());
        assert_eq!(fe.sqrt(), None);
    }

    #[test]
    fn zero_root() {
        let p = BigUint::from(263u32);
        let zero = FieldElement::zero(&p);
        assert_eq!(zero.sqrt(), Some((zero.clone(), zero)));
    }

    proptest! {
        #[test]
        fn squares_have_opposite_roots(n in 1u64..u64::MAX, idx in 0usize..3) {
            let p = BigUint::from(
                [17875746998751974477u64, 18057875082506157121, 13784119435837260871][idx]
            );
            let square = FieldElement::from_u64(n, &p).square();
            let (r1, r2) = square.sqrt().unwrap();
            prop_assert_eq!(r1.square(), square.clone());
            prop_assert_eq!(r2.square(), square);
            prop_assert_eq!(r1, -r2);
        }
    }
}
