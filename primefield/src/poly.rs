//! Polynomial ring `GF(p)[x]`.

use crate::{Error, FieldElement, Result, mod_inverse};
use alloc::{collections::BTreeMap, string::String};
use core::{
    fmt,
    ops::{Add, Div, Mul, Neg, Rem, Sub},
};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Polynomial with coefficients in the prime field `GF(p)`.
///
/// Terms are stored sparsely as a map from exponent to coefficient. Zero
/// coefficients are never stored, so the zero polynomial has no terms.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    modulus: BigUint,
    terms: BTreeMap<usize, BigUint>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero(modulus: &BigUint) -> Self {
        Self {
            modulus: modulus.clone(),
            terms: BTreeMap::new(),
        }
    }

    /// Constant polynomial.
    pub fn constant(value: BigUint, modulus: &BigUint) -> Self {
        Self::monomial(value, 0, modulus)
    }

    /// The polynomial `x`.
    pub fn x(modulus: &BigUint) -> Self {
        Self::monomial(BigUint::one(), 1, modulus)
    }

    /// Single term polynomial `coefficient * x^exponent`.
    pub fn monomial(coefficient: BigUint, exponent: usize, modulus: &BigUint) -> Self {
        let mut poly = Self::zero(modulus);
        poly.add_term(exponent, coefficient);
        poly
    }

    /// Build a polynomial from `(exponent, coefficient)` pairs. Coefficients of
    /// repeated exponents are summed.
    pub fn from_terms<I>(terms: I, modulus: &BigUint) -> Self
    where
        I: IntoIterator<Item = (usize, BigUint)>,
    {
        let mut poly = Self::zero(modulus);
        for (exponent, coefficient) in terms {
            poly.add_term(exponent, coefficient);
        }
        poly
    }

    /// Modulus of the coefficient field.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.terms.keys().next_back().copied()
    }

    /// Is this the zero polynomial?
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Is this a constant polynomial (including zero)?
    pub fn is_constant(&self) -> bool {
        self.degree().unwrap_or(0) == 0
    }

    /// Coefficient of `x^exponent`.
    pub fn coefficient(&self, exponent: usize) -> BigUint {
        self.terms.get(&exponent).cloned().unwrap_or_default()
    }

    /// Constant term.
    pub fn constant_term(&self) -> BigUint {
        self.coefficient(0)
    }

    /// Coefficient of the highest degree term.
    pub fn leading_coefficient(&self) -> Option<&BigUint> {
        self.terms.values().next_back()
    }

    /// Iterate over the non-zero `(exponent, coefficient)` terms in
    /// ascending exponent order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (usize, &BigUint)> + '_ {
        self.terms.iter().map(|(exp, coeff)| (*exp, coeff))
    }

    /// Add two polynomials over the same field.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        let mut result = self.clone();
        for (exponent, coefficient) in rhs.terms() {
            result.add_term(exponent, coefficient.clone());
        }
        Ok(result)
    }

    /// Subtract two polynomials over the same field.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.try_add(&-rhs)
    }

    /// Multiply two polynomials over the same field.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        let mut result = Self::zero(&self.modulus);
        for (e1, c1) in self.terms() {
            for (e2, c2) in rhs.terms() {
                result.add_term(e1 + e2, c1 * c2);
            }
        }
        Ok(result)
    }

    /// Multiply every coefficient by a scalar.
    pub fn scale(&self, factor: &BigUint) -> Self {
        Self::from_terms(
            self.terms().map(|(exp, coeff)| (exp, coeff * factor)),
            &self.modulus,
        )
    }

    /// Polynomial long division, returning `(quotient, remainder)` with
    /// `deg(remainder) < deg(divisor)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.check_compatible(divisor)?;
        let (divisor_degree, lead) = match (divisor.degree(), divisor.leading_coefficient()) {
            (Some(degree), Some(lead)) => (degree, lead),
            _ => return Err(Error::DivisionByZero),
        };
        let lead_inverse = mod_inverse(lead, &self.modulus).ok_or(Error::NotInvertible)?;

        let mut quotient = Self::zero(&self.modulus);
        let mut remainder = self.clone();
        while let Some(degree) = remainder.degree() {
            if degree < divisor_degree {
                break;
            }

            let factor = remainder.coefficient(degree) * &lead_inverse % &self.modulus;
            let shift = degree - divisor_degree;
            quotient.add_term(shift, factor.clone());

            let negated = &self.modulus - &factor;
            for (exponent, coefficient) in divisor.terms() {
                remainder.add_term(exponent + shift, coefficient * &negated);
            }
        }

        Ok((quotient, remainder))
    }

    /// Raise to a (small) power.
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::constant(BigUint::one(), &self.modulus);
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            exp >>= 1;
        }
        result
    }

    /// Compute `self^exp mod modulus_poly`, reducing after every step so the
    /// degree of intermediate results stays bounded.
    pub fn powmod(&self, exp: &BigUint, modulus_poly: &Self) -> Result<Self> {
        let mut base = self.div_rem(modulus_poly)?.1;
        let mut result = Self::constant(BigUint::one(), &self.modulus).div_rem(modulus_poly)?.1;

        for bit in 0..exp.bits() {
            if exp.bit(bit) {
                result = result.try_mul(&base)?.div_rem(modulus_poly)?.1;
            }
            base = base.try_mul(&base)?.div_rem(modulus_poly)?.1;
        }

        Ok(result)
    }

    /// Greatest common divisor, normalized to be monic.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.div_rem(&b)?.1;
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Scale so that the leading coefficient is one. The zero polynomial is
    /// returned unchanged.
    pub fn monic(&self) -> Result<Self> {
        match self.leading_coefficient() {
            Some(lead) => {
                let inverse = mod_inverse(lead, &self.modulus).ok_or(Error::NotInvertible)?;
                Ok(self.scale(&inverse))
            }
            None => Ok(self.clone()),
        }
    }

    /// Evaluate the polynomial at `x`.
    pub fn substitute(&self, x: &BigUint) -> BigUint {
        let x = FieldElement::new(x.clone(), &self.modulus);
        let mut result = FieldElement::zero(&self.modulus);
        let mut last_exp = self.degree().unwrap_or(0);

        // Horner's scheme over the sparse terms, highest degree first
        for (exponent, coefficient) in self.terms().rev() {
            result = result * x.pow_u64((last_exp - exponent) as u64);
            result = result + x.with_value(coefficient.clone());
            last_exp = exponent;
        }
        (result * x.pow_u64(last_exp as u64)).into_value()
    }

    /// Parse a textual polynomial such as `55*x^4 + 99*x^2 - 37*x + 4`.
    ///
    /// Terms may omit the coefficient (`x^3`), the exponent (`2*x`) or the
    /// multiplication sign (`2x`). Whitespace is ignored.
    pub fn parse(text: &str, modulus: &BigUint) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(Error::InvalidPolynomial);
        }

        let mut poly = Self::zero(modulus);
        let mut rest = compact.as_str();
        while !rest.is_empty() {
            let (negative, body) = match rest.as_bytes()[0] {
                b'+' => (false, &rest[1..]),
                b'-' => (true, &rest[1..]),
                _ => (false, rest),
            };
            let end = body.find(['+', '-']).unwrap_or(body.len());
            let (term, tail) = body.split_at(end);

            let (coefficient, exponent) = parse_term(term)?;
            let coefficient = coefficient % modulus;
            let coefficient = if negative {
                (modulus - &coefficient) % modulus
            } else {
                coefficient
            };
            poly.add_term(exponent, coefficient);
            rest = tail;
        }

        Ok(poly)
    }

    /// Add `coefficient * x^exponent`, keeping the no-zero-terms invariant.
    fn add_term(&mut self, exponent: usize, coefficient: BigUint) {
        let current = self.terms.remove(&exponent).unwrap_or_default();
        let sum = (current + coefficient) % &self.modulus;
        if !sum.is_zero() {
            self.terms.insert(exponent, sum);
        }
    }

    fn check_compatible(&self, rhs: &Self) -> Result<()> {
        if self.modulus == rhs.modulus {
            Ok(())
        } else {
            Err(Error::IncompatibleField)
        }
    }
}

/// Parse a single unsigned term into `(coefficient, exponent)`.
fn parse_term(term: &str) -> Result<(BigUint, usize)> {
    let parse_uint = |digits: &str| {
        BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(Error::InvalidPolynomial)
    };

    match term.split_once('x') {
        Some((prefix, suffix)) => {
            let prefix = prefix.strip_suffix('*').unwrap_or(prefix);
            let coefficient = if prefix.is_empty() {
                BigUint::one()
            } else {
                parse_uint(prefix)?
            };
            let exponent = if suffix.is_empty() {
                1
            } else {
                suffix
                    .strip_prefix('^')
                    .and_then(|exp| exp.parse::<usize>().ok())
                    .ok_or(Error::InvalidPolynomial)?
            };
            Ok((coefficient, exponent))
        }
        None => Ok((parse_uint(term)?, 0)),
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({} mod {})", self, self.modulus)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        for (i, (exponent, coefficient)) in self.terms().rev().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            match exponent {
                0 => write!(f, "{}", coefficient)?,
                1 => write!(f, "{}*x", coefficient)?,
                _ => write!(f, "{}*x^{}", coefficient, exponent)?,
            }
        }
        Ok(())
    }
}

macro_rules! impl_poly_op {
    ($op:ident, $op_fn:ident, $body:expr) => {
        impl $op<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $op_fn(self, rhs: &Polynomial) -> Polynomial {
                let f: fn(&Polynomial, &Polynomial) -> Result<Polynomial> = $body;
                f(self, rhs).unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl $op<Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $op_fn(self, rhs: Polynomial) -> Polynomial {
                $op::$op_fn(&self, &rhs)
            }
        }

        impl $op<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $op_fn(self, rhs: &Polynomial) -> Polynomial {
                $op::$op_fn(&self, rhs)
            }
        }
    };
}

impl_poly_op!(Add, add, |a, b| a.try_add(b));
impl_poly_op!(Sub, sub, |a, b| a.try_sub(b));
impl_poly_op!(Mul, mul, |a, b| a.try_mul(b));
impl_poly_op!(Div, div, |a, b| a.div_rem(b).map(|(q, _)| q));
impl_poly_op!(Rem, rem, |a, b| a.div_rem(b).map(|(_, r)| r));

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::from_terms(
            self.terms()
                .map(|(exp, coeff)| (exp, &self.modulus - coeff)),
            &self.modulus,
        )
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::Polynomial;
    use crate::Error;
    use num_bigint::BigUint;

    fn modulus() -> BigUint {
        BigUint::from(101u32)
    }

    /// Shorthand for building a polynomial mod 101 from `(exponent, coefficient)` pairs.
    fn poly(terms: &[(usize, u64)]) -> Polynomial {
        poly_mod(terms, &modulus())
    }

    fn poly_mod(terms: &[(usize, u64)], m: &BigUint) -> Polynomial {
        Polynomial::from_terms(terms.iter().map(|&(e, c)| (e, BigUint::from(c))), m)
    }

    fn assert_terms(p: &Polynomial, expected: &[(usize, u64)]) {
        assert_eq!(p.terms().count(), expected.len(), "{}", p);
        for &(exp, coeff) in expected {
            assert_eq!(p.coefficient(exp), BigUint::from(coeff), "x^{} of {}", exp, p);
        }
    }

    #[test]
    fn initialization() {
        let x = Polynomial::x(&modulus());
        assert_terms(&x, &[(1, 1)]);
        assert_eq!(x.degree(), Some(1));
        assert_eq!(Polynomial::zero(&modulus()).degree(), None);
    }

    #[test]
    fn add() {
        let p = poly(&[(1, 50)]) + poly(&[(2, 75)]) + poly(&[(3, 99)]);
        assert_terms(&p, &[(0, 0), (1, 50), (2, 75), (3, 99)]);

        // coefficients cancel and are not stored
        let q = &p + &poly(&[(2, 26)]);
        assert_terms(&q, &[(1, 50), (3, 99)]);
    }

    #[test]
    fn mul_identity() {
        let p = poly(&[(1, 50), (2, 75), (3, 99)]);
        let one = poly(&[(0, 1)]);
        assert_eq!(&p * &one, p);
    }

    #[test]
    fn mod1() {
        let p = poly(&[(7, 35), (5, 50), (2, 75)]);
        let m = poly(&[(3, 4), (0, 1)]);
        assert_terms(&(p % m), &[(2, 12), (1, 59)]);
    }

    #[test]
    fn mod2() {
        let p = poly(&[(10, 1)]);
        let m = poly(&[(3, 1), (0, 1)]);
        assert_terms(&(p % m), &[(1, 100)]);
    }

    #[test]
    fn mod_constants() {
        let m = BigUint::from(17u32);
        let x = Polynomial::constant(BigUint::from(123u32), &m);
        let y = Polynomial::constant(BigUint::from(3u32), &m);
        let r = x % y;
        assert!(r.is_constant());
        assert_eq!(r.constant_term(), BigUint::from(0u32));
    }

    #[test]
    fn pow() {
        let p = poly(&[(7, 35), (5, 50), (2, 75)]).pow(2);
        assert_terms(
            &p,
            &[(14, 13), (12, 66), (10, 76), (9, 99), (7, 26), (4, 70)],
        );
    }

    #[test]
    fn powmod_simple() {
        let p = poly(&[(7, 35), (5, 50), (2, 75)]);
        let m = poly(&[(4, 4), (0, 1)]);
        let result = p.powmod(&BigUint::from(123456u32), &m).unwrap();
        assert_terms(&result, &[(3, 63), (2, 42), (1, 33), (0, 89)]);
    }

    #[test]
    fn powmod_complex() {
        let q: BigUint = "4451685225093714772084598273548427".parse().unwrap();
        let b: BigUint = "2061118396808653202902996166388514".parse().unwrap();
        let x = Polynomial::x(&q);
        let m = Polynomial::from_terms(
            [(3, BigUint::from(1u32)), (1, &q - 3u32), (0, b)],
            &q,
        );

        let result = x.powmod(&q, &m).unwrap();
        assert_eq!(result.terms().count(), 3);
        assert_eq!(
            result.coefficient(2),
            "2793233646981728153184490628609256".parse().unwrap()
        );
        assert_eq!(
            result.coefficient(1),
            "3668388619890319418084877212924997".parse().unwrap()
        );
        assert_eq!(
            result.coefficient(0),
            "3316903156223973237800215289878342".parse().unwrap()
        );
    }

    #[test]
    fn gcd() {
        let p1 = poly(&[
            (303, 74),
            (302, 80),
            (301, 98),
            (23, 79),
            (22, 39),
            (21, 20),
            (13, 90),
            (12, 70),
            (11, 10),
        ]);
        let p2 = poly(&[(3, 9), (2, 7), (1, 1)]);
        let expect_gcd = poly(&[(3, 1), (2, 12), (1, 45)]);
        let expect_div1 = poly(&[(300, 74), (20, 79), (10, 90)]);
        let expect_div2 = poly(&[(0, 9)]);

        let gcd1 = p1.gcd(&p2).unwrap();
        let gcd2 = p2.gcd(&p1).unwrap();
        assert_eq!(gcd1, gcd2);
        assert_eq!(gcd1, expect_gcd);

        assert_eq!(&expect_div1 * &expect_gcd, p1);
        assert_eq!(&expect_div2 * &expect_gcd, p2);
    }

    #[test]
    fn parse() {
        let p = Polynomial::parse("55*x^4 + 99*x^2 - 37*x^1 + x^3 + 2*x + 4", &modulus()).unwrap();
        assert_terms(&p, &[(4, 55), (3, 1), (2, 99), (1, 101 - 35), (0, 4)]);
        assert_eq!(
            Polynomial::parse("x^2+2x", &modulus()).unwrap(),
            poly(&[(2, 1), (1, 2)])
        );
    }

    #[test]
    fn parse_invalid() {
        for text in ["", "x^", "3*y", "4 +", "x^-1"] {
            assert_eq!(
                Polynomial::parse(text, &modulus()),
                Err(Error::InvalidPolynomial),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn div() {
        let p1 = poly(&[(9, 4), (2, 30), (0, 9)]);
        let p2 = poly(&[(4, 1), (2, 9), (1, 10), (0, 2)]);
        let (q, r) = p1.div_rem(&p2).unwrap();
        assert!(r.degree().unwrap_or(0) < 4);
        assert_eq!(&(&q * &p2) + &r, p1);
        assert_eq!(&p1 / &p2, q);
    }

    #[test]
    fn div_by_zero() {
        let p = poly(&[(1, 1)]);
        assert_eq!(
            p.div_rem(&Polynomial::zero(&modulus())),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn incompatible_moduli() {
        let a = poly(&[(1, 1)]);
        let b = poly_mod(&[(1, 1)], &BigUint::from(13u32));
        assert_eq!(a.try_add(&b), Err(Error::IncompatibleField));
    }

    #[test]
    fn substitute() {
        let p = poly(&[(9, 4), (2, 30), (0, 9)]);
        assert_eq!(p.substitute(&BigUint::from(0u32)), BigUint::from(9u32));
        assert_eq!(p.substitute(&BigUint::from(1u32)), BigUint::from(4u32 + 30 + 9));
        assert_eq!(
            p.substitute(&BigUint::from(2u32)),
            BigUint::from((4u32 * (1 << 9) + 30 * 4 + 9) % 101)
        );
        assert_eq!(poly(&[(2, 3)]).substitute(&BigUint::from(5u32)), BigUint::from(75u32));
    }

    #[test]
    fn display() {
        let p = poly(&[(2, 3), (1, 1), (0, 7)]);
        assert_eq!(alloc::format!("{}", p), "3*x^2 + 1*x + 7");
        assert_eq!(alloc::format!("{}", Polynomial::zero(&modulus())), "0");
    }
}
