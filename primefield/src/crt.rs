//! Chinese remainder theorem solver.

use crate::{Error, Result, mod_inverse};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Solver for systems of simultaneous congruences `x ≡ r_i (mod m_i)` with
/// pairwise coprime moduli.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Crt {
    congruences: Vec<(BigUint, BigUint)>,
}

impl Crt {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the congruence `x ≡ remainder (mod modulus)`.
    ///
    /// The modulus must be non-zero and coprime to every modulus already in
    /// the system.
    pub fn add(&mut self, remainder: BigUint, modulus: BigUint) -> Result<&mut Self> {
        if modulus.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if self
            .congruences
            .iter()
            .any(|(_, m)| !m.gcd(&modulus).is_one())
        {
            return Err(Error::NonCoprimeModuli);
        }

        self.congruences.push((remainder % &modulus, modulus));
        Ok(self)
    }

    /// Number of congruences in the system.
    pub fn len(&self) -> usize {
        self.congruences.len()
    }

    /// Is the system empty?
    pub fn is_empty(&self) -> bool {
        self.congruences.is_empty()
    }

    /// Product of all moduli. The solution is unique modulo this value.
    pub fn moduli_product(&self) -> BigUint {
        self.congruences
            .iter()
            .fold(BigUint::one(), |acc, (_, m)| acc * m)
    }

    /// Smallest non-negative solution of the system. The empty system has
    /// the solution `0`.
    pub fn solve(&self) -> Result<BigUint> {
        let mut solution = BigUint::zero();
        let mut product = BigUint::one();

        for (remainder, modulus) in &self.congruences {
            // x = solution + product * t with t ≡ (r - solution) / product (mod m)
            let inverse = mod_inverse(&(&product % modulus), modulus).ok_or(Error::NotInvertible)?;
            let current = &solution % modulus;
            let delta = (remainder + modulus - current) % modulus;
            let t = delta * inverse % modulus;
            solution += &product * t;
            product *= modulus;
        }

        Ok(solution)
    }
}
