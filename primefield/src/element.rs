//! Field elements bound to a modulus which is only known at runtime.

mod sqrt;

use crate::{ByteOrder, Error, Result};
use alloc::{vec, vec::Vec};
use core::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Element of the prime field `GF(p)`.
///
/// The value is always kept reduced into `[0, p)`. Binary operations between
/// elements of differing moduli are rejected: the `try_*` methods return
/// [`Error::IncompatibleField`] while the operator impls panic, in the same
/// way integer overflow panics in debug builds.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Create a new field element, reducing `value` modulo `modulus`.
    ///
    /// # Panics
    ///
    /// If `modulus` is zero.
    pub fn new(value: BigUint, modulus: &BigUint) -> Self {
        Self {
            value: value % modulus,
            modulus: modulus.clone(),
        }
    }

    /// Create a field element from a small integer.
    pub fn from_u64(value: u64, modulus: &BigUint) -> Self {
        Self::new(BigUint::from(value), modulus)
    }

    /// Create a field element from a signed integer, mapping negative values
    /// to their additive inverse.
    pub fn from_bigint(value: &BigInt, modulus: &BigUint) -> Self {
        let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
        let mut reduced = value % &m;
        if reduced.sign() == Sign::Minus {
            reduced += &m;
        }
        Self {
            value: reduced.magnitude().clone(),
            modulus: modulus.clone(),
        }
    }

    /// Decode a field element from its byte representation.
    pub fn from_bytes(bytes: &[u8], byte_order: ByteOrder, modulus: &BigUint) -> Self {
        let value = match byte_order {
            ByteOrder::BigEndian => BigUint::from_bytes_be(bytes),
            ByteOrder::LittleEndian => BigUint::from_bytes_le(bytes),
        };
        Self::new(value, modulus)
    }

    /// Additive identity.
    pub fn zero(modulus: &BigUint) -> Self {
        Self::new(BigUint::zero(), modulus)
    }

    /// Multiplicative identity.
    pub fn one(modulus: &BigUint) -> Self {
        Self::new(BigUint::one(), modulus)
    }

    /// Create another element of the same field.
    pub fn with_value(&self, value: BigUint) -> Self {
        Self::new(value, &self.modulus)
    }

    /// Reduced value of this element.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Consume this element, returning its reduced value.
    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Modulus of the field this element belongs to.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Is this the additive identity?
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Is this the multiplicative identity?
    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    /// Is the (reduced) value odd?
    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }

    /// Serialize as a zero-padded bytestring of `len` bytes.
    ///
    /// Returns `None` if the value does not fit.
    pub fn to_bytes(&self, byte_order: ByteOrder, len: usize) -> Option<Vec<u8>> {
        to_padded_bytes(&self.value, byte_order, len)
    }

    /// Add two elements of the same field.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        Ok(self.with_value(&self.value + &rhs.value))
    }

    /// Subtract two elements of the same field.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        Ok(self.with_value(&self.value + &self.modulus - &rhs.value))
    }

    /// Multiply two elements of the same field.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        Ok(self.with_value(&self.value * &rhs.value))
    }

    /// Divide by another element of the same field.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.check_compatible(rhs)?;
        self.try_mul(&rhs.invert()?)
    }

    /// Compute the multiplicative inverse.
    ///
    /// Fails with [`Error::DivisionByZero`] for the additive identity.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }

        mod_inverse(&self.value, &self.modulus)
            .map(|inverse| self.with_value(inverse))
            .ok_or(Error::NotInvertible)
    }

    /// Square this element.
    pub fn square(&self) -> Self {
        self.with_value(&self.value * &self.value)
    }

    /// Raise this element to the power `exp`.
    pub fn pow(&self, exp: &BigUint) -> Self {
        self.with_value(self.value.modpow(exp, &self.modulus))
    }

    /// Raise this element to a small power.
    pub fn pow_u64(&self, exp: u64) -> Self {
        self.pow(&BigUint::from(exp))
    }

    /// Is this element a square in its field? Zero counts as a square.
    ///
    /// Uses Euler's criterion, so the modulus must be an odd prime.
    pub fn is_quadratic_residue(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        let exp = (&self.modulus - 1u32) >> 1;
        self.pow(&exp).is_one()
    }

    fn check_compatible(&self, rhs: &Self) -> Result<()> {
        if self.modulus == rhs.modulus {
            Ok(())
        } else {
            Err(Error::IncompatibleField)
        }
    }
}

/// Compute the inverse of `value` modulo `modulus`, or `None` if they are
/// not coprime.
pub fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }

    value.modinv(modulus)
}

/// Serialize an unsigned integer as a zero-padded bytestring of `len` bytes,
/// or `None` if it does not fit.
pub fn to_padded_bytes(
    value: &BigUint,
    byte_order: ByteOrder,
    len: usize,
) -> Option<Vec<u8>> {
    let mut bytes = if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    };
    if bytes.len() > len {
        return None;
    }

    let mut padded = vec![0u8; len - bytes.len()];
    padded.append(&mut bytes);
    if byte_order == ByteOrder::LittleEndian {
        padded.reverse();
    }
    Some(padded)
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x} mod 0x{:x})", self.value, self.modulus)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl From<FieldElement> for BigUint {
    fn from(fe: FieldElement) -> BigUint {
        fe.value
    }
}

/// Implement a binary operator on all owned/borrowed combinations in terms
/// of a fallible `try_*` method, panicking on error.
macro_rules! impl_field_op {
    ($op:ident, $op_fn:ident, $try_fn:ident) => {
        impl $op<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: &FieldElement) -> FieldElement {
                self.$try_fn(rhs).unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl $op<FieldElement> for &FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: FieldElement) -> FieldElement {
                $op::$op_fn(self, &rhs)
            }
        }

        impl $op<&FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: &FieldElement) -> FieldElement {
                $op::$op_fn(&self, rhs)
            }
        }

        impl $op<FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: FieldElement) -> FieldElement {
                $op::$op_fn(&self, &rhs)
            }
        }

        impl $op<u64> for &FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: u64) -> FieldElement {
                $op::$op_fn(self, &FieldElement::from_u64(rhs, &self.modulus))
            }
        }

        impl $op<u64> for FieldElement {
            type Output = FieldElement;

            fn $op_fn(self, rhs: u64) -> FieldElement {
                $op::$op_fn(&self, rhs)
            }
        }
    };
}

impl_field_op!(Add, add, try_add);
impl_field_op!(Sub, sub, try_sub);
impl_field_op!(Mul, mul, try_mul);
impl_field_op!(Div, div, try_div);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        if self.is_zero() {
            self.clone()
        } else {
            self.with_value(&self.modulus - &self.value)
        }
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}
