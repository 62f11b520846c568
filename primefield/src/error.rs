//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Operands belong to fields with different moduli.
    IncompatibleField,

    /// Division by (or inversion of) zero.
    DivisionByZero,

    /// Element has no multiplicative inverse modulo a composite modulus.
    NotInvertible,

    /// Moduli passed to the CRT solver are not pairwise coprime.
    NonCoprimeModuli,

    /// Polynomial expression could not be parsed.
    InvalidPolynomial,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IncompatibleField => f.write_str("operands belong to incompatible fields"),
            Error::DivisionByZero => f.write_str("division by zero"),
            Error::NotInvertible => f.write_str("element is not invertible"),
            Error::NonCoprimeModuli => f.write_str("moduli are not pairwise coprime"),
            Error::InvalidPolynomial => f.write_str("invalid polynomial expression"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
