//! Error types.

use alloc::string::String;
use core::fmt;

/// Result type with the `curvekit` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Field arithmetic failed, e.g. operands from different fields or a
    /// division by zero.
    Field(primefield::Error),

    /// Point encoding with an unsupported leading tag byte.
    UnsupportedPointFormat(u8),

    /// Field type other than a prime field, e.g. `GF(2^m)`.
    UnsupportedField,

    /// No curve with the given name or OID is known.
    NoSuchCurve(String),

    /// Coordinates do not satisfy the curve equation.
    NotOnCurve,

    /// Operation is not defined for the given curve or parameters.
    UnsupportedOperation(&'static str),

    /// Operands live on different curves.
    CurveMismatch,

    /// Domain parameters describe a singular or otherwise invalid curve.
    InvalidCurve,

    /// Malformed byte encoding.
    InvalidEncoding,

    /// Scalar is out of range for the curve order.
    InvalidScalar,

    /// ECDSA nonce produced a zero signature component.
    InvalidNonce,

    /// Public key does not belong to the private key.
    KeyMismatch,

    /// Rejection sampling exceeded its retry budget.
    SamplingFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Field(err) => write!(f, "field arithmetic error: {}", err),
            Error::UnsupportedPointFormat(tag) => {
                write!(f, "unsupported point format (tag 0x{:02x})", tag)
            }
            Error::UnsupportedField => f.write_str("unsupported field type"),
            Error::NoSuchCurve(name) => write!(f, "no such curve: {}", name),
            Error::NotOnCurve => f.write_str("point is not on curve"),
            Error::UnsupportedOperation(what) => write!(f, "unsupported operation: {}", what),
            Error::CurveMismatch => f.write_str("operands belong to different curves"),
            Error::InvalidCurve => f.write_str("invalid curve parameters"),
            Error::InvalidEncoding => f.write_str("invalid encoding"),
            Error::InvalidScalar => f.write_str("scalar out of range"),
            Error::InvalidNonce => f.write_str("nonce yields a zero signature component"),
            Error::KeyMismatch => f.write_str("public key does not match private key"),
            Error::SamplingFailed => f.write_str("random sampling exceeded retry limit"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<primefield::Error> for Error {
    fn from(err: primefield::Error) -> Error {
        Error::Field(err)
    }
}

impl From<const_oid::Error> for Error {
    fn from(_: const_oid::Error) -> Error {
        Error::InvalidEncoding
    }
}
