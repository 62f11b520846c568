//! Curve-specific behavioural flags.

use core::fmt;

/// Deviation from the generic algorithm that a particular curve requires.
///
/// Quirks are attached to a [`Curve`][crate::Curve] at construction time and
/// consulted by the signature schemes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CurveQuirk {
    /// EdDSA private scalars have every bit above `b - 2` cleared and bit
    /// `b - 2` set.
    EddsaSetPrivateKeyMsb,

    /// EdDSA private scalars have their low `log2(h)` bits cleared so that
    /// public keys lie in the prime order subgroup.
    EddsaEnsurePrimeOrderSubgroup,
}

impl CurveQuirk {
    /// Stable textual identifier.
    pub const fn identifier(self) -> &'static str {
        match self {
            CurveQuirk::EddsaSetPrivateKeyMsb => "EdDSA_set_private_key_MSB",
            CurveQuirk::EddsaEnsurePrimeOrderSubgroup => "EdDSA_use_prime_order_subgroup",
        }
    }
}

impl fmt::Display for CurveQuirk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
