//! Elliptic Curve Diffie-Hellman key agreement and the ECIES key
//! encapsulation built on it.
//!
//! Both produce the shared point itself. Deriving symmetric keys from it
//! with a KDF is left to the caller.

use crate::{AffinePoint, Error, PrivateKey, PublicKey, Result};
use rand_core::CryptoRng;

/// Result of an ECIES encryption: the ephemeral public point to transmit and
/// the shared point only sender and recipient can compute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EciesEncryption {
    ephemeral: AffinePoint,
    shared: AffinePoint,
}

impl EciesEncryption {
    /// Ephemeral public point `R` sent to the recipient.
    pub fn ephemeral_point(&self) -> &AffinePoint {
        &self.ephemeral
    }

    /// Shared point `S`.
    pub fn shared_point(&self) -> &AffinePoint {
        &self.shared
    }

    /// Split into `(R, S)`.
    pub fn into_parts(self) -> (AffinePoint, AffinePoint) {
        (self.ephemeral, self.shared)
    }
}

impl PrivateKey {
    /// Compute the shared point `d·Q` with a peer's public key.
    pub fn ecdh(&self, peer: &PublicKey) -> Result<AffinePoint> {
        if peer.curve() != self.curve() {
            return Err(Error::CurveMismatch);
        }

        peer.point().try_mul(&self.scalar())
    }

    /// Recover the shared point of an ECIES encryption from the ephemeral
    /// point `R`.
    pub fn ecies_decrypt(&self, ephemeral: &AffinePoint) -> Result<AffinePoint> {
        let ephemeral = PublicKey::from_point(ephemeral.clone())?;
        self.ecdh(&ephemeral)
    }
}

impl PublicKey {
    /// Generate an ephemeral key pair and derive the shared point with this
    /// public key.
    pub fn ecies_encrypt<R: CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<EciesEncryption> {
        let ephemeral = PrivateKey::random(self.curve(), rng)?;
        let shared = ephemeral.ecdh(self)?;
        Ok(EciesEncryption {
            ephemeral: ephemeral.public_key().point().clone(),
            shared,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, PrivateKey, registry};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn shared_secret_agrees() {
        let curve = registry::lookup("brainpoolP192r1").unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let alice = PrivateKey::random(&curve, &mut rng).unwrap();
        let bob = PrivateKey::random(&curve, &mut rng).unwrap();

        assert_eq!(
            alice.ecdh(bob.public_key()).unwrap(),
            bob.ecdh(alice.public_key()).unwrap()
        );
    }

    #[test]
    fn curve_mismatch() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let alice = PrivateKey::random(&registry::lookup("secp128r1").unwrap(), &mut rng).unwrap();
        let bob = PrivateKey::random(&registry::lookup("secp128r2").unwrap(), &mut rng).unwrap();
        assert_eq!(alice.ecdh(bob.public_key()), Err(Error::CurveMismatch));
    }

    #[test]
    fn ecies_round_trip() {
        let curve = registry::lookup("secp192k1").unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let recipient = PrivateKey::random(&curve, &mut rng).unwrap();

        let encryption = recipient.public_key().ecies_encrypt(&mut rng).unwrap();
        assert_eq!(
            recipient.ecies_decrypt(encryption.ephemeral_point()).unwrap(),
            *encryption.shared_point()
        );
    }
}
