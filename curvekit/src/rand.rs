//! Secure random sampling.
//!
//! All functions take the random number generator explicitly. With the
//! `getrandom` feature enabled the operating system's RNG can be used via
//! `rand_core::OsRng.unwrap_err()`.

use crate::{Error, Result};
use alloc::{vec, vec::Vec};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRng;
use zeroize::Zeroizing;

/// Upper bound on rejection sampling iterations before giving up with
/// [`Error::SamplingFailed`].
///
/// Each iteration succeeds with probability above one half, so reaching this
/// bound indicates a broken RNG rather than bad luck.
pub const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// Fill a freshly allocated buffer with `len` random bytes.
pub fn random_bytes<R: CryptoRng + ?Sized>(rng: &mut R, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Sample an integer uniformly from `[0, bound)`.
pub fn random_below<R: CryptoRng + ?Sized>(rng: &mut R, bound: &BigUint) -> Result<BigUint> {
    if bound.is_zero() {
        return Err(Error::InvalidScalar);
    }

    let bits = bound.bits();
    let len = bits.div_ceil(8) as usize;
    let top_mask = 0xffu8 >> (len as u64 * 8 - bits);

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let mut bytes = Zeroizing::new(random_bytes(rng, len));
        bytes[0] &= top_mask;

        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate < bound {
            return Ok(candidate);
        }
    }

    Err(Error::SamplingFailed)
}

/// Sample a non-zero scalar uniformly from `[1, order)`.
pub fn random_scalar<R: CryptoRng + ?Sized>(rng: &mut R, order: &BigUint) -> Result<BigUint> {
    if order <= &BigUint::one() {
        return Err(Error::InvalidScalar);
    }

    Ok(random_below(rng, &(order - 1u32))? + 1u32)
}

#[cfg(test)]
mod tests {
    use super::{random_below, random_bytes, random_scalar};
    use crate::Error;
    use num_bigint::BigUint;
    use rand_chacha::ChaCha20Rng;
    use rand_core::{CryptoRng, RngCore, SeedableRng};

    /// RNG that only ever produces `0xff` bytes.
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
    }

    impl CryptoRng for SaturatedRng {}

    #[test]
    fn bytes_have_requested_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(random_bytes(&mut rng, 0).len(), 0);
        assert_eq!(random_bytes(&mut rng, 37).len(), 37);
    }

    #[test]
    fn below_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let bound = BigUint::from(1000u32);
        for _ in 0..500 {
            assert!(random_below(&mut rng, &bound).unwrap() < bound);
        }
    }

    #[test]
    fn scalar_nonzero() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let order = BigUint::from(2u32);
        for _ in 0..50 {
            assert_eq!(random_scalar(&mut rng, &order).unwrap(), BigUint::from(1u32));
        }
        assert_eq!(
            random_scalar(&mut rng, &BigUint::from(1u32)),
            Err(Error::InvalidScalar)
        );
    }

    #[test]
    fn sampling_gives_up() {
        // 0xff is always rejected for a bound of 129
        let bound = BigUint::from(129u32);
        assert_eq!(
            random_below(&mut SaturatedRng, &bound),
            Err(Error::SamplingFailed)
        );
    }

    #[test]
    fn zero_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        assert_eq!(
            random_below(&mut rng, &BigUint::from(0u32)),
            Err(Error::InvalidScalar)
        );
    }
}
