//! Key generation: subgroup generator discovery and key-pair assembly.
//!
//! The modulus is a safe prime p = 2q + 1, so the multiplicative group mod p
//! has order 2q and its elements have order 1, 2, q, or 2q. Rejecting the
//! elements with g^2 = 1 or g^q = 1 leaves a generator of a subgroup of
//! order at least q, which is where the discrete-log assumption lives.

use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arith::mod_exp;
use crate::error::{Error, Result};
use crate::prime::{generate_sophie_germain_prime_with_rng, DEFAULT_ROUNDS};

/// Generator candidates examined before the search is declared degenerate.
/// Only the order-1 and order-2 elements are rejected, so with a healthy
/// randomness source the very first draws almost always succeed.
const MAX_GENERATOR_ATTEMPTS: usize = 10_000;

/// ElGamal public key: safe prime modulus `p`, subgroup generator `g`, and
/// `h = g^a mod p` for the secret exponent `a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub p: BigUint,
    pub g: BigUint,
    pub h: BigUint,
}

/// ElGamal private key: the secret exponent `a`, with 2 <= a <= p - 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub a: BigUint,
}

/// Combined key pair, immutable once generated.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// Configuration for [`generate_keypair`].
pub struct KeyGenConfig {
    /// Bit length of the safe prime modulus p.
    pub bit_length: u64,
    /// Miller-Rabin rounds used while searching for the safe prime.
    pub rounds: usize,
    /// Optional RNG seed for reproducible key generation.
    pub seed: Option<u64>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        KeyGenConfig {
            bit_length: 256,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Searches for a generator of the order-q subgroup of the group mod
/// p = 2q + 1: random g in [2, p-1] until `g^2 mod p != 1` and
/// `g^q mod p != 1`.
pub fn find_generator<R>(p: &BigUint, q: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: Rng + ?Sized,
{
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    for _ in 0..MAX_GENERATOR_ATTEMPTS {
        let g = rng.gen_biguint_range(&two, p);
        if mod_exp(&g, &two, p)? != one && mod_exp(&g, q, p)? != one {
            return Ok(g);
        }
    }
    Err(Error::GenerationFailure("searching for a subgroup generator"))
}

/// Generates an ElGamal key pair over a fresh safe-prime group.
///
/// Draws a Sophie-Germain prime q with p = 2q + 1 at the configured bit
/// length, finds a generator g of the order-q subgroup, picks the secret
/// exponent a uniformly in [2, p-2], and publishes h = g^a mod p.
///
/// # Examples
/// ```
/// use elgamal_engine::{generate_keypair, KeyGenConfig};
///
/// let config = KeyGenConfig { bit_length: 32, rounds: 20, seed: Some(7) };
/// let pair = generate_keypair(&config).unwrap();
/// assert_eq!(pair.public.p.bits(), 32);
/// ```
pub fn generate_keypair(config: &KeyGenConfig) -> Result<KeyPair> {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let q = generate_sophie_germain_prime_with_rng(config.bit_length, config.rounds, &mut rng)?;
    let p: BigUint = (&q << 1) + BigUint::one();
    let g = find_generator(&p, &q, &mut rng)?;

    // Secret exponent in [2, p-2]; the sampler's upper bound is exclusive.
    let two = BigUint::from(2u32);
    let a = rng.gen_biguint_range(&two, &(&p - BigUint::one()));
    let h = mod_exp(&g, &a, &p)?;
    debug!("generated key pair over a {}-bit safe-prime group", p.bits());

    Ok(KeyPair {
        public: PublicKey { p, g, h },
        private: PrivateKey { a },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::is_probably_prime;

    fn test_pair() -> KeyPair {
        generate_keypair(&KeyGenConfig {
            bit_length: 32,
            rounds: DEFAULT_ROUNDS,
            seed: Some(99),
        })
        .unwrap()
    }

    #[test]
    fn test_modulus_is_safe_prime() {
        let pair = test_pair();
        let p = &pair.public.p;
        let q: BigUint = (p - BigUint::one()) >> 1;
        assert!(is_probably_prime(p, DEFAULT_ROUNDS).unwrap());
        assert!(is_probably_prime(&q, DEFAULT_ROUNDS).unwrap());
    }

    #[test]
    fn test_generator_has_large_order() {
        let pair = test_pair();
        let p = &pair.public.p;
        let g = &pair.public.g;
        let q: BigUint = (p - BigUint::one()) >> 1;
        let one = BigUint::one();
        assert_ne!(mod_exp(g, &BigUint::from(2u32), p).unwrap(), one);
        assert_ne!(mod_exp(g, &q, p).unwrap(), one);
    }

    #[test]
    fn test_exponent_range_and_public_value() {
        let pair = test_pair();
        let p = &pair.public.p;
        let a = &pair.private.a;
        assert!(*a >= BigUint::from(2u32));
        assert!(*a <= p - BigUint::from(2u32));
        assert_eq!(
            pair.public.h,
            mod_exp(&pair.public.g, a, p).unwrap()
        );
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = test_pair();
        let b = test_pair();
        assert_eq!(a.public, b.public);
        assert_eq!(a.private, b.private);
    }

    #[test]
    fn test_rejects_tiny_bit_length() {
        let config = KeyGenConfig {
            bit_length: 1,
            rounds: DEFAULT_ROUNDS,
            seed: Some(1),
        };
        assert!(matches!(
            generate_keypair(&config),
            Err(Error::InvalidParameter(_))
        ));
    }
}
