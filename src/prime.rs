//! Probabilistic primality testing and Sophie-Germain/safe-prime generation.
//!
//! The pipeline is the classic one: a trial-division pre-filter over a small
//! prime table weeds out most candidates cheaply, and survivors go through
//! the Miller-Rabin test with independently drawn random witnesses. Safe
//! primes come out of rejection sampling: draw a candidate p, require both p
//! and q = (p-1)/2 to pass the test.

use log::{debug, trace};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::arith::mod_exp;
use crate::error::{Error, Result};

/// The first 70 primes, up to 349, used for the trial-division pre-filter.
pub const SMALL_PRIMES: [u32; 70] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317, 331, 337, 347, 349,
];

/// Default Miller-Rabin round count; error probability at most 4^-20.
pub const DEFAULT_ROUNDS: usize = 20;

/// Candidate draws allowed before a retry loop is declared degenerate.
const MAX_ATTEMPTS: usize = 100_000;

/// Candidates examined per rayon batch in the parallel safe-prime search.
const PARALLEL_BATCH: usize = 64;

/// Configuration for Sophie-Germain prime generation.
pub struct SophieGermainConfig {
    /// Bit length of the safe prime p = 2q + 1 (the returned q is one bit
    /// shorter). Must be at least 3.
    pub bit_length: u64,
    /// Miller-Rabin rounds applied to both p and q.
    pub rounds: usize,
    /// Optional RNG seed for reproducible generation.
    pub seed: Option<u64>,
}

impl Default for SophieGermainConfig {
    fn default() -> Self {
        SophieGermainConfig {
            bit_length: 256,
            rounds: DEFAULT_ROUNDS,
            seed: None,
        }
    }
}

/// Returns `false` when `candidate` is divisible by a prime in
/// [`SMALL_PRIMES`]; the table primes themselves pass. A `true` result only
/// means the candidate survived the pre-filter, not that it is prime.
pub fn passes_trial_division(candidate: &BigUint) -> bool {
    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if *candidate == p {
            return true;
        }
        if (candidate % &p).is_zero() {
            return false;
        }
    }
    true
}

/// Miller-Rabin probabilistic primality test with `rounds` random witnesses.
///
/// Returns `Ok(true)` when `n` is probably prime (false-positive probability
/// at most 4^-rounds) and `Ok(false)` when a witness proves `n` composite.
/// `n < 2` is an `InvalidInput` error.
///
/// # Examples
/// ```
/// use elgamal_engine::is_probably_prime;
/// use num_bigint::BigUint;
///
/// assert!(is_probably_prime(&BigUint::from(7919u32), 20).unwrap());
/// assert!(!is_probably_prime(&BigUint::from(7917u32), 20).unwrap());
/// ```
pub fn is_probably_prime(n: &BigUint, rounds: usize) -> Result<bool> {
    let mut rng = StdRng::from_entropy();
    is_probably_prime_with_rng(n, rounds, &mut rng)
}

/// [`is_probably_prime`] with a caller-supplied witness source.
pub fn is_probably_prime_with_rng<R>(n: &BigUint, rounds: usize, rng: &mut R) -> Result<bool>
where
    R: Rng + ?Sized,
{
    let two = BigUint::from(2u32);
    if *n < two {
        return Err(Error::invalid_input("primality is defined for n >= 2"));
    }
    if *n == two || *n == BigUint::from(3u32) {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }

    // Write n - 1 = 2^s * t with t odd.
    let one = BigUint::one();
    let n_minus_one = n - &one;
    let mut t = n_minus_one.clone();
    let mut s = 0u32;
    while t.is_even() {
        t >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        // Witness in [2, n-1]; the upper bound of the sampler is exclusive.
        let a = rng.gen_biguint_range(&two, n);
        let mut x = mod_exp(&a, &t, n)?;
        if x == one || x == n_minus_one {
            continue 'witness;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                // A nontrivial square root of 1 exists, so n is composite.
                return Ok(false);
            }
        }
        // The squaring chain never reached n - 1: a is a witness of
        // compositeness.
        return Ok(false);
    }
    Ok(true)
}

/// Draws random `bit_length`-bit integers until one survives trial division.
///
/// The sampling interval is [2^(bit_length-1) + 1, 2^bit_length - 1), so the
/// top bit is always set; even values are rejected by the table's leading 2.
pub fn low_level_candidate<R>(bit_length: u64, rng: &mut R) -> Result<BigUint>
where
    R: Rng + ?Sized,
{
    if bit_length < 3 {
        return Err(Error::invalid_parameter(
            "candidate bit length must be at least 3",
        ));
    }
    let one = BigUint::one();
    let low = (BigUint::one() << (bit_length - 1)) + &one;
    let high = (BigUint::one() << bit_length) - &one;

    for attempt in 0..MAX_ATTEMPTS {
        let candidate = rng.gen_biguint_range(&low, &high);
        if passes_trial_division(&candidate) {
            trace!("candidate found after {} draws", attempt + 1);
            return Ok(candidate);
        }
    }
    Err(Error::GenerationFailure(
        "sampling a trial-division-clean candidate",
    ))
}

/// Generates a Sophie-Germain prime q whose safe prime p = 2q + 1 has
/// `config.bit_length` bits.
///
/// Candidates p are drawn at the full bit length; both p and q = (p-1)/2
/// must pass Miller-Rabin at the configured round count. The caller
/// reconstructs p as 2q + 1.
pub fn generate_sophie_germain_prime(config: &SophieGermainConfig) -> Result<BigUint> {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    generate_sophie_germain_prime_with_rng(config.bit_length, config.rounds, &mut rng)
}

/// [`generate_sophie_germain_prime`] with a caller-supplied randomness source.
pub fn generate_sophie_germain_prime_with_rng<R>(
    bit_length: u64,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint>
where
    R: Rng + ?Sized,
{
    if bit_length < 3 {
        return Err(Error::invalid_parameter(
            "safe primes need a bit length of at least 3",
        ));
    }

    for attempt in 0..MAX_ATTEMPTS {
        if let Some(q) = sophie_germain_attempt(bit_length, rounds, rng)? {
            debug!(
                "found {}-bit Sophie-Germain prime after {} candidates",
                bit_length - 1,
                attempt + 1
            );
            return Ok(q);
        }
    }
    Err(Error::GenerationFailure("searching for a safe prime"))
}

/// Parallel variant of [`generate_sophie_germain_prime`]: candidates are
/// examined across the rayon thread pool and the first hit wins. Each
/// worker draws from its own entropy-seeded RNG, so the result is not
/// reproducible; the per-candidate accept/reject decision stays sequential
/// and side-effect-free.
pub fn generate_sophie_germain_prime_parallel(bit_length: u64, rounds: usize) -> Result<BigUint> {
    if bit_length < 3 {
        return Err(Error::invalid_parameter(
            "safe primes need a bit length of at least 3",
        ));
    }

    let batches = MAX_ATTEMPTS / PARALLEL_BATCH;
    for batch in 0..batches {
        let hit = (0..PARALLEL_BATCH)
            .into_par_iter()
            .find_map_any(|_| {
                let mut rng = StdRng::from_entropy();
                sophie_germain_attempt(bit_length, rounds, &mut rng).transpose()
            });
        match hit {
            Some(Ok(q)) => {
                debug!(
                    "parallel search hit a {}-bit Sophie-Germain prime in batch {}",
                    bit_length - 1,
                    batch + 1
                );
                return Ok(q);
            }
            Some(Err(e)) => return Err(e),
            None => {}
        }
    }
    Err(Error::GenerationFailure("searching for a safe prime"))
}

/// Tests one candidate: `Ok(Some(q))` when both p and q = (p-1)/2 pass,
/// `Ok(None)` when the candidate is rejected.
fn sophie_germain_attempt<R>(bit_length: u64, rounds: usize, rng: &mut R) -> Result<Option<BigUint>>
where
    R: Rng + ?Sized,
{
    let candidate = low_level_candidate(bit_length, rng)?;
    if !is_probably_prime_with_rng(&candidate, rounds, rng)? {
        return Ok(None);
    }
    let q: BigUint = (&candidate - BigUint::one()) >> 1;
    if !is_probably_prime_with_rng(&q, rounds, rng)? {
        return Ok(None);
    }
    Ok(Some(q))
}
