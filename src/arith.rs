//! Modular arithmetic primitives: square-and-multiply exponentiation and
//! the iterative extended-Euclidean inverse.
//!
//! Both functions are pure; they touch no global state and perform no I/O.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Computes `base^exponent mod modulus` by iterative square-and-multiply,
/// using O(log exponent) multiplications.
///
/// Returns `InvalidParameter` when `modulus` is zero.
///
/// # Examples
/// ```
/// use elgamal_engine::mod_exp;
/// use num_bigint::BigUint;
///
/// let r = mod_exp(
///     &BigUint::from(4u32),
///     &BigUint::from(13u32),
///     &BigUint::from(497u32),
/// )
/// .unwrap();
/// assert_eq!(r, BigUint::from(445u32));
/// ```
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::invalid_parameter("modulus must be positive"));
    }
    if modulus.is_one() {
        return Ok(BigUint::zero());
    }

    let mut result = BigUint::one();
    let mut square = base % modulus;
    let mut exp = exponent.clone();
    while !exp.is_zero() {
        if exp.is_odd() {
            result = &result * &square % modulus;
        }
        square = &square * &square % modulus;
        exp >>= 1;
    }
    Ok(result)
}

/// Computes the inverse of `a` modulo `m`: the `x` with `a * x ≡ 1 (mod m)`.
///
/// Runs the extended Euclidean algorithm iteratively, so moduli of any size
/// are handled without recursion depth concerns. Returns `NoInverse` when
/// `gcd(a, m) != 1`; for a prime modulus this only happens when `a` is zero
/// or a multiple of `m`, which in the ElGamal protocol signals a corrupt
/// ciphertext.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() || m.is_one() {
        return Err(Error::invalid_parameter("inverse modulus must exceed 1"));
    }

    // Track r_i and the Bezout coefficient of `a` only; the coefficient of
    // `m` is never needed for the inverse.
    let mut old_r = BigInt::from(a % m);
    let mut r = BigInt::from(m.clone());
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = std::mem::replace(&mut r, rem);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::NoInverse);
    }

    let m_int = BigInt::from(m.clone());
    let mut x = old_s % &m_int;
    if x.sign() == Sign::Minus {
        x += &m_int;
    }
    // x is in [0, m-1] here, so the conversion cannot fail.
    Ok(x.to_biguint().unwrap())
}
