//! ElGamal encryption and decryption over a safe-prime group.
//!
//! A message is encoded to bits, read as one integer m, and masked with the
//! shared secret s = h^k mod p. When m does not fit below the modulus, the
//! bit string is split into byte-aligned chunks that each do, and every
//! chunk is masked with the same s. Decryption recovers s^-1 from alpha and
//! the private exponent without ever reconstructing s itself.
//!
//! Confidentiality only: nothing here detects tampering, and decrypting
//! with a mismatched key yields plausible-looking garbage rather than an
//! error.

use num_bigint::{BigUint, RandBigInt};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arith::{mod_exp, mod_inverse};
use crate::codec::{self, Bits};
use crate::error::{Error, Result};
use crate::keys::PublicKey;

/// ElGamal ciphertext: `alpha = g^k mod p` for the ephemeral exponent k,
/// and one masked integer below p per plaintext chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub alpha: BigUint,
    pub beta: Vec<BigUint>,
}

/// Configuration for [`encrypt`]: the ephemeral exponent's randomness.
#[derive(Debug, Default)]
pub struct EncryptConfig {
    /// Optional RNG seed for reproducible encryption.
    pub seed: Option<u64>,
}

/// Encrypts `message` under `key`.
///
/// Draws a single-use ephemeral exponent k in [2, p-2], computes
/// `alpha = g^k mod p` and the mask `s = h^k mod p`, then masks the encoded
/// message: as one integer when it is below p, otherwise chunk by chunk.
///
/// # Examples
/// ```
/// use elgamal_engine::{decrypt, encrypt, generate_keypair, EncryptConfig, KeyGenConfig};
///
/// let pair = generate_keypair(&KeyGenConfig {
///     bit_length: 32,
///     rounds: 20,
///     seed: Some(3),
/// })
/// .unwrap();
/// let ct = encrypt("HI", &pair.public, &EncryptConfig::default()).unwrap();
/// let back = decrypt(&ct, &pair.public.p, &pair.private.a).unwrap();
/// assert_eq!(back, "HI");
/// ```
pub fn encrypt(message: &str, key: &PublicKey, config: &EncryptConfig) -> Result<Ciphertext> {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let p = &key.p;
    let bits = codec::encode_text(message)?;
    let m = codec::bits_to_uint(&bits);

    // Ephemeral exponent in [2, p-2], used once and dropped.
    let two = BigUint::from(2u32);
    let k = rng.gen_biguint_range(&two, &(p - 1u32));

    let alpha = mod_exp(&key.g, &k, p)?;
    let s = mod_exp(&key.h, &k, p)?;

    let beta = if m >= *p {
        codec::chunk(&bits, p.bits())?
            .into_iter()
            .map(|c| codec::bits_to_uint(c) * &s % p)
            .collect()
    } else {
        vec![m * &s % p]
    };

    Ok(Ciphertext { alpha, beta })
}

/// Decrypts `ciphertext` with the modulus `p` and secret exponent `a` of the
/// matching key pair.
///
/// Computes `s^-1 = (alpha^-1)^a mod p`, unmasks every beta entry, renders
/// each recovered integer as bits left-padded to whole bytes, and decodes
/// the concatenation. Surfaces `NoInverse` when alpha is congruent to zero
/// (a protocol violation) and `Decode` when a recovered chunk cannot be
/// reconciled with the chunk width.
pub fn decrypt(ciphertext: &Ciphertext, p: &BigUint, a: &BigUint) -> Result<String> {
    if ciphertext.beta.is_empty() {
        return Err(Error::Decode("ciphertext carries no chunks".into()));
    }

    let inv = mod_inverse(&ciphertext.alpha, p)?;
    let s_inv = mod_exp(&inv, a, p)?;

    if let [single] = ciphertext.beta.as_slice() {
        let m = &s_inv * single % p;
        return Ok(codec::decode_bits(&codec::uint_to_bits(&m)));
    }

    let width = codec::chunk_width(p.bits());
    let mut bits = Bits::new();
    for masked in &ciphertext.beta {
        let m = &s_inv * masked % p;
        let chunk_bits = codec::uint_to_bits(&m);
        if chunk_bits.len() as u64 > width {
            return Err(Error::Decode(
                "recovered chunk exceeds the modulus chunk width".into(),
            ));
        }
        bits.extend_from_bitslice(&chunk_bits);
    }
    Ok(codec::decode_bits(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_text;
    use crate::keys::{generate_keypair, KeyGenConfig, KeyPair};
    use crate::prime::DEFAULT_ROUNDS;

    fn pair_with_seed(bit_length: u64, seed: u64) -> KeyPair {
        generate_keypair(&KeyGenConfig {
            bit_length,
            rounds: DEFAULT_ROUNDS,
            seed: Some(seed),
        })
        .unwrap()
    }

    fn round_trip(message: &str, pair: &KeyPair) -> String {
        let ct = encrypt(message, &pair.public, &EncryptConfig::default()).unwrap();
        decrypt(&ct, &pair.public.p, &pair.private.a).unwrap()
    }

    #[test]
    fn test_round_trip_short_messages() {
        let pair = pair_with_seed(64, 11);
        for msg in ["", "A", "HI", "ok!"] {
            assert_eq!(round_trip(msg, &pair), msg);
        }
    }

    #[test]
    fn test_round_trip_multi_chunk_messages() {
        let pair = pair_with_seed(32, 12);
        for msg in [
            "Hello, world",
            "The quick brown fox jumps over the lazy dog",
            "caf\u{E9} au lait \u{FF}",
        ] {
            assert_eq!(round_trip(msg, &pair), msg);
        }
    }

    #[test]
    fn test_round_trip_across_fresh_keys() {
        for seed in 0..5u64 {
            let pair = pair_with_seed(40, 1000 + seed);
            assert_eq!(round_trip("attack at dawn", &pair), "attack at dawn");
        }
    }

    #[test]
    fn test_chunk_count_law() {
        let pair = pair_with_seed(32, 13);
        let msg = "chunking law exercise";
        let bits = encode_text(msg).unwrap();
        let m = crate::codec::bits_to_uint(&bits);
        assert!(m >= pair.public.p);

        let ct = encrypt(msg, &pair.public, &EncryptConfig::default()).unwrap();
        let width = codec::chunk_width(pair.public.p.bits()) as usize;
        let expected = bits.len().div_ceil(width);
        assert_eq!(ct.beta.len(), expected);
        for masked in &ct.beta {
            assert!(*masked < pair.public.p);
        }
    }

    #[test]
    fn test_small_message_uses_single_chunk() {
        let pair = pair_with_seed(64, 14);
        let ct = encrypt("HI", &pair.public, &EncryptConfig::default()).unwrap();
        assert_eq!(ct.beta.len(), 1);
    }

    #[test]
    fn test_seeded_encryption_is_reproducible() {
        let pair = pair_with_seed(48, 15);
        let config = EncryptConfig { seed: Some(77) };
        let a = encrypt("same every time", &pair.public, &config).unwrap();
        let b = encrypt("same every time", &pair.public, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrong_key_decrypts_to_garbage_not_error() {
        let pair = pair_with_seed(48, 16);
        let other = pair_with_seed(48, 17);
        let ct = encrypt("HI", &pair.public, &EncryptConfig::default()).unwrap();
        // Decrypting with a foreign exponent under the right modulus cannot
        // be detected; it just produces a different string.
        let garbled = decrypt(&ct, &pair.public.p, &other.private.a).unwrap();
        assert_ne!(garbled, "HI");
    }

    #[test]
    fn test_zero_alpha_is_a_protocol_violation() {
        let pair = pair_with_seed(48, 18);
        let ct = Ciphertext {
            alpha: BigUint::from(0u32),
            beta: vec![BigUint::from(1u32)],
        };
        assert_eq!(
            decrypt(&ct, &pair.public.p, &pair.private.a),
            Err(Error::NoInverse)
        );
    }

    #[test]
    fn test_oversized_chunk_is_malformed() {
        // Hand-craft a multi-chunk ciphertext whose unmasked values recover
        // to p - 1. With alpha = g the mask is s = g^a = h, so masking with
        // h directly makes decryption recover the chosen value exactly.
        // p - 1 spans the full modulus bit length, wider than the
        // byte-aligned chunk width, so the bytes cannot be reconciled.
        let pair = pair_with_seed(32, 20);
        let p = &pair.public.p;
        let too_wide = p - 1u32;
        let masked = &too_wide * &pair.public.h % p;
        let ct = Ciphertext {
            alpha: pair.public.g.clone(),
            beta: vec![masked.clone(), masked],
        };
        assert!(matches!(
            decrypt(&ct, p, &pair.private.a),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_empty_beta_is_malformed() {
        let pair = pair_with_seed(48, 19);
        let ct = Ciphertext {
            alpha: BigUint::from(2u32),
            beta: vec![],
        };
        assert!(matches!(
            decrypt(&ct, &pair.public.p, &pair.private.a),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_deterministic_hi_scenario() {
        // Fully seeded end-to-end scenario on a 16-bit modulus.
        let pair = pair_with_seed(16, 2024);
        let p = &pair.public.p;
        let q: BigUint = (p - 1u32) >> 1;
        assert!(crate::prime::is_probably_prime(&q, 20).unwrap());
        assert!(crate::prime::is_probably_prime(p, 20).unwrap());

        let ct = encrypt("HI", &pair.public, &EncryptConfig { seed: Some(5) }).unwrap();
        assert_eq!(decrypt(&ct, p, &pair.private.a).unwrap(), "HI");
    }
}
