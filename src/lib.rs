//! DISCLAIMER: This crate is a toy implementation of the ElGamal
//! public-key cryptosystem in pure Rust. It is *EXCLUSIVELY* for
//! demonstration and educational purposes. Absolutely DO NOT use it for
//! real cryptographic or security-sensitive operations: it is not audited,
//! not side-channel resistant, and provides confidentiality only, with no
//! authentication or integrity of any kind.
//!
//! The crate covers the number-theoretic core of the system: modular
//! arithmetic, Miller-Rabin primality testing, Sophie-Germain/safe-prime
//! generation, subgroup generator discovery, key-pair generation, and
//! chunked encryption/decryption of single-byte-range text, plus an
//! explicit caller-owned store for named key pairs and their ciphertexts.
//!
//! If you need ElGamal or any cryptographic operations in production,
//! please use a vetted, well-reviewed cryptography library.

pub mod arith;
pub mod cipher;
pub mod codec;
pub mod error;
pub mod keys;
pub mod prime;
pub mod store;

pub use error::{Error, Result};

// Re-export modular arithmetic primitives
pub use arith::{mod_exp, mod_inverse};

// Re-export primality testing and safe-prime generation
pub use prime::{
    generate_sophie_germain_prime, generate_sophie_germain_prime_parallel, is_probably_prime,
    passes_trial_division, SophieGermainConfig, DEFAULT_ROUNDS, SMALL_PRIMES,
};

// Re-export key generation
pub use keys::{find_generator, generate_keypair, KeyGenConfig, KeyPair, PrivateKey, PublicKey};

// Re-export the text codec
pub use codec::{bits_to_uint, chunk, chunk_width, decode_bits, encode_text, uint_to_bits, Bits};

// Re-export encryption/decryption
pub use cipher::{decrypt, encrypt, Ciphertext, EncryptConfig};

// Re-export the key/ciphertext registry
pub use store::{KeyStore, StoredCiphertext};
