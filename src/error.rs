//! Crate-wide error type and `Result` alias.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied parameter is outside the supported range
    /// (e.g. a bit length too small to host a safe prime).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A value handed to an operation violates that operation's domain
    /// (e.g. primality testing of an integer below 2).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No modular inverse exists: gcd of the operands is not 1. Under
    /// correct ElGamal usage this cannot happen and indicates a protocol
    /// violation (alpha congruent to 0 mod p).
    #[error("no modular inverse exists for the given operands")]
    NoInverse,

    /// The character cannot be represented in the fixed 8-bit encoding.
    #[error("character {0:?} does not fit in a single byte")]
    Encode(char),

    /// A ciphertext could not be reconciled back into whole bytes.
    #[error("malformed ciphertext: {0}")]
    Decode(String),

    /// A bounded retry loop ran out of attempts. With a healthy randomness
    /// source this is unreachable; hitting it means the source is degenerate.
    #[error("generation failed: retry bound exceeded while {0}")]
    GenerationFailure(&'static str),

    /// A key pair is already registered under this name.
    #[error("a key pair named {0:?} already exists")]
    DuplicateName(String),

    /// No key pair is registered under this name.
    #[error("no key pair named {0:?} exists")]
    UnknownName(String),
}

impl Error {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
