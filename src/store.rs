//! An explicit, caller-owned registry of named key pairs and the
//! ciphertexts produced with them.
//!
//! This is deliberately a plain value type handed around by the caller, not
//! ambient process-wide state: the engine itself never holds keys.

use crate::cipher::Ciphertext;
use crate::error::{Error, Result};
use crate::keys::KeyPair;

/// A ciphertext together with the name of the key pair that produced it.
#[derive(Debug, Clone)]
pub struct StoredCiphertext {
    pub owner: String,
    pub ciphertext: Ciphertext,
}

/// Name-keyed key pairs plus an ordered ledger of ciphertexts.
///
/// Entries keep insertion order; ciphertexts are addressed by the index
/// returned from [`KeyStore::push_ciphertext`].
#[derive(Debug, Default)]
pub struct KeyStore {
    entries: Vec<(String, KeyPair)>,
    ciphertexts: Vec<StoredCiphertext>,
}

impl KeyStore {
    pub fn new() -> Self {
        KeyStore::default()
    }

    /// Registers a key pair under `name`; rejects names already in use.
    pub fn add_key_pair(&mut self, name: &str, pair: KeyPair) -> Result<()> {
        if self.key_pair(name).is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.entries.push((name.to_string(), pair));
        Ok(())
    }

    /// Looks up the key pair registered under `name`.
    pub fn key_pair(&self, name: &str) -> Option<&KeyPair> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pair)| pair)
    }

    /// Iterates over (name, key pair) entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyPair)> {
        self.entries.iter().map(|(n, pair)| (n.as_str(), pair))
    }

    /// Appends a ciphertext produced under `owner`'s public key and returns
    /// its index. The owner must have a registered key pair.
    pub fn push_ciphertext(&mut self, owner: &str, ciphertext: Ciphertext) -> Result<usize> {
        if self.key_pair(owner).is_none() {
            return Err(Error::UnknownName(owner.to_string()));
        }
        self.ciphertexts.push(StoredCiphertext {
            owner: owner.to_string(),
            ciphertext,
        });
        Ok(self.ciphertexts.len() - 1)
    }

    /// Looks up a stored ciphertext by index.
    pub fn ciphertext(&self, index: usize) -> Option<&StoredCiphertext> {
        self.ciphertexts.get(index)
    }

    /// All stored ciphertexts in insertion order.
    pub fn ciphertexts(&self) -> &[StoredCiphertext] {
        &self.ciphertexts
    }

    /// True when no key pairs are registered. Stored ciphertexts are not
    /// consulted: they can only exist under a registered owner, so an empty
    /// entry list implies an empty ledger too.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
