//! Seed derivation.
//!
//! ```text
//! key           = H(time ␠ name ␠ count)
//! mixed_entropy = H(dice ␠ salt)
//! roll          = H(key ␠ mixed_entropy)
//! ```
//!
//! `key` binds the draw to its declared parameters, `mixed_entropy` salts every
//! entrant digest, and `roll` is the value rank keys are XORed against. No
//! randomness is introduced here; all of it comes from `dice` and `salt`.

use crate::definition::RaffleDefinition;
use crate::hasher::{Digest, Hasher};

/// The three values derived once per draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSeed {
    pub key: Digest,
    /// Published under the name `dice`.
    pub mixed_entropy: Digest,
    pub roll: Digest,
}

/// Derive the seed for `definition`.
pub fn derive_seed<H: Hasher + ?Sized>(hasher: &H, definition: &RaffleDefinition) -> DerivedSeed {
    let count = definition.count().to_string();
    let key = hasher.digest_fields(&[definition.time(), definition.name(), &count]);
    let mixed_entropy = hasher.digest_fields(&[definition.dice(), definition.salt()]);
    let roll = hasher.digest_fields(&[&key.to_hex(), &mixed_entropy.to_hex()]);

    log::debug!("key  = {key}");
    log::debug!("dice = {mixed_entropy}");
    log::debug!("roll = {roll}");

    DerivedSeed {
        key,
        mixed_entropy,
        roll,
    }
}
