//! Digest capability shared by every stage of a draw.
//!
//! **All** hashing in a draw goes through a [`Hasher`]. Stages never call
//! SHA-256 directly; they receive the hasher as a parameter so a test double can
//! observe the exact text that gets hashed.
//!
//! # Protocol
//!
//! ```text
//! field_1 ␠ field_2 ␠ … ␠ field_n → UTF-8 bytes → SHA-256 → 32 bytes
//! ```
//!
//! The single-space separator and the field order are part of the published
//! protocol. Changing either makes every previously published result
//! unverifiable.

use std::fmt;

use sha2::{Digest as _, Sha256};

/// Width of every digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A 256-bit digest, displayed as 64 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Full-width lowercase hex, leading zeros included.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One-way digest over protocol text.
pub trait Hasher {
    /// Hash `input` as UTF-8 bytes.
    fn digest(&self, input: &str) -> Digest;

    /// Hash `fields` joined with the protocol separator.
    fn digest_fields(&self, fields: &[&str]) -> Digest {
        self.digest(&fields.join(" "))
    }
}

/// SHA-256, the hasher every published draw uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, input: &str) -> Digest {
        let mut h = Sha256::new();
        h.update(input.as_bytes());
        Digest(h.finalize().into())
    }
}
