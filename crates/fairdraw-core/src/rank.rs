//! Entrant ranking.
//!
//! Each entrant gets a 256-bit rank key:
//!
//! ```text
//! rank_key = H(entrant ␠ mixed_entropy) XOR roll
//! ```
//!
//! Sorting the keys ascending gives the draw's total order. The order is a
//! pseudorandom permutation that nobody can predict before `dice` and `salt`
//! are known, and that anybody can recompute afterwards.

use std::fmt;
use std::ops::BitXor;

use crate::error::{RaffleError, Result};
use crate::hasher::{DIGEST_LEN, Digest, Hasher};
use crate::seed::DerivedSeed;

/// A 256-bit unsigned integer stored big-endian.
///
/// Derived `Ord` compares the bytes lexicographically, which for a fixed-width
/// big-endian value is numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey([u8; DIGEST_LEN]);

impl RankKey {
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Parse hex of any width up to 64 digits; short input is zero-extended
    /// on the left.
    pub fn from_hex(s: &str) -> Result<Self> {
        let malformed = || RaffleError::MalformedRankKey(s.to_string());
        if s.is_empty() || s.len() > DIGEST_LEN * 2 {
            return Err(malformed());
        }
        let padded = format!("{s:0>width$}", width = DIGEST_LEN * 2);
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| malformed())?;
        Ok(Self(bytes))
    }

    /// Lowercase hex of the integer value with leading zeros stripped, the
    /// form used in published records. Zero renders as `"0"`.
    pub fn to_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Digest> for RankKey {
    fn from(d: Digest) -> Self {
        Self(*d.as_bytes())
    }
}

impl BitXor for RankKey {
    type Output = RankKey;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = [0u8; DIGEST_LEN];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i] ^ rhs.0[i];
        }
        RankKey(out)
    }
}

/// One entrant and the key it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntrant {
    pub key: RankKey,
    pub entrant: String,
}

/// Entrants sorted ascending by rank key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedEntrantList {
    ranked: Vec<RankedEntrant>,
}

impl RankedEntrantList {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntrant> {
        self.ranked.iter()
    }

    /// Entrant at rank `r`, where rank 0 is the smallest key.
    pub fn get(&self, r: usize) -> Option<&RankedEntrant> {
        self.ranked.get(r)
    }

    /// Rank of `entrant`, if present.
    pub fn position(&self, entrant: &str) -> Option<usize> {
        self.ranked.iter().position(|r| r.entrant == entrant)
    }
}

impl<'a> IntoIterator for &'a RankedEntrantList {
    type Item = &'a RankedEntrant;
    type IntoIter = std::slice::Iter<'a, RankedEntrant>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.iter()
    }
}

/// Rank key for a single entrant.
pub fn entrant_key<H: Hasher + ?Sized>(hasher: &H, entrant: &str, seed: &DerivedSeed) -> RankKey {
    let digest = hasher.digest_fields(&[entrant, &seed.mixed_entropy.to_hex()]);
    RankKey::from(digest) ^ RankKey::from(seed.roll)
}

/// Rank `entrants` under `seed`.
///
/// Input order does not affect the result. Two entrants sharing a key is a
/// [`RaffleError::DuplicateKeyCollision`]; there is no tie-break.
pub fn rank_entrants<H: Hasher + ?Sized>(
    hasher: &H,
    entrants: &[String],
    seed: &DerivedSeed,
) -> Result<RankedEntrantList> {
    let mut ranked: Vec<RankedEntrant> = entrants
        .iter()
        .map(|e| RankedEntrant {
            key: entrant_key(hasher, e, seed),
            entrant: e.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| a.key.cmp(&b.key));

    if let Some(pair) = ranked.windows(2).find(|w| w[0].key == w[1].key) {
        return Err(RaffleError::DuplicateKeyCollision {
            first: pair[0].entrant.clone(),
            second: pair[1].entrant.clone(),
            key: pair[0].key.to_hex(),
        });
    }

    log::debug!("ranked {} entrants", ranked.len());
    Ok(RankedEntrantList { ranked })
}
