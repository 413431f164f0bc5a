//! Independent verification of published artifacts.
//!
//! The embedded `raffle` is validated again, the draw is recomputed from it,
//! and each published field is compared with the recomputed value. Rank keys
//! are compared as integers, so artifacts written with or without leading
//! zeros verify the same way.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::definition::definition_from_value;
use crate::error::{RaffleError, Result};
use crate::hasher::{Digest, Hasher};
use crate::rank::RankKey;
use crate::result::ResultRecord;

/// An artifact as read back from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishedRecord {
    /// The embedded definition document, exactly as published.
    pub raffle: Value,
    pub key: String,
    pub dice: String,
    pub roll: String,
    #[serde(rename = "entryPickList")]
    pub entry_pick_list: Vec<String>,
    pub entries: Vec<(String, String)>,
    pub distributions: Vec<(String, u64)>,
    pub results: Vec<(String, u64)>,
}

/// One published field that disagrees with the recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: &'static str,
    pub expected: String,
    pub found: String,
}

/// Outcome of checking one artifact.
#[derive(Debug, Clone)]
pub struct Verification {
    pub recomputed: ResultRecord,
    pub mismatches: Vec<Mismatch>,
}

impl Verification {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Read and parse the artifact at `path`.
pub fn load_published(path: &Path) -> Result<PublishedRecord> {
    let text = fs::read_to_string(path).map_err(|e| RaffleError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| RaffleError::json(path, e))
}

/// Recompute the draw behind `published` and compare every field.
pub fn verify_record<H: Hasher + ?Sized>(
    hasher: &H,
    published: &PublishedRecord,
) -> Result<Verification> {
    let definition = definition_from_value(Path::new("raffle"), published.raffle.clone())?;
    let recomputed = crate::draw(hasher, definition)?;

    let mut mismatches = Vec::new();
    let seed = recomputed.seed();
    check_digest(&mut mismatches, "key", &seed.key, &published.key);
    check_digest(&mut mismatches, "dice", &seed.mixed_entropy, &published.dice);
    check_digest(&mut mismatches, "roll", &seed.roll, &published.roll);

    let pick_list: Vec<String> = recomputed.ranked().iter().map(|r| r.key.to_hex()).collect();
    check_list(
        &mut mismatches,
        "entryPickList",
        &pick_list,
        &published.entry_pick_list,
        |a, b| same_key(a, b),
    );

    let entries = recomputed.entries();
    let expected_entries: Vec<(String, String)> = entries
        .iter()
        .map(|&(key, entrant, _)| (key.to_hex(), entrant.to_string()))
        .collect();
    check_list(
        &mut mismatches,
        "entries",
        &expected_entries,
        &published.entries,
        |a, b| same_key(&a.0, &b.0) && a.1 == b.1,
    );

    let expected_distributions: Vec<(String, u64)> = entries
        .iter()
        .map(|&(key, _, units)| (key.to_hex(), units))
        .collect();
    check_list(
        &mut mismatches,
        "distributions",
        &expected_distributions,
        &published.distributions,
        |a, b| same_key(&a.0, &b.0) && a.1 == b.1,
    );

    let expected_results: Vec<(String, u64)> = recomputed
        .allocation()
        .iter()
        .map(|(e, u)| (e.to_string(), u))
        .collect();
    check_list(
        &mut mismatches,
        "results",
        &expected_results,
        &published.results,
        |a, b| a == b,
    );

    for m in &mismatches {
        log::warn!("{}: expected {}, found {}", m.field, m.expected, m.found);
    }

    Ok(Verification {
        recomputed,
        mismatches,
    })
}

fn same_key(expected: &str, found: &str) -> bool {
    match (RankKey::from_hex(expected), RankKey::from_hex(found)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn check_digest(out: &mut Vec<Mismatch>, field: &'static str, expected: &Digest, found: &str) {
    let expected = expected.to_hex();
    if !expected.eq_ignore_ascii_case(found) {
        out.push(Mismatch {
            field,
            expected,
            found: found.to_string(),
        });
    }
}

fn check_list<T: std::fmt::Debug>(
    out: &mut Vec<Mismatch>,
    field: &'static str,
    expected: &[T],
    found: &[T],
    same: impl Fn(&T, &T) -> bool,
) {
    if expected.len() != found.len() {
        out.push(Mismatch {
            field,
            expected: format!("{} items", expected.len()),
            found: format!("{} items", found.len()),
        });
        return;
    }
    if let Some(i) = (0..expected.len()).find(|&i| !same(&expected[i], &found[i])) {
        out.push(Mismatch {
            field,
            expected: format!("[{i}] {:?}", expected[i]),
            found: format!("[{i}] {:?}", found[i]),
        });
    }
}
