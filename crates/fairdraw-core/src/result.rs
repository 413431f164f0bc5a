//! Result records and their on-disk form.
//!
//! A [`ResultRecord`] holds everything needed to recompute a draw: the
//! definition, every derived value, the ranked order and the allocation. It
//! serializes to the published JSON artifact:
//!
//! - `raffle` — the definition document as read, key order and extra fields kept
//! - `key`, `dice`, `roll` — derived seed (`dice` is the mixed entropy digest)
//! - `entryPickList` — rank keys, ascending
//! - `entries` — `[rank key, entrant]` in input order
//! - `distributions` — `[rank key, units]` in input order
//! - `results` — `[entrant, units]` in ranked order
//!
//! Field names and nesting are a compatibility surface shared with previously
//! published artifacts.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tempfile::NamedTempFile;

use crate::allocate::AllocationTable;
use crate::definition::RaffleDefinition;
use crate::error::{RaffleError, Result};
use crate::rank::{RankKey, RankedEntrantList};
use crate::seed::DerivedSeed;

/// Suffix appended to the definition path to name the artifact.
pub const RESULTS_SUFFIX: &str = ".results.json";

/// Complete, immutable outcome of one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    definition: RaffleDefinition,
    seed: DerivedSeed,
    ranked: RankedEntrantList,
    allocation: AllocationTable,
}

/// Package a finished draw. No computation happens here.
pub fn assemble(
    definition: RaffleDefinition,
    seed: DerivedSeed,
    ranked: RankedEntrantList,
    allocation: AllocationTable,
) -> ResultRecord {
    ResultRecord {
        definition,
        seed,
        ranked,
        allocation,
    }
}

impl ResultRecord {
    pub fn definition(&self) -> &RaffleDefinition {
        &self.definition
    }

    pub fn seed(&self) -> &DerivedSeed {
        &self.seed
    }

    pub fn ranked(&self) -> &RankedEntrantList {
        &self.ranked
    }

    pub fn allocation(&self) -> &AllocationTable {
        &self.allocation
    }

    /// `(rank key, entrant, units)` in input order.
    pub fn entries(&self) -> Vec<(RankKey, &str, u64)> {
        let by_entrant: HashMap<&str, (RankKey, u64)> = self
            .ranked
            .iter()
            .zip(self.allocation.iter())
            .map(|(r, (_, units))| (r.entrant.as_str(), (r.key, units)))
            .collect();

        self.definition
            .entrants()
            .iter()
            .filter_map(|e| {
                by_entrant
                    .get(e.as_str())
                    .map(|&(key, units)| (key, e.as_str(), units))
            })
            .collect()
    }

    /// Serialize to the published JSON form.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        out.map_err(|e| RaffleError::json("<result record>", e))
    }
}

#[derive(Serialize)]
struct Published<'a> {
    raffle: &'a RaffleDefinition,
    key: String,
    dice: String,
    roll: String,
    #[serde(rename = "entryPickList")]
    entry_pick_list: Vec<String>,
    entries: Vec<(String, &'a str)>,
    distributions: Vec<(String, u64)>,
    results: Vec<(&'a str, u64)>,
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entries();
        Published {
            raffle: &self.definition,
            key: self.seed.key.to_hex(),
            dice: self.seed.mixed_entropy.to_hex(),
            roll: self.seed.roll.to_hex(),
            entry_pick_list: self.ranked.iter().map(|r| r.key.to_hex()).collect(),
            entries: entries
                .iter()
                .map(|&(key, entrant, _)| (key.to_hex(), entrant))
                .collect(),
            distributions: entries
                .iter()
                .map(|&(key, _, units)| (key.to_hex(), units))
                .collect(),
            results: self.allocation.iter().collect(),
        }
        .serialize(serializer)
    }
}

/// Artifact path for a definition: the input path with [`RESULTS_SUFFIX`]
/// appended.
pub fn results_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(RESULTS_SUFFIX);
    PathBuf::from(name)
}

/// Write `record` to `path` atomically.
///
/// The JSON is written to a temporary file in the destination directory and
/// renamed into place, so `path` either holds a complete record or is
/// untouched.
pub fn write_record(record: &ResultRecord, path: &Path, pretty: bool) -> Result<()> {
    let json = record.to_json(pretty)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RaffleError::io(dir, e))?;
    if let Err(e) = tmp.write_all(json.as_bytes()) {
        return Err(RaffleError::io(tmp.path(), e));
    }
    if let Err(e) = tmp.as_file().sync_all() {
        return Err(RaffleError::io(tmp.path(), e));
    }
    tmp.persist(path)
        .map_err(|e| RaffleError::io(path, e.error))?;

    log::info!("wrote {} ({} bytes)", path.display(), json.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::allocate_units;
    use crate::hasher::Sha256Hasher;
    use crate::rank::rank_entrants;
    use crate::seed::derive_seed;

    const SCENARIO_JSON: &str = concat!(
        r#"{"raffle":{"time":"2024-01-01T00:00:00Z","name":"test","count":2,"dice":"ABC","salt":"DEF","entrants":["a@x.com","b@x.com","c@x.com"]},"#,
        r#""key":"cfed1ae4c0e5d4defa53059d4c29c284d92d92034f8df92920f0a01355805107","#,
        r#""dice":"0123200bd5c87d6d82f97d6fcd5230709532c63d3ec24119f2f6f41d2652266e","#,
        r#""roll":"9eaea3d83aa1f5656308531e746dd42fea95dc7843ef8f3b69357cb1b712d107","#,
        r#""entryPickList":["40a65998538c191f05677190180cba435089828b5829e4e3572997b1713ef8b9","ce8b7d968199b9cf1292ee8545cae5773978923f414b5210a71b0ed0a37ff02c","d15722f8b1fda1f21d179de5dbc9744b6227d440034c569d63651f3bd1b5dd59"],"#,
        r#""entries":[["ce8b7d968199b9cf1292ee8545cae5773978923f414b5210a71b0ed0a37ff02c","a@x.com"],["d15722f8b1fda1f21d179de5dbc9744b6227d440034c569d63651f3bd1b5dd59","b@x.com"],["40a65998538c191f05677190180cba435089828b5829e4e3572997b1713ef8b9","c@x.com"]],"#,
        r#""distributions":[["ce8b7d968199b9cf1292ee8545cae5773978923f414b5210a71b0ed0a37ff02c",1],["d15722f8b1fda1f21d179de5dbc9744b6227d440034c569d63651f3bd1b5dd59",0],["40a65998538c191f05677190180cba435089828b5829e4e3572997b1713ef8b9",1]],"#,
        r#""results":[["c@x.com",1],["a@x.com",1],["b@x.com",0]]}"#,
    );

    fn scenario_record() -> ResultRecord {
        let def = RaffleDefinition::new(
            "2024-01-01T00:00:00Z",
            "test",
            2,
            "ABC",
            "DEF",
            vec!["a@x.com".into(), "b@x.com".into(), "c@x.com".into()],
        )
        .unwrap();
        let seed = derive_seed(&Sha256Hasher, &def);
        let ranked = rank_entrants(&Sha256Hasher, def.entrants(), &seed).unwrap();
        let allocation = allocate_units(&ranked, def.count()).unwrap();
        assemble(def, seed, ranked, allocation)
    }

    #[test]
    fn test_serializes_to_published_artifact() {
        assert_eq!(scenario_record().to_json(false).unwrap(), SCENARIO_JSON);
    }

    #[test]
    fn test_pretty_json_is_equivalent() {
        let pretty = scenario_record().to_json(true).unwrap();
        let a: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        let b: serde_json::Value = serde_json::from_str(SCENARIO_JSON).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entries_follow_input_order() {
        let record = scenario_record();
        let entrants: Vec<&str> = record.entries().iter().map(|&(_, e, _)| e).collect();
        assert_eq!(entrants, ["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_results_path_appends_suffix() {
        assert_eq!(
            results_path(Path::new("draws/spring.json")),
            PathBuf::from("draws/spring.json.results.json")
        );
        assert_eq!(
            results_path(Path::new("raffle")),
            PathBuf::from("raffle.results.json")
        );
    }

    #[test]
    fn test_write_record_creates_complete_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("raffle.json.results.json");
        write_record(&scenario_record(), &path, false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, SCENARIO_JSON);

        // Only the artifact remains; the temporary file was renamed away.
        let files: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_write_record_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();
        write_record(&scenario_record(), &path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SCENARIO_JSON);
    }

    #[test]
    fn test_write_record_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.json");
        let err = write_record(&scenario_record(), &path, false).unwrap_err();
        assert!(matches!(err, RaffleError::Io { .. }));
        assert!(!path.exists());
    }
}
