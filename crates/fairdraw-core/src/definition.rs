//! Raffle definitions: the input document and its validated form.
//!
//! Input is parsed into [`RawRaffle`], where every field is optional, and then
//! checked field by field into an immutable [`RaffleDefinition`]. The parsed
//! document itself is kept alongside the validated fields and published
//! verbatim, key order and unrecognised fields included.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{RaffleError, Result};

/// A definition document exactly as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRaffle {
    pub time: Option<String>,
    pub name: Option<String>,
    pub count: Option<u64>,
    pub dice: Option<String>,
    pub salt: Option<String>,
    pub entrants: Option<Vec<String>>,
    #[serde(flatten)]
    pub annotations: Map<String, Value>,
}

/// A validated raffle definition.
///
/// Serializes to the document it was parsed from. Definitions built in code
/// serialize the six protocol fields in declaration order, then annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct RaffleDefinition {
    time: String,
    name: String,
    count: u64,
    dice: String,
    salt: String,
    entrants: Vec<String>,
    document: Map<String, Value>,
}

impl RaffleDefinition {
    /// Build a definition with no annotations, validating every field.
    pub fn new(
        time: impl Into<String>,
        name: impl Into<String>,
        count: u64,
        dice: impl Into<String>,
        salt: impl Into<String>,
        entrants: Vec<String>,
    ) -> Result<Self> {
        Self::try_from(RawRaffle {
            time: Some(time.into()),
            name: Some(name.into()),
            count: Some(count),
            dice: Some(dice.into()),
            salt: Some(salt.into()),
            entrants: Some(entrants),
            annotations: Map::new(),
        })
    }

    /// Declared timestamp, opaque.
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total units to distribute.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// First entropy source.
    pub fn dice(&self) -> &str {
        &self.dice
    }

    /// Second entropy source.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Entrant identities in input order.
    pub fn entrants(&self) -> &[String] {
        &self.entrants
    }

    /// The definition document as published in the record's `raffle` field.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

impl Serialize for RaffleDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl TryFrom<RawRaffle> for RaffleDefinition {
    type Error = RaffleError;

    fn try_from(raw: RawRaffle) -> Result<Self> {
        let time = required_text(raw.time, "time", "timestamp for raffle")?;
        let name = required_text(raw.name, "name", "string name of the raffle")?;
        let count = match raw.count {
            Some(n) if n > 0 => n,
            _ => {
                return Err(RaffleError::InvalidDefinition {
                    field: "count",
                    reason: "number of distributions for this raffle",
                });
            }
        };
        let dice = required_text(
            raw.dice,
            "dice",
            "an unpredictable time-forward string but past immutable",
        )?;
        let salt = required_text(
            raw.salt,
            "salt",
            "a second unpredictable time-forward string but past immutable (e.g. a block hash)",
        )?;
        let entrants = raw.entrants.ok_or(RaffleError::InvalidDefinition {
            field: "entrants",
            reason: "distinct list of entrants by external identity (e.g. email addresses)",
        })?;

        let mut seen = HashSet::with_capacity(entrants.len());
        for entrant in &entrants {
            if !seen.insert(entrant.as_str()) {
                return Err(RaffleError::DuplicateEntrant(entrant.clone()));
            }
        }

        for field in raw.annotations.keys() {
            log::warn!("carrying unrecognised field `{field}` through to the result record");
        }

        let mut document = Map::new();
        document.insert("time".into(), Value::from(time.as_str()));
        document.insert("name".into(), Value::from(name.as_str()));
        document.insert("count".into(), Value::from(count));
        document.insert("dice".into(), Value::from(dice.as_str()));
        document.insert("salt".into(), Value::from(salt.as_str()));
        document.insert("entrants".into(), Value::from(entrants.clone()));
        document.extend(raw.annotations);

        Ok(Self {
            time,
            name,
            count,
            dice,
            salt,
            entrants,
            document,
        })
    }
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    reason: &'static str,
) -> Result<String> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(RaffleError::InvalidDefinition { field, reason }),
    }
}

/// Validate an already parsed definition document, keeping it verbatim.
///
/// `path` only labels errors.
pub fn definition_from_value(path: &Path, value: Value) -> Result<RaffleDefinition> {
    let raw = RawRaffle::deserialize(&value).map_err(|e| RaffleError::json(path, e))?;
    let mut definition = RaffleDefinition::try_from(raw)?;
    if let Value::Object(document) = value {
        definition.document = document;
    }
    Ok(definition)
}

/// Parse and validate a definition document.
pub fn parse_definition(path: &Path, text: &str) -> Result<RaffleDefinition> {
    let value: Value = serde_json::from_str(text).map_err(|e| RaffleError::json(path, e))?;
    definition_from_value(path, value)
}

/// Read, parse and validate the definition at `path`.
pub fn load_definition(path: &Path) -> Result<RaffleDefinition> {
    let text = fs::read_to_string(path).map_err(|e| RaffleError::io(path, e))?;
    let definition = parse_definition(path, &text)?;
    log::info!(
        "loaded raffle `{}`: {} units across {} entrants",
        definition.name(),
        definition.count(),
        definition.entrants().len()
    );
    Ok(definition)
}
