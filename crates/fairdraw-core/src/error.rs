//! Error taxonomy for a draw.
//!
//! Every variant is fatal: a draw either produces a complete, internally
//! consistent [`ResultRecord`](crate::ResultRecord) or nothing at all.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a draw.
#[derive(Debug, Error)]
pub enum RaffleError {
    /// A required field is missing, null, empty, or zero.
    #[error("invalid raffle definition: `{field}` is required ({reason})")]
    InvalidDefinition {
        field: &'static str,
        reason: &'static str,
    },

    /// The same entrant identity appears more than once.
    #[error("invalid raffle definition: entrant `{0}` is listed more than once")]
    DuplicateEntrant(String),

    /// No entrants to allocate units to.
    #[error("entrant list is empty, nothing to allocate")]
    EmptyEntrantList,

    /// Two entrants derived the same rank key.
    #[error("entrants `{first}` and `{second}` collide on rank key {key}")]
    DuplicateKeyCollision {
        first: String,
        second: String,
        key: String,
    },

    /// A published rank key is not valid hex or is wider than 256 bits.
    #[error("malformed rank key `{0}`")]
    MalformedRankKey(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RaffleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RaffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_definition_names_field() {
        let err = RaffleError::InvalidDefinition {
            field: "salt",
            reason: "second entropy source",
        };
        let msg = err.to_string();
        assert!(msg.contains("`salt`"));
        assert!(msg.contains("second entropy source"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = RaffleError::io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("/tmp/missing.json: "));
    }
}
