//! # fairdraw-core
//!
//! **Raffle draws anyone can recompute.**
//!
//! `fairdraw-core` allocates a fixed number of prize units among a list of
//! entrants using only public, tamper-evident entropy — a future statement, a
//! future block hash — so nobody can predict the outcome when the raffle is
//! declared and everybody can check it afterwards.
//!
//! ## Quick Start
//!
//! ```
//! use fairdraw_core::{RaffleDefinition, Sha256Hasher, draw};
//!
//! let definition = RaffleDefinition::new(
//!     "2024-01-01T00:00:00Z",
//!     "test",
//!     2,
//!     "ABC",
//!     "DEF",
//!     vec!["a@x.com".into(), "b@x.com".into(), "c@x.com".into()],
//! )?;
//!
//! let record = draw(&Sha256Hasher, definition)?;
//! assert_eq!(record.allocation().total(), 2);
//! # Ok::<(), fairdraw_core::RaffleError>(())
//! ```
//!
//! ## Architecture
//!
//! Definition → Seed → Ranking → Allocation → Record
//!
//! - **Seed**: `key`, `mixed_entropy` and `roll` digests bind the draw to its
//!   declared parameters and both entropy sources.
//! - **Ranking**: every entrant's digest is XORed with `roll`; ascending
//!   256-bit keys give the order.
//! - **Allocation**: units are dealt round-robin over that order.
//! - **Record**: every intermediate value is kept so the draw can be verified
//!   with [`verify_record`].

pub mod allocate;
pub mod definition;
pub mod error;
pub mod hasher;
pub mod rank;
pub mod report;
pub mod result;
pub mod seed;
pub mod verify;

pub use allocate::{AllocationTable, allocate_units};
pub use definition::{
    RaffleDefinition, RawRaffle, definition_from_value, load_definition, parse_definition,
};
pub use error::{RaffleError, Result};
pub use hasher::{DIGEST_LEN, Digest, Hasher, Sha256Hasher};
pub use rank::{RankKey, RankedEntrant, RankedEntrantList, entrant_key, rank_entrants};
pub use report::{summary, winner_lines};
pub use result::{RESULTS_SUFFIX, ResultRecord, assemble, results_path, write_record};
pub use seed::{DerivedSeed, derive_seed};
pub use verify::{Mismatch, PublishedRecord, Verification, load_published, verify_record};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the full pipeline over a validated definition.
pub fn draw<H: Hasher + ?Sized>(hasher: &H, definition: RaffleDefinition) -> Result<ResultRecord> {
    let seed = derive_seed(hasher, &definition);
    let ranked = rank_entrants(hasher, definition.entrants(), &seed)?;
    let allocation = allocate_units(&ranked, definition.count())?;
    log::info!(
        "drew `{}`: {} units over {} entrants",
        definition.name(),
        allocation.total(),
        ranked.len()
    );
    Ok(assemble(definition, seed, ranked, allocation))
}
