//! Round-robin unit allocation.
//!
//! Unit `i` goes to rank `i mod n`, restarting at rank 0 on every pass. The
//! closed form is used instead of walking every unit:
//!
//! ```text
//! units(r) = count / n + (1 if r < count % n else 0)
//! ```

use crate::error::{RaffleError, Result};
use crate::rank::RankedEntrantList;

/// Units received per entrant, in ranked order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationTable {
    rows: Vec<(String, u64)>,
}

impl AllocationTable {
    /// `(entrant, units)` pairs in ranked order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.rows.iter().map(|(e, u)| (e.as_str(), *u))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Units held by `entrant`, or `None` if it isn't in the draw.
    pub fn units_for(&self, entrant: &str) -> Option<u64> {
        self.rows.iter().find(|(e, _)| e == entrant).map(|(_, u)| *u)
    }

    /// Units held by the entrant at rank `r`.
    pub fn units_at(&self, r: usize) -> Option<u64> {
        self.rows.get(r).map(|(_, u)| *u)
    }

    /// Sum of all units; equals the draw's `count`.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|(_, u)| u).sum()
    }
}

/// Distribute `count` units over `ranked`.
pub fn allocate_units(ranked: &RankedEntrantList, count: u64) -> Result<AllocationTable> {
    if ranked.is_empty() {
        return Err(RaffleError::EmptyEntrantList);
    }

    let n = ranked.len() as u64;
    let base = count / n;
    let extra = count % n;

    let rows = ranked
        .iter()
        .enumerate()
        .map(|(r, entry)| {
            let bonus = u64::from((r as u64) < extra);
            (entry.entrant.clone(), base + bonus)
        })
        .collect();

    let table = AllocationTable { rows };
    log::debug!(
        "allocated {count} units over {n} entrants ({base} each, +1 for the first {extra})"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::RaffleDefinition;
    use crate::hasher::Sha256Hasher;
    use crate::rank::rank_entrants;
    use crate::seed::derive_seed;

    fn ranked(n: usize) -> RankedEntrantList {
        let entrants: Vec<String> = (0..n).map(|i| format!("entrant-{i}")).collect();
        let def = RaffleDefinition::new("t", "n", 1, "d", "s", entrants.clone()).unwrap();
        let seed = derive_seed(&Sha256Hasher, &def);
        rank_entrants(&Sha256Hasher, &entrants, &seed).unwrap()
    }

    /// Hand out units one at a time, the way the allocation is specified.
    fn walk(n: usize, count: u64) -> Vec<u64> {
        let mut units = vec![0u64; n];
        let mut index = 0;
        for _ in 0..count {
            if index >= n {
                index = 0;
            }
            units[index] += 1;
            index += 1;
        }
        units
    }

    #[test]
    fn test_closed_form_matches_unit_walk() {
        for n in 1..=7 {
            let list = ranked(n);
            for count in 1..=30 {
                let table = allocate_units(&list, count).unwrap();
                let got: Vec<u64> = table.iter().map(|(_, u)| u).collect();
                assert_eq!(got, walk(n, count), "n={n} count={count}");
            }
        }
    }

    #[test]
    fn test_conservation_and_fairness() {
        for (n, count) in [(1, 1), (3, 2), (5, 12), (10, 10), (9, 1000), (40, 3)] {
            let table = allocate_units(&ranked(n), count).unwrap();
            assert_eq!(table.total(), count);
            let max = table.iter().map(|(_, u)| u).max().unwrap();
            let min = table.iter().map(|(_, u)| u).min().unwrap();
            assert!(max - min <= 1, "n={n} count={count}");
        }
    }

    #[test]
    fn test_count_exceeding_entrants_wraps() {
        let list = ranked(5);
        let table = allocate_units(&list, 12).unwrap();
        let units: Vec<u64> = table.iter().map(|(_, u)| u).collect();
        assert_eq!(units, [3, 3, 2, 2, 2]);
    }

    #[test]
    fn test_count_equal_to_entrants_gives_one_each() {
        let table = allocate_units(&ranked(6), 6).unwrap();
        assert!(table.iter().all(|(_, u)| u == 1));
    }

    #[test]
    fn test_fewer_units_than_entrants() {
        let list = ranked(4);
        let table = allocate_units(&list, 1).unwrap();
        assert_eq!(table.units_at(0), Some(1));
        assert_eq!(table.units_at(3), Some(0));
        let winner = &list.get(0).unwrap().entrant;
        assert_eq!(table.units_for(winner), Some(1));
        assert_eq!(table.units_for("nobody"), None);
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let err = allocate_units(&RankedEntrantList::default(), 3).unwrap_err();
        assert!(matches!(err, RaffleError::EmptyEntrantList));
    }
}
