//! Human-readable renderings of a finished draw.

use crate::result::ResultRecord;

/// Per-entrant lines in ranked order: `"<entrant> wins <units>"`.
pub fn winner_lines(record: &ResultRecord) -> Vec<String> {
    record
        .allocation()
        .iter()
        .map(|(entrant, units)| format!("{entrant} wins {units}"))
        .collect()
}

/// Derived seed and numbered winning order, with 8-digit rank-key prefixes.
pub fn summary(record: &ResultRecord) -> String {
    let def = record.definition();
    let seed = record.seed();

    let mut out = format!(
        "Raffle:  {} ({} units, {} entrants)\n\
         Time:    {}\n\
         Key:     {}\n\
         Dice:    {}\n\
         Roll:    {}\n\
         \n\
         Winning order:\n",
        def.name(),
        def.count(),
        def.entrants().len(),
        def.time(),
        seed.key,
        seed.mixed_entropy,
        seed.roll,
    );

    let ranked = record.ranked().iter();
    for (i, (entry, (_, units))) in ranked.zip(record.allocation().iter()).enumerate() {
        let hex = entry.key.to_hex();
        let prefix = &hex[..hex.len().min(8)];
        out.push_str(&format!(
            "{:>4}. {} - {}... ({})\n",
            i + 1,
            entry.entrant,
            prefix,
            units
        ));
    }
    out
}
